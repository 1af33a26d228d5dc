pub mod api;
pub mod page;
pub mod source;
pub mod text;

pub use source::{FetchError, ProfileSource};

use crate::config::{Config, SourceKind};

/// Build the configured upstream source.
pub fn source_for(config: &Config) -> Result<Box<dyn ProfileSource>, Box<dyn std::error::Error>> {
    match config.source {
        SourceKind::Page => Ok(Box::new(page::PageSource::new(
            &config.page_base_url,
            &config.user_agent,
            config.timeout,
        ))),
        SourceKind::Api => {
            let endpoint = config
                .api_endpoint
                .as_deref()
                .ok_or("api source selected but no api_endpoint configured")?;

            Ok(Box::new(api::ApiSource::new(
                endpoint,
                &config.api_token_env,
                config.timeout,
            )))
        }
    }
}
