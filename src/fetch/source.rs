use thiserror::Error;

use crate::record::ProfileRecord;

/// Failure to produce a snapshot for one username. All variants are local to
/// that username: the caller skips it for the current run and leaves its
/// prior state untouched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("no profile fields found in response")]
    Parse,
    #[error("missing credential: {0}")]
    Credentials(String),
}

/// A profile upstream. One implementation per transport (scraped HTML page,
/// metrics API); all produce the same normalized record.
pub trait ProfileSource {
    fn name(&self) -> &'static str;

    /// Fetch one username's current public metrics. Must not touch disk;
    /// fields the upstream omits stay unknown, never defaulted.
    fn fetch(&self, username: &str) -> Result<ProfileRecord, FetchError>;
}
