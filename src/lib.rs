pub mod cli;
pub mod config;
pub mod fetch;
pub mod history;
pub mod record;
pub mod report;
pub mod roster;
pub mod run;
pub mod store;
pub mod util;
