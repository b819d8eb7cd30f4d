use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the checker configuration.
///
/// Failures at check time (network faults, unexpected status codes, missing
/// substrings) are deliberately not represented here: they surface as failed
/// [`crate::report::CheckOutcome`]s so one broken check never aborts the rest.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid target URL '{url}': {reason}")]
    InvalidTargetUrl { url: String, reason: String },
}
