use std::fs;
use std::path::Path;

use reqwest::Url;
use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

/// Configuration for a single page check run.
///
/// Every field has a default, so a missing config file (when no path was
/// given) yields the stock profile-page check.
#[derive(Deserialize, Debug, Clone)]
pub struct CheckConfig {
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Expected name substring. Must already be lower-cased by the caller;
    /// the check lower-cases the page body but never this value.
    #[serde(default = "default_expected_name")]
    pub expected_name: String,

    /// Literal HTML fragment searched for in the raw body, quote characters
    /// and attribute name included.
    #[serde(default = "default_expected_link_fragment")]
    pub expected_link_fragment: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_target_url() -> String {
    "https://pablosebastiangomez-dev.github.io/professional-profile/".to_string()
}

fn default_expected_name() -> String {
    "pablo sebastian gómez".to_string()
}

fn default_expected_link_fragment() -> String {
    r#"href="https://github.com/pablosebastiangomez-dev""#.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            expected_name: default_expected_name(),
            expected_link_fragment: default_expected_link_fragment(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl CheckConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// With no path, every field takes its default. An explicit path must
    /// exist and parse; a partial file is fine, missing keys default.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path_str) => {
                let path = Path::new(path_str);
                let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.target_url.is_empty() {
            return Err(ConfigError::InvalidTargetUrl {
                url: self.target_url.clone(),
                reason: "URL is empty".to_string(),
            });
        }
        let parsed = Url::parse(&self.target_url).map_err(|e| ConfigError::InvalidTargetUrl {
            url: self.target_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidTargetUrl {
                url: self.target_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if self.expected_name != self.expected_name.to_lowercase() {
            // The name check lower-cases the body only; an upper-cased
            // expectation can never match.
            warn!(
                expected_name = %self.expected_name,
                "expected_name is not lower-cased; the name presence check will likely never pass"
            );
        }
        Ok(())
    }
}
