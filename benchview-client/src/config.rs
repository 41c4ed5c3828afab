//! Configuration loading for the benchview client.
//!
//! All fields are required. No defaults.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (set BENCHVIEW_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ClientConfig {
    /// Load from the path named by the `BENCHVIEW_CONFIG` environment
    /// variable.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("BENCHVIEW_CONFIG").map_err(|_| ConfigError::MissingConfigPath)?;
        Self::from_file(Path::new(&path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must be an http(s) URL".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be positive".to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_complete_config() {
        let config: ClientConfig = toml::from_str(
            r#"
            api_base_url = "https://api.example.org/api/v1"
            request_timeout_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.org/api/v1");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result: Result<ClientConfig, _> = toml::from_str(
            r#"
            api_base_url = "https://api.example.org"
            request_timeout_ms = 5000
            retries = 3
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = ClientConfig {
            api_base_url: "ftp://api.example.org".to_string(),
            request_timeout_ms: 5000,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "api_base_url",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            api_base_url: "https://api.example.org".to_string(),
            request_timeout_ms: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                ..
            })
        ));
    }
}
