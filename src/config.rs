//! Configuration management for CodeRunner
//!
//! Loads configuration from environment variables and an optional .env file.

use crate::{Error, Result};

/// Default primary engine: the hosted Piston API
const DEFAULT_PRIMARY_URL: &str = "https://emkc.org/api/v2/piston";

/// Default secondary engine: a self-hosted Piston instance
const DEFAULT_SECONDARY_URL: &str = "http://localhost:2000/api/v2";

/// Default client-side request timeout in seconds.
///
/// Must stay above the engines' own per-run ceilings (typically a few
/// seconds) so that a timed-out run is reported by the engine as a kill,
/// not masked as a client-side cancellation.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one execution engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Diagnostic name for this engine
    pub name: String,
    /// Base URL of the engine's API (no trailing slash)
    pub base_url: String,
    /// Client-side request timeout in seconds
    pub timeout_secs: u64,
}

/// Main configuration for the execution subsystem
#[derive(Debug, Clone)]
pub struct Config {
    /// Primary engine settings
    pub primary: EngineConfig,
    /// Secondary (failover) engine settings
    pub secondary: EngineConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let timeout_secs = std::env::var("ENGINE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = Config {
            primary: EngineConfig {
                name: "primary".to_string(),
                base_url: trim_base_url(
                    &std::env::var("ENGINE_PRIMARY_URL")
                        .unwrap_or_else(|_| DEFAULT_PRIMARY_URL.to_string()),
                ),
                timeout_secs,
            },
            secondary: EngineConfig {
                name: "secondary".to_string(),
                base_url: trim_base_url(
                    &std::env::var("ENGINE_SECONDARY_URL")
                        .unwrap_or_else(|_| DEFAULT_SECONDARY_URL.to_string()),
                ),
                timeout_secs,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Create a config pointing at the default engine URLs
    pub fn default_urls() -> Self {
        Config {
            primary: EngineConfig {
                name: "primary".to_string(),
                base_url: DEFAULT_PRIMARY_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            secondary: EngineConfig {
                name: "secondary".to_string(),
                base_url: DEFAULT_SECONDARY_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }

    /// Validate that both engine URLs are well-formed http(s) URLs
    pub fn validate(&self) -> Result<()> {
        for engine in [&self.primary, &self.secondary] {
            let parsed = url::Url::parse(&engine.base_url).map_err(|e| {
                Error::Config(format!(
                    "Invalid {} engine URL '{}': {}",
                    engine.name, engine.base_url, e
                ))
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(Error::Config(format!(
                    "Invalid {} engine URL '{}': expected http or https",
                    engine.name, engine.base_url
                )));
            }
            if engine.timeout_secs == 0 {
                return Err(Error::Config(format!(
                    "{} engine timeout must be non-zero",
                    engine.name
                )));
            }
        }
        Ok(())
    }
}

/// Strip a trailing slash so path concatenation stays predictable
fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_validate() {
        let config = Config::default_urls();
        assert!(config.validate().is_ok());
        assert_eq!(config.primary.name, "primary");
        assert_eq!(config.secondary.name, "secondary");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let mut config = Config::default_urls();
        config.secondary.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unparsable_url() {
        let mut config = Config::default_urls();
        config.primary.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default_urls();
        config.primary.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            trim_base_url("http://localhost:2000/api/v2/"),
            "http://localhost:2000/api/v2"
        );
        assert_eq!(trim_base_url("  https://emkc.org/api/v2/piston "), "https://emkc.org/api/v2/piston");
    }
}
