use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::scoring::DEFAULT_LIMIT;

/// Review provider API root
pub const DEFAULT_BASE_URL: &str = "https://api.trustpilot.com/v1";

/// Per-request HTTP timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// provider:
///   base_url: "https://api.trustpilot.com/v1"
///   api_key: "your-api-key"
///   timeout: "30s"
/// default_limit: 300
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Reviews counted when no limit is given on the command line
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overridden by the TRUSTSCORE_API_KEY environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout as a duration string, e.g. "30s" or "1m"
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout: Some("30s".to_string()),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.timeout, Some("30s".to_string()));
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.default_limit, 300);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
provider:
  api_key: "secret"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.provider.api_key, Some("secret".to_string()));
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert!(config.provider.timeout.is_none());
        assert_eq!(config.default_limit, 300);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
provider:
  base_url: "https://reviews.example.test/api"
  api_key: "secret"
  timeout: "10s"
default_limit: 50
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.provider.base_url, "https://reviews.example.test/api");
        assert_eq!(config.provider.timeout, Some("10s".to_string()));
        assert_eq!(config.default_limit, 50);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "default_limt: 50\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
