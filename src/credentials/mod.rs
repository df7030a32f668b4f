use crate::config::Config;

/// Environment variable name for providing the review provider API key
pub const ENV_API_KEY_VAR: &str = "TRUSTSCORE_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("No API key found. Set TRUSTSCORE_API_KEY or provider.api_key in the config file")]
    ApiKeyMissing,
}

/// Check for an API key in the TRUSTSCORE_API_KEY environment variable.
/// Returns Some(key) if the env var is set and non-empty, None otherwise.
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var(ENV_API_KEY_VAR).ok().and_then(non_empty)
}

/// Resolve the API key: environment first, then config file
pub fn resolve_api_key(config: &Config) -> Result<String, CredentialError> {
    select_api_key(get_api_key_from_env(), config)
}

fn select_api_key(env_key: Option<String>, config: &Config) -> Result<String, CredentialError> {
    env_key
        .or_else(|| config.provider.api_key.clone().and_then(non_empty))
        .ok_or(CredentialError::ApiKeyMissing)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        let mut config = Config::default();
        config.provider.api_key = key.map(str::to_string);
        config
    }

    #[test]
    fn test_env_key_wins_over_config() {
        let key = select_api_key(Some("from-env".to_string()), &config_with_key(Some("from-file")));
        assert_eq!(key.unwrap(), "from-env");
    }

    #[test]
    fn test_falls_back_to_config_key() {
        let key = select_api_key(None, &config_with_key(Some("  from-file \n")));
        assert_eq!(key.unwrap(), "from-file");
    }

    #[test]
    fn test_missing_key() {
        let result = select_api_key(None, &config_with_key(Some("   ")));
        assert!(matches!(result, Err(CredentialError::ApiKeyMissing)));
        assert!(result.unwrap_err().to_string().contains(ENV_API_KEY_VAR));
    }
}
