use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match reqwest::Url::parse(&config.provider.base_url) {
        Ok(url) if url.cannot_be_a_base() => errors.push(format!(
            "provider.base_url: '{}' cannot be used as a base URL",
            config.provider.base_url
        )),
        Ok(_) => {}
        Err(e) => errors.push(format!(
            "provider.base_url: invalid URL '{}' - {}",
            config.provider.base_url, e
        )),
    }

    if let Some(ref timeout) = config.provider.timeout {
        match humantime::parse_duration(timeout) {
            Ok(d) if d.is_zero() => {
                errors.push("provider.timeout: must be greater than zero".to_string())
            }
            Ok(_) => {}
            Err(e) => errors.push(format!(
                "provider.timeout: invalid duration '{}' - {}",
                timeout, e
            )),
        }
    }

    if let Some(ref key) = config.provider.api_key {
        if key.trim().is_empty() {
            errors.push("provider.api_key: must not be empty when set".to_string());
        }
    }

    if config.default_limit <= 0 {
        errors.push("default_limit: must be positive".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.provider.base_url = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("provider.base_url"));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = Config::default();
        config.provider.timeout = Some("soon".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("provider.timeout"));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.provider.timeout = Some("0s".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.provider.base_url = "nope".to_string(); // Error 1
        config.provider.api_key = Some("  ".to_string()); // Error 2
        config.default_limit = 0; // Error 3
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
