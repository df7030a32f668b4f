use crate::error::ScoreError;

/// Review limit used when the caller does not supply one
pub const DEFAULT_LIMIT: i64 = 300;

/// Validate a scoring request's inputs.
/// Returns the trimmed domain and the effective review limit.
pub fn validate_request(domain: &str, limit: Option<i64>) -> Result<(String, usize), ScoreError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ScoreError::InvalidArgument(
            "domain: must not be empty".to_string(),
        ));
    }

    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if limit <= 0 {
        return Err(ScoreError::InvalidArgument(format!(
            "limit: must be positive, got {}",
            limit
        )));
    }
    let limit = usize::try_from(limit)
        .map_err(|_| ScoreError::InvalidArgument(format!("limit: too large, got {}", limit)))?;

    Ok((domain.to_string(), limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let (domain, limit) = validate_request(" example.com ", Some(50)).unwrap();
        assert_eq!(domain, "example.com");
        assert_eq!(limit, 50);
    }

    #[test]
    fn test_default_limit() {
        let (_, limit) = validate_request("example.com", None).unwrap();
        assert_eq!(limit, 300);
    }

    #[test]
    fn test_empty_domain() {
        let result = validate_request("   ", Some(10));
        assert!(matches!(result, Err(ScoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_limit() {
        let result = validate_request("example.com", Some(0));
        assert!(matches!(result, Err(ScoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_negative_limit() {
        let result = validate_request("example.com", Some(-5));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("limit"));
    }
}
