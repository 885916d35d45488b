use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check the `X-API-Key` header against the configured key. With no key
/// configured every request is refused.
pub fn has_valid_api_key(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return false;
    };
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|provided| constant_time_compare(provided, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("secret123", "secret123"));
        assert!(!constant_time_compare("secret123", "secret124"));
        assert!(!constant_time_compare("secret123", "secret12"));
        assert!(!constant_time_compare("", "secret"));
    }

    #[test]
    fn test_api_key_header() {
        let mut headers = HeaderMap::new();
        assert!(!has_valid_api_key(&headers, Some("k1")));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("k1"));
        assert!(has_valid_api_key(&headers, Some("k1")));
        assert!(!has_valid_api_key(&headers, Some("k2")));
    }

    #[test]
    fn test_no_configured_key_refuses_everything() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static(""));
        assert!(!has_valid_api_key(&headers, None));
    }
}
