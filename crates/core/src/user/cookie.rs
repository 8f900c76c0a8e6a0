//! Cookie header parsing for session resolution.

use std::collections::HashMap;

use crate::storage::StoreError;

use super::SESSION_ATTR;

/// Parse a raw `Cookie` header into name/value pairs.
///
/// Pairs are separated by `;`. Names are trimmed and empty names dropped;
/// values keep everything after the first `=` and are percent-decoded.
/// A later duplicate name overwrites an earlier one.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for pair in header.split(';') {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        cookies.insert(name.to_string(), value);
    }
    cookies
}

/// Extract the session id from an optional `Cookie` header.
pub fn session_from_cookie(header: Option<&str>) -> Result<String, StoreError> {
    let header = header.ok_or_else(|| StoreError::BadInput("Headers are bad.".to_string()))?;

    parse_cookie_header(header)
        .remove(SESSION_ATTR)
        .ok_or_else(|| {
            StoreError::BadInput(format!("No session cookie '{SESSION_ATTR}' in header"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_cookies() {
        let cookies = parse_cookie_header("sessionid=abc123; other=x");
        assert_eq!(cookies.get("sessionid").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("other").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_value_keeps_embedded_equals() {
        let cookies = parse_cookie_header("token=a=b=c");
        assert_eq!(cookies.get("token").map(String::as_str), Some("a=b=c"));
    }

    #[test]
    fn test_value_is_percent_decoded() {
        let cookies = parse_cookie_header("name=hello%20world");
        assert_eq!(cookies.get("name").map(String::as_str), Some("hello world"));
    }

    #[test]
    fn test_empty_names_are_dropped() {
        let cookies = parse_cookie_header(";=orphan; ;a=1");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_session_from_cookie() {
        let session = session_from_cookie(Some("other=x; sessionid=abc123")).unwrap();
        assert_eq!(session, "abc123");
    }

    #[test]
    fn test_absent_header_is_bad_input() {
        let err = session_from_cookie(None).unwrap_err();
        assert_eq!(err, StoreError::BadInput("Headers are bad.".to_string()));
    }

    #[test]
    fn test_missing_session_cookie_is_bad_input() {
        let err = session_from_cookie(Some("other=x")).unwrap_err();
        assert!(matches!(err, StoreError::BadInput(_)));
    }
}
