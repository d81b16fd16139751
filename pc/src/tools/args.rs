//! Argument extraction for tool inputs
//!
//! Missing and `null` optional arguments read as absent. Wrong types are
//! validation errors, reported before any document is fetched.

use serde_json::Value;

use crate::catalog::CatalogError;

fn invalid(key: &str, expected: &str, got: &Value) -> CatalogError {
    CatalogError::Validation(format!("{} must be {}, got {}", key, expected, got))
}

/// Optional string argument
pub fn optional_str(input: &Value, key: &str) -> Result<Option<String>, CatalogError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(key, "a string", other)),
    }
}

/// Optional non-negative integer; numeric strings are accepted
pub fn optional_count(input: &Value, key: &str) -> Result<Option<usize>, CatalogError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_count(v).map(Some).ok_or_else(|| invalid(key, "a non-negative integer", v)),
    }
}

/// Required non-blank string argument
pub fn required_str(input: &Value, key: &str) -> Result<String, CatalogError> {
    match optional_str(input, key)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(CatalogError::Validation(format!("{} is required", key))),
    }
}

/// Required prompt id; numeric strings are accepted
pub fn required_id(input: &Value, key: &str) -> Result<u64, CatalogError> {
    match input.get(key) {
        None | Some(Value::Null) => Err(CatalogError::Validation(format!("{} is required", key))),
        Some(v) => parse_u64(v).ok_or_else(|| invalid(key, "a non-negative integer", v)),
    }
}

fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_count(value: &Value) -> Option<usize> {
    parse_u64(value).map(|n| usize::try_from(n).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_str() {
        let input = json!({"query": "email", "tag": null, "limit": 3});
        assert_eq!(optional_str(&input, "query").unwrap(), Some("email".to_string()));
        assert_eq!(optional_str(&input, "tag").unwrap(), None);
        assert_eq!(optional_str(&input, "missing").unwrap(), None);
        assert!(optional_str(&input, "limit").unwrap_err().is_validation());
    }

    #[test]
    fn test_optional_count() {
        let input = json!({"a": 5, "b": "7", "c": -1, "d": "lots", "e": 2.5});
        assert_eq!(optional_count(&input, "a").unwrap(), Some(5));
        assert_eq!(optional_count(&input, "b").unwrap(), Some(7));
        assert!(optional_count(&input, "c").is_err());
        assert!(optional_count(&input, "d").is_err());
        assert!(optional_count(&input, "e").is_err());
        assert_eq!(optional_count(&input, "z").unwrap(), None);
    }

    #[test]
    fn test_required_id() {
        assert_eq!(required_id(&json!({"id": 42}), "id").unwrap(), 42);
        assert_eq!(required_id(&json!({"id": "42"}), "id").unwrap(), 42);

        let err = required_id(&json!({}), "id").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: id is required");
        assert!(required_id(&json!({"id": "abc"}), "id").is_err());
    }

    #[test]
    fn test_required_str_rejects_blank() {
        assert!(required_str(&json!({"pack_title": "  "}), "pack_title").is_err());
        assert!(required_str(&json!({}), "pack_title").is_err());
        assert_eq!(
            required_str(&json!({"pack_title": "Sales Pack"}), "pack_title").unwrap(),
            "Sales Pack"
        );
    }
}
