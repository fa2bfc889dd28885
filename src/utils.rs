/// Utility functions
use crate::errors::{ApiError, ApiResult};
use serde_json::Value;

/// Treat missing and blank query values alike
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Coerce a textual coordinate to f64, checking it lies within `bound`
pub fn coordinate(field: &str, raw: Option<&str>, bound: f64) -> ApiResult<Option<f64>> {
    let Some(text) = present(raw) else {
        return Ok(None);
    };

    let value: f64 = text
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("{} must be a valid number", field)))?;

    if !(-bound..=bound).contains(&value) {
        return Err(ApiError::InvalidInput(format!(
            "{} must be between -{} and {}",
            field, bound, bound
        )));
    }

    Ok(Some(value))
}

/// Pick the provider's own error text out of a non-2xx body.
///
/// Prefers a JSON `message` field, then the raw body.
pub fn upstream_message(body: &str) -> Option<String> {
    let field = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").cloned());

    let msg = match field {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => body.trim().to_string(),
        Some(other) => other.to_string(),
    };

    if msg.trim().is_empty() {
        None
    } else {
        Some(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_from_text() {
        assert_eq!(coordinate("lat", Some("51.5"), 90.0).unwrap(), Some(51.5));
    }

    #[test]
    fn test_coordinate_zero_is_present() {
        assert_eq!(coordinate("lon", Some("0"), 180.0).unwrap(), Some(0.0));
        assert_eq!(coordinate("lon", Some("0.0"), 180.0).unwrap(), Some(0.0));
    }

    #[test]
    fn test_coordinate_blank_is_absent() {
        assert_eq!(coordinate("lat", None, 90.0).unwrap(), None);
        assert_eq!(coordinate("lat", Some("  "), 90.0).unwrap(), None);
    }

    #[test]
    fn test_coordinate_invalid_text() {
        match coordinate("lat", Some("north"), 90.0) {
            Err(ApiError::InvalidInput(msg)) => assert_eq!(msg, "lat must be a valid number"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_coordinate_out_of_range() {
        match coordinate("lon", Some("181"), 180.0) {
            Err(ApiError::InvalidInput(msg)) => {
                assert_eq!(msg, "lon must be between -180 and 180")
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(coordinate("lat", Some("NaN"), 90.0).is_err());
    }

    #[test]
    fn test_upstream_message_from_json() {
        let body = r#"{"cod":401, "message": "invalid api key"}"#;
        assert_eq!(upstream_message(body), Some("invalid api key".to_string()));
    }

    #[test]
    fn test_upstream_message_falls_back_to_raw() {
        assert_eq!(
            upstream_message("Bad Gateway"),
            Some("Bad Gateway".to_string())
        );
        let body = r#"{"cod":"500"}"#;
        assert_eq!(upstream_message(body), Some(body.to_string()));
    }

    #[test]
    fn test_upstream_message_empty() {
        assert_eq!(upstream_message(""), None);
        assert_eq!(upstream_message(r#"{"message": ""}"#), None);
    }
}
