//! JSON-shape validation of generation replies: a tagged parse that either
//! yields the fields the caller asked for or names what is missing.

use serde_json::Value;

use crate::utils::errors::AppError;

/// Extract the outermost JSON object from a reply. Providers occasionally
/// wrap the object in prose or code fences even in JSON mode.
pub fn parse_json_object(response: &str) -> Result<Value, AppError> {
    let start = response.find('{');
    let end = response.rfind('}');

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(AppError::internal("No valid JSON found in response")),
    };

    serde_json::from_str(&response[start..=end])
        .map_err(|e| AppError::internal(format!("Failed to parse JSON response: {}", e)))
}

/// Require each named field to be present and non-null.
pub fn require_fields(parsed: &Value, required_fields: &[&str]) -> Result<(), AppError> {
    for field in required_fields {
        if parsed.get(field).map_or(true, Value::is_null) {
            return Err(AppError::internal(format!(
                "Missing required field: {}",
                field
            )));
        }
    }
    Ok(())
}

/// Require `field` to be a non-empty array whose entries all carry
/// `entry_fields`.
pub fn require_object_array(
    parsed: &Value,
    field: &str,
    entry_fields: &[&str],
) -> Result<(), AppError> {
    let entries = parsed
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::internal(format!("Missing required field: {}", field)))?;

    if entries.is_empty() {
        return Err(AppError::internal(format!(
            "Missing required field: {}",
            field
        )));
    }

    for entry in entries {
        require_fields(entry, entry_fields)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_plain_object() {
        let value = parse_json_object(r#"{"title": "Rust"}"#).unwrap();
        assert_eq!(value["title"], "Rust");
    }

    #[test]
    fn test_parses_object_wrapped_in_prose() {
        let reply = "Here you go:\n```json\n{\"title\": \"Rust\"}\n```";
        let value = parse_json_object(reply).unwrap();
        assert_eq!(value["title"], "Rust");
    }

    #[test]
    fn test_rejects_reply_without_object() {
        let err = parse_json_object("no json here").unwrap_err();
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.to_string(), "No valid JSON found in response");
    }

    #[test]
    fn test_rejects_malformed_object() {
        let err = parse_json_object(r#"{"title": }"#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse JSON response"));
    }

    #[test]
    fn test_require_fields_names_the_missing_field() {
        let value = json!({"title": "Rust", "slug": null});
        let err = require_fields(&value, &["title", "slug"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: slug");
    }

    #[test]
    fn test_require_fields_passes_when_present() {
        let value = json!({"title": "Rust", "tags": []});
        assert!(require_fields(&value, &["title", "tags"]).is_ok());
    }

    #[test]
    fn test_require_object_array_checks_entries() {
        let value = json!({"modules": [
            {"title": "Intro", "description": "d", "objectives": []},
            {"title": "Next", "description": "d"}
        ]});
        let err =
            require_object_array(&value, "modules", &["title", "description", "objectives"])
                .unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: objectives");
    }

    #[test]
    fn test_require_object_array_rejects_empty() {
        let value = json!({"modules": []});
        let err = require_object_array(&value, "modules", &["title"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: modules");
    }
}
