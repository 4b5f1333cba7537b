//! Common API utilities
//!
//! This module contains shared utilities used across multiple API endpoints.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{validate, FieldSpec};

/// Parse a raw request body as JSON.
///
/// Detail handlers call this only after the primary key has resolved, so a
/// garbage body against a missing key still yields 404.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Check a parsed body against a declared schema, then decode it into the
/// resource's input type.
pub fn decode_input<T: DeserializeOwned>(
    fields: &[FieldSpec],
    body: Value,
) -> Result<T, ApiError> {
    validate(fields, &body)?;
    serde_json::from_value(body)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("validated body failed to decode: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StudentInput, STUDENT_FIELDS};
    use serde_json::json;

    #[test]
    fn test_parse_body_rejects_garbage() {
        let err = parse_body(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_decode_input_validates_first() {
        let err = decode_input::<StudentInput>(STUDENT_FIELDS, json!({ "name": "Priya" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_decode_input_ignores_unknown_members() {
        let input: StudentInput = decode_input(
            STUDENT_FIELDS,
            json!({ "name": "Priya", "branch": "CSE", "id": 42, "extra": true }),
        )
        .unwrap();
        assert_eq!(input.name, "Priya");
        assert_eq!(input.branch, "CSE");
    }
}
