//! Declared field schemas and request body validation
//!
//! Each resource declares its external representation as a flat list of
//! [`FieldSpec`] entries. Incoming bodies are checked against that list
//! before any store mutation, and every violation is collected into a
//! field-keyed error map.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Value kind a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string, must not be blank
    Text,
    /// JSON integer
    Integer,
}

/// A single declared field: name, kind, and presence constraint
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Field-keyed validation error map.
///
/// Keys are field names (or `non_field_errors` for body-level problems),
/// values are the list of violated rule descriptions. Serializes as a plain
/// JSON object, which is the wire shape of a 400 response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

/// Key used for errors that are not attributable to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "validation failed for: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a parsed JSON body against a declared schema.
///
/// All violations are collected; members not named in the schema (including
/// a client-supplied `id`) are ignored.
pub fn validate(fields: &[FieldSpec], body: &Value) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = body.as_object() else {
        errors.push(NON_FIELD_ERRORS, "Invalid data. Expected an object.");
        return Err(errors);
    };

    for field in fields {
        match object.get(field.name) {
            None => {
                if field.required {
                    errors.push(field.name, "This field is required.");
                }
            }
            Some(Value::Null) => {
                errors.push(field.name, "This field may not be null.");
            }
            Some(value) => match field.kind {
                FieldKind::Text => match value.as_str() {
                    Some(s) if s.trim().is_empty() => {
                        errors.push(field.name, "This field may not be blank.");
                    }
                    Some(_) => {}
                    None => {
                        errors.push(field.name, "Not a valid string.");
                    }
                },
                FieldKind::Integer => {
                    if value.as_i64().is_none() {
                        errors.push(field.name, "A valid integer is required.");
                    }
                }
            },
        }
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
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "count",
            kind: FieldKind::Integer,
            required: true,
        },
    ];

    fn messages_for<'a>(errors: &'a ValidationErrors, field: &str) -> &'a [String] {
        errors.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    #[test]
    fn test_valid_body_passes() {
        let body = json!({ "name": "Ana", "count": 3 });
        assert!(validate(FIELDS, &body).is_ok());
    }

    #[test]
    fn test_extra_members_ignored() {
        let body = json!({ "name": "Ana", "count": 3, "id": 99, "unknown": true });
        assert!(validate(FIELDS, &body).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let body = json!({ "count": 3 });
        let errors = validate(FIELDS, &body).unwrap_err();
        assert_eq!(messages_for(&errors, "name"), ["This field is required."]);
    }

    #[test]
    fn test_null_field() {
        let body = json!({ "name": null, "count": 3 });
        let errors = validate(FIELDS, &body).unwrap_err();
        assert_eq!(messages_for(&errors, "name"), ["This field may not be null."]);
    }

    #[test]
    fn test_blank_text_rejected() {
        let body = json!({ "name": "   ", "count": 3 });
        let errors = validate(FIELDS, &body).unwrap_err();
        assert_eq!(messages_for(&errors, "name"), ["This field may not be blank."]);
    }

    #[test]
    fn test_wrong_types() {
        let body = json!({ "name": 12, "count": "three" });
        let errors = validate(FIELDS, &body).unwrap_err();
        assert_eq!(messages_for(&errors, "name"), ["Not a valid string."]);
        assert_eq!(messages_for(&errors, "count"), ["A valid integer is required."]);
    }

    #[test]
    fn test_float_is_not_an_integer() {
        let body = json!({ "name": "Ana", "count": 3.5 });
        let errors = validate(FIELDS, &body).unwrap_err();
        assert_eq!(messages_for(&errors, "count"), ["A valid integer is required."]);
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate(FIELDS, &json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            messages_for(&errors, NON_FIELD_ERRORS),
            ["Invalid data. Expected an object."]
        );
    }

    #[test]
    fn test_all_violations_collected() {
        let errors = validate(FIELDS, &json!({})).unwrap_err();
        assert_eq!(errors.fields().count(), 2);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = validate(FIELDS, &json!({})).unwrap_err();
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["name"], json!(["This field is required."]));
    }
}
