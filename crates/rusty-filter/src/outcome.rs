// File: src/outcome.rs
// Purpose: Validation outcome returned to callers

use crate::value::Record;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

/// Field name (as the caller spelled it) to declared error message.
///
/// A rule without an error message yields `None`.
pub type FieldErrors = HashMap<String, Option<String>>;

/// Result of filtering one record
///
/// Serializes as `{"ok": bool, "data": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered {
    /// Canonical field name to validated (possibly defaulted) value
    Valid(Record),
    /// Per-field error messages
    Invalid(FieldErrors),
}

impl Filtered {
    pub fn is_ok(&self) -> bool {
        matches!(self, Filtered::Valid(_))
    }

    pub fn valid(&self) -> Option<&Record> {
        match self {
            Filtered::Valid(data) => Some(data),
            Filtered::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Filtered::Valid(_) => None,
            Filtered::Invalid(errors) => Some(errors),
        }
    }

    /// Get the message for a specific field, if it failed
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors()?.get(field)?.as_deref()
    }

    pub fn into_result(self) -> Result<Record, FieldErrors> {
        match self {
            Filtered::Valid(data) => Ok(data),
            Filtered::Invalid(errors) => Err(errors),
        }
    }
}

impl Serialize for Filtered {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Filtered", 2)?;
        state.serialize_field("ok", &self.is_ok())?;
        match self {
            Filtered::Valid(data) => state.serialize_field("data", data)?,
            Filtered::Invalid(errors) => state.serialize_field("data", errors)?,
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_valid() {
        let mut data = Record::new();
        data.insert("age".to_string(), Value::from("42"));

        let json = serde_json::to_value(Filtered::Valid(data)).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true, "data": {"age": "42"}}));
    }

    #[test]
    fn test_serialize_invalid_with_missing_message() {
        let mut errors = FieldErrors::new();
        errors.insert("edad".to_string(), Some("numeric required".to_string()));
        errors.insert("name".to_string(), None);

        let json = serde_json::to_value(Filtered::Invalid(errors)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ok": false, "data": {"edad": "numeric required", "name": null}})
        );
    }

    #[test]
    fn test_accessors() {
        let mut errors = FieldErrors::new();
        errors.insert("edad".to_string(), Some("numeric required".to_string()));
        let outcome = Filtered::Invalid(errors.clone());

        assert!(!outcome.is_ok());
        assert!(outcome.valid().is_none());
        assert_eq!(outcome.get_error("edad"), Some("numeric required"));
        assert_eq!(outcome.get_error("age"), None);
        assert_eq!(outcome.into_result(), Err(errors));
    }
}
