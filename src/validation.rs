//! # Field Validation
//!
//! Collects per-field validation messages so a request can report every
//! problem at once instead of failing on the first one.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Message used when a field is absent from the request body
pub const REQUIRED: &str = "This field is required.";

/// Message used when a text field is present but blank
pub const BLANK: &str = "This field may not be blank.";

/// Field-level validation errors, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Build a single-field error set
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Validate a required text field, trimming surrounding whitespace.
///
/// Returns the trimmed value when it passed; otherwise records the failure.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_len: Option<usize>,
) -> Option<String> {
    let Some(raw) = value else {
        errors.add(field, REQUIRED);
        return None;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
        return None;
    }

    if let Some(max) = max_len {
        if trimmed.chars().count() > max {
            errors.add(
                field,
                format!("Ensure this field has no more than {} characters.", max),
            );
            return None;
        }
    }

    Some(trimmed.to_string())
}

/// Validate a required integer field within an inclusive range.
///
/// Accepts JSON numbers and numeric strings.
pub fn required_int_in_range(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&Value>,
    min: i64,
    max: i64,
) -> Option<i64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    let Some(number) = parsed else {
        errors.add(field, "A valid integer is required.");
        return None;
    };

    if number < min {
        errors.add(
            field,
            format!("Ensure this value is greater than or equal to {}.", min),
        );
        return None;
    }
    if number > max {
        errors.add(
            field,
            format!("Ensure this value is less than or equal to {}.", max),
        );
        return None;
    }

    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_text_missing_and_blank() {
        let mut errors = FieldErrors::new();
        assert!(required_text(&mut errors, "name", None, None).is_none());
        assert!(required_text(&mut errors, "text", Some("   "), None).is_none());

        assert_eq!(errors.get("name").unwrap(), &[REQUIRED.to_string()]);
        assert_eq!(errors.get("text").unwrap(), &[BLANK.to_string()]);
    }

    #[test]
    fn test_required_text_max_length() {
        let mut errors = FieldErrors::new();
        assert!(required_text(&mut errors, "name", Some("abcdef"), Some(5)).is_none());
        assert!(errors.contains("name"));

        let mut errors = FieldErrors::new();
        let value = required_text(&mut errors, "name", Some("  abcde "), Some(5));
        assert_eq!(value.as_deref(), Some("abcde"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_int_range() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_int_in_range(&mut errors, "rating", Some(&json!(4)), 1, 5),
            Some(4)
        );
        assert_eq!(
            required_int_in_range(&mut errors, "rating", Some(&json!("5")), 1, 5),
            Some(5)
        );
        assert!(errors.is_empty());

        assert!(required_int_in_range(&mut errors, "low", Some(&json!(0)), 1, 5).is_none());
        assert!(required_int_in_range(&mut errors, "high", Some(&json!(6)), 1, 5).is_none());
        assert!(required_int_in_range(&mut errors, "word", Some(&json!("five")), 1, 5).is_none());
        assert!(required_int_in_range(&mut errors, "frac", Some(&json!(4.5)), 1, 5).is_none());
        assert!(required_int_in_range(&mut errors, "none", None, 1, 5).is_none());

        for field in ["low", "high", "word", "frac", "none"] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("phone_number", "already registered");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, json!({"phone_number": ["already registered"]}));
    }
}
