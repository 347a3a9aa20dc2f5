// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Per-field validation.
//!
//! The engine only needs a pass/fail answer with a message for each field;
//! [`RuleValidator`] checks the rules declared under a field's `validate`
//! key plus the built-in `email` and `number` types.

use crate::declaration::FieldDeclaration;
use crate::form::value_to_text;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::RwLock;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
}

/// Checks one submitted value against its field declaration.
pub trait FieldValidator: Send + Sync {
    /// Returns `Err(message)` when the value fails the field's rules.
    fn validate(&self, field: &FieldDeclaration, value: Option<&JsonValue>) -> Result<(), String>;
}

/// Validator for declared `validate` rules and built-in field types.
///
/// Compiled `pattern` rules are kept for the validator's lifetime. Patterns
/// that fail to compile are remembered too and skipped.
#[derive(Debug, Default)]
pub struct RuleValidator {
    patterns: RwLock<HashMap<String, Option<Regex>>>,
}

impl RuleValidator {
    /// Creates a rule validator.
    pub fn new() -> Self {
        Self::default()
    }

    fn compiled(&self, field: &str, pattern: &str) -> Option<Regex> {
        if let Ok(patterns) = self.patterns.read() {
            if let Some(cached) = patterns.get(pattern) {
                return cached.clone();
            }
        }

        let anchored = format!("^(?:{})$", pattern);
        let compiled = match Regex::new(&anchored) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(field = %field, error = %e, "ignoring invalid validation pattern");
                None
            }
        };
        if let Ok(mut patterns) = self.patterns.write() {
            patterns.insert(pattern.to_string(), compiled.clone());
        }
        compiled
    }

    #[cfg(test)]
    fn cached_patterns(&self) -> usize {
        self.patterns.read().map(|p| p.len()).unwrap_or(0)
    }
}

fn is_blank(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::String(s)) => s.trim().is_empty(),
        Some(JsonValue::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

impl FieldValidator for RuleValidator {
    fn validate(&self, field: &FieldDeclaration, value: Option<&JsonValue>) -> Result<(), String> {
        let rules = &field.validate;
        let label = field.display_label();
        let fail = |default: String| Err(rules.message.clone().unwrap_or(default));

        if is_blank(value) {
            if rules.required {
                return fail(format!("{} is required.", label));
            }
            return Ok(());
        }

        let text = value.map(value_to_text).unwrap_or_default();

        match field.field_type.as_str() {
            "email" if !EMAIL_RE.is_match(&text) => {
                return fail(format!("{} must be a valid email address.", label));
            }
            "number" if text.trim().parse::<f64>().is_err() => {
                return fail(format!("{} must be a number.", label));
            }
            _ => {}
        }

        let length = text.chars().count();
        if let Some(min) = rules.min {
            if length < min {
                return fail(format!("{} must be at least {} characters.", label, min));
            }
        }
        if let Some(max) = rules.max {
            if length > max {
                return fail(format!("{} must be at most {} characters.", label, max));
            }
        }

        if let Some(pattern) = &rules.pattern {
            if let Some(re) = self.compiled(&field.name, pattern) {
                if !re.is_match(&text) {
                    return fail(format!("{} has an invalid format.", label));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(field: &FieldDeclaration, value: JsonValue) -> Result<(), String> {
        RuleValidator::new().validate(field, Some(&value))
    }

    #[test]
    fn test_required() {
        let field = FieldDeclaration::new("name").with_label("Name").required();
        assert_eq!(
            RuleValidator::new().validate(&field, None),
            Err("Name is required.".to_string())
        );
        assert!(check(&field, json!("   ")).is_err());
        assert!(check(&field, json!("Ada")).is_ok());
    }

    #[test]
    fn test_optional_blank_passes_type_checks() {
        let field = FieldDeclaration::new("email").with_type("email");
        assert!(check(&field, json!("")).is_ok());
    }

    #[test]
    fn test_email_and_number() {
        let email = FieldDeclaration::new("email").with_type("email");
        assert!(check(&email, json!("ada@example.com")).is_ok());
        assert!(check(&email, json!("not-an-email")).is_err());

        let number = FieldDeclaration::new("age").with_type("number");
        assert!(check(&number, json!("42")).is_ok());
        assert!(check(&number, json!("forty")).is_err());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let mut field = FieldDeclaration::new("zip");
        field.validate.pattern = Some("[0-9]{4}".to_string());
        assert!(check(&field, json!("8001")).is_ok());
        assert!(check(&field, json!("80012")).is_err());
    }

    #[test]
    fn test_patterns_compile_once() {
        let validator = RuleValidator::new();
        let mut zip = FieldDeclaration::new("zip");
        zip.validate.pattern = Some("[0-9]{4}".to_string());
        let mut broken = FieldDeclaration::new("code");
        broken.validate.pattern = Some("([a-z".to_string());

        for value in ["8001", "abcd", "1234"] {
            let _ = validator.validate(&zip, Some(&json!(value)));
            assert!(validator.validate(&broken, Some(&json!(value))).is_ok());
        }

        assert_eq!(validator.cached_patterns(), 2);
        assert!(validator.validate(&zip, Some(&json!("abcd"))).is_err());
    }

    #[test]
    fn test_custom_message_and_length() {
        let mut field = FieldDeclaration::new("msg");
        field.validate.min = Some(3);
        field.validate.message = Some("Too short!".to_string());
        assert_eq!(check(&field, json!("hi")), Err("Too short!".to_string()));
    }
}
