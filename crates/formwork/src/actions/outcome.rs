// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Action results.

use crate::form::FormInstance;
use serde_json::Value as JsonValue;

/// What the pipeline does after an action ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Run the next action.
    Continue,
    /// A check failed; skip the remaining actions and show the message.
    Abort(String),
    /// Stop processing and redirect the client to the path.
    Redirect(String),
}

impl ActionOutcome {
    /// Returns true if the pipeline should keep going.
    pub fn is_continue(&self) -> bool {
        matches!(self, ActionOutcome::Continue)
    }
}

/// One action invocation: the form, the action kind and its parameters.
pub struct ActionEvent<'e> {
    /// The accepted form.
    pub form: &'e mut FormInstance,
    /// Action kind as declared.
    pub kind: &'e str,
    /// Declared parameters.
    pub params: &'e JsonValue,
}

impl ActionEvent<'_> {
    /// Returns a string parameter by key, treating empty strings as absent.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns the parameters as a scalar string (for `redirect`, `display`).
    pub fn scalar_param(&self) -> String {
        match self.params {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => crate::form::value_to_text(other),
        }
    }
}

/// Returns true for boolean-like "yes" values: `true`, `1`, `"1"`, `"yes"`,
/// `"on"`, `"true"`. String matching is case-sensitive.
pub fn is_positive(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64() == Some(1.0),
        JsonValue::String(s) => matches!(s.as_str(), "1" | "yes" | "on" | "true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_positive() {
        for yes in [json!(true), json!(1), json!("1"), json!("yes"), json!("on"), json!("true")] {
            assert!(is_positive(&yes), "{} should be positive", yes);
        }
        for no in [json!(false), json!(0), json!("no"), json!(null), json!(""), json!(2), json!("On"), json!("YES"), json!("TRUE")] {
            assert!(!is_positive(&no), "{} should not be positive", no);
        }
    }
}
