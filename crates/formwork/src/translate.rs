// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Translation lookup collaborator.

use crate::form::value_to_text;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Message shown when the captcha verification fails.
pub const ERROR_VALIDATING_CAPTCHA: &str = "FORM.ERROR_VALIDATING_CAPTCHA";
/// Heading of the aggregated field validation message.
pub const VALIDATION_FAIL: &str = "FORM.VALIDATION_FAIL";

/// Resolves a translation key (or structured key with arguments) to text.
pub trait Translator: Send + Sync {
    /// Translates `key`.
    ///
    /// A string is looked up as a key and returned unchanged when unknown.
    /// An array is `[key, arg, ...]`; each `%s` in the translation is
    /// replaced by the next argument.
    fn translate(&self, key: &JsonValue) -> String;

    /// Translates a plain string key.
    fn translate_key(&self, key: &str) -> String {
        self.translate(&JsonValue::String(key.to_string()))
    }
}

/// In-memory catalog translator seeded with the engine's own messages.
#[derive(Debug, Clone)]
pub struct CatalogTranslator {
    catalog: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Creates a translator with the built-in English messages.
    pub fn new() -> Self {
        let mut catalog = HashMap::new();
        catalog.insert(
            ERROR_VALIDATING_CAPTCHA.to_string(),
            "Error validating the Captcha".to_string(),
        );
        catalog.insert(VALIDATION_FAIL.to_string(), "Validation failed:".to_string());
        Self { catalog }
    }

    /// Adds or replaces a translation.
    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.catalog.insert(key.into(), text.into());
        self
    }

    fn lookup(&self, key: &str) -> String {
        self.catalog.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

impl Default for CatalogTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &JsonValue) -> String {
        match key {
            JsonValue::String(s) => self.lookup(s),
            JsonValue::Array(parts) => {
                let Some((head, args)) = parts.split_first() else {
                    return String::new();
                };
                let mut text = self.lookup(&value_to_text(head));
                for arg in args {
                    match text.find("%s") {
                        Some(pos) => text.replace_range(pos..pos + 2, &value_to_text(arg)),
                        None => break,
                    }
                }
                text
            }
            other => value_to_text(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_and_unknown_keys() {
        let t = CatalogTranslator::new();
        assert_eq!(t.translate_key(ERROR_VALIDATING_CAPTCHA), "Error validating the Captcha");
        assert_eq!(t.translate_key("Thank you!"), "Thank you!");
    }

    #[test]
    fn test_structured_key_with_arguments() {
        let t = CatalogTranslator::new().with_entry("SITE.THANKS", "Thanks %s, see you %s");
        assert_eq!(
            t.translate(&json!(["SITE.THANKS", "Ada", "soon"])),
            "Thanks Ada, see you soon"
        );
    }
}
