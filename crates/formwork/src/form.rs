// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Runtime state of a declared form.

use crate::declaration::{ActionDeclaration, FieldDeclaration, FormDeclaration};
use crate::validation::FieldValidator;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Submission state of a form instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    /// Nothing submitted yet, or reset since.
    #[default]
    Unsubmitted,
    /// Submitted values are being checked.
    Validating,
    /// Validation passed; actions may run.
    Accepted,
    /// Validation or an action check failed.
    Rejected,
}

/// Result of [`FormInstance::post`].
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    /// Values passed validation; carries the declared action list.
    Accepted(Vec<ActionDeclaration>),
    /// Values failed validation; carries one message per failing field.
    Rejected(Vec<String>),
}

/// A declared form bound to a page route, plus its submission state.
///
/// Identity is the `(route, name)` pair. Instances are owned by the
/// [`FormRegistry`](crate::registry::FormRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInstance {
    /// Form name, as matched against `__form-name__`.
    pub name: String,
    /// Route of the page declaring the form.
    pub route: String,
    /// Field schema; actions may augment it.
    pub fields: Vec<FieldDeclaration>,
    /// Declared post-processing actions.
    #[serde(default)]
    pub actions: Vec<ActionDeclaration>,
    /// Extra declaration keys exposed to templates.
    #[serde(default)]
    pub extra: IndexMap<String, JsonValue>,
    /// Submitted values bound onto the schema.
    #[serde(default)]
    pub values: IndexMap<String, JsonValue>,
    /// The whole submitted payload, including keys outside the schema.
    #[serde(default)]
    pub raw: IndexMap<String, JsonValue>,
    /// Status message shown with the form.
    #[serde(default)]
    pub message: Option<String>,
    /// Message color (`red` after a failed submission).
    #[serde(default)]
    pub message_color: Option<String>,
    /// Submission state.
    #[serde(default)]
    pub status: FormStatus,
}

impl FormInstance {
    /// Creates an unsubmitted instance from a declaration.
    pub fn new(route: impl Into<String>, name: impl Into<String>, declaration: FormDeclaration) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            fields: declaration.fields,
            actions: declaration.actions,
            extra: declaration.extra,
            values: IndexMap::new(),
            raw: IndexMap::new(),
            message: None,
            message_color: None,
            status: FormStatus::Unsubmitted,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Adds a field, replacing any existing field of the same name in place.
    pub fn set_field(&mut self, field: FieldDeclaration) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Returns the bound value of a field.
    pub fn value(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }

    /// Returns the bound value of a field, falling back to the raw payload.
    ///
    /// Non-schema inputs such as `g-recaptcha-response` are only reachable
    /// through the fallback.
    pub fn value_or_raw(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name).or_else(|| self.raw.get(name))
    }

    /// Sets a field value.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Sets the status message.
    pub fn set_message(&mut self, message: impl Into<String>, color: Option<&str>) {
        self.message = Some(message.into());
        self.message_color = color.map(str::to_string);
    }

    /// Binds a submitted payload and validates it.
    ///
    /// Only fields that accept input receive values; the complete payload is
    /// kept in [`FormInstance::raw`].
    pub fn post(&mut self, payload: &IndexMap<String, JsonValue>, validator: &dyn FieldValidator) -> PostOutcome {
        self.status = FormStatus::Validating;
        self.raw = payload.clone();
        self.values.clear();
        for field in self.fields.iter().filter(|f| f.accepts_input()) {
            if let Some(value) = payload.get(&field.name) {
                self.values.insert(field.name.clone(), value.clone());
            }
        }

        let failures: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.accepts_input())
            .filter_map(|f| validator.validate(f, self.values.get(&f.name)).err())
            .collect();

        if failures.is_empty() {
            self.status = FormStatus::Accepted;
            PostOutcome::Accepted(self.actions.clone())
        } else {
            self.status = FormStatus::Rejected;
            PostOutcome::Rejected(failures)
        }
    }

    /// Clears submitted values and the status message.
    pub fn reset(&mut self) {
        self.values.clear();
        self.raw.clear();
        self.message = None;
        self.message_color = None;
        self.status = FormStatus::Unsubmitted;
    }

    /// Submitted values minus fields flagged `process.ignore`.
    pub fn recordable_values(&self) -> IndexMap<String, JsonValue> {
        self.values
            .iter()
            .filter(|(name, _)| !self.field(name).is_some_and(|f| f.process.ignore))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// One `label: value` line per field that has a value.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            if let Some(value) = self.values.get(&field.name) {
                out.push_str(field.display_label());
                out.push_str(": ");
                out.push_str(&value_to_text(value));
                out.push('\n');
            }
        }
        out
    }

    /// Template variables with the instance bound as `form`.
    pub fn template_vars(&self) -> JsonValue {
        json!({
            "form": {
                "name": self.name,
                "route": self.route,
                "fields": self.fields,
                "value": self.values,
                "message": self.message,
                "message_color": self.message_color,
                "status": self.status,
                "summary": self.summary(),
            }
        })
    }
}

/// Renders a JSON value as plain text: strings unquoted, arrays comma-joined.
pub fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items.iter().map(value_to_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
