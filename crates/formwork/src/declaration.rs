// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Static form declarations as authored in page content.
//!
//! A page header declares either a single legacy form or a mapping of named
//! forms:
//!
//! ```yaml
//! forms:
//!   contact:
//!     fields:
//!       - name: email
//!         type: email
//!         validate: { required: true }
//!       - name: sent_at
//!         type: hidden
//!         process: { fillWithCurrentDateTime: true }
//!     process:
//!       - captcha: { recaptcha_secret: "..." }
//!       - save: { fileprefix: contact-, operation: add }
//!       - message: Thank you for getting in touch!
//!       - reset: true
//! ```
//!
//! Field lists may also be written as a mapping of field name to field
//! declaration, in which case the key provides the field name.

use crate::error::{FormworkError, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Name given to a legacy single `form:` declaration that carries no name.
pub const DEFAULT_FORM_NAME: &str = "form";

/// Field types that render something but never receive submitted input.
const NON_INPUT_TYPES: &[&str] = &["display", "spacer", "captcha"];

fn default_field_type() -> String {
    "text".to_string()
}

/// Declarative per-field processing directives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldProcess {
    /// Stamp the field with the current UTC date and time before actions run.
    #[serde(rename = "fillWithCurrentDateTime", default)]
    pub fill_with_current_date_time: bool,
    /// Leave the field out of structured `save` logs.
    #[serde(default)]
    pub ignore: bool,
}

impl FieldProcess {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validation rules declared on a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRules {
    /// The field must carry a non-empty value.
    #[serde(default)]
    pub required: bool,
    /// Regular expression the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// Custom message shown instead of the generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldRules {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One field of a form's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Field name, matched against submitted payload keys.
    #[serde(default)]
    pub name: String,
    /// Field type (`text`, `email`, `number`, `hidden`, `display`, ...).
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Validation rules.
    #[serde(default, skip_serializing_if = "FieldRules::is_empty")]
    pub validate: FieldRules,
    /// Processing directives.
    #[serde(default, skip_serializing_if = "FieldProcess::is_empty")]
    pub process: FieldProcess,
    /// Any other authored keys, kept verbatim for templates.
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

impl FieldDeclaration {
    /// Creates a plain text field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: default_field_type(),
            label: None,
            validate: FieldRules::default(),
            process: FieldProcess::default(),
            extra: IndexMap::new(),
        }
    }

    /// Sets the field type.
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.validate.required = true;
        self
    }

    /// Sets the processing directives.
    pub fn with_process(mut self, process: FieldProcess) -> Self {
        self.process = process;
        self
    }

    /// Returns false for field types that never receive submitted input.
    pub fn accepts_input(&self) -> bool {
        !NON_INPUT_TYPES.contains(&self.field_type.as_str())
    }

    /// Label if declared, otherwise the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// One entry of a form's ordered action list.
///
/// Authored as a single-key mapping (`- message: Thanks!`) or, for actions
/// without parameters, a bare string (`- ip`).
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDeclaration {
    /// Action kind, e.g. `captcha`, `save`, `message`.
    pub kind: String,
    /// Action parameters; shape depends on the kind.
    pub params: JsonValue,
}

impl ActionDeclaration {
    /// Creates an action declaration.
    pub fn new(kind: impl Into<String>, params: JsonValue) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

impl Serialize for ActionDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.kind, &self.params)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActionDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::String(kind) => Ok(Self::new(kind, JsonValue::Null)),
            JsonValue::Object(map) if map.len() == 1 => {
                let (kind, params) = map.into_iter().next().ok_or_else(|| {
                    de::Error::custom("action entry must name exactly one action")
                })?;
                Ok(Self::new(kind, params))
            }
            other => Err(de::Error::custom(format!(
                "action entry must be a single-key mapping or a string, got {}",
                other
            ))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldsRepr {
    List(Vec<FieldDeclaration>),
    Map(IndexMap<String, FieldDeclaration>),
}

fn deserialize_fields<'de, D>(deserializer: D) -> std::result::Result<Vec<FieldDeclaration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<FieldsRepr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(FieldsRepr::List(fields)) => fields,
        Some(FieldsRepr::Map(fields)) => fields
            .into_iter()
            .map(|(key, mut field)| {
                if field.name.is_empty() {
                    field.name = key;
                }
                field
            })
            .collect(),
    })
}

/// Static description of a form as declared by a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDeclaration {
    /// Explicit form name; overrides the mapping key it was declared under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field schema in declaration order.
    #[serde(default, deserialize_with = "deserialize_fields")]
    pub fields: Vec<FieldDeclaration>,
    /// Ordered post-processing actions.
    #[serde(default, rename = "process", alias = "actions")]
    pub actions: Vec<ActionDeclaration>,
    /// Any other authored keys (button labels, classes, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

impl FormDeclaration {
    /// Creates an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a field.
    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends an action.
    pub fn with_action(mut self, kind: impl Into<String>, params: JsonValue) -> Self {
        self.actions.push(ActionDeclaration::new(kind, params));
        self
    }
}

/// The form-related part of a page header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageHeader {
    /// Legacy single form.
    #[serde(default)]
    pub form: Option<FormDeclaration>,
    /// Named forms.
    #[serde(default)]
    pub forms: Option<IndexMap<String, FormDeclaration>>,
}

impl PageHeader {
    /// Parses a YAML page header (front matter).
    pub fn from_yaml(route: &str, source: &str) -> Result<Self> {
        serde_yaml::from_str::<Option<Self>>(source)
            .map(Option::unwrap_or_default)
            .map_err(|e| FormworkError::InvalidDeclaration {
                route: route.to_string(),
                message: e.to_string(),
            })
    }

    /// Builds a page header from an already-parsed JSON value.
    pub fn from_value(route: &str, value: JsonValue) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| FormworkError::InvalidDeclaration {
            route: route.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns true when the page declares at least one form.
    pub fn has_forms(&self) -> bool {
        self.forms.is_some() || self.form.is_some()
    }

    /// Normalizes the header into `(name, declaration)` pairs.
    ///
    /// `forms:` takes precedence over `form:` when both are present. A
    /// declaration's own `name` wins over the key it was declared under.
    pub fn into_declarations(self) -> Vec<(String, FormDeclaration)> {
        if let Some(forms) = self.forms {
            return forms
                .into_iter()
                .map(|(key, decl)| (decl.name.clone().unwrap_or(key), decl))
                .collect();
        }

        match self.form {
            Some(decl) => {
                let name = decl
                    .name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FORM_NAME.to_string());
                vec![(name, decl)]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_forms_in_order() {
        let header = PageHeader::from_yaml(
            "/contact",
            r#"
forms:
  contact:
    fields:
      - name: email
        type: email
  newsletter:
    name: signup
    fields:
      - name: address
"#,
        )
        .unwrap();

        let decls = header.into_declarations();
        let names: Vec<_> = decls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["contact", "signup"]);
        assert_eq!(decls[0].1.fields[0].field_type, "email");
    }

    #[test]
    fn test_legacy_form_gets_default_name() {
        let header = PageHeader::from_yaml(
            "/legacy",
            r#"
form:
  fields:
    - name: text
"#,
        )
        .unwrap();

        let decls = header.into_declarations();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].0, DEFAULT_FORM_NAME);
    }

    #[test]
    fn test_empty_header_has_no_forms() {
        let header = PageHeader::from_yaml("/", "").unwrap();
        assert!(!header.has_forms());
        assert!(header.into_declarations().is_empty());
    }

    #[test]
    fn test_action_list_shapes() {
        let decl: FormDeclaration = serde_yaml::from_str(
            r#"
process:
  - captcha:
      recaptcha_secret: abc
  - ip
  - message: Thanks
  - reset: true
"#,
        )
        .unwrap();

        let kinds: Vec<_> = decl.actions.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["captcha", "ip", "message", "reset"]);
        assert_eq!(decl.actions[0].params["recaptcha_secret"], "abc");
        assert!(decl.actions[1].params.is_null());
        assert_eq!(decl.actions[3].params, JsonValue::Bool(true));
    }

    #[test]
    fn test_action_entry_with_two_keys_is_rejected() {
        let result: std::result::Result<FormDeclaration, _> = serde_yaml::from_str(
            r#"
process:
  - message: Thanks
    reset: true
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_fields_as_mapping() {
        let decl: FormDeclaration = serde_yaml::from_str(
            r#"
fields:
  name:
    label: Your name
    validate:
      required: true
  stamp:
    type: hidden
    process:
      fillWithCurrentDateTime: true
      ignore: true
"#,
        )
        .unwrap();

        assert_eq!(decl.fields[0].name, "name");
        assert!(decl.fields[0].validate.required);
        assert_eq!(decl.fields[1].name, "stamp");
        assert!(decl.fields[1].process.fill_with_current_date_time);
        assert!(decl.fields[1].process.ignore);
    }

    #[test]
    fn test_non_input_field_types() {
        assert!(!FieldDeclaration::new("c").with_type("captcha").accepts_input());
        assert!(!FieldDeclaration::new("s").with_type("spacer").accepts_input());
        assert!(FieldDeclaration::new("e").with_type("email").accepts_input());
    }

    #[test]
    fn test_extra_keys_survive_json_round_trip() {
        let decl: FormDeclaration = serde_yaml::from_str(
            r#"
buttons:
  - type: submit
    value: Send
fields:
  - name: body
    type: textarea
    rows: 5
"#,
        )
        .unwrap();

        let json = serde_json::to_string(&decl).unwrap();
        let back: FormDeclaration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decl);
        assert_eq!(back.fields[0].extra["rows"], 5);
    }
}
