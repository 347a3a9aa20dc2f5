// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! String templating collaborator.
//!
//! Actions render messages, file names and file bodies through a
//! [`TemplateRenderer`]. Hosts plug in their own templating language; the
//! bundled [`PlaceholderRenderer`] substitutes `{{ dotted.path }}`
//! placeholders from the variables object and is enough for the engine's
//! own defaults.

use crate::error::Result;
use crate::form::value_to_text;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value as JsonValue;

/// Body written by the `save` action when no `body` parameter is given.
pub const DEFAULT_DATA_TEMPLATE: &str = "{{ form.summary }}";

lazy_static! {
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{\s*([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\s*\}\}")
            .expect("placeholder pattern is valid");
}

/// Renders a template string against a variables object.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template` with `vars` (a JSON object of top-level names).
    fn render(&self, template: &str, vars: &JsonValue) -> Result<String>;
}

/// Renderer for `{{ path.to.value }}` placeholders.
///
/// Missing paths render as an empty string; arrays render comma-joined.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    /// Creates a placeholder renderer.
    pub fn new() -> Self {
        Self
    }
}

fn lookup<'a>(vars: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.').try_fold(vars, |current, segment| match current {
        JsonValue::Object(map) => map.get(segment),
        JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, vars: &JsonValue) -> Result<String> {
        let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures| {
            lookup(vars, &caps[1]).map(value_to_text).unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }
}
