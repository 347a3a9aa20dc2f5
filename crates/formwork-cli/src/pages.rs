// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Pages file: a YAML mapping of route to page header.
//!
//! ```yaml
//! /contact:
//!   title: Contact
//!   form:
//!     name: contact
//!     fields:
//!       - { name: email, type: email, validate: { required: true } }
//!     process:
//!       - message: Thanks!
//! /contact/thanks:
//!   title: Thank you
//! ```

use anyhow::Context;
use formwork::services::StaticPages;
use formwork::PageHeader;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Raw page headers by route, in file order.
#[derive(Debug, Clone, Default)]
pub struct PagesFile {
    pages: IndexMap<String, JsonValue>,
}

impl PagesFile {
    /// Reads and parses a pages file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read pages file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid pages file {}", path.display()))
    }

    /// Parses pages file content. An empty document has no pages.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let pages: Option<IndexMap<String, JsonValue>> = serde_yaml::from_str(content)?;
        Ok(Self {
            pages: pages.unwrap_or_default(),
        })
    }

    /// Routes in file order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Parses the header of every page.
    pub fn headers(&self) -> formwork::Result<Vec<(String, PageHeader)>> {
        self.pages
            .iter()
            .map(|(route, value)| Ok((route.clone(), PageHeader::from_value(route, value.clone())?)))
            .collect()
    }

    /// A dispatcher knowing every page in the file.
    pub fn dispatcher(&self) -> StaticPages {
        StaticPages::new(self.routes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let pages = PagesFile::parse("/b:\n  title: B\n/a:\n  form: { fields: [ { name: x } ] }\n").unwrap();

        assert_eq!(pages.routes().collect::<Vec<_>>(), vec!["/b", "/a"]);
        let headers = pages.headers().unwrap();
        assert!(!headers[0].1.has_forms());
        assert!(headers[1].1.has_forms());
    }

    #[test]
    fn test_empty_document() {
        let pages = PagesFile::parse("").unwrap();
        assert_eq!(pages.routes().count(), 0);
    }

    #[test]
    fn test_invalid_declaration_names_route() {
        let pages = PagesFile::parse("/bad:\n  form: [1, 2]\n").unwrap();

        let err = pages.headers().unwrap_err();

        assert!(err.to_string().contains("/bad"));
    }
}
