// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Host collaborators consumed by actions.
//!
//! Besides templating ([`crate::template`]) and translation
//! ([`crate::translate`]), actions need a captcha verification service, a
//! flash store for redirects and a page dispatcher for `display`. Each is a
//! small trait with an in-memory implementation for tests and embedding.

use crate::error::Result;
use crate::form::FormInstance;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Verifies a captcha response token.
pub trait CaptchaVerifier: Send + Sync {
    /// Calls the verification service and returns its JSON answer.
    ///
    /// The caller decides success by looking for `"success": true`.
    fn verify(&self, secret: &str, response: &str) -> Result<JsonValue>;
}

/// Verifier that returns a fixed answer.
#[derive(Debug, Clone)]
pub struct StaticVerifier {
    answer: JsonValue,
}

impl StaticVerifier {
    /// Creates a verifier that always answers `answer`.
    pub fn new(answer: JsonValue) -> Self {
        Self { answer }
    }

    /// Verifier that accepts every token.
    pub fn accepting() -> Self {
        Self::new(serde_json::json!({ "success": true }))
    }

    /// Verifier that rejects every token.
    pub fn rejecting() -> Self {
        Self::new(serde_json::json!({ "success": false }))
    }
}

impl CaptchaVerifier for StaticVerifier {
    fn verify(&self, _secret: &str, _response: &str) -> Result<JsonValue> {
        Ok(self.answer.clone())
    }
}

/// Transient session storage read by the page rendered after a redirect.
pub trait FlashStore: Send + Sync {
    /// Stores a form under `name` until it is taken.
    fn set_flash(&self, name: &str, form: FormInstance) -> Result<()>;

    /// Removes and returns the form stored under `name`.
    fn take_flash(&self, name: &str) -> Result<Option<FormInstance>>;
}

/// Process-local flash store.
#[derive(Debug, Default)]
pub struct MemoryFlashStore {
    entries: RwLock<HashMap<String, FormInstance>>,
}

impl MemoryFlashStore {
    /// Creates an empty flash store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlashStore for MemoryFlashStore {
    fn set_flash(&self, name: &str, form: FormInstance) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| crate::FormworkError::Cache(e.to_string()))?;
        entries.insert(name.to_string(), form);
        Ok(())
    }

    fn take_flash(&self, name: &str) -> Result<Option<FormInstance>> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| crate::FormworkError::Cache(e.to_string()))?;
        Ok(entries.remove(name))
    }
}

/// Resolves routes to pages.
pub trait PageDispatcher: Send + Sync {
    /// Returns the canonical route of the page at `route`, or `None`.
    fn dispatch(&self, route: &str) -> Option<String>;
}

/// Dispatcher over a fixed set of routes.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    routes: HashSet<String>,
}

impl StaticPages {
    /// Creates a dispatcher knowing `routes`.
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            routes: routes.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a route.
    pub fn insert(&mut self, route: impl Into<String>) {
        self.routes.insert(route.into());
    }
}

impl PageDispatcher for StaticPages {
    fn dispatch(&self, route: &str) -> Option<String> {
        let trimmed = if route.len() > 1 { route.trim_end_matches('/') } else { route };
        self.routes.get(trimmed).cloned()
    }
}
