// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Snapshot cache collaborator.
//!
//! The form registry is persisted between requests through a [`Cache`], so
//! pages need not be reprocessed on every request. The cache is the only
//! state shared across requests; it needs plain get/set semantics keyed by
//! string, last writer wins.
//!
//! # Implementations
//!
//! - [`MemoryCache`]: process-local, for tests and embedding
//! - **CLI**: SQLite-backed persistent storage

use crate::error::{FormworkError, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Key-addressed blob storage used for registry snapshots.
pub trait Cache: Send + Sync {
    /// Fetches a value by key. Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value, replacing any previous one.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes a key. No error is returned if the key doesn't exist.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory cache implementation.
///
/// Useful for testing and development. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCache {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryCache {
    /// Creates an empty memory cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self.data.read().map_err(|e| FormworkError::Cache(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FormworkError::Cache(e.to_string()))?;
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FormworkError::Cache(e.to_string()))?;
        data.remove(key);
        Ok(())
    }
}
