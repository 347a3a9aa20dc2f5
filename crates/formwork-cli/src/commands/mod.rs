// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `submit`: Run one submission against the pages file
//! - `forms`: List forms in the cached registry
//! - `check`: Validate the pages file's form declarations

/// Form declaration check command.
pub mod check;
/// Cached registry listing command.
pub mod forms;
/// Submission command.
pub mod submit;

use crate::cache::SqliteCache;
use crate::config::Config;
use formwork::{Engine, Services};
use std::sync::Arc;

/// Starts an engine over the configured SQLite cache.
pub(crate) fn open_engine(config: &Config, services: Services) -> anyhow::Result<Engine> {
    let cache = SqliteCache::new(&config.storage.cache_dir)?;
    Ok(Engine::start(Arc::new(cache), services)?)
}
