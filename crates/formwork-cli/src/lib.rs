// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! formwork CLI library.
//!
//! Command-line front end for the formwork engine: replays submissions
//! against a pages file, lists the cached form registry and checks form
//! declarations.
//!
//! # Usage
//!
//! ```bash
//! formwork check --pages pages.yaml
//! formwork submit --pages pages.yaml --route /contact --body '__form-name__=contact&email=a%40b.io'
//! formwork forms
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `formwork.toml` at the project root.

/// SQLite registry cache.
pub mod cache;
/// CLI commands (submit, forms, check).
pub mod commands;
/// Project configuration from `formwork.toml`.
pub mod config;
/// Pages file loading.
pub mod pages;
/// HTTP captcha verification.
pub mod verify;
