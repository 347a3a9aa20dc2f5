// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the formwork engine.
//!
//! This module defines [`FormworkError`], the single error enum returned by
//! the engine and by every collaborator trait.
//!
//! # Error Categories
//!
//! - **Configuration faults**: a `display` action points at a missing page
//! - **Collaborator failures**: cache, file I/O, verification service,
//!   templating
//! - **Declaration errors**: page content declares a malformed form
//!
//! Validation failures are *not* errors: they are reported through
//! [`crate::actions::ActionOutcome::Abort`] and end up as a user-visible
//! message on the form.

use thiserror::Error;

/// The main error type for formwork operations.
#[derive(Error, Debug)]
pub enum FormworkError {
    /// A `display` action targets a route that resolves to no page.
    #[error("Display page not found: {0}. Please check the page exists.")]
    DisplayPageNotFound(String),

    /// A page declares a form the engine cannot understand.
    #[error("Invalid form declaration on {route}: {message}")]
    InvalidDeclaration {
        /// Route of the page carrying the declaration.
        route: String,
        /// Description of the problem.
        message: String,
    },

    /// A rendered `save` file name would leave the form's storage directory.
    #[error("Invalid file name: {0:?}. File names must stay inside the form directory.")]
    InvalidFileName(String),

    /// Snapshot cache operation failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The verification service could not be reached or answered garbage.
    #[error("Verification error: {0}")]
    Verification(String),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with [`FormworkError`].
pub type Result<T> = std::result::Result<T, FormworkError>;
