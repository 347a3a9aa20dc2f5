// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # formwork
//!
//! Declarative form submissions for content-driven sites.
//!
//! Pages declare forms in their header (`form:` or `forms:`). The engine
//! keeps a registry of every declared form, matches posted submissions to
//! their form by name, validates them and runs the form's ordered action
//! pipeline (`captcha`, `ip`, `message`, `save`, `reset`, `redirect`,
//! `display`).
//!
//! ## Features
//!
//! - Registry snapshot persisted through a pluggable [`Cache`]
//! - Field rules (`required`, `pattern`, `min`, `max`) and type checks
//! - Action handlers registered by kind; custom kinds plug in without
//!   touching the pipeline
//! - Outcomes returned to the host as plain values ([`Outcome`])
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use formwork::{Engine, FormRequest, MemoryCache, Outcome, PageHeader, Services};
//!
//! let header = PageHeader::from_yaml(
//!     "/contact",
//!     "form:\n  name: contact\n  fields:\n    - name: email\n      validate: { required: true }\n  process:\n    - message: Thanks!\n",
//! )?;
//!
//! let mut engine = Engine::start(Arc::new(MemoryCache::new()), Services::default())?;
//! engine.page_processed("/contact", header);
//! engine.pages_initialized()?;
//!
//! let mut headers = HashMap::new();
//! headers.insert("Content-Type".to_string(), "application/x-www-form-urlencoded".to_string());
//! let request = FormRequest::new("/contact", "POST")
//!     .with_headers(headers)
//!     .with_body(b"__form-name__=contact&email=a%40b.io".to_vec());
//!
//! let outcome = engine.handle_request(&request)?;
//! assert_eq!(outcome.form().and_then(|f| f.message.as_deref()), Some("Thanks!"));
//! # Ok::<(), formwork::FormworkError>(())
//! ```

/// Post-processing actions and the pipeline running them.
pub mod actions;
/// Request body parsing.
pub mod body;
/// Registry snapshot caching.
pub mod cache;
/// PHP-style date formatting.
pub mod datefmt;
/// Form declarations as written in page headers.
pub mod declaration;
/// Engine lifecycle and request handling.
pub mod engine;
/// Error types.
pub mod error;
/// Runtime form state.
pub mod form;
/// Declarative field transforms.
pub mod process;
/// Registry of declared forms.
pub mod registry;
/// Request abstraction.
pub mod request;
/// Outbound signals to the host.
pub mod response;
/// Submission routing.
pub mod router;
/// Host collaborators.
pub mod services;
/// String templating.
pub mod template;
/// Translation lookup.
pub mod translate;
/// Field validation.
pub mod validation;


pub use actions::{ActionHandler, ActionOutcome, ActionPipeline, FormSettings, Services};
pub use cache::{Cache, MemoryCache};
pub use declaration::{ActionDeclaration, FieldDeclaration, FormDeclaration, PageHeader};
pub use engine::{Engine, SNAPSHOT_KEY};
pub use error::{FormworkError, Result};
pub use form::{FormInstance, FormStatus};
pub use registry::{FormRegistry, RegistrySnapshot};
pub use request::FormRequest;
pub use response::Outcome;
