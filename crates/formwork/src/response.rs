// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Outbound signals from the engine to the host.
//!
//! The engine never renders pages itself. After handling a request it tells
//! the host what to do next; adapters convert this into their own response
//! type.

use crate::form::FormInstance;
use serde::Serialize;

/// What the host should do after [`crate::Engine::handle_request`].
///
/// # Example
///
/// ```rust
/// use formwork::Outcome;
///
/// let redirect = Outcome::redirect("/thanks");
/// assert_eq!(redirect.location(), Some("/thanks"));
/// assert_eq!(redirect.route(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Render the requested page as usual, binding `form` if the page has one.
    Render {
        /// Route to render.
        route: String,
        /// The page's default form.
        form: Option<FormInstance>,
    },

    /// A submission was rejected; re-render the current page with the message.
    ValidationFailed {
        /// Route to re-render.
        route: String,
        /// User-visible failure message.
        message: String,
        /// The rejected form.
        form: FormInstance,
    },

    /// Render another page in place of the requested one.
    Display {
        /// Route whose page replaces the current one.
        route: String,
        /// The submitted form, bound as `form`.
        form: FormInstance,
    },

    /// Stop rendering and redirect.
    Redirect {
        /// Redirect target.
        location: String,
    },
}

impl Outcome {
    /// Creates a redirect outcome.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
        }
    }

    /// Route the host should render, if any.
    pub fn route(&self) -> Option<&str> {
        match self {
            Self::Render { route, .. }
            | Self::ValidationFailed { route, .. }
            | Self::Display { route, .. } => Some(route),
            Self::Redirect { .. } => None,
        }
    }

    /// Redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect { location } => Some(location),
            _ => None,
        }
    }

    /// Form to bind while rendering.
    pub fn form(&self) -> Option<&FormInstance> {
        match self {
            Self::Render { form, .. } => form.as_ref(),
            Self::ValidationFailed { form, .. } | Self::Display { form, .. } => Some(form),
            Self::Redirect { .. } => None,
        }
    }
}
