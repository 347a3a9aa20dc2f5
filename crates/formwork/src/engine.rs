// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The form engine: registry lifecycle plus request handling.
//!
//! A host drives the engine through four hooks, in order:
//!
//! 1. [`Engine::start`] restores the registry snapshot from the cache
//! 2. [`Engine::page_processed`] for every page whose header was (re)read
//! 3. [`Engine::pages_initialized`] persists the registry if it changed
//! 4. [`Engine::handle_request`] routes posted data and yields an [`Outcome`]
//!
//! ```rust
//! use std::sync::Arc;
//! use formwork::{Engine, FormRequest, MemoryCache, Outcome, PageHeader, Services};
//!
//! let mut engine = Engine::start(Arc::new(MemoryCache::new()), Services::default())?;
//! let header = PageHeader::from_yaml("/contact", "form:\n  fields:\n    - name: email\n")?;
//! engine.page_processed("/contact", header);
//! engine.pages_initialized()?;
//!
//! let outcome = engine.handle_request(&FormRequest::new("/contact", "GET"))?;
//! assert!(matches!(outcome, Outcome::Render { .. }));
//! # Ok::<(), formwork::FormworkError>(())
//! ```

use crate::actions::{ActionOutcome, ActionPipeline, Services};
use crate::cache::Cache;
use crate::declaration::PageHeader;
use crate::error::Result;
use crate::form::FormInstance;
use crate::registry::{FormRegistry, RegistrySnapshot};
use crate::request::FormRequest;
use crate::response::Outcome;
use crate::router::{Submission, SubmissionRouter};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache key holding the registry snapshot.
pub const SNAPSHOT_KEY: &str = "formwork-forms";

/// Route specs that mean "the page being rendered".
const SELF_ROUTES: [&str; 3] = ["", "@self", "self@"];

/// Owns the form registry for one request and its collaborators.
pub struct Engine {
    registry: FormRegistry,
    cache: Arc<dyn Cache>,
    services: Services,
    pipeline: ActionPipeline,
}

impl Engine {
    /// Starts the engine, restoring the registry from `cache`.
    ///
    /// A missing snapshot starts empty. A snapshot that no longer decodes is
    /// discarded and the registry is rebuilt from pages.
    pub fn start(cache: Arc<dyn Cache>, services: Services) -> Result<Self> {
        let mut registry = FormRegistry::new();

        match cache.get(SNAPSHOT_KEY)? {
            Some(bytes) => match RegistrySnapshot::from_bytes(&bytes) {
                Ok(snapshot) => {
                    registry.restore(snapshot);
                    debug!(forms = registry.len(), "restored form registry");
                }
                Err(e) => warn!(error = %e, "discarding unreadable form snapshot"),
            },
            None => debug!("no form snapshot cached"),
        }

        Ok(Self {
            registry,
            cache,
            services,
            pipeline: ActionPipeline::with_defaults(),
        })
    }

    /// Replaces the action pipeline, e.g. to register custom actions.
    pub fn with_pipeline(mut self, pipeline: ActionPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Registers the forms declared by a page's header.
    pub fn page_processed(&mut self, route: &str, header: PageHeader) {
        if !header.has_forms() {
            return;
        }
        self.registry.register(route, header.into_declarations());
    }

    /// Persists the registry if any page changed it. Returns true if a
    /// snapshot was written.
    pub fn pages_initialized(&mut self) -> Result<bool> {
        if !self.registry.is_dirty() {
            return Ok(false);
        }
        let snapshot = self.registry.persist();
        self.cache.set(SNAPSHOT_KEY, &snapshot.to_bytes()?)?;
        debug!(forms = self.registry.len(), "persisted form registry");
        Ok(true)
    }

    /// Handles a request, processing posted data for at most one form.
    pub fn handle_request(&mut self, request: &FormRequest) -> Result<Outcome> {
        if !request.has_posted_data() {
            return Ok(self.render(&request.route));
        }

        let router = SubmissionRouter::new(&self.pipeline);
        let submission = router.route(&mut self.registry, request, &self.services)?;

        let outcome = match submission {
            Submission::Ignored => self.render(&request.route),
            Submission::Rejected { form, message } => Outcome::ValidationFailed {
                route: request.route.clone(),
                message,
                form,
            },
            Submission::Processed {
                form,
                outcome,
                display_route,
            } => match outcome {
                ActionOutcome::Abort(message) => Outcome::ValidationFailed {
                    route: request.route.clone(),
                    message,
                    form,
                },
                ActionOutcome::Redirect(location) => Outcome::Redirect { location },
                ActionOutcome::Continue => match display_route {
                    Some(route) => Outcome::Display { route, form },
                    None => Outcome::Render {
                        route: request.route.clone(),
                        form: Some(form),
                    },
                },
            },
        };

        info!(route = %request.route, target = ?outcome.route(), "request handled");
        Ok(outcome)
    }

    /// Looks up a form for a template.
    ///
    /// `route_spec` of `None`, `""`, `"@self"` or `"self@"` means
    /// `current_route`. Without a name the route's first form is returned.
    pub fn form_for(
        &self,
        route_spec: Option<&str>,
        name: Option<&str>,
        current_route: &str,
    ) -> Option<&FormInstance> {
        let route = match route_spec {
            Some(spec) if !SELF_ROUTES.contains(&spec) => spec,
            _ => current_route,
        };
        self.registry.lookup(route, name.filter(|n| !n.is_empty()))
    }

    /// The form bound as `form` when `route` renders.
    pub fn page_form(&self, route: &str) -> Option<&FormInstance> {
        self.registry.lookup(route, None)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    /// The collaborators actions run against.
    pub fn services(&self) -> &Services {
        &self.services
    }

    fn render(&self, route: &str) -> Outcome {
        Outcome::Render {
            route: route.to_string(),
            form: self.page_form(route).cloned(),
        }
    }
}
