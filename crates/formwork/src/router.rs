// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Routing of posted submissions to their form.
//!
//! A submission only carries the form's name (`__form-name__`), never its
//! route, so the router matches against the registry's flattened name index.
//! Anything that does not match is left alone: submission handling is opt-in.

use crate::actions::{ActionContext, ActionOutcome, ActionPipeline, Services, ERROR_COLOR};
use crate::error::Result;
use crate::form::{FormInstance, PostOutcome};
use crate::registry::FormRegistry;
use crate::request::{FormRequest, FORM_NAME_FIELD};
use crate::translate::VALIDATION_FAIL;
use tracing::{debug, info, warn};

/// What happened to a request's posted data.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// No form name, or no form by that name.
    Ignored,
    /// Field validation failed; no action ran.
    Rejected {
        /// The rejected form, message set.
        form: FormInstance,
        /// Aggregated validation message.
        message: String,
    },
    /// Validation passed and the pipeline ran.
    Processed {
        /// The form after its actions ran.
        form: FormInstance,
        /// How the pipeline ended.
        outcome: ActionOutcome,
        /// Route a `display` action asked to render instead.
        display_route: Option<String>,
    },
}

/// Matches a posted payload to a registered form and processes it.
pub struct SubmissionRouter<'p> {
    pipeline: &'p ActionPipeline,
}

impl<'p> SubmissionRouter<'p> {
    /// Creates a router running accepted submissions through `pipeline`.
    pub fn new(pipeline: &'p ActionPipeline) -> Self {
        Self { pipeline }
    }

    /// Processes at most one form for `request`.
    pub fn route(
        &self,
        registry: &mut FormRegistry,
        request: &FormRequest,
        services: &Services,
    ) -> Result<Submission> {
        let payload = match request.payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(route = %request.route, error = %e, "unreadable submission body, ignoring");
                return Ok(Submission::Ignored);
            }
        };

        let name = match payload.get(FORM_NAME_FIELD).and_then(|v| v.as_str()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                debug!(route = %request.route, "posted data carries no form name");
                return Ok(Submission::Ignored);
            }
        };

        let Some(form) = registry.find_flat_mut(&name) else {
            debug!(form = %name, "no registered form matches submission");
            return Ok(Submission::Ignored);
        };

        match form.post(&payload, services.validator.as_ref()) {
            PostOutcome::Rejected(failures) => {
                let mut message = services.translator.translate_key(VALIDATION_FAIL);
                for failure in &failures {
                    message.push('\n');
                    message.push_str(failure);
                }
                form.set_message(message.clone(), Some(ERROR_COLOR));
                warn!(form = %name, failures = failures.len(), "submission failed validation");
                Ok(Submission::Rejected {
                    form: form.clone(),
                    message,
                })
            }
            PostOutcome::Accepted(actions) => {
                info!(form = %name, route = %form.route, actions = actions.len(), "submission accepted");
                let mut ctx = ActionContext::new(services, request);
                let outcome = self.pipeline.run(form, &actions, &mut ctx)?;
                Ok(Submission::Processed {
                    form: form.clone(),
                    outcome,
                    display_route: ctx.display_route,
                })
            }
        }
    }
}
