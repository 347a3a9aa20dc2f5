// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The action pipeline driver.

use super::handlers::{
    CaptchaAction, DisplayAction, IpAction, MessageAction, RedirectAction, ResetAction, SaveAction,
};
use super::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::declaration::ActionDeclaration;
use crate::error::Result;
use crate::form::{FormInstance, FormStatus};
use crate::process::{CurrentDateTime, FieldProcessor};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Color given to messages of rejected submissions.
pub const ERROR_COLOR: &str = "red";

/// Runs declared actions, in order, against an accepted form.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = ActionPipeline::with_defaults();
/// let mut ctx = ActionContext::new(&services, &request);
/// match pipeline.run(&mut form, &form_actions, &mut ctx)? {
///     ActionOutcome::Continue => { /* render the page */ }
///     ActionOutcome::Abort(message) => { /* re-render with message */ }
///     ActionOutcome::Redirect(path) => { /* send Location */ }
/// }
/// ```
pub struct ActionPipeline {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
    processors: Vec<Box<dyn FieldProcessor>>,
}

impl ActionPipeline {
    /// Creates a pipeline with no handlers and no field processors.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            processors: Vec::new(),
        }
    }

    /// Creates a pipeline with every built-in action and the date stamper.
    pub fn with_defaults() -> Self {
        let mut pipeline = Self::new();
        pipeline.register("captcha", CaptchaAction);
        pipeline.register("ip", IpAction);
        pipeline.register("message", MessageAction);
        pipeline.register("redirect", RedirectAction);
        pipeline.register("reset", ResetAction);
        pipeline.register("display", DisplayAction);
        pipeline.register("save", SaveAction);
        pipeline.add_processor(CurrentDateTime);
        pipeline
    }

    /// Registers (or replaces) the handler for an action kind.
    pub fn register(&mut self, kind: impl Into<String>, handler: impl ActionHandler + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    /// Adds a field processor run before the actions.
    pub fn add_processor(&mut self, processor: impl FieldProcessor + 'static) {
        self.processors.push(Box::new(processor));
    }

    /// Returns true if a handler is registered for `kind`.
    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Runs field processors once, then `actions` in order.
    ///
    /// Stops at the first outcome other than `Continue`. An `Abort` marks the
    /// form rejected with the message in [`ERROR_COLOR`]. Unknown action
    /// kinds are skipped.
    pub fn run(
        &self,
        form: &mut FormInstance,
        actions: &[ActionDeclaration],
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome> {
        for processor in &self.processors {
            processor.process(form, &ctx.now);
        }

        for action in actions {
            let Some(handler) = self.handlers.get(&action.kind) else {
                warn!(form = %form.name, kind = %action.kind, "no handler for action, skipping");
                continue;
            };

            debug!(form = %form.name, kind = %action.kind, "running action");
            let event = ActionEvent {
                form: &mut *form,
                kind: &action.kind,
                params: &action.params,
            };

            match handler.run(event, ctx)? {
                ActionOutcome::Continue => {}
                ActionOutcome::Abort(message) => {
                    form.status = FormStatus::Rejected;
                    form.set_message(message.clone(), Some(ERROR_COLOR));
                    return Ok(ActionOutcome::Abort(message));
                }
                redirect @ ActionOutcome::Redirect(_) => return Ok(redirect),
            }
        }

        Ok(ActionOutcome::Continue)
    }
}

impl Default for ActionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
