// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Post-processing actions run after a submission is accepted.
//!
//! A form declares an ordered list of actions under its `process` key:
//!
//! ```yaml
//! process:
//!   - captcha: { recaptcha_secret: "6Lc..." }
//!   - ip: { label: Sender }
//!   - save: { fileprefix: feedback-, operation: add }
//!   - message: "Thanks {{ form.value.name }}!"
//!   - display: thankyou
//! ```
//!
//! Each kind maps to an [`ActionHandler`] registered on the
//! [`ActionPipeline`]. Handlers return an [`ActionOutcome`]; anything other
//! than [`ActionOutcome::Continue`] ends the run.

mod context;
pub mod handlers;
mod outcome;
mod pipeline;

pub use context::{ActionContext, FormSettings, Services};
pub use outcome::{is_positive, ActionEvent, ActionOutcome};
pub use pipeline::{ActionPipeline, ERROR_COLOR};

use crate::error::Result;

/// A named post-processing step.
pub trait ActionHandler: Send + Sync {
    /// Runs the action against an accepted form.
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome>;
}
