// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `reset`: clear the submitted values.

use crate::actions::{is_positive, ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::error::Result;

/// Resets the form when the parameter is truthy.
#[derive(Debug, Clone, Default)]
pub struct ResetAction;

impl ActionHandler for ResetAction {
    fn run(&self, event: ActionEvent<'_>, _ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        if is_positive(event.params) {
            event.form.reset();
        }
        Ok(ActionOutcome::Continue)
    }
}
