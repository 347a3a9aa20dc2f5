// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `message`: set the form's status message.

use crate::actions::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::error::Result;

/// Translates the parameter, renders it with `form` bound and stores the
/// result as the status message.
#[derive(Debug, Clone, Default)]
pub struct MessageAction;

impl ActionHandler for MessageAction {
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        let template = ctx.translate(event.params);
        let message = ctx.render(&template, event.form)?;
        event.form.message = Some(message);
        Ok(ActionOutcome::Continue)
    }
}
