// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `redirect`: hand the form to the next page and leave.

use crate::actions::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::error::Result;

/// Flash key the redirected-to page reads the form from.
pub const FLASH_KEY: &str = "form";

/// Flashes the form and redirects; later actions never run.
#[derive(Debug, Clone, Default)]
pub struct RedirectAction;

impl ActionHandler for RedirectAction {
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        let target = event.scalar_param();
        ctx.services.flash.set_flash(FLASH_KEY, event.form.clone())?;
        Ok(ActionOutcome::Redirect(target))
    }
}
