// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `ip`: record the client address in a synthetic field.

use crate::actions::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::declaration::FieldDeclaration;
use crate::error::Result;

const DEFAULT_LABEL: &str = "User IP";

/// Adds an `ip` field to the schema and fills it with the client address.
#[derive(Debug, Clone, Default)]
pub struct IpAction;

impl ActionHandler for IpAction {
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        let label = event.param_str("label").unwrap_or(DEFAULT_LABEL).to_string();
        event.form.set_field(FieldDeclaration::new("ip").with_label(label));
        event.form.set_value("ip", ctx.request.client_ip.clone());
        Ok(ActionOutcome::Continue)
    }
}
