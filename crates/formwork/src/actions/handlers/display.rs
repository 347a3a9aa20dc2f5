// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `display`: render another page in place of the submitting one.

use crate::actions::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::error::{FormworkError, Result};

/// Resolves the target route and asks the host to render it with the form
/// bound. A route that resolves to no page is a configuration fault.
#[derive(Debug, Clone, Default)]
pub struct DisplayAction;

/// Absolute routes are kept; empty or relative ones hang off `current`.
pub fn resolve_route(current: &str, target: &str) -> String {
    if target.starts_with('/') {
        return target.to_string();
    }
    let base = current.trim_end_matches('/');
    if target.is_empty() {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else {
        format!("{}/{}", base, target)
    }
}

impl ActionHandler for DisplayAction {
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        let route = resolve_route(&ctx.request.route, &event.scalar_param());
        let page = ctx
            .services
            .pages
            .dispatch(&route)
            .ok_or(FormworkError::DisplayPageNotFound(route))?;
        ctx.display_route = Some(page);
        Ok(ActionOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_route() {
        assert_eq!(resolve_route("/contact", "/thanks"), "/thanks");
        assert_eq!(resolve_route("/contact", "thanks"), "/contact/thanks");
        assert_eq!(resolve_route("/contact", ""), "/contact");
        assert_eq!(resolve_route("/", "thanks"), "/thanks");
        assert_eq!(resolve_route("/", ""), "/");
    }
}
