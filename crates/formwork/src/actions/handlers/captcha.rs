// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `captcha`: verify the submitted challenge response.

use crate::actions::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::error::Result;
use crate::form::value_to_text;
use crate::translate::ERROR_VALIDATING_CAPTCHA;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// Payload key holding the widget's response token.
pub const RESPONSE_FIELD: &str = "g-recaptcha-response";

/// Verifies `g-recaptcha-response` against the verification service.
///
/// The secret comes from `recaptcha_secret`, then the misspelled
/// `recatpcha_secret` older pages still use, then the configured default.
#[derive(Debug, Clone, Default)]
pub struct CaptchaAction;

impl ActionHandler for CaptchaAction {
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        let secret = event
            .param_str("recaptcha_secret")
            .or_else(|| event.param_str("recatpcha_secret"))
            .map(str::to_string)
            .or_else(|| ctx.services.settings.recaptcha_secret.clone())
            .unwrap_or_default();

        let response = event
            .form
            .value_or_raw(RESPONSE_FIELD)
            .map(value_to_text)
            .unwrap_or_default();

        let answer = ctx.services.verifier.verify(&secret, &response)?;
        if answer.get("success") == Some(&JsonValue::Bool(true)) {
            debug!(form = %event.form.name, "captcha verified");
            return Ok(ActionOutcome::Continue);
        }

        warn!(form = %event.form.name, answer = %answer, "captcha verification failed");
        Ok(ActionOutcome::Abort(
            ctx.services.translator.translate_key(ERROR_VALIDATING_CAPTCHA),
        ))
    }
}
