// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! reCAPTCHA `siteverify` client.

use crate::config::RecaptchaConfig;
use formwork::services::CaptchaVerifier;
use formwork::{FormworkError, Result};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// Verifies captcha tokens against an HTTP endpoint.
///
/// The endpoint is called with `secret` and `response` query parameters and
/// must answer JSON.
pub struct HttpVerifier {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpVerifier {
    /// Creates a verifier for `url` with a client timeout.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FormworkError::Verification(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Creates a verifier from the `[recaptcha]` configuration section.
    pub fn from_config(config: &RecaptchaConfig) -> Result<Self> {
        Self::new(config.verify_url.clone(), config.timeout_secs)
    }

    /// The verification endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CaptchaVerifier for HttpVerifier {
    fn verify(&self, secret: &str, response: &str) -> Result<JsonValue> {
        debug!(url = %self.url, "verifying captcha response");

        let answer = self
            .client
            .get(&self.url)
            .query(&[("secret", secret), ("response", response)])
            .send()
            .map_err(|e| FormworkError::Verification(format!("HTTP request failed: {}", e)))?
            .json::<JsonValue>()
            .map_err(|e| FormworkError::Verification(format!("Failed to read response body: {}", e)))?;

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let verifier = HttpVerifier::from_config(&RecaptchaConfig::default()).unwrap();
        assert_eq!(verifier.url(), "https://www.google.com/recaptcha/api/siteverify");
    }

    #[test]
    fn test_unreachable_endpoint_is_a_verification_error() {
        let verifier = HttpVerifier::new("http://127.0.0.1:9/siteverify", 2).unwrap();

        let err = verifier.verify("secret", "token").unwrap_err();

        assert!(matches!(err, FormworkError::Verification(_)));
    }
}
