// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Captcha verification over HTTP.

mod recaptcha;

pub use recaptcha::HttpVerifier;
