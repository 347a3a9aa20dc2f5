// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use super::open_engine;
use crate::config::Config;
use crate::pages::PagesFile;
use crate::verify::HttpVerifier;
use formwork::{FormRequest, Outcome, Services};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Content type assumed when none is given.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One submission to replay.
#[derive(Debug, Clone)]
pub struct SubmitArgs<'a> {
    /// Pages file declaring the forms.
    pub pages: &'a Path,
    /// Route the submission is posted to.
    pub route: &'a str,
    /// Raw request body.
    pub body: &'a str,
    /// Body content type.
    pub content_type: &'a str,
    /// Client address, if known.
    pub ip: Option<&'a str>,
}

/// Runs the full request lifecycle for one submission.
///
/// The registry is restored from the cache, every page in the pages file is
/// processed, the registry is persisted if it changed and the submission is
/// handled.
pub fn execute(config: &Config, args: &SubmitArgs<'_>) -> anyhow::Result<Outcome> {
    let pages = PagesFile::load(args.pages)?;

    let services = Services {
        verifier: Arc::new(HttpVerifier::from_config(&config.recaptcha)?),
        pages: Arc::new(pages.dispatcher()),
        ..Services::with_settings(config.form_settings())
    };
    let mut engine = open_engine(config, services)?;

    for (route, header) in pages.headers()? {
        engine.page_processed(&route, header);
    }
    if engine.pages_initialized()? {
        info!(forms = engine.registry().len(), "form registry cached");
    }

    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), args.content_type.to_string());
    let mut request = FormRequest::new(args.route, "POST")
        .with_headers(headers)
        .with_body(args.body.as_bytes().to_vec());
    if let Some(ip) = args.ip {
        request = request.with_client_ip(ip);
    }

    Ok(engine.handle_request(&request)?)
}

/// Handles a submission and prints the outcome as JSON.
pub fn run(config: &Config, args: &SubmitArgs<'_>) -> anyhow::Result<()> {
    let outcome = execute(config, args)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
