// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Everything an action handler can reach besides the form itself.

use crate::form::FormInstance;
use crate::request::FormRequest;
use crate::services::{
    CaptchaVerifier, FlashStore, MemoryFlashStore, PageDispatcher, StaticPages, StaticVerifier,
};
use crate::template::{PlaceholderRenderer, TemplateRenderer};
use crate::translate::{CatalogTranslator, Translator};
use crate::validation::{FieldValidator, RuleValidator};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;

/// Engine settings consumed by actions.
#[derive(Debug, Clone)]
pub struct FormSettings {
    /// Root directory of `save` action output; each form gets a subdirectory.
    pub data_root: PathBuf,
    /// Captcha secret used when an action declares none.
    pub recaptcha_secret: Option<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("user/data"),
            recaptcha_secret: None,
        }
    }
}

/// Host collaborators shared by all requests.
#[derive(Clone)]
pub struct Services {
    /// String templating.
    pub renderer: Arc<dyn TemplateRenderer>,
    /// Translation lookup.
    pub translator: Arc<dyn Translator>,
    /// Captcha verification service.
    pub verifier: Arc<dyn CaptchaVerifier>,
    /// Flash/session store.
    pub flash: Arc<dyn FlashStore>,
    /// Page router.
    pub pages: Arc<dyn PageDispatcher>,
    /// Field validation.
    pub validator: Arc<dyn FieldValidator>,
    /// Engine settings.
    pub settings: FormSettings,
}

impl Services {
    /// Default collaborators with the given settings.
    pub fn with_settings(settings: FormSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }
}

impl Default for Services {
    /// In-process collaborators. No page is dispatchable and every captcha is
    /// rejected until real ones are plugged in.
    fn default() -> Self {
        Self {
            renderer: Arc::new(PlaceholderRenderer::new()),
            translator: Arc::new(CatalogTranslator::new()),
            verifier: Arc::new(StaticVerifier::rejecting()),
            flash: Arc::new(MemoryFlashStore::new()),
            pages: Arc::new(StaticPages::default()),
            validator: Arc::new(RuleValidator::new()),
            settings: FormSettings::default(),
        }
    }
}

/// Per-request context passed to action handlers.
pub struct ActionContext<'a> {
    /// Host collaborators.
    pub services: &'a Services,
    /// The request being handled.
    pub request: &'a FormRequest,
    /// Time the submission is processed at.
    pub now: DateTime<Utc>,
    /// Route a `display` action asked to render instead of the current page.
    pub display_route: Option<String>,
}

impl<'a> ActionContext<'a> {
    /// Creates a context for `request` at the current time.
    pub fn new(services: &'a Services, request: &'a FormRequest) -> Self {
        Self {
            services,
            request,
            now: Utc::now(),
            display_route: None,
        }
    }

    /// Pins the processing time.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Renders a template with `form` bound as the `form` variable.
    pub fn render(&self, template: &str, form: &FormInstance) -> crate::Result<String> {
        self.services.renderer.render(template, &form.template_vars())
    }

    /// Translates a plain string or structured key.
    pub fn translate(&self, key: &JsonValue) -> String {
        self.services.translator.translate(key)
    }
}
