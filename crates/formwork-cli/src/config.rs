// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! formwork project configuration.
//!
//! Configuration is loaded from `formwork.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! name = "site"
//!
//! [storage]
//! data_dir = "user/data"
//! cache_dir = ".formwork"
//!
//! [recaptcha]
//! secret_key = "6Lc..."
//! verify_url = "https://www.google.com/recaptcha/api/siteverify"
//! timeout_secs = 30
//! ```

use anyhow::Context;
use formwork::FormSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "formwork.toml";

/// Main configuration structure loaded from `formwork.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Where submissions and the registry cache are stored.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Captcha verification service.
    #[serde(default)]
    pub recaptcha: RecaptchaConfig,
}

/// Project metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project name (default: "unnamed").
    #[serde(default = "default_name")]
    pub name: String,
}

/// Storage locations.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root of `save` action output (default: "user/data").
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory holding the SQLite registry cache (default: ".formwork").
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

/// reCAPTCHA verification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecaptchaConfig {
    /// Secret used when a `captcha` action declares none.
    #[serde(default)]
    pub secret_key: String,
    /// Verification endpoint.
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
    /// HTTP client timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("user/data")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".formwork")
}

fn default_verify_url() -> String {
    "https://www.google.com/recaptcha/api/siteverify".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            verify_url: default_verify_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, `formwork.toml` in the
    /// current directory is read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        Ok(config)
    }

    /// Engine settings derived from this configuration.
    pub fn form_settings(&self) -> FormSettings {
        let secret = self.recaptcha.secret_key.trim();
        FormSettings {
            data_root: self.storage.data_dir.clone(),
            recaptcha_secret: (!secret.is_empty()).then(|| secret.to_string()),
        }
    }
}
