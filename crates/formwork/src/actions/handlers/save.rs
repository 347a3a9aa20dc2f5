// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! `save`: write the submission below the data root.
//!
//! Parameters:
//!
//! | key | default | meaning |
//! |---|---|---|
//! | `filename` | | explicit file name template |
//! | `fileprefix` | `""` | prefix of generated names |
//! | `dateformat` | `Ymd-His-u` | date part of generated names |
//! | `extension` | `txt` | extension of generated names |
//! | `operation` | `create` | `create` overwrites, `add` appends |
//! | `body` | data template | body template |
//!
//! `add` with a `body` appends under an exclusive file lock. `add` without a
//! `body` keeps a YAML list of records, newest first; concurrent rewrites of
//! that list are not coordinated.
//!
//! Rendered file names must be relative and must not contain `..`.

use crate::actions::{ActionContext, ActionEvent, ActionHandler, ActionOutcome};
use crate::datefmt::{format_php_date, DEFAULT_FILE_DATE_FORMAT};
use crate::error::{FormworkError, Result};
use crate::form::FormInstance;
use crate::template::DEFAULT_DATA_TEMPLATE;
use fs2::FileExt;
use serde_yaml::Value as YamlValue;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Persists submitted values to a file.
#[derive(Debug, Clone, Default)]
pub struct SaveAction;

impl SaveAction {
    fn destination(event: &ActionEvent<'_>, ctx: &ActionContext<'_>) -> Result<(PathBuf, PathBuf)> {
        let filename = match event.param_str("filename") {
            Some(name) => name.to_string(),
            None => {
                let prefix = event.param_str("fileprefix").unwrap_or("");
                let format = event.param_str("dateformat").unwrap_or(DEFAULT_FILE_DATE_FORMAT);
                let ext = event
                    .param_str("extension")
                    .map(|e| e.trim_matches('.'))
                    .filter(|e| !e.is_empty())
                    .unwrap_or("txt");
                format!("{}{}.{}", prefix, format_php_date(format, &ctx.now.naive_utc()), ext)
            }
        };
        let filename = ctx.render(&filename, event.form)?;
        ensure_relative(&filename)?;

        let dir = ctx.services.settings.data_root.join(&event.form.name);
        let path = dir.join(filename);
        Ok((dir, path))
    }
}

impl ActionHandler for SaveAction {
    fn run(&self, event: ActionEvent<'_>, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome> {
        let (dir, path) = Self::destination(&event, ctx)?;
        let operation = event.param_str("operation").unwrap_or("create");
        let body = event.param_str("body");

        match (operation, body) {
            ("create", body) => {
                let content = ctx.render(body.unwrap_or(DEFAULT_DATA_TEMPLATE), event.form)?;
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, content)?;
            }
            ("add", Some(body)) => {
                let line = ctx.render(body, event.form)?;
                append_line(&dir, &path, &line)?;
            }
            ("add", None) => {
                prepend_record(&path, event.form)?;
            }
            (other, _) => {
                warn!(form = %event.form.name, operation = other, "unknown save operation, nothing written");
                return Ok(ActionOutcome::Continue);
            }
        }

        info!(form = %event.form.name, operation, path = %path.display(), "saved submission");
        Ok(ActionOutcome::Continue)
    }
}

/// Rendered names may contain submitted values; only plain relative
/// components are allowed so the file stays below the form directory.
fn ensure_relative(filename: &str) -> Result<()> {
    let path = Path::new(filename);
    let plain = path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    if plain {
        Ok(())
    } else {
        Err(FormworkError::InvalidFileName(filename.to_string()))
    }
}

fn append_line(dir: &Path, path: &Path, line: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    // exclusive for the duration of the write; other appenders block
    file.lock_exclusive()?;
    let written = file.write_all(line.as_bytes());
    FileExt::unlock(&file)?;
    written?;
    Ok(())
}

/// Reads the YAML record list at `path`, puts the form's values first and
/// rewrites the file.
fn prepend_record(path: &Path, form: &FormInstance) -> Result<()> {
    let mut records = if path.exists() {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            Vec::new()
        } else {
            match serde_yaml::from_str::<YamlValue>(&content)? {
                YamlValue::Sequence(items) => items,
                YamlValue::Null => Vec::new(),
                other => vec![other],
            }
        }
    } else {
        Vec::new()
    };

    records.insert(0, serde_yaml::to_value(form.recordable_values())?);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(&records)?)?;
    Ok(())
}
