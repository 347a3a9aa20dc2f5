// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use super::open_engine;
use crate::config::Config;
use formwork::Services;
use serde::Serialize;

/// One row of the `forms` listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormListing {
    /// Form name as submitted in `__form-name__`.
    pub name: String,
    /// Route of the page declaring the form.
    pub route: String,
    /// Declared field names.
    pub fields: Vec<String>,
    /// Declared action kinds, in order.
    pub actions: Vec<String>,
}

/// Lists the forms a submission can reach, from the cached registry.
pub fn collect(config: &Config) -> anyhow::Result<Vec<FormListing>> {
    let engine = open_engine(config, Services::with_settings(config.form_settings()))?;

    Ok(engine
        .registry()
        .flatten()
        .into_iter()
        .map(|(name, form)| FormListing {
            name,
            route: form.route.clone(),
            fields: form.fields.iter().map(|f| f.name.clone()).collect(),
            actions: form.actions.iter().map(|a| a.kind.clone()).collect(),
        })
        .collect())
}

/// Prints the cached registry.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let forms = collect(config)?;
    if forms.is_empty() {
        println!("No forms cached. Run `formwork submit` first.");
        return Ok(());
    }

    for form in forms {
        println!(
            "{}\t{}\tfields: {}\tprocess: {}",
            form.name,
            form.route,
            form.fields.join(", "),
            form.actions.join(" → ")
        );
    }
    Ok(())
}
