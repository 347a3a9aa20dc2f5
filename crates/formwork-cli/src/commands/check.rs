// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::pages::PagesFile;
use formwork::ActionPipeline;
use std::path::Path;
use tracing::info;

/// Forms declared by one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    /// Page route.
    pub route: String,
    /// Declared form names.
    pub forms: Vec<String>,
    /// Action kinds no built-in handler knows.
    pub unknown_actions: Vec<String>,
}

/// Parses every page header and reports its forms.
///
/// Fails on the first page whose declaration does not parse.
pub fn inspect(pages_path: &Path) -> anyhow::Result<Vec<PageReport>> {
    let pages = PagesFile::load(pages_path)?;
    let pipeline = ActionPipeline::with_defaults();

    let mut reports = Vec::new();
    for (route, header) in pages.headers()? {
        let declarations = header.into_declarations();
        let unknown_actions = declarations
            .iter()
            .flat_map(|(_, decl)| decl.actions.iter())
            .filter(|action| !pipeline.handles(&action.kind))
            .map(|action| action.kind.clone())
            .collect();
        reports.push(PageReport {
            route,
            forms: declarations.into_iter().map(|(name, _)| name).collect(),
            unknown_actions,
        });
    }

    info!(pages = reports.len(), "checked pages file");
    Ok(reports)
}

/// Prints the forms declared per route.
pub fn run(pages_path: &Path) -> anyhow::Result<()> {
    let reports = inspect(pages_path)?;

    for report in &reports {
        if report.forms.is_empty() {
            continue;
        }
        println!("{}: {}", report.route, report.forms.join(", "));
        for kind in &report.unknown_actions {
            println!("  warning: unknown action `{}` will be skipped", kind);
        }
    }

    let total: usize = reports.iter().map(|r| r.forms.len()).sum();
    println!("✓ {} form(s) on {} page(s)", total, reports.len());
    Ok(())
}
