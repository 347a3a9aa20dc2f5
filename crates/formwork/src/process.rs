// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Declarative per-field transforms applied before actions run.

use crate::datefmt::current_stamp;
use crate::form::FormInstance;
use chrono::{DateTime, Utc};

/// A transform driven by field `process` directives.
pub trait FieldProcessor: Send + Sync {
    /// Applies the transform to every field that asks for it.
    fn process(&self, form: &mut FormInstance, now: &DateTime<Utc>);
}

/// Stamps `fillWithCurrentDateTime` fields with the current UTC time.
#[derive(Debug, Clone, Default)]
pub struct CurrentDateTime;

impl FieldProcessor for CurrentDateTime {
    fn process(&self, form: &mut FormInstance, now: &DateTime<Utc>) {
        let targets: Vec<String> = form
            .fields
            .iter()
            .filter(|f| f.process.fill_with_current_date_time)
            .map(|f| f.name.clone())
            .collect();

        if targets.is_empty() {
            return;
        }

        let stamp = current_stamp(now);
        for name in targets {
            form.set_value(name, stamp.clone());
        }
    }
}
