// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Date formatting with PHP-style format characters.
//!
//! Page authors write `dateformat: Ymd-His-u` in `save` actions, so file
//! names are built from the classic single-letter date codes rather than
//! strftime sequences. A backslash makes the next character literal.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};

/// Default `dateformat` of the `save` action.
pub const DEFAULT_FILE_DATE_FORMAT: &str = "Ymd-His-u";

/// Pattern stamped into `fillWithCurrentDateTime` fields (`D, d M Y H:i:s`).
pub const STAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// Formats `at` following PHP `date()` format characters.
///
/// Supported: `Y y m n d j H G h g i s u v D l M F A a U N`.
pub fn format_php_date(format: &str, at: &NaiveDateTime) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(literal) = chars.next() {
                    out.push(literal);
                }
            }
            'Y' => out.push_str(&at.format("%Y").to_string()),
            'y' => out.push_str(&at.format("%y").to_string()),
            'm' => out.push_str(&format!("{:02}", at.month())),
            'n' => out.push_str(&at.month().to_string()),
            'd' => out.push_str(&format!("{:02}", at.day())),
            'j' => out.push_str(&at.day().to_string()),
            'H' => out.push_str(&format!("{:02}", at.hour())),
            'G' => out.push_str(&at.hour().to_string()),
            'h' => out.push_str(&format!("{:02}", at.hour12().1)),
            'g' => out.push_str(&at.hour12().1.to_string()),
            'i' => out.push_str(&format!("{:02}", at.minute())),
            's' => out.push_str(&format!("{:02}", at.second())),
            'u' => out.push_str(&format!("{:06}", at.nanosecond() % 1_000_000_000 / 1_000)),
            'v' => out.push_str(&format!("{:03}", at.nanosecond() % 1_000_000_000 / 1_000_000)),
            'D' => out.push_str(&at.format("%a").to_string()),
            'l' => out.push_str(&at.format("%A").to_string()),
            'M' => out.push_str(&at.format("%b").to_string()),
            'F' => out.push_str(&at.format("%B").to_string()),
            'A' => out.push_str(if at.hour12().0 { "PM" } else { "AM" }),
            'a' => out.push_str(if at.hour12().0 { "pm" } else { "am" }),
            'U' => out.push_str(&at.and_utc().timestamp().to_string()),
            'N' => out.push_str(&at.weekday().number_from_monday().to_string()),
            other => out.push(other),
        }
    }

    out
}

/// Current UTC time in the fixed human-readable stamp pattern.
pub fn current_stamp(now: &DateTime<Utc>) -> String {
    now.format(STAMP_FORMAT).to_string()
}
