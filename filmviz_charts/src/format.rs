// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and tooltip rows.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use filmviz_stats::round2;

/// Text shown for an absent value.
pub const NULL_TEXT: &str = "null";

/// Formats an axis tick with zero decimal places.
pub fn format_tick(v: f64) -> String {
    let r = v.round();
    // Avoid printing "-0".
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{r}")
}

/// Formats a tooltip value: integers without decimals, anything else with at most two.
pub fn format_value(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{}", round2(v)),
        _ => String::from(NULL_TEXT),
    }
}
