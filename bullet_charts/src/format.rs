// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;

/// Turns a tick value into its label.
///
/// Tick labels double as the identity of tick groups across renders, so a formatter should be
/// deterministic.
pub type TickFormat = Arc<dyn Fn(f64) -> String>;

/// Formats `value` with exactly `precision` decimals.
///
/// With `grouping`, the integer part gets `,` thousands separators. Negative zero, and values
/// that round to zero, print without a sign. Non-finite values print as `NaN`, `Infinity` or
/// `-Infinity`.
pub fn format_fixed(value: f64, precision: usize, grouping: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }

    let digits = format!("{:.*}", precision, value.abs());
    let negative = value < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    if grouping {
        let lead = int.len() % 3;
        for (i, c) in int.chars().enumerate() {
            if i != 0 && (i + 3 - lead) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
    } else {
        out.push_str(int);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Decimals needed so that values `step` apart format distinctly.
///
/// This is the negated decimal exponent of `step`, floored at zero. Zero and non-finite steps
/// need no decimals.
pub fn precision_fixed(step: f64) -> usize {
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    // Scientific notation gives the exponent exactly, without log10 rounding at powers of ten.
    let sci = format!("{:e}", step.abs());
    let exponent = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse::<i64>().ok())
        .unwrap_or(0);
    usize::try_from(-exponent).unwrap_or(0)
}
