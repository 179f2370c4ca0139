// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scale used to place bullet components.
//!
//! The mapping, tick generation and default tick labels follow the conventions of common web
//! charting scales, so that a chart of `[0, 300]` over 8 ticks yields the familiar
//! `0, 50, 100, ..., 300`.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::{TickFormat, format_fixed, precision_fixed};

// Thresholds between the 1/2/5/10 step multipliers: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.071_067_811_865_475_5;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = 1.414_213_562_373_095_1;

/// A linear mapping from a continuous domain to a continuous range.
///
/// Values outside the domain extrapolate; there is no clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// The domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The range as authored.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (`d0 == d1`) maps everything to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let t = normalize(self.domain, x);
        interpolate(self.range, t)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let t = normalize(self.range, y);
        interpolate(self.domain, t)
    }

    /// Returns roughly `count` evenly spaced, human-friendly values inside the domain.
    ///
    /// Steps are 1, 2 or 5 times a power of ten. Ticks are returned in domain order, so a
    /// descending domain yields descending ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count as f64)
    }

    /// The signed distance between adjacent values of [`ScaleLinear::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count as f64)
    }

    /// Returns a formatter for the values produced by [`ScaleLinear::ticks`].
    ///
    /// Labels are fixed-point with just enough decimals to tell adjacent ticks apart, with
    /// `,` as the thousands separator.
    pub fn tick_format(&self, count: usize) -> TickFormat {
        let precision = precision_fixed(self.tick_step(count));
        Arc::new(move |v| format_fixed(v, precision, true))
    }
}

fn normalize((a, b): (f64, f64), x: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.5
    } else if span.is_nan() {
        f64::NAN
    } else {
        (x - a) / span
    }
}

fn interpolate((a, b): (f64, f64), t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// `Math.round` semantics: halves round up.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Returns `(i1, i2, increment)`; a negative increment means ticks are `i / -increment`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10_f64.powf(-power) / factor;
        i1 = round_half_up(start * scale);
        i2 = round_half_up(stop * scale);
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        inc = 10_f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count <= 0.0 {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if i1.is_nan() || i2.is_nan() || i2 < i1 {
        return Vec::new();
    }

    let n = {
        let n_f = (i2 - i1 + 1.0).min(100_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by the ordering check and capped at 100k"
        )]
        {
            n_f as u64
        }
    };
    let at = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    (0..n)
        .map(|k| {
            let k = k as f64;
            if reverse { at(i2 - k) } else { at(i1 + k) }
        })
        .collect()
}

fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let (_, _, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}
