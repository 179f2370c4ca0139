// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute helpers derived from a scale.

use bullet_scene::Translate;

use crate::ScaleLinear;

/// Returns a function placing a tick group at `scale(d)` along the x axis.
pub fn translate(scale: ScaleLinear) -> impl Fn(f64) -> Translate {
    move |d| Translate::new(scale.map(d), 0.0)
}

/// Returns a function giving the extent of a bar running from `0` to `d`.
///
/// The result is `|scale(d) - scale(0)|`, so it is non-negative for either range direction.
pub fn width(scale: ScaleLinear) -> impl Fn(f64) -> f64 {
    let x0 = scale.map(0.0);
    move |d| (scale.map(d) - x0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_places_along_x() {
        let t = translate(ScaleLinear::new((0.0, 300.0), (0.0, 380.0)));
        assert_eq!(t(150.0), Translate::new(190.0, 0.0));
        assert_eq!(t(0.0).y(), 0.0);
    }

    #[test]
    fn width_is_direction_independent() {
        let fwd = width(ScaleLinear::new((0.0, 300.0), (0.0, 380.0)));
        let rev = width(ScaleLinear::new((0.0, 300.0), (380.0, 0.0)));
        assert!((fwd(225.0) - 285.0).abs() < 1e-9);
        assert!((rev(225.0) - 285.0).abs() < 1e-9);
        assert_eq!(fwd(0.0), 0.0);
    }

    #[test]
    fn width_under_unbounded_domain_is_zero() {
        let w = width(ScaleLinear::new((0.0, f64::INFINITY), (0.0, 380.0)));
        assert_eq!(w(270.0), 0.0);
    }
}
