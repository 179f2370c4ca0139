// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stylesheet for the bullet class names.

use std::fmt::Write;

use peniko::Color;
use peniko::color::palette::css;

/// Paints for each bullet component.
#[derive(Clone, Debug)]
pub(crate) struct BulletStyle {
    /// Range band fills, outermost first (`range s0`, `range s1`, ...).
    pub(crate) ranges: [Color; 3],
    pub(crate) measure: Color,
    pub(crate) marker: Color,
    pub(crate) tick: Color,
    pub(crate) subtitle: Color,
}

impl Default for BulletStyle {
    fn default() -> Self {
        Self {
            ranges: [
                Color::from_rgb8(0xee, 0xee, 0xee),
                Color::from_rgb8(0xdd, 0xdd, 0xdd),
                Color::from_rgb8(0xcc, 0xcc, 0xcc),
            ],
            // Overlapping measures read darker.
            measure: css::STEEL_BLUE.with_alpha(0.6),
            marker: css::BLACK,
            tick: Color::from_rgb8(0x66, 0x66, 0x66),
            subtitle: Color::from_rgb8(0x99, 0x99, 0x99),
        }
    }
}

impl BulletStyle {
    pub(crate) fn stylesheet(&self) -> String {
        let mut out = String::from(".bullet { font: 10px sans-serif; }\n");
        for (i, color) in self.ranges.iter().enumerate() {
            let _ = writeln!(out, ".bullet .range.s{i} {{ {} }}", fill(*color));
        }
        let _ = writeln!(out, ".bullet .measure {{ {} }}", fill(self.measure));
        let _ = writeln!(
            out,
            ".bullet .marker {{ {} stroke-width: 2px; }}",
            stroke(self.marker)
        );
        let _ = writeln!(
            out,
            ".bullet .tick line {{ {} stroke-width: 0.5px; }}",
            stroke(self.tick)
        );
        out.push_str(".bullet .title { font-size: 14px; font-weight: bold; }\n");
        let _ = write!(out, ".bullet .subtitle {{ {} }}", fill(self.subtitle));
        out
    }
}

fn fill(color: Color) -> String {
    paint("fill", color)
}

fn stroke(color: Color) -> String {
    paint("stroke", color)
}

fn paint(name: &str, color: Color) -> String {
    let rgba = color.to_rgba8();
    let mut out = format!("{name}: #{:02x}{:02x}{:02x};", rgba.r, rgba.g, rgba.b);
    if rgba.a != 255 {
        let _ = write!(out, " {name}-opacity: {:.2};", f64::from(rgba.a) / 255.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_covers_every_class() {
        let css = BulletStyle::default().stylesheet();
        for class in [".range.s0", ".range.s2", ".measure", ".marker", ".tick line"] {
            assert!(css.contains(class), "missing {class}");
        }
        assert!(css.contains(".bullet .range.s1 { fill: #dddddd; }"));
        assert!(css.contains("fill: #4682b4; fill-opacity: 0.60;"));
    }
}
