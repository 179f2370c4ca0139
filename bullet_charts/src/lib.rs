// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated bullet charts over `bullet_scene`.
//!
//! A bullet chart shows a measured value (the **measure** bar) against qualitative **ranges**
//! (stacked background bands) and comparative **markers** (e.g. a target), with an axis of
//! **ticks** underneath. This crate provides:
//! - [`BulletChart`], a reusable chart configured with chaining setters and rendered into any
//!   number of container elements of a [`bullet_scene::Scene`],
//! - [`ScaleLinear`], the value scale with tick generation and label formatting, and
//! - the [`translate`] and [`width`] geometry helpers.
//!
//! Re-rendering a container with new data animates every component from its previous
//! geometry; tick groups are matched by label so surviving ticks slide into place.
//!
//! ```
//! use bullet_charts::{BulletChart, BulletDatum};
//! use bullet_scene::{Scene, Tag};
//!
//! let mut scene = Scene::new();
//! let g = scene.document.append(scene.root(), Tag::G)?;
//! let revenue = BulletDatum::new([150.0, 225.0, 300.0], [250.0], [220.0]);
//!
//! let mut chart = BulletChart::new();
//! chart.set_width(380.0).set_height(30.0);
//! chart.render(&mut scene, [(g, &revenue)])?;
//! assert!(scene.to_svg().contains(r#"class="range s0""#));
//! # Ok::<(), bullet_scene::SceneError>(())
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod chart;
mod datum;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod render;
mod scale;

pub use chart::{Accessor, BulletChart, Orient};
pub use datum::{BulletData, BulletDatum};
pub use format::{TickFormat, format_fixed, precision_fixed};
pub use geometry::{translate, width};
pub use scale::ScaleLinear;
