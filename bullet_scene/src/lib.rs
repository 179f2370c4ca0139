// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small retained SVG element tree for data-driven charts.
//!
//! This crate provides the host primitives a chart renderer builds on:
//! - a [`Document`] of elements with descendant selection, attributes, text and a bound datum,
//! - **joins** ([`join_indexed`], [`join_keyed`]) that reconcile existing elements against new
//!   data into enter/update/exit sets,
//! - a [`Timeline`] of attribute [`Transition`]s driven by an explicit clock, and
//! - SVG serialization ([`write_svg`]).
//!
//! Nothing here knows about any particular chart; the vocabulary is elements and attributes.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod join;
mod node;
mod scene;
mod svg;
mod timeline;

pub use document::Document;
pub use error::{SceneError, SceneResult};
pub use join::{Join, join_indexed, join_keyed};
pub use node::{Attr, AttrValue, Element, NodeId, Tag, Translate};
pub use scene::Scene;
pub use svg::{SvgOptions, content_bounds, to_svg_string, write_svg};
pub use timeline::{Ease, Timeline, Transition};
