// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A document paired with the timeline that animates it.

extern crate alloc;

use alloc::string::String;
use core::time::Duration;

use crate::error::SceneResult;
use crate::svg::{SvgOptions, to_svg_string};
use crate::{Document, NodeId, Timeline};

/// An element tree and its transitions.
///
/// Renderers write initial attribute values into [`Scene::document`] and schedule animated
/// changes on [`Scene::timeline`]; the caller drives the clock.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// The element tree.
    pub document: Document,
    /// Pending transitions and the clock.
    pub timeline: Timeline,
}

impl Scene {
    /// Creates an empty scene at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.document.root()
    }

    /// Moves the clock to `now` and applies transition progress.
    ///
    /// Returns the number of transitions that completed.
    pub fn advance_to(&mut self, now: Duration) -> SceneResult<usize> {
        self.timeline.advance(&mut self.document, now)
    }

    /// Moves the clock forward by `dt`.
    pub fn advance_by(&mut self, dt: Duration) -> SceneResult<usize> {
        let now = self.timeline.now() + dt;
        self.advance_to(now)
    }

    /// Applies all work due at the current time.
    pub fn flush(&mut self) -> SceneResult<usize> {
        self.timeline.flush(&mut self.document)
    }

    /// Whether every transition has completed.
    pub fn is_settled(&self) -> bool {
        self.timeline.is_idle()
    }

    /// Serializes the document with a fitted view box.
    pub fn to_svg(&self) -> String {
        self.to_svg_with(&SvgOptions::default())
    }

    /// Serializes the document with explicit options.
    pub fn to_svg_with(&self, options: &SvgOptions) -> String {
        to_svg_string(&self.document, options)
    }
}
