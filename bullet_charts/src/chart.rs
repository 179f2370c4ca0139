// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bullet chart configuration.
//!
//! A [`BulletChart`] is a reusable renderer: configure it once with the chaining `set_*`
//! methods, then call [`BulletChart::render`] for any number of containers. The chart also
//! remembers the scale it last used for each container so the next render can animate from
//! the old geometry to the new.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use bullet_scene::NodeId;
use hashbrown::HashMap;

use crate::format::TickFormat;
use crate::{BulletData, BulletDatum, ScaleLinear};

/// Reads one value sequence out of a datum. The second argument is the datum's index in the
/// rendered selection.
pub type Accessor<D> = Arc<dyn Fn(&D, usize) -> Vec<f64>>;

/// Which side the bullet's zero sits on.
///
/// Only [`Orient::Right`] and [`Orient::Bottom`] change the rendering: they mirror the value
/// axis so values grow leftwards. Every orientation draws horizontally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orient {
    /// Zero on the left (the default).
    #[default]
    Left,
    /// Zero on the right.
    Right,
    /// Accepted but rendered like `Left`.
    Top,
    /// Accepted and reversed like `Right`, but rendered horizontally.
    Bottom,
    /// Any other orientation name; rendered like `Left`.
    Other(String),
}

impl Orient {
    /// Whether this orientation mirrors the value axis.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    /// The orientation name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Orient {
    fn from(value: &str) -> Self {
        match value {
            "left" => Self::Left,
            "right" => Self::Right,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            other => Self::Other(other.into()),
        }
    }
}

impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configurable bullet chart.
///
/// Defaults: orient [`Orient::Left`], 380 x 30 pixels, no animation, tick labels from the
/// value scale.
pub struct BulletChart<D = BulletDatum> {
    orient: Orient,
    reverse: bool,
    duration: Duration,
    width: f64,
    height: f64,
    tick_format: Option<TickFormat>,
    ranges: Accessor<D>,
    markers: Accessor<D>,
    measures: Accessor<D>,
    pub(crate) scales: HashMap<NodeId, ScaleLinear>,
}

impl<D: BulletData + 'static> BulletChart<D> {
    /// Creates a chart that reads the sequences through [`BulletData`].
    pub fn new() -> Self {
        Self::with_accessors(
            |d: &D, _| d.ranges().to_vec(),
            |d: &D, _| d.markers().to_vec(),
            |d: &D, _| d.measures().to_vec(),
        )
    }
}

impl<D: BulletData + 'static> Default for BulletChart<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> BulletChart<D> {
    /// Creates a chart with default settings and custom accessors for any datum type.
    pub fn with_accessors(
        ranges: impl Fn(&D, usize) -> Vec<f64> + 'static,
        markers: impl Fn(&D, usize) -> Vec<f64> + 'static,
        measures: impl Fn(&D, usize) -> Vec<f64> + 'static,
    ) -> Self {
        Self {
            orient: Orient::Left,
            reverse: false,
            duration: Duration::ZERO,
            width: 380.0,
            height: 30.0,
            tick_format: None,
            ranges: Arc::new(ranges),
            markers: Arc::new(markers),
            measures: Arc::new(measures),
            scales: HashMap::new(),
        }
    }

    /// The configured orientation.
    pub fn orient(&self) -> &Orient {
        &self.orient
    }

    /// Whether values grow leftwards. Derived from [`BulletChart::orient`].
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Transition duration; zero applies changes immediately.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Width of the value axis in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the range bands in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The explicit tick formatter, if any.
    pub fn tick_format(&self) -> Option<&TickFormat> {
        self.tick_format.as_ref()
    }

    /// Accessor for the qualitative ranges.
    pub fn ranges(&self) -> &Accessor<D> {
        &self.ranges
    }

    /// Accessor for the comparative markers.
    pub fn markers(&self) -> &Accessor<D> {
        &self.markers
    }

    /// Accessor for the measured values.
    pub fn measures(&self) -> &Accessor<D> {
        &self.measures
    }

    /// Sets the orientation and updates [`BulletChart::reverse`] to match.
    pub fn set_orient(&mut self, orient: impl Into<Orient>) -> &mut Self {
        let orient = orient.into();
        self.reverse = orient.is_reversed();
        self.orient = orient;
        self
    }

    /// Sets the transition duration.
    pub fn set_duration(&mut self, duration: Duration) -> &mut Self {
        self.duration = duration;
        self
    }

    /// Sets the width of the value axis.
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.width = width;
        self
    }

    /// Sets the band height.
    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.height = height;
        self
    }

    /// Sets an explicit tick formatter.
    pub fn set_tick_format(&mut self, format: impl Fn(f64) -> String + 'static) -> &mut Self {
        self.tick_format = Some(Arc::new(format));
        self
    }

    /// Reverts to tick labels derived from the value scale.
    pub fn clear_tick_format(&mut self) -> &mut Self {
        self.tick_format = None;
        self
    }

    /// Sets the accessor for the qualitative ranges.
    pub fn set_ranges(&mut self, f: impl Fn(&D, usize) -> Vec<f64> + 'static) -> &mut Self {
        self.ranges = Arc::new(f);
        self
    }

    /// Sets the accessor for the comparative markers.
    pub fn set_markers(&mut self, f: impl Fn(&D, usize) -> Vec<f64> + 'static) -> &mut Self {
        self.markers = Arc::new(f);
        self
    }

    /// Sets the accessor for the measured values.
    pub fn set_measures(&mut self, f: impl Fn(&D, usize) -> Vec<f64> + 'static) -> &mut Self {
        self.measures = Arc::new(f);
        self
    }

    /// The scale used by the last render of `container`.
    pub fn previous_scale(&self, container: NodeId) -> Option<ScaleLinear> {
        self.scales.get(&container).copied()
    }

    /// Drops the remembered scale of `container`, so its next render starts from zero.
    pub fn forget(&mut self, container: NodeId) -> Option<ScaleLinear> {
        self.scales.remove(&container)
    }
}

impl<D> fmt::Debug for BulletChart<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulletChart")
            .field("orient", &self.orient)
            .field("reverse", &self.reverse)
            .field("duration", &self.duration)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tick_format", &self.tick_format.is_some())
            .field("containers", &self.scales.len())
            .finish_non_exhaustive()
    }
}
