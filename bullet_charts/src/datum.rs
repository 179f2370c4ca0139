// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The record bound to each bullet container.

extern crate alloc;

use alloc::vec::Vec;

/// Access to the three value sequences of a bullet.
///
/// Implement this for your own record type to use [`BulletChart::new`](crate::BulletChart::new)
/// with the default accessors.
pub trait BulletData {
    /// Qualitative bands, e.g. poor / satisfactory / good thresholds.
    fn ranges(&self) -> &[f64];
    /// Comparative markers, e.g. a target.
    fn markers(&self) -> &[f64];
    /// Measured values, e.g. the actual and a forecast.
    fn measures(&self) -> &[f64];
}

/// A plain bullet record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulletDatum {
    /// Qualitative bands.
    pub ranges: Vec<f64>,
    /// Comparative markers.
    pub markers: Vec<f64>,
    /// Measured values.
    pub measures: Vec<f64>,
}

impl BulletDatum {
    /// Creates a record from its three sequences.
    pub fn new(
        ranges: impl Into<Vec<f64>>,
        markers: impl Into<Vec<f64>>,
        measures: impl Into<Vec<f64>>,
    ) -> Self {
        Self {
            ranges: ranges.into(),
            markers: markers.into(),
            measures: measures.into(),
        }
    }
}

impl BulletData for BulletDatum {
    fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    fn markers(&self) -> &[f64] {
        &self.markers
    }

    fn measures(&self) -> &[f64] {
        &self.measures
    }
}
