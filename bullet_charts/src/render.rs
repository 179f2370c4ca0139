// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering a [`BulletChart`] into a [`Scene`].

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use bullet_scene::{
    Attr, Document, NodeId, Scene, SceneError, Tag, Timeline, Transition, join_indexed,
    join_keyed,
};
use tracing::{debug, trace};

use crate::format::TickFormat;
use crate::{BulletChart, ScaleLinear, translate, width};

/// Number of ticks requested from the value scale.
const TICK_COUNT: usize = 8;

/// Opacity of tick groups fading in or out.
const HIDDEN: f64 = 1e-6;

impl<D> BulletChart<D> {
    /// Renders one bullet into each container of `selection`.
    ///
    /// Each item pairs a container element (usually a `g`) with its datum; the datum's index in
    /// the selection is passed to the accessors. Children of the container are reconciled with
    /// the datum: new elements start from the container's previous scale and transition over
    /// [`BulletChart::duration`] to the new one. Zero-duration changes are applied before this
    /// returns; longer ones advance with the scene clock.
    ///
    /// Range bands, measure bars and markers beyond the new sequence lengths are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if a container is not in the scene. Containers
    /// rendered before the failing one keep their new state, flushed like a successful render;
    /// later ones are not touched.
    pub fn render<'a, I>(&mut self, scene: &mut Scene, selection: I) -> Result<(), SceneError>
    where
        I: IntoIterator<Item = (NodeId, &'a D)>,
        D: 'a,
    {
        let doc = &scene.document;
        self.scales.retain(|id, _| doc.contains(*id));

        let mut rendered = Ok(());
        for (index, (container, datum)) in selection.into_iter().enumerate() {
            rendered = self.render_one(scene, container, datum, index);
            if rendered.is_err() {
                break;
            }
        }
        scene.flush()?;
        rendered
    }

    fn render_one(
        &mut self,
        scene: &mut Scene,
        container: NodeId,
        datum: &D,
        index: usize,
    ) -> Result<(), SceneError> {
        if !scene.document.contains(container) {
            return Err(SceneError::UnknownNode(container));
        }

        let ranges = sorted_descending((self.ranges())(datum, index));
        let markers = sorted_descending((self.markers())(datum, index));
        let measures = sorted_descending((self.measures())(datum, index));

        let ceiling = ceiling([head(&ranges), head(&markers), head(&measures)]);
        let range = if self.reverse() {
            (self.width(), 0.0)
        } else {
            (0.0, self.width())
        };
        let new = ScaleLinear::new((0.0, ceiling), range);
        let old = self
            .scales
            .get(&container)
            .copied()
            .unwrap_or_else(|| ScaleLinear::new((0.0, f64::INFINITY), range));
        self.scales.insert(container, new);

        debug!(
            %container,
            index,
            ceiling,
            orient = %self.orient(),
            reverse = self.reverse(),
            "rendering bullet"
        );

        let frame = Frame {
            old,
            new,
            height: self.height(),
            reverse: self.reverse(),
            duration: self.duration(),
        };
        let Scene { document, timeline } = scene;
        let mut layer = Layer {
            doc: document,
            timeline,
            container,
            frame: &frame,
        };

        layer.bars(&ranges, Bar::Range)?;
        layer.bars(&measures, Bar::Measure)?;
        layer.markers(&markers)?;

        let format = self
            .tick_format()
            .cloned()
            .unwrap_or_else(|| new.tick_format(TICK_COUNT));
        layer.ticks(&new.ticks(TICK_COUNT), &format)
    }
}

fn sorted_descending(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| b.total_cmp(a));
    values
}

fn head(values: &[f64]) -> f64 {
    values.first().copied().unwrap_or(f64::NAN)
}

/// The largest of `heads`, or NaN if any of them is NaN.
fn ceiling(heads: [f64; 3]) -> f64 {
    heads.into_iter().fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

/// Old and new geometry of one container.
struct Frame {
    old: ScaleLinear,
    new: ScaleLinear,
    height: f64,
    reverse: bool,
    duration: Duration,
}

impl Frame {
    /// Bars grow from the zero edge; when mirrored their left edge moves with the value.
    fn bar_x(&self, scale: ScaleLinear, d: f64) -> f64 {
        if self.reverse { scale.map(d) } else { 0.0 }
    }

    fn transition(&self, node: NodeId) -> Transition {
        Transition::new(node, self.duration)
    }
}

#[derive(Clone, Copy, Debug)]
enum Bar {
    Range,
    Measure,
}

impl Bar {
    fn selector(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Measure => "measure",
        }
    }

    fn class(self, index: usize) -> String {
        match self {
            Self::Range => format!("range s{index}"),
            Self::Measure => "measure".into(),
        }
    }

    /// Height and vertical offset for a bullet of height `h`.
    fn extent(self, h: f64) -> (f64, Option<f64>) {
        match self {
            Self::Range => (h, None),
            Self::Measure => (h / 3.0, Some(h / 3.0)),
        }
    }
}

/// Reconciles the children of one container.
struct Layer<'a> {
    doc: &'a mut Document,
    timeline: &'a mut Timeline,
    container: NodeId,
    frame: &'a Frame,
}

impl Layer<'_> {
    fn bars(&mut self, values: &[f64], bar: Bar) -> Result<(), SceneError> {
        let frame = self.frame;
        let (w0, w1) = (width(frame.old), width(frame.new));
        let (height, y) = bar.extent(frame.height);

        let existing = self
            .doc
            .select_all(self.container, Tag::Rect, Some(bar.selector()));
        let join = join_indexed(&existing, values.len());
        trace!(
            container = %self.container,
            layer = bar.selector(),
            enter = join.enter.len(),
            update = join.update.len(),
            "joined"
        );

        for &i in &join.enter {
            let d = values[i];
            let rect = self.doc.append(self.container, Tag::Rect)?;
            self.doc.set_datum(rect, d)?;
            self.doc.set_attr(rect, Attr::Class, bar.class(i))?;
            self.doc.set_attr(rect, Attr::Width, w0(d))?;
            self.doc.set_attr(rect, Attr::Height, height)?;
            self.doc.set_attr(rect, Attr::X, frame.bar_x(frame.old, d))?;
            if let Some(y) = y {
                self.doc.set_attr(rect, Attr::Y, y)?;
            }
            self.timeline.schedule(
                frame
                    .transition(rect)
                    .with_attr(Attr::Width, w1(d))
                    .with_attr(Attr::X, frame.bar_x(frame.new, d)),
            );
        }

        for &(rect, i) in &join.update {
            let d = values[i];
            self.doc.set_datum(rect, d)?;
            let mut t = frame
                .transition(rect)
                .with_attr(Attr::X, frame.bar_x(frame.new, d))
                .with_attr(Attr::Width, w1(d))
                .with_attr(Attr::Height, height);
            if let Some(y) = y {
                t = t.with_attr(Attr::Y, y);
            }
            self.timeline.schedule(t);
        }
        Ok(())
    }

    fn markers(&mut self, values: &[f64]) -> Result<(), SceneError> {
        let frame = self.frame;
        let (y1, y2) = (frame.height / 6.0, frame.height * 5.0 / 6.0);

        let existing = self
            .doc
            .select_all(self.container, Tag::Line, Some("marker"));
        let join = join_indexed(&existing, values.len());
        trace!(
            container = %self.container,
            layer = "marker",
            enter = join.enter.len(),
            update = join.update.len(),
            "joined"
        );

        for &i in &join.enter {
            let d = values[i];
            let x = frame.old.map(d);
            let line = self.doc.append(self.container, Tag::Line)?;
            self.doc.set_datum(line, d)?;
            self.doc.set_attr(line, Attr::Class, "marker")?;
            self.doc.set_attr(line, Attr::X1, x)?;
            self.doc.set_attr(line, Attr::X2, x)?;
            self.doc.set_attr(line, Attr::Y1, y1)?;
            self.doc.set_attr(line, Attr::Y2, y2)?;
            let x = frame.new.map(d);
            self.timeline.schedule(
                frame
                    .transition(line)
                    .with_attr(Attr::X1, x)
                    .with_attr(Attr::X2, x),
            );
        }

        for &(line, i) in &join.update {
            let d = values[i];
            self.doc.set_datum(line, d)?;
            let x = frame.new.map(d);
            self.timeline.schedule(
                frame
                    .transition(line)
                    .with_attr(Attr::X1, x)
                    .with_attr(Attr::X2, x)
                    .with_attr(Attr::Y1, y1)
                    .with_attr(Attr::Y2, y2),
            );
        }
        Ok(())
    }

    /// Tick groups are keyed by their label, so a tick whose value survives a rescale slides
    /// to its new position instead of being replaced.
    fn ticks(&mut self, values: &[f64], format: &TickFormat) -> Result<(), SceneError> {
        let frame = self.frame;
        let (at_old, at_new) = (translate(frame.old), translate(frame.new));
        let (y1, y2) = (frame.height, frame.height * 7.0 / 6.0);

        let existing: Vec<(NodeId, String)> = self
            .doc
            .select_all(self.container, Tag::G, Some("tick"))
            .into_iter()
            .map(|g| {
                let text = self.doc.text_content(g);
                let key = if text.is_empty() {
                    format(self.doc.datum(g).unwrap_or(f64::NAN))
                } else {
                    text
                };
                (g, key)
            })
            .collect();
        let join = join_keyed(existing, values.iter().map(|&v| format(v)));
        trace!(
            container = %self.container,
            layer = "tick",
            enter = join.enter.len(),
            update = join.update.len(),
            exit = join.exit.len(),
            "joined"
        );

        for &i in &join.enter {
            let d = values[i];
            let g = self.doc.append(self.container, Tag::G)?;
            self.doc.set_datum(g, d)?;
            self.doc.set_attr(g, Attr::Class, "tick")?;
            self.doc.set_attr(g, Attr::Transform, at_old(d))?;
            self.doc.set_attr(g, Attr::Opacity, HIDDEN)?;

            let line = self.doc.append(g, Tag::Line)?;
            self.doc.set_attr(line, Attr::Y1, y1)?;
            self.doc.set_attr(line, Attr::Y2, y2)?;

            let text = self.doc.append(g, Tag::Text)?;
            self.doc.set_attr(text, Attr::TextAnchor, "middle")?;
            self.doc.set_attr(text, Attr::Dy, "1em")?;
            self.doc.set_attr(text, Attr::Y, y2)?;
            self.doc.set_text(text, format(d))?;

            self.timeline.schedule(
                frame
                    .transition(g)
                    .with_attr(Attr::Transform, at_new(d))
                    .with_attr(Attr::Opacity, 1.0),
            );
        }

        for &(g, i) in &join.update {
            let d = values[i];
            self.doc.set_datum(g, d)?;
            self.timeline.schedule(
                frame
                    .transition(g)
                    .with_attr(Attr::Transform, at_new(d))
                    .with_attr(Attr::Opacity, 1.0),
            );
            if let Some(line) = self.doc.select(g, Tag::Line) {
                self.timeline.schedule(
                    frame
                        .transition(line)
                        .with_attr(Attr::Y1, y1)
                        .with_attr(Attr::Y2, y2),
                );
            }
            if let Some(text) = self.doc.select(g, Tag::Text) {
                self.timeline
                    .schedule(frame.transition(text).with_attr(Attr::Y, y2));
            }
        }

        for &g in &join.exit {
            let d = self.doc.datum(g).unwrap_or(f64::NAN);
            self.timeline.schedule(
                frame
                    .transition(g)
                    .with_attr(Attr::Transform, at_new(d))
                    .with_attr(Attr::Opacity, HIDDEN)
                    .with_removal(),
            );
        }
        Ok(())
    }
}
