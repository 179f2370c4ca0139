// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock-driven attribute transitions.
//!
//! A [`Transition`] animates some attributes of one element towards target values over a
//! duration. The [`Timeline`] owns the active transitions and a clock; callers move the clock
//! with [`Timeline::advance`] and the timeline writes interpolated values into the
//! [`Document`].
//!
//! Semantics:
//! - At most one transition runs per element. Scheduling another one interrupts it.
//! - Start values are read from the document the first time a transition runs, so an
//!   interrupted element continues from wherever it currently is.
//! - A zero-duration transition completes the first time it runs.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::SceneResult;
use crate::node::{Attr, AttrValue, NodeId};
use crate::Document;

/// Easing curves applied to transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Cubic ease-in-out (slow, fast, slow).
    #[default]
    CubicInOut,
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Tween {
    attr: Attr,
    from: Option<AttrValue>,
    to: AttrValue,
}

/// An animation of one element's attributes.
#[derive(Clone, Debug)]
pub struct Transition {
    node: NodeId,
    duration: Duration,
    ease: Ease,
    tweens: SmallVec<[Tween; 4]>,
    remove: bool,
    scheduled_at: Duration,
    started: bool,
}

impl Transition {
    /// Creates an empty transition of `node` lasting `duration`.
    pub fn new(node: NodeId, duration: Duration) -> Self {
        Self {
            node,
            duration,
            ease: Ease::default(),
            tweens: SmallVec::new(),
            remove: false,
            scheduled_at: Duration::ZERO,
            started: false,
        }
    }

    /// Animates `attr` towards `value`. A second target for the same attribute replaces the
    /// first.
    pub fn with_attr(mut self, attr: Attr, value: impl Into<AttrValue>) -> Self {
        let to = value.into();
        match self.tweens.iter_mut().find(|tw| tw.attr == attr) {
            Some(tw) => tw.to = to,
            None => self.tweens.push(Tween {
                attr,
                from: None,
                to,
            }),
        }
        self
    }

    /// Sets the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Removes the element from the document when the transition completes.
    pub fn with_removal(mut self) -> Self {
        self.remove = true;
        self
    }

    /// The animated element.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Target value for `attr`, if animated.
    pub fn target(&self, attr: Attr) -> Option<&AttrValue> {
        self.tweens
            .iter()
            .find(|tw| tw.attr == attr)
            .map(|tw| &tw.to)
    }

    /// Whether the element is removed on completion.
    pub fn removes(&self) -> bool {
        self.remove
    }

    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.scheduled_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Active transitions plus the clock that drives them.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    now: Duration,
    active: HashMap<NodeId, Transition>,
}

impl Timeline {
    /// Creates an idle timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of transitions that have not completed.
    pub fn pending(&self) -> usize {
        self.active.len()
    }

    /// Whether no transitions are pending.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// The pending transition of `node`, if any.
    pub fn get(&self, node: NodeId) -> Option<&Transition> {
        self.active.get(&node)
    }

    /// Schedules `transition` to start at the current time.
    ///
    /// Any pending transition of the same element is interrupted: its remaining tweens and
    /// removal are discarded.
    pub fn schedule(&mut self, mut transition: Transition) {
        transition.scheduled_at = self.now;
        transition.started = false;
        let node = transition.node;
        if self.active.insert(node, transition).is_some() {
            trace!(%node, "interrupted pending transition");
        }
    }

    /// Moves the clock to `now` (never backwards) and applies all pending transitions.
    ///
    /// Returns the number of transitions that completed. Transitions of elements that are no
    /// longer in `doc` are dropped without counting.
    pub fn advance(&mut self, doc: &mut Document, now: Duration) -> SceneResult<usize> {
        self.now = self.now.max(now);

        let mut ids: Vec<NodeId> = self.active.keys().copied().collect();
        ids.sort_unstable();

        let mut completed = 0;
        for id in ids {
            if !doc.contains(id) {
                self.active.remove(&id);
                trace!(node = %id, "dropped transition of detached element");
                continue;
            }
            let Some(t) = self.active.get_mut(&id) else {
                continue;
            };
            if !t.started {
                for tw in &mut t.tweens {
                    tw.from = doc.attr(id, tw.attr).cloned();
                }
                t.started = true;
            }

            let progress = t.progress(self.now);
            let eased = t.ease.apply(progress);
            for tw in &t.tweens {
                let value = match &tw.from {
                    Some(from) if progress < 1.0 => from.lerp(&tw.to, eased),
                    _ => tw.to.clone(),
                };
                doc.set_attr(id, tw.attr, value)?;
            }

            if progress >= 1.0 {
                let remove = t.remove;
                self.active.remove(&id);
                if remove {
                    doc.remove(id)?;
                }
                trace!(node = %id, remove, "transition completed");
                completed += 1;
            }
        }
        Ok(completed)
    }

    /// Applies everything that is due at the current time without moving the clock.
    ///
    /// Zero-duration transitions complete; longer ones start and sit at their first frame.
    pub fn flush(&mut self, doc: &mut Document) -> SceneResult<usize> {
        self.advance(doc, self.now)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::node::Tag;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn rect(doc: &mut Document, width: f64) -> NodeId {
        let r = doc.append(doc.root(), Tag::Rect).unwrap();
        doc.set_attr(r, Attr::Width, width).unwrap();
        r
    }

    #[test]
    fn cubic_in_out_is_symmetric() {
        let e = Ease::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
        assert!(e.apply(0.25) < 0.25);
    }

    #[test]
    fn zero_duration_completes_on_flush() {
        let mut doc = Document::new();
        let r = rect(&mut doc, 0.0);
        let mut tl = Timeline::new();
        tl.schedule(Transition::new(r, Duration::ZERO).with_attr(Attr::Width, 80.0));
        assert_eq!(tl.pending(), 1);
        assert_eq!(tl.flush(&mut doc).unwrap(), 1);
        assert!(tl.is_idle());
        assert_eq!(doc.number(r, Attr::Width), Some(80.0));
    }

    #[test]
    fn timed_transition_interpolates_with_the_clock() {
        let mut doc = Document::new();
        let r = rect(&mut doc, 0.0);
        let mut tl = Timeline::new();
        tl.schedule(
            Transition::new(r, ms(1000))
                .with_attr(Attr::Width, 100.0)
                .with_ease(Ease::Linear),
        );

        assert_eq!(tl.flush(&mut doc).unwrap(), 0);
        assert_eq!(doc.number(r, Attr::Width), Some(0.0));

        tl.advance(&mut doc, ms(250)).unwrap();
        assert_eq!(doc.number(r, Attr::Width), Some(25.0));

        assert_eq!(tl.advance(&mut doc, ms(1500)).unwrap(), 1);
        assert_eq!(doc.number(r, Attr::Width), Some(100.0));
        assert!(tl.is_idle());
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut doc = Document::new();
        let mut tl = Timeline::new();
        tl.advance(&mut doc, ms(500)).unwrap();
        tl.advance(&mut doc, ms(100)).unwrap();
        assert_eq!(tl.now(), ms(500));
    }

    #[test]
    fn rescheduling_interrupts_and_continues_from_current_value() {
        let mut doc = Document::new();
        let r = rect(&mut doc, 0.0);
        let mut tl = Timeline::new();
        tl.schedule(
            Transition::new(r, ms(1000))
                .with_attr(Attr::Width, 100.0)
                .with_ease(Ease::Linear)
                .with_removal(),
        );
        tl.advance(&mut doc, ms(500)).unwrap();
        assert_eq!(doc.number(r, Attr::Width), Some(50.0));

        tl.schedule(
            Transition::new(r, ms(1000))
                .with_attr(Attr::Width, 0.0)
                .with_ease(Ease::Linear),
        );
        assert_eq!(tl.pending(), 1);
        assert_eq!(tl.get(r).map(Transition::node), Some(r));
        assert!(tl.get(r).is_some_and(|t| !t.removes()));
        tl.advance(&mut doc, ms(1000)).unwrap();
        assert_eq!(doc.number(r, Attr::Width), Some(25.0));
        tl.advance(&mut doc, ms(1500)).unwrap();
        assert_eq!(doc.number(r, Attr::Width), Some(0.0));
        // The interrupted removal never fires.
        assert!(doc.contains(r));
    }

    #[test]
    fn removal_happens_on_completion() {
        let mut doc = Document::new();
        let r = rect(&mut doc, 10.0);
        let mut tl = Timeline::new();
        tl.schedule(
            Transition::new(r, ms(100))
                .with_attr(Attr::Opacity, 1e-6)
                .with_removal(),
        );
        tl.flush(&mut doc).unwrap();
        assert!(doc.contains(r));
        tl.advance(&mut doc, ms(100)).unwrap();
        assert!(!doc.contains(r));
    }

    #[test]
    fn transitions_of_removed_elements_are_dropped() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), Tag::G).unwrap();
        let r = doc.append(g, Tag::Rect).unwrap();
        let mut tl = Timeline::new();
        tl.schedule(Transition::new(r, ms(100)).with_attr(Attr::Width, 5.0));
        doc.remove(g).unwrap();
        assert_eq!(tl.flush(&mut doc).unwrap(), 0);
        assert!(tl.is_idle());
    }

    #[test]
    fn missing_start_value_jumps_to_target() {
        let mut doc = Document::new();
        let r = doc.append(doc.root(), Tag::Rect).unwrap();
        let mut tl = Timeline::new();
        tl.schedule(Transition::new(r, ms(100)).with_attr(Attr::Height, 30.0));
        tl.flush(&mut doc).unwrap();
        assert_eq!(doc.number(r, Attr::Height), Some(30.0));
    }

    #[test]
    fn later_target_for_same_attribute_wins() {
        let t = Transition::new(NodeId(1), ms(10))
            .with_attr(Attr::X, 1.0)
            .with_attr(Attr::X, 2.0);
        assert_eq!(t.target(Attr::X), Some(&AttrValue::Number(2.0)));
    }
}
