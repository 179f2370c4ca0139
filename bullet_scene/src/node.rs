// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree building blocks: identities, tags, attributes and elements.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Vec2;
use smallvec::SmallVec;

/// Stable identity of an element in a [`Document`](crate::Document).
///
/// Ids are never reused within a document, so an id that outlives its element simply stops
/// resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// SVG element kinds the tree can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The document root.
    Svg,
    /// A group.
    G,
    /// A rectangle.
    Rect,
    /// A line segment.
    Line,
    /// A text run.
    Text,
}

impl Tag {
    /// Returns the SVG element name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::G => "g",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Text => "text",
        }
    }
}

/// Attributes (and the one style property) understood by the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Whitespace-separated class list.
    Class,
    /// `x`
    X,
    /// `y`
    Y,
    /// `width`
    Width,
    /// `height`
    Height,
    /// Line start x.
    X1,
    /// Line end x.
    X2,
    /// Line start y.
    Y1,
    /// Line end y.
    Y2,
    /// `transform`
    Transform,
    /// `text-anchor`
    TextAnchor,
    /// `dy`
    Dy,
    /// The `opacity` style property.
    Opacity,
}

impl Attr {
    /// Returns the SVG attribute (or CSS property) name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::X1 => "x1",
            Self::X2 => "x2",
            Self::Y1 => "y1",
            Self::Y2 => "y2",
            Self::Transform => "transform",
            Self::TextAnchor => "text-anchor",
            Self::Dy => "dy",
            Self::Opacity => "opacity",
        }
    }

    /// Whether this is written into the `style` attribute rather than as its own attribute.
    pub fn is_style(self) -> bool {
        matches!(self, Self::Opacity)
    }
}

/// A horizontal/vertical offset, written as `translate(x,y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translate(pub Vec2);

impl Translate {
    /// Creates a translation by `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Horizontal offset.
    pub fn x(self) -> f64 {
        self.0.x
    }

    /// Vertical offset.
    pub fn y(self) -> f64 {
        self.0.y
    }
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{})", self.0.x, self.0.y)
    }
}

/// An attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A plain number (lengths, coordinates, opacity).
    Number(f64),
    /// A translation transform.
    Translate(Translate),
    /// Anything else, stored verbatim.
    Text(String),
}

impl AttrValue {
    /// Returns the number, if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the translation, if this is a transform value.
    pub fn as_translate(&self) -> Option<Translate> {
        match self {
            Self::Translate(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the text, if this is a verbatim value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpolates from `self` towards `to` at `t` in `[0, 1]`.
    ///
    /// Numbers and translations interpolate component-wise; mismatched or verbatim values
    /// jump straight to `to`.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(a + (b - a) * t),
            (Self::Translate(a), Self::Translate(b)) => Self::Translate(Translate(a.0.lerp(b.0, t))),
            _ => to.clone(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Translate(t) => write!(f, "{t}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Translate> for AttrValue {
    fn from(value: Translate) -> Self {
        Self::Translate(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One element of the tree.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) tag: Tag,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attrs: SmallVec<[(Attr, AttrValue); 6]>,
    pub(crate) text: Option<String>,
    pub(crate) datum: Option<f64>,
}

impl Element {
    pub(crate) fn new(tag: Tag, parent: Option<NodeId>) -> Self {
        Self {
            tag,
            parent,
            children: Vec::new(),
            attrs: SmallVec::new(),
            text: None,
            datum: None,
        }
    }

    /// Element kind.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Looks up an attribute.
    pub fn attr(&self, attr: Attr) -> Option<&AttrValue> {
        self.attrs.iter().find(|(a, _)| *a == attr).map(|(_, v)| v)
    }

    /// Attributes in the order they were first set.
    pub fn attrs(&self) -> impl Iterator<Item = (Attr, &AttrValue)> {
        self.attrs.iter().map(|(a, v)| (*a, v))
    }

    /// The element's own text (not including descendants).
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The numeric datum last bound to this element.
    pub fn datum(&self) -> Option<f64> {
        self.datum
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr(Attr::Class)
            .and_then(AttrValue::as_text)
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub(crate) fn set_attr(&mut self, attr: Attr, value: AttrValue) {
        match self.attrs.iter_mut().find(|(a, _)| *a == attr) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((attr, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn translate_displays_as_svg_transform() {
        let t = Translate::new(12.5, 0.0);
        assert_eq!(alloc::format!("{t}"), "translate(12.5,0)");
    }

    #[test]
    fn numbers_and_translations_interpolate_and_text_snaps() {
        let a = AttrValue::Number(0.0);
        let b = AttrValue::Number(10.0);
        assert_eq!(a.lerp(&b, 0.25), AttrValue::Number(2.5));

        let a = AttrValue::from(Translate::new(0.0, 0.0));
        let b = AttrValue::from(Translate::new(100.0, 0.0));
        assert_eq!(a.lerp(&b, 0.5), AttrValue::from(Translate::new(50.0, 0.0)));

        let a = AttrValue::from("start");
        let b = AttrValue::from("end");
        assert_eq!(a.lerp(&b, 0.1), b);
        assert_eq!(AttrValue::Number(1.0).lerp(&b, 0.0), b);
    }

    #[test]
    fn class_matching_uses_whole_tokens() {
        let mut e = Element::new(Tag::Rect, None);
        e.set_attr(Attr::Class, "range s0".into());
        assert!(e.has_class("range"));
        assert!(e.has_class("s0"));
        assert!(!e.has_class("rang"));
        assert!(!e.has_class("measure"));
    }

    #[test]
    fn setting_an_attribute_twice_keeps_first_position() {
        let mut e = Element::new(Tag::Rect, None);
        e.set_attr(Attr::Width, 1.0.into());
        e.set_attr(Attr::Height, 2.0.into());
        e.set_attr(Attr::Width, 3.0.into());
        let attrs: Vec<_> = e.attrs().map(|(a, v)| (a, v.clone())).collect();
        assert_eq!(
            attrs,
            alloc::vec![
                (Attr::Width, AttrValue::Number(3.0)),
                (Attr::Height, AttrValue::Number(2.0)),
            ]
        );
    }
}
