// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Document`].

extern crate alloc;

use alloc::string::String;
use core::fmt::{self, Write};

use kurbo::{Affine, Point, Rect, Size};

use crate::node::{Attr, AttrValue, Element, NodeId, Tag};
use crate::Document;

/// Font size assumed when estimating label extents for the view box.
const LABEL_FONT_SIZE: f64 = 10.0;

/// Options for [`write_svg`].
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Explicit canvas size. When `None`, the view box is fitted to the content bounds.
    pub size: Option<Size>,
    /// Margin added around fitted content bounds.
    pub padding: f64,
    /// Optional stylesheet embedded in a `<style>` element.
    pub stylesheet: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            size: None,
            padding: 10.0,
            stylesheet: None,
        }
    }
}

impl SvgOptions {
    /// Fitted view box, 10px padding, no stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a fixed `width` x `height` canvas anchored at the origin.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Sets the padding around fitted content.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Embeds a stylesheet.
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = Some(css.into());
        self
    }
}

/// Serializes `doc` into a standalone SVG string.
pub fn to_svg_string(doc: &Document, options: &SvgOptions) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_svg(doc, options, &mut out);
    out
}

/// Writes `doc` as a standalone SVG document.
pub fn write_svg(doc: &Document, options: &SvgOptions, out: &mut impl Write) -> fmt::Result {
    let view_box = match options.size {
        Some(size) => size.to_rect(),
        None => content_bounds(doc)
            .map(|r| r.inflate(options.padding, options.padding))
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0)),
    };

    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    )?;
    out.write_char('\n')?;
    if let Some(css) = &options.stylesheet {
        out.write_str("<style>\n")?;
        write_escaped(out, css)?;
        out.write_str("\n</style>\n")?;
    }
    for &child in doc.children(doc.root()) {
        write_element(doc, child, out)?;
    }
    out.write_str("</svg>\n")
}

fn write_element(doc: &Document, id: NodeId, out: &mut impl Write) -> fmt::Result {
    let Some(e) = doc.get(id) else {
        return Ok(());
    };
    let name = e.tag().name();
    write!(out, "<{name}")?;

    let mut style = String::new();
    for (attr, value) in e.attrs() {
        if attr.is_style() {
            if !style.is_empty() {
                style.push_str("; ");
            }
            write!(style, "{}: {value}", attr.name())?;
            continue;
        }
        write!(out, r#" {}=""#, attr.name())?;
        write_escaped(out, &alloc::format!("{value}"))?;
        out.write_char('"')?;
    }
    if !style.is_empty() {
        write!(out, r#" style="{style}""#)?;
    }

    if e.children().is_empty() && e.text().is_none() {
        return out.write_str("/>\n");
    }
    out.write_char('>')?;
    if let Some(text) = e.text() {
        write_escaped(out, text)?;
    }
    if !e.children().is_empty() {
        out.write_char('\n')?;
        for &child in e.children() {
            write_element(doc, child, out)?;
        }
    }
    writeln!(out, "</{name}>")
}

fn write_escaped(out: &mut impl Write, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&apos;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

/// Union of the (approximate) extents of all drawable elements, in root coordinates.
///
/// Group translations are applied. Text extents use a rough 0.6em glyph width heuristic.
/// Returns `None` when there is nothing to draw.
pub fn content_bounds(doc: &Document) -> Option<Rect> {
    let mut acc = None;
    accumulate_bounds(doc, doc.root(), Affine::IDENTITY, &mut acc);
    acc
}

fn accumulate_bounds(doc: &Document, id: NodeId, transform: Affine, acc: &mut Option<Rect>) {
    let Some(e) = doc.get(id) else {
        return;
    };
    let transform = match e.attr(Attr::Transform).and_then(AttrValue::as_translate) {
        Some(t) => transform * Affine::translate(t.0),
        None => transform,
    };
    if let Some(local) = local_bounds(e) {
        let b = transform.transform_rect_bbox(local);
        *acc = Some(match *acc {
            Some(r) => r.union(b),
            None => b,
        });
    }
    for &child in e.children() {
        accumulate_bounds(doc, child, transform, acc);
    }
}

fn local_bounds(e: &Element) -> Option<Rect> {
    let num = |a: Attr| e.attr(a).and_then(AttrValue::as_number).unwrap_or(0.0);
    let b = match e.tag() {
        Tag::Rect => {
            let (x, y) = (num(Attr::X), num(Attr::Y));
            Rect::new(x, y, x + num(Attr::Width), y + num(Attr::Height))
        }
        Tag::Line => Rect::from_points(
            Point::new(num(Attr::X1), num(Attr::Y1)),
            Point::new(num(Attr::X2), num(Attr::Y2)),
        ),
        Tag::Text => {
            let text = e.text()?;
            let width = 0.6 * LABEL_FONT_SIZE * text.chars().count() as f64;
            let (x, y) = (num(Attr::X), num(Attr::Y));
            let x0 = match e.attr(Attr::TextAnchor).and_then(AttrValue::as_text) {
                Some("middle") => x - width / 2.0,
                Some("end") => x - width,
                _ => x,
            };
            Rect::new(x0, y, x0 + width, y + LABEL_FONT_SIZE)
        }
        Tag::Svg | Tag::G => return None,
    };
    b.is_finite().then_some(b)
}
