// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained element tree.
//!
//! A [`Document`] is an arena of [`Element`]s rooted at a single `svg` element. It offers the
//! small set of operations a data-driven renderer needs: descendant selection by tag and class,
//! append/remove, attributes, text and a bound numeric datum per element.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::{SceneError, SceneResult};
use crate::node::{Attr, AttrValue, Element, NodeId, Tag};

/// An arena-backed element tree.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: HashMap<NodeId, Element>,
    root: NodeId,
    next_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only the root `svg` element.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Element::new(Tag::Svg, None));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// The root `svg` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live elements, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` resolves to a live element.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Looks up an element.
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(&id)
    }

    fn get_mut(&mut self, id: NodeId) -> SceneResult<&mut Element> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))
    }

    fn element(&self, id: NodeId) -> SceneResult<&Element> {
        self.nodes.get(&id).ok_or(SceneError::UnknownNode(id))
    }

    /// Appends a new `tag` element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: Tag) -> SceneResult<NodeId> {
        let id = NodeId(self.next_id);
        self.get_mut(parent)?.children.push(id);
        self.next_id += 1;
        self.nodes.insert(id, Element::new(tag, Some(parent)));
        Ok(id)
    }

    /// Removes `id` and all of its descendants.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<()> {
        if id == self.root {
            return Err(SceneError::RootRemoval(id));
        }
        let parent = self.element(id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            if let Some(e) = self.nodes.remove(&next) {
                stack.extend(e.children);
            }
        }
        Ok(())
    }

    /// Parent of `id`, `None` for the root or an unknown id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|e| e.parent)
    }

    /// Children of `id` in document order; empty for an unknown id.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
    }

    /// Sets (or replaces) an attribute.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        attr: Attr,
        value: impl Into<AttrValue>,
    ) -> SceneResult<()> {
        self.get_mut(id)?.set_attr(attr, value.into());
        Ok(())
    }

    /// Looks up an attribute.
    pub fn attr(&self, id: NodeId, attr: Attr) -> Option<&AttrValue> {
        self.nodes.get(&id).and_then(|e| e.attr(attr))
    }

    /// Looks up a numeric attribute.
    pub fn number(&self, id: NodeId, attr: Attr) -> Option<f64> {
        self.attr(id, attr).and_then(AttrValue::as_number)
    }

    /// Sets the element's own text.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> SceneResult<()> {
        self.get_mut(id)?.text = Some(text.into());
        Ok(())
    }

    /// Concatenated text of `id` and its descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(e) = self.nodes.get(&id) else {
            return;
        };
        if let Some(t) = &e.text {
            out.push_str(t);
        }
        for &c in &e.children {
            self.collect_text(c, out);
        }
    }

    /// Binds a numeric datum to the element.
    pub fn set_datum(&mut self, id: NodeId, datum: f64) -> SceneResult<()> {
        self.get_mut(id)?.datum = Some(datum);
        Ok(())
    }

    /// The datum last bound to the element.
    pub fn datum(&self, id: NodeId) -> Option<f64> {
        self.nodes.get(&id).and_then(|e| e.datum)
    }

    /// Descendants of `scope` (excluding `scope`) with the given tag and, if provided, class.
    ///
    /// Results are in document (pre-order) order.
    pub fn select_all(&self, scope: NodeId, tag: Tag, class: Option<&str>) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.visit_descendants(scope, &mut |id, e| {
            if e.tag == tag && class.is_none_or(|c| e.has_class(c)) {
                out.push(id);
            }
        });
        out
    }

    /// The first descendant of `scope` with the given tag.
    pub fn select(&self, scope: NodeId, tag: Tag) -> Option<NodeId> {
        let e = self.nodes.get(&scope)?;
        for &c in &e.children {
            if self.nodes.get(&c).is_some_and(|child| child.tag == tag) {
                return Some(c);
            }
            if let Some(found) = self.select(c, tag) {
                return Some(found);
            }
        }
        None
    }

    fn visit_descendants(&self, scope: NodeId, f: &mut impl FnMut(NodeId, &Element)) {
        let Some(e) = self.nodes.get(&scope) else {
            return;
        };
        for &c in &e.children {
            if let Some(child) = self.nodes.get(&c) {
                f(c, child);
                self.visit_descendants(c, f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn append_and_select_in_document_order() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), Tag::G).unwrap();
        let a = doc.append(g, Tag::Rect).unwrap();
        doc.set_attr(a, Attr::Class, "range s0").unwrap();
        let b = doc.append(g, Tag::Rect).unwrap();
        doc.set_attr(b, Attr::Class, "measure").unwrap();
        let c = doc.append(g, Tag::Rect).unwrap();
        doc.set_attr(c, Attr::Class, "range s1").unwrap();

        assert_eq!(doc.select_all(g, Tag::Rect, Some("range")), [a, c]);
        assert_eq!(doc.select_all(g, Tag::Rect, None), [a, b, c]);
        assert_eq!(doc.select_all(doc.root(), Tag::Rect, Some("measure")), [b]);
        assert!(doc.select_all(g, Tag::Line, None).is_empty());
        assert_eq!(doc.select(doc.root(), Tag::Rect), Some(a));
    }

    #[test]
    fn remove_detaches_whole_subtree() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), Tag::G).unwrap();
        let line = doc.append(g, Tag::Line).unwrap();
        let text = doc.append(g, Tag::Text).unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.parent(text), Some(g));
        assert_eq!(doc.parent(g), Some(doc.root()));
        assert_eq!(doc.parent(doc.root()), None);

        doc.remove(g).unwrap();
        assert!(!doc.contains(g));
        assert!(!doc.contains(line));
        assert!(!doc.contains(text));
        assert_eq!(doc.parent(line), None);
        assert!(doc.children(doc.root()).is_empty());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn stale_ids_are_reported() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), Tag::G).unwrap();
        doc.remove(g).unwrap();
        assert_eq!(doc.remove(g), Err(SceneError::UnknownNode(g)));
        assert_eq!(doc.append(g, Tag::Rect), Err(SceneError::UnknownNode(g)));
        assert_eq!(
            doc.set_attr(g, Attr::Width, 1.0),
            Err(SceneError::UnknownNode(g))
        );
        assert_eq!(
            doc.remove(doc.root()),
            Err(SceneError::RootRemoval(doc.root()))
        );
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut doc = Document::new();
        let a = doc.append(doc.root(), Tag::G).unwrap();
        doc.remove(a).unwrap();
        let b = doc.append(doc.root(), Tag::G).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), Tag::G).unwrap();
        doc.append(g, Tag::Line).unwrap();
        let t = doc.append(g, Tag::Text).unwrap();
        doc.set_text(t, "150").unwrap();
        assert_eq!(doc.text_content(g), "150");
        assert_eq!(doc.text_content(doc.root()), "150");
        assert_eq!(doc.text_content(NodeId(999)), "");
    }

    #[test]
    fn datum_round_trips() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), Tag::G).unwrap();
        assert_eq!(doc.datum(g), None);
        doc.set_datum(g, 42.0).unwrap();
        assert_eq!(doc.datum(g), Some(42.0));
    }
}
