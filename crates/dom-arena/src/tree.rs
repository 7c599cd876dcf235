//! The arena tree and its mutation surface.

use std::collections::HashMap;

use thiserror::Error;

use crate::node::{Child, Node, NodeId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),
    #[error("the root node cannot be removed")]
    RemoveRoot,
}

/// An owned document tree.
///
/// Nodes are allocated append-only; removal detaches a subtree and drops it
/// from the id index but never reuses arena slots, so a [`NodeId`] stays
/// valid for the lifetime of the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    arena: Vec<Node>,
    by_id: HashMap<String, NodeId>,
}

impl DomTree {
    /// Creates a tree with a single `body` root element.
    pub fn new() -> Self {
        Self {
            arena: vec![Node::new("body")],
            by_id: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.arena[id as usize]
    }

    // ── Structure ─────────────────────────────────────────────────────────

    /// Allocates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.arena.len() as NodeId;
        self.arena.push(Node::new(tag));
        id
    }

    /// Appends `child` at the end of `parent`'s content.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if self.arena[child as usize].parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(Child::Element(child));
        Ok(())
    }

    /// Detaches `node` from its parent and drops the whole subtree from the
    /// id index.
    pub fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        if node == self.root() {
            return Err(TreeError::RemoveRoot);
        }
        if let Some(parent) = self.arena[node as usize].parent {
            self.node_mut(parent)
                .children
                .retain(|c| *c != Child::Element(node));
            self.node_mut(node).parent = None;
        }
        self.unindex_subtree(node);
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node as usize].parent
    }

    /// Element children of `node`, in content order.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .children
            .iter()
            .filter_map(|c| match c {
                Child::Element(id) => Some(*id),
                Child::Text(_) => None,
            })
            .collect()
    }

    // ── Id index ──────────────────────────────────────────────────────────

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    fn unindex_subtree(&mut self, node: NodeId) {
        if let Some(id) = self.node(node).id().map(str::to_string) {
            if self.by_id.get(&id) == Some(&node) {
                self.by_id.remove(&id);
            }
        }
        for child in self.child_elements(node) {
            self.unindex_subtree(child);
        }
    }

    // ── Attributes, style, value ──────────────────────────────────────────

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "id" {
            if let Some(old) = self.node(node).id().map(str::to_string) {
                if self.by_id.get(&old) == Some(&node) {
                    self.by_id.remove(&old);
                }
            }
            self.by_id.insert(value.to_string(), node);
        }
        self.node_mut(node)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attributes.get(name).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.node_mut(node)
            .style
            .insert(property.to_string(), value.to_string());
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).style.get(property).map(String::as_str)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.node_mut(node).value = value.to_string();
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.node(node).value
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.node_mut(node).disabled = disabled;
    }

    pub fn disabled(&self, node: NodeId) -> bool {
        self.node(node).disabled
    }

    // ── Rendered content ──────────────────────────────────────────────────

    /// Replaces `node`'s content with one opaque markup chunk.
    ///
    /// Element children previously under `node` are discarded and dropped
    /// from the id index.
    pub fn set_inner_html(&mut self, node: NodeId, html: &str) {
        for child in self.child_elements(node) {
            self.unindex_subtree(child);
            self.node_mut(child).parent = None;
        }
        let children = &mut self.node_mut(node).children;
        children.clear();
        if !html.is_empty() {
            children.push(Child::Text(html.to_string()));
        }
    }

    /// Appends markup to `node`'s existing content.
    pub fn append_inner_html(&mut self, node: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        let children = &mut self.node_mut(node).children;
        match children.last_mut() {
            Some(Child::Text(existing)) => existing.push_str(text),
            _ => children.push(Child::Text(text.to_string())),
        }
    }

    /// Serializes `node`'s content back to markup.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in &self.node(node).children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(id) => self.render_element(*id, &mut out),
            }
        }
        out
    }

    fn render_element(&self, node: NodeId, out: &mut String) {
        let n = self.node(node);
        out.push('<');
        out.push_str(&n.tag);
        for (name, value) in &n.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        out.push_str(&self.inner_html(node));
        out.push_str("</");
        out.push_str(&n.tag);
        out.push('>');
    }

    // ── Scroll model ──────────────────────────────────────────────────────

    /// Maximum scroll position, proportional to the rendered content.
    pub fn scroll_height(&self, node: NodeId) -> usize {
        self.inner_html(node).len()
    }

    pub fn scroll_top(&self, node: NodeId) -> usize {
        self.node(node).scroll_top
    }

    /// Pins the scroll position to its maximum.
    pub fn scroll_to_bottom(&mut self, node: NodeId) {
        self.node_mut(node).scroll_top = self.scroll_height(node);
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_append_and_find_by_id() {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        dom.set_attribute(div, "id", "box");
        dom.append_child(dom.root(), div).unwrap();
        assert_eq!(dom.element_by_id("box"), Some(div));
        assert_eq!(dom.parent(div), Some(dom.root()));
    }

    #[test]
    fn append_twice_is_rejected() {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        dom.append_child(dom.root(), div).unwrap();
        assert_eq!(
            dom.append_child(dom.root(), div),
            Err(TreeError::AlreadyAttached(div))
        );
    }

    #[test]
    fn remove_detaches_and_unindexes_subtree() {
        let mut dom = DomTree::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("span");
        dom.set_attribute(outer, "id", "outer");
        dom.set_attribute(inner, "id", "inner");
        dom.append_child(dom.root(), outer).unwrap();
        dom.append_child(outer, inner).unwrap();

        dom.remove(outer).unwrap();
        assert_eq!(dom.element_by_id("outer"), None);
        assert_eq!(dom.element_by_id("inner"), None);
        assert!(dom.child_elements(dom.root()).is_empty());
    }

    #[test]
    fn remove_root_is_rejected() {
        let mut dom = DomTree::new();
        let root = dom.root();
        assert_eq!(dom.remove(root), Err(TreeError::RemoveRoot));
    }

    #[test]
    fn reassigning_id_moves_the_index_entry() {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        dom.set_attribute(div, "id", "a");
        dom.set_attribute(div, "id", "b");
        assert_eq!(dom.element_by_id("a"), None);
        assert_eq!(dom.element_by_id("b"), Some(div));
    }

    #[test]
    fn inner_html_round_trip_with_element_child() {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        dom.append_child(dom.root(), div).unwrap();
        dom.set_inner_html(div, "hello ");
        let b = dom.create_element("b");
        dom.set_attribute(b, "id", "em1");
        dom.append_child(div, b).unwrap();
        dom.set_inner_html(b, "world");
        assert_eq!(dom.inner_html(div), "hello <b id=\"em1\">world</b>");
    }

    #[test]
    fn set_inner_html_discards_and_unindexes_old_children() {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        let span = dom.create_element("span");
        dom.set_attribute(span, "id", "gone");
        dom.append_child(dom.root(), div).unwrap();
        dom.append_child(div, span).unwrap();

        dom.set_inner_html(div, "<p>fresh</p>");
        assert_eq!(dom.inner_html(div), "<p>fresh</p>");
        assert_eq!(dom.element_by_id("gone"), None);
    }

    #[test]
    fn append_inner_html_extends_trailing_text() {
        let mut dom = DomTree::new();
        let log = dom.create_element("pre");
        dom.append_child(dom.root(), log).unwrap();
        dom.set_inner_html(log, "hi ");
        dom.append_inner_html(log, "there");
        assert_eq!(dom.inner_html(log), "hi there");
        assert_eq!(dom.node(log).children.len(), 1);
    }

    #[test]
    fn scroll_to_bottom_pins_to_scroll_height() {
        let mut dom = DomTree::new();
        let log = dom.create_element("pre");
        dom.append_child(dom.root(), log).unwrap();
        dom.set_inner_html(log, "0123456789");
        assert_eq!(dom.scroll_top(log), 0);
        dom.scroll_to_bottom(log);
        assert_eq!(dom.scroll_top(log), dom.scroll_height(log));
        assert_eq!(dom.scroll_top(log), 10);
    }

    #[test]
    fn value_is_separate_from_content() {
        let mut dom = DomTree::new();
        let input = dom.create_element("input");
        dom.append_child(dom.root(), input).unwrap();
        dom.set_value(input, "draft");
        dom.set_inner_html(input, "label");
        assert_eq!(dom.value(input), "draft");
        assert_eq!(dom.inner_html(input), "label");
    }
}
