//! The DOM access capability.
//!
//! The handlers never touch a concrete tree type; they mutate through this
//! trait, so tests drive them against an in-memory [`DomTree`] and an
//! embedder can back the same calls with a live rendering surface.

use dom_arena::{DomTree, NodeId, TreeError};

/// The mutations the patch handlers perform, and nothing more.
pub trait DomAccess {
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    fn create_element(&mut self, tag: &str) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError>;
    fn remove(&mut self, node: NodeId) -> Result<(), TreeError>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn set_value(&mut self, node: NodeId, value: &str);
    fn set_disabled(&mut self, node: NodeId, disabled: bool);
    fn set_inner_html(&mut self, node: NodeId, html: &str);
    fn append_inner_html(&mut self, node: NodeId, text: &str);
    fn scroll_to_bottom(&mut self, node: NodeId);
}

impl DomAccess for DomTree {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        DomTree::element_by_id(self, id)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        DomTree::create_element(self, tag)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        DomTree::append_child(self, parent, child)
    }

    fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        DomTree::remove(self, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        DomTree::parent(self, node)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        DomTree::set_attribute(self, node, name, value);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        DomTree::set_style(self, node, property, value);
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        DomTree::set_value(self, node, value);
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        DomTree::set_disabled(self, node, disabled);
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        DomTree::set_inner_html(self, node, html);
    }

    fn append_inner_html(&mut self, node: NodeId, text: &str) {
        DomTree::append_inner_html(self, node, text);
    }

    fn scroll_to_bottom(&mut self, node: NodeId) {
        DomTree::scroll_to_bottom(self, node);
    }
}
