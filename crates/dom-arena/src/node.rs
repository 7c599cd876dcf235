//! Node storage for the arena tree.

use indexmap::IndexMap;

/// Index of a node in its owning [`crate::DomTree`] arena.
pub type NodeId = u32;

/// One unit of rendered content.
///
/// Markup assigned through `set_inner_html` is kept as an opaque
/// [`Child::Text`] chunk; only elements created through the tree itself
/// become [`Child::Element`] links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(NodeId),
    Text(String),
}

/// An element node.
///
/// Attributes keep insertion order (it is observable once content is
/// serialized back to markup).  `value` is the form value, held separately
/// from rendered content exactly as in a browser input element.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub style: IndexMap<String, String>,
    pub value: String,
    pub disabled: bool,
    pub children: Vec<Child>,
    pub parent: Option<NodeId>,
    /// Current scroll offset; pinned by [`crate::DomTree::scroll_to_bottom`].
    pub scroll_top: usize,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// The element's id attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }
}
