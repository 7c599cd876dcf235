//! Arena-based in-memory document tree.
//!
//! Stands in for a browser DOM on the Rust side of a server-driven UI:
//! elements live in a [`Vec`]-backed arena and every "pointer" is a `u32`
//! index into it, so the tree is plainly owned, cheaply cloneable and easy
//! to assert against in tests.  The surface is the small set of mutations a
//! push-stream patch protocol actually performs:
//!
//! - element creation, appending and subtree removal,
//! - an id → node index (`element_by_id`),
//! - rendered content as opaque markup chunks (`inner_html`,
//!   `set_inner_html`, `append_inner_html`) — markup is never parsed,
//! - per-node form value, insertion-ordered attributes, style properties
//!   and a disabled flag,
//! - a scroll model (`scroll_top` / `scroll_height` / `scroll_to_bottom`)
//!   for log-box views pinned to the bottom.

pub mod node;
pub mod tree;

pub use node::{Child, Node, NodeId};
pub use tree::{DomTree, TreeError};
