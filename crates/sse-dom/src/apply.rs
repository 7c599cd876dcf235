//! The three patch handlers.
//!
//! Each handler is a pure function from a record and a [`DomAccess`] tree
//! to a `Result`; the dispatch loop is the catch boundary that turns
//! failures into log lines.  Handlers mutate synchronously and return
//! nothing on success.

use std::collections::HashMap;

use dom_arena::{NodeId, TreeError};
use thiserror::Error;
use tracing::debug;

use crate::dom::DomAccess;
use crate::record::{ButtonPatchRecord, ElementAction, PatchRecord, TablePatchRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("no element with id {0:?}")]
    MissingTarget(String),
    #[error("table root {0:?} not found")]
    MissingTableRoot(String),
    #[error("button container {0:?} not found")]
    MissingContainer(String),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

// ── Element patch ─────────────────────────────────────────────────────────

/// Applies one [`PatchRecord`] to the element it addresses.
///
/// Branch selection is [`PatchRecord::action`]; a record selects exactly
/// one branch, so e.g. `do_remove` suppresses every other field in the same
/// record.
pub fn apply_element_patch<D: DomAccess>(dom: &mut D, record: &PatchRecord) -> Result<(), PatchError> {
    let target = dom
        .element_by_id(&record.id)
        .ok_or_else(|| PatchError::MissingTarget(record.id.clone()))?;

    match record.action() {
        ElementAction::Remove => dom.remove(target)?,
        ElementAction::JustValue(value) => dom.set_value(target, value),
        ElementAction::InnerHtml(html) => dom.set_inner_html(target, html),
        ElementAction::AddText(text) => {
            dom.append_inner_html(target, text);
            // Keeps a log-like view pinned to the bottom.
            if let Some(parent) = dom.parent(target) {
                dom.scroll_to_bottom(parent);
            }
        }
        ElementAction::CreateChild { tag, value, selected } => {
            let child = dom.create_element(tag);
            dom.append_child(target, child)?;
            if let Some(value) = value {
                dom.set_inner_html(child, value);
                dom.set_value(child, value);
            }
            if let Some(selected) = selected {
                dom.set_attribute(child, "selected", selected);
            }
        }
        ElementAction::Fallback => {
            if let Some(state) = &record.state {
                dom.set_attribute(target, "data-state", state);
            }
            if let Some(value) = &record.value {
                dom.set_inner_html(target, value);
            }
            if let Some(visibility) = &record.visibility {
                dom.set_style(target, "visibility", visibility);
            }
            if let Some(href) = &record.href {
                dom.set_attribute(target, "href", href);
            }
            if let Some(anchor_target) = &record.target {
                dom.set_attribute(target, "target", anchor_target);
            }
            if let Some(disabled) = record.disabled {
                dom.set_disabled(target, disabled);
            }
        }
    }
    Ok(())
}

// ── Table-body patch ──────────────────────────────────────────────────────

/// Get-or-create a `tbody` under the table root, then replace its content.
///
/// `registry` is the explicit id → node cache behind the get-or-create; an
/// entry whose node was since detached (`do_remove` on the element channel)
/// is evicted and the tbody recreated.
pub fn apply_table_patch<D: DomAccess>(
    dom: &mut D,
    registry: &mut HashMap<String, NodeId>,
    table_root_id: &str,
    record: &TablePatchRecord,
) -> Result<(), PatchError> {
    let tbody = get_or_create(dom, registry, &record.id, |dom| {
        let table = dom
            .element_by_id(table_root_id)
            .ok_or_else(|| PatchError::MissingTableRoot(table_root_id.to_string()))?;
        let tbody = dom.create_element("tbody");
        dom.set_attribute(tbody, "id", &record.id);
        dom.append_child(table, tbody)?;
        debug!(id = %record.id, "created tbody");
        Ok(tbody)
    })?;

    if let Some(value) = &record.value {
        dom.set_inner_html(tbody, value);
    }
    Ok(())
}

// ── Dynamic-button patch ──────────────────────────────────────────────────

/// Get-or-create a button under the container, then update label and state.
///
/// Buttons append in first-seen order and are never reordered; the label is
/// always driven by the latest `value`.
pub fn apply_button_patch<D: DomAccess>(
    dom: &mut D,
    registry: &mut HashMap<String, NodeId>,
    container_id: &str,
    button_class: &str,
    record: &ButtonPatchRecord,
) -> Result<(), PatchError> {
    let button = get_or_create(dom, registry, &record.id, |dom| {
        let container = dom
            .element_by_id(container_id)
            .ok_or_else(|| PatchError::MissingContainer(container_id.to_string()))?;
        let button = dom.create_element("button");
        dom.set_attribute(button, "id", &record.id);
        if let Some(value) = &record.value {
            dom.set_inner_html(button, value);
        }
        dom.set_attribute(button, "class", button_class);
        dom.append_child(container, button)?;
        debug!(id = %record.id, "created button");
        Ok(button)
    })?;

    if let Some(state) = &record.state {
        dom.set_attribute(button, "data-state", state);
    }
    if let Some(value) = &record.value {
        dom.set_inner_html(button, value);
    }
    Ok(())
}

/// ABSENT → PRESENT on first sight, PRESENT → PRESENT afterwards.
///
/// Prefers the registry, falls back to the id index (an element already in
/// the tree is adopted, not duplicated), and only then creates.
fn get_or_create<D: DomAccess>(
    dom: &mut D,
    registry: &mut HashMap<String, NodeId>,
    id: &str,
    create: impl FnOnce(&mut D) -> Result<NodeId, PatchError>,
) -> Result<NodeId, PatchError> {
    if let Some(&node) = registry.get(id) {
        if dom.parent(node).is_some() {
            return Ok(node);
        }
        registry.remove(id);
    }
    let node = match dom.element_by_id(id) {
        Some(node) => node,
        None => create(dom)?,
    };
    registry.insert(id.to_string(), node);
    Ok(node)
}

// ── Tests ─────────────────────────────────────────────────────────────────
