//! Wire record types for the three push channels.
//!
//! All fields except `id` are optional; a JSON `null` and an absent key
//! both deserialize to `None` and mean "field not set".  The element-patch
//! branch precedence is frozen in [`ElementAction`] so it cannot drift:
//! exactly the first set field among `do_remove`, `just_value`,
//! `innerHTML`, `add_text` (non-empty) and `element` selects the branch,
//! and a record with none of them takes the fallback branch.

use serde::{Deserialize, Serialize};

// ── State tokens ──────────────────────────────────────────────────────────

/// Tokens stored in the `data-state` attribute to drive styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataState {
    Init,
    Loading,
    Done,
    Error,
    None,
    Disabled,
}

impl DataState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataState::Init => "init",
            DataState::Loading => "loading",
            DataState::Done => "done",
            DataState::Error => "error",
            DataState::None => "none",
            DataState::Disabled => "disabled",
        }
    }
}

// ── Element patch (`data-state` channel) ──────────────────────────────────

/// One mutation of an existing element, addressed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchRecord {
    pub id: String,
    pub do_remove: Option<bool>,
    pub just_value: Option<String>,
    #[serde(rename = "innerHTML")]
    pub inner_html: Option<String>,
    pub add_text: Option<String>,
    pub element: Option<String>,
    pub value: Option<String>,
    pub selected: Option<String>,
    pub state: Option<String>,
    pub visibility: Option<String>,
    pub href: Option<String>,
    pub target: Option<String>,
    pub disabled: Option<bool>,
}

/// The branch a [`PatchRecord`] selects, first set field wins.
///
/// `do_remove` and the other primary fields are mutually exclusive by
/// precedence, not by construction: a record carrying several of them still
/// applies exactly one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementAction<'a> {
    /// Detach the target from the document.
    Remove,
    /// Set the target's form value only.
    JustValue(&'a str),
    /// Replace the target's rendered content wholesale.
    InnerHtml(&'a str),
    /// Append to the target's content, then pin the parent's scroll to the
    /// bottom.
    AddText(&'a str),
    /// Create a new child element under the target.
    CreateChild {
        tag: &'a str,
        value: Option<&'a str>,
        selected: Option<&'a str>,
    },
    /// Apply each of `state`, `value`, `visibility`, `href`, `target`,
    /// `disabled` independently, if present.
    Fallback,
}

impl PatchRecord {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Classifies the record; the precedence order here is the protocol.
    pub fn action(&self) -> ElementAction<'_> {
        if self.do_remove.is_some() {
            ElementAction::Remove
        } else if let Some(value) = &self.just_value {
            ElementAction::JustValue(value)
        } else if let Some(html) = &self.inner_html {
            ElementAction::InnerHtml(html)
        } else if let Some(text) = self.add_text.as_deref().filter(|t| !t.is_empty()) {
            ElementAction::AddText(text)
        } else if let Some(tag) = &self.element {
            ElementAction::CreateChild {
                tag,
                value: self.value.as_deref(),
                selected: self.selected.as_deref(),
            }
        } else {
            ElementAction::Fallback
        }
    }

    // ── Builder helpers (sender-side vocabulary) ──────────────────────────

    /// Append `text` to the element's content (log-box style).
    pub fn append(id: &str, text: &str) -> Self {
        let mut record = Self::new(id);
        record.add_text = Some(text.to_string());
        record
    }

    pub fn visible(mut self) -> Self {
        self.visibility = Some("visible".to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = Some("hidden".to_string());
        self
    }

    pub fn loading(mut self) -> Self {
        self.state = Some(DataState::Loading.as_str().to_string());
        self
    }

    /// Marks the element done and re-enables it.
    pub fn done(mut self) -> Self {
        self.disabled = Some(false);
        self.state = Some(DataState::Done.as_str().to_string());
        self
    }

    pub fn init(mut self) -> Self {
        self.state = Some(DataState::Init.as_str().to_string());
        self
    }

    pub fn error(mut self) -> Self {
        self.state = Some(DataState::Error.as_str().to_string());
        self
    }

    /// Disables the element and sets the matching state token.
    pub fn disable(mut self) -> Self {
        self.disabled = Some(true);
        self.state = Some(DataState::Disabled.as_str().to_string());
        self
    }

    pub fn enable(mut self) -> Self {
        self.disabled = Some(false);
        self
    }

    pub fn remove(mut self) -> Self {
        self.do_remove = Some(true);
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_just_value(mut self, value: &str) -> Self {
        self.just_value = Some(value.to_string());
        self
    }

    pub fn with_inner_html(mut self, html: &str) -> Self {
        self.inner_html = Some(html.to_string());
        self
    }

    /// Create a child element of `tag` under the target.
    pub fn new_child(mut self, tag: &str) -> Self {
        self.element = Some(tag.to_string());
        self
    }

    pub fn with_selected(mut self, selected: &str) -> Self {
        self.selected = Some(selected.to_string());
        self
    }

    pub fn with_state(mut self, state: DataState) -> Self {
        self.state = Some(state.as_str().to_string());
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }
}

// ── Table-body patch (`tbody-gs` channel) ─────────────────────────────────

/// Content replacement for a dynamically created `tbody`, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePatchRecord {
    pub id: String,
    pub value: Option<String>,
}

impl TablePatchRecord {
    pub fn new(id: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            value: Some(value.to_string()),
        }
    }
}

// ── Dynamic-button patch (`update-vn` channel) ────────────────────────────

/// Label/state update for a dynamically created button, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonPatchRecord {
    pub id: String,
    pub value: Option<String>,
    pub state: Option<String>,
}

impl ButtonPatchRecord {
    pub fn new(id: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            value: Some(value.to_string()),
            state: None,
        }
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
