//! Server-push DOM patch dispatcher.
//!
//! Consumes a stream of named events whose payloads are small JSON patch
//! records and applies each one as an incremental mutation to an injected
//! document tree.  The server drives the UI; the client runs no application
//! logic of its own.
//!
//! Three channels are consumed:
//!
//! | channel | payload | effect |
//! |---------|---------|--------|
//! | `data-state` | [`PatchRecord`] | one mutation on an existing element, selected by a fixed first-field-wins precedence |
//! | `tbody-gs` | [`TablePatchRecord`] | get-or-create a `tbody` under the table root, then replace its content |
//! | `update-vn` | [`ButtonPatchRecord`] | get-or-create a button under the button container, then update label/state |
//!
//! Event processing is strictly sequential and synchronous.  A failing
//! event (unknown target, malformed JSON) is logged with its payload and
//! dropped; it never aborts the consumer loop.
//!
//! # Module layout
//!
//! - [`record`] — wire record types, state tokens and builder helpers
//! - [`dom`] — the [`DomAccess`] capability the handlers mutate through
//! - [`apply`] — the three patch handlers
//! - [`dispatch`] — channel table, per-event dispatch and the
//!   log-and-continue consumer loop

pub mod apply;
pub mod dispatch;
pub mod dom;
pub mod record;

pub use apply::{apply_button_patch, apply_element_patch, apply_table_patch, PatchError};
pub use dispatch::{
    Dispatcher, DispatcherConfig, DispatchError, Event, PushStream, CHANNEL_BUTTON,
    CHANNEL_ELEMENT, CHANNEL_TABLE,
};
pub use dom::DomAccess;
pub use record::{ButtonPatchRecord, DataState, ElementAction, PatchRecord, TablePatchRecord};
