//! Channel dispatch and the log-and-continue consumer loop.
//!
//! An [`Event`] is one framed message off the push connection: a channel
//! name plus its JSON-encoded payload.  [`Dispatcher::dispatch`] maps the
//! name to a handler and surfaces every failure as a [`DispatchError`];
//! [`Dispatcher::run`] is the catch boundary that logs failures with the
//! offending payload and always proceeds to the next event.

use std::collections::HashMap;

use dom_arena::NodeId;
use serde::Serialize;
use thiserror::Error;
use tracing::{trace, warn};

use crate::apply::{apply_button_patch, apply_element_patch, apply_table_patch, PatchError};
use crate::dom::DomAccess;
use crate::record::{ButtonPatchRecord, PatchRecord, TablePatchRecord};

/// Generic element patches.
pub const CHANNEL_ELEMENT: &str = "data-state";
/// Dynamic table-body patches.
pub const CHANNEL_TABLE: &str = "tbody-gs";
/// Dynamic button patches.
pub const CHANNEL_BUTTON: &str = "update-vn";

// ── Event envelope ────────────────────────────────────────────────────────

/// One named event with its JSON payload, as framed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub data: String,
}

impl Event {
    pub fn new(name: &str, data: &str) -> Self {
        Self {
            name: name.to_string(),
            data: data.to_string(),
        }
    }

    /// Wraps a record for the `data-state` channel.
    pub fn element(record: &PatchRecord) -> Result<Self, serde_json::Error> {
        Self::encode(CHANNEL_ELEMENT, record)
    }

    /// Wraps a record for the `tbody-gs` channel.
    pub fn table(record: &TablePatchRecord) -> Result<Self, serde_json::Error> {
        Self::encode(CHANNEL_TABLE, record)
    }

    /// Wraps a record for the `update-vn` channel.
    pub fn button(record: &ButtonPatchRecord) -> Result<Self, serde_json::Error> {
        Self::encode(CHANNEL_BUTTON, record)
    }

    fn encode<T: Serialize>(name: &str, record: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.to_string(),
            data: serde_json::to_string(record)?,
        })
    }
}

/// A live push connection, reduced to what the dispatcher needs: the next
/// framed event, or `None` once the stream is closed.
///
/// Any `Iterator<Item = Event>` qualifies, which is what tests use.
pub trait PushStream {
    fn next_event(&mut self) -> Option<Event>;
}

impl<I: Iterator<Item = Event>> PushStream for I {
    fn next_event(&mut self) -> Option<Event> {
        self.next()
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown channel {0:?}")]
    UnknownChannel(String),
    #[error("malformed payload: {0}")]
    BadPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Well-known ids the handlers depend on, supplied by the page markup.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Table element acting as the root for dynamically created bodies.
    pub table_root_id: String,
    /// Container element acting as the parent for dynamically created
    /// buttons.
    pub button_container_id: String,
    /// Class set on created buttons for style hooking.
    pub button_class: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            table_root_id: "generic-systems-table".to_string(),
            button_container_id: "virtual-networks".to_string(),
            button_class: "data-state".to_string(),
        }
    }
}

/// Applies incoming events to a [`DomAccess`] tree, one at a time.
///
/// Holds the two get-or-create registries (tbody ids, button ids); all
/// other lookups go through the tree's id index per event.
#[derive(Debug, Default)]
pub struct Dispatcher {
    config: DispatcherConfig,
    tbodies: HashMap<String, NodeId>,
    buttons: HashMap<String, NodeId>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Applies one event; a failure leaves later events unaffected.
    pub fn dispatch<D: DomAccess>(&mut self, dom: &mut D, event: &Event) -> Result<(), DispatchError> {
        match event.name.as_str() {
            CHANNEL_ELEMENT => {
                let record: PatchRecord = serde_json::from_str(&event.data)?;
                apply_element_patch(dom, &record)?;
            }
            CHANNEL_TABLE => {
                let record: TablePatchRecord = serde_json::from_str(&event.data)?;
                apply_table_patch(dom, &mut self.tbodies, &self.config.table_root_id, &record)?;
            }
            CHANNEL_BUTTON => {
                let record: ButtonPatchRecord = serde_json::from_str(&event.data)?;
                apply_button_patch(
                    dom,
                    &mut self.buttons,
                    &self.config.button_container_id,
                    &self.config.button_class,
                    &record,
                )?;
            }
            other => return Err(DispatchError::UnknownChannel(other.to_string())),
        }
        Ok(())
    }

    /// Consumes the stream to its end.
    ///
    /// Failures are logged with the offending payload and dropped; there is
    /// no retry and no replay.
    pub fn run<D: DomAccess, S: PushStream>(&mut self, dom: &mut D, mut stream: S) {
        while let Some(event) = stream.next_event() {
            match self.dispatch(dom, &event) {
                Ok(()) => trace!(channel = %event.name, "patch applied"),
                Err(error) => {
                    warn!(channel = %event.name, payload = %event.data, %error, "patch event dropped");
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dom_arena::DomTree;

    #[test]
    fn envelope_round_trips_through_dispatch() {
        let mut dom = DomTree::new();
        let label = dom.create_element("span");
        dom.set_attribute(label, "id", "last-message");
        dom.append_child(dom.root(), label).unwrap();

        let mut dispatcher = Dispatcher::new();
        let event = Event::element(&PatchRecord::new("last-message").with_value("synced")).unwrap();
        dispatcher.dispatch(&mut dom, &event).unwrap();
        assert_eq!(dom.inner_html(label), "synced");
    }

    #[test]
    fn unknown_channel_is_rejected() {
        let mut dom = DomTree::new();
        let mut dispatcher = Dispatcher::new();
        let err = dispatcher
            .dispatch(&mut dom, &Event::new("heartbeat", "{}"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownChannel(_)));
    }

    #[test]
    fn malformed_payload_is_a_bad_payload_error() {
        let mut dom = DomTree::new();
        let mut dispatcher = Dispatcher::new();
        let err = dispatcher
            .dispatch(&mut dom, &Event::new(CHANNEL_ELEMENT, "not json"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::BadPayload(_)));
    }

    #[test]
    fn custom_config_ids_are_honored() {
        let mut dom = DomTree::new();
        let table = dom.create_element("table");
        dom.set_attribute(table, "id", "inventory");
        dom.append_child(dom.root(), table).unwrap();

        let mut dispatcher = Dispatcher::with_config(DispatcherConfig {
            table_root_id: "inventory".to_string(),
            ..DispatcherConfig::default()
        });
        let event = Event::table(&TablePatchRecord::new("row-1", "<tr></tr>")).unwrap();
        dispatcher.dispatch(&mut dom, &event).unwrap();
        assert_eq!(dom.child_elements(table).len(), 1);
    }
}
