//! User events delivered to element listeners.

use crate::drag::DataTransfer;
use crate::view::NodeId;
use std::rc::Rc;

/// Event types the board reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

/// Listener callback; receives the event while it bubbles.
pub type EventHandler = Rc<dyn Fn(&mut DomEvent)>;

/// One dispatched event.
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
    /// Node whose listeners are currently running.
    pub current_target: NodeId,
    default_prevented: bool,
    data_transfer: Option<DataTransfer>,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
            data_transfer: None,
        }
    }

    /// Creates a drag event carrying `transfer`.
    pub fn drag(kind: EventKind, target: NodeId, transfer: DataTransfer) -> Self {
        Self {
            data_transfer: Some(transfer),
            ..Self::new(kind, target)
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    pub fn data_transfer_mut(&mut self) -> Option<&mut DataTransfer> {
        self.data_transfer.as_mut()
    }

    /// Takes the payload back out once dispatch finished.
    pub fn into_data_transfer(self) -> Option<DataTransfer> {
        self.data_transfer
    }
}
