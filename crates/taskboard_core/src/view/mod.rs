//! In-memory render surface.
//!
//! # Responsibility
//! - Hold mounted element trees, named templates and event listeners.
//! - Dispatch user events to listeners with bubbling.
//!
//! # Invariants
//! - Elements are addressed by `NodeId`. Cleared subtrees are freed once no
//!   dispatch or release hold is active, and their slots are reused.
//! - No internal borrow is held while a listener runs.

mod document;
mod event;
mod template;

pub use document::{Document, DocumentHandle, Element, InsertPosition, NodeId, ReleaseGuard};
pub use event::{DomEvent, EventHandler, EventKind};
pub use template::TemplateNode;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ViewResult<T> = Result<T, ViewError>;

/// Render-surface contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    TemplateNotFound(String),
    HostNotFound(String),
    /// A mounted container lacks an expected element role (e.g. `ul`).
    ElementNotFound { role: String },
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound(id) => write!(f, "template not found: {id}"),
            Self::HostNotFound(id) => write!(f, "host element not found: {id}"),
            Self::ElementNotFound { role } => write!(f, "element role not found: {role}"),
        }
    }
}

impl Error for ViewError {}
