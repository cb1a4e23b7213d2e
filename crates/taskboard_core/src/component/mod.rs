//! Board UI components.
//!
//! # Responsibility
//! - Mount each component from a named template into a host element.
//! - Wire user events to store calls through closures.
//!
//! # Invariants
//! - Components never mutate a project; only the store does.
//! - Event closures hold the document weakly, so no `Rc` cycle forms
//!   between document, store and components.

pub mod project_input;
pub mod project_item;
pub mod project_list;

use crate::view::{Document, InsertPosition, NodeId, ViewError, ViewResult};

/// Capability shared by every mountable board component.
pub trait Component {
    /// Wires event listeners and static content.
    fn configure(&mut self);
    /// Fills the mounted element with content.
    fn render_content(&mut self);
}

/// Instantiates `template_id` and attaches it to the element `host_id`.
///
/// When `new_element_id` is given it replaces the template root's id.
pub fn mount(
    document: &Document,
    template_id: &str,
    host_id: &str,
    position: InsertPosition,
    new_element_id: Option<&str>,
) -> ViewResult<NodeId> {
    let host = document
        .get_element_by_id(host_id)
        .ok_or_else(|| ViewError::HostNotFound(host_id.to_string()))?;
    let element = document.import_template(template_id)?;
    if let Some(id) = new_element_id {
        document.set_id(element, id);
    }
    document.insert(host, element, position);
    Ok(element)
}

/// Looks up a required element role inside a mounted container.
pub(crate) fn require_tag(document: &Document, scope: NodeId, tag: &str) -> ViewResult<NodeId> {
    document
        .query_tag(scope, tag)
        .ok_or_else(|| ViewError::ElementNotFound {
            role: tag.to_string(),
        })
}

pub(crate) fn require_id(document: &Document, scope: NodeId, id: &str) -> ViewResult<NodeId> {
    document
        .query_id(scope, id)
        .ok_or_else(|| ViewError::ElementNotFound {
            role: format!("#{id}"),
        })
}
