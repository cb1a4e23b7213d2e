//! Item component: one rendered project acting as a drag source.

use crate::component::{mount, Component};
use crate::drag::{DropEffect, PAYLOAD_MEDIA_TYPE};
use crate::model::project::Project;
use crate::view::{DocumentHandle, EventKind, InsertPosition, NodeId, ViewResult};
use log::debug;

/// Template instantiated for every item.
pub const ITEM_TEMPLATE_ID: &str = "single-project";

/// Transient view of one project snapshot.
#[derive(Debug)]
pub struct ProjectItem {
    document: DocumentHandle,
    project: Project,
    element: NodeId,
    heading: NodeId,
    paragraph: NodeId,
    people: NodeId,
}

impl ProjectItem {
    /// Mounts an item for `project` at the end of the element `host_id`.
    pub fn new(document: DocumentHandle, host_id: &str, project: Project) -> ViewResult<Self> {
        let element = mount(
            &document,
            ITEM_TEMPLATE_ID,
            host_id,
            InsertPosition::BeforeEnd,
            Some(project.id.as_str()),
        )?;
        let heading = document.create_element("h2");
        let paragraph = document.create_element("p");
        let people = document.create_element("h3");

        let mut item = Self {
            document,
            project,
            element,
            heading,
            paragraph,
            people,
        };
        item.configure();
        item.render_content();
        Ok(item)
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl Component for ProjectItem {
    fn configure(&mut self) {
        let doc = &self.document;
        doc.set_text(self.heading, self.project.title.as_str());
        doc.set_text(self.paragraph, self.project.description.as_str());
        doc.set_text(self.people, self.project.people_label());

        let project_id = self.project.id.clone();
        doc.add_event_listener(self.element, EventKind::DragStart, move |event| {
            if let Some(transfer) = event.data_transfer_mut() {
                transfer.set_data(PAYLOAD_MEDIA_TYPE, project_id.as_str());
                transfer.effect_allowed = DropEffect::Move;
            }
        });
        doc.add_event_listener(self.element, EventKind::DragEnd, |_| {
            debug!("event=drag_end module=component status=ok");
        });
    }

    fn render_content(&mut self) {
        for child in [self.heading, self.paragraph, self.people] {
            self.document.append_child(self.element, child);
        }
    }
}
