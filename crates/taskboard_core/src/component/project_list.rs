//! List component: one board column acting as a drop target.
//!
//! # Invariants
//! - The assigned cache is replaced wholesale on every store notification.
//! - Only `Drop` calls the store; `DragOver`/`DragLeave` touch the
//!   `droppable` class only.
//! - Each render rebuilds the list and resets it to the neutral state.

use crate::component::project_item::ProjectItem;
use crate::component::{mount, require_tag, Component};
use crate::drag::{DataTransfer, PAYLOAD_MEDIA_TYPE};
use crate::model::project::{Project, ProjectStatus};
use crate::store::project_store::StoreHandle;
use crate::view::{Document, DocumentHandle, EventKind, InsertPosition, NodeId, ViewResult};
use log::error;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Template instantiated for each list.
pub const LIST_TEMPLATE_ID: &str = "project-list";
/// Class marking a list that currently accepts a hovering drag.
pub const DROPPABLE_CLASS: &str = "droppable";

/// Board column showing projects with one fixed status.
#[derive(Debug)]
pub struct ProjectList {
    status: ProjectStatus,
    document: DocumentHandle,
    store: StoreHandle,
    element: NodeId,
    list: NodeId,
    heading: NodeId,
    assigned: Rc<RefCell<Vec<Project>>>,
}

impl ProjectList {
    /// Mounts the list at the end of `host_id` and subscribes it to the store.
    pub fn new(
        document: DocumentHandle,
        store: StoreHandle,
        host_id: &str,
        status: ProjectStatus,
    ) -> ViewResult<Self> {
        let section_id = format!("{status}-projects");
        let element = mount(
            &document,
            LIST_TEMPLATE_ID,
            host_id,
            InsertPosition::BeforeEnd,
            Some(section_id.as_str()),
        )?;
        let list = require_tag(&document, element, "ul")?;
        let heading = require_tag(&document, element, "h2")?;

        let mut component = Self {
            status,
            document,
            store,
            element,
            list,
            heading,
            assigned: Rc::new(RefCell::new(Vec::new())),
        };
        component.configure();
        component.render_content();
        Ok(component)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Section element hosting the list.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// `ul` element holding the rendered items.
    pub fn list_element(&self) -> NodeId {
        self.list
    }

    /// Element id of the `ul`, e.g. `active-projects-list`.
    pub fn list_id(&self) -> String {
        list_id(self.status)
    }

    /// Projects currently assigned to this column.
    pub fn assigned(&self) -> Vec<Project> {
        self.assigned.borrow().clone()
    }

    /// Titles of the rendered items in display order.
    pub fn rendered_titles(&self) -> Vec<String> {
        let doc = &self.document;
        doc.children(self.list)
            .into_iter()
            .filter_map(|item| doc.query_tag(item, "h2"))
            .filter_map(|heading| doc.text(heading))
            .collect()
    }

    pub fn is_droppable(&self) -> bool {
        self.document.has_class(self.list, DROPPABLE_CLASS)
    }
}

impl Component for ProjectList {
    fn configure(&mut self) {
        let list = self.list;
        let status = self.status;
        let weak_doc = Rc::downgrade(&self.document);

        let doc = Weak::clone(&weak_doc);
        self.document
            .add_event_listener(self.element, EventKind::DragOver, move |event| {
                if !event.data_transfer().is_some_and(DataTransfer::carries_project) {
                    return;
                }
                event.prevent_default();
                if let Some(doc) = doc.upgrade() {
                    doc.add_class(list, DROPPABLE_CLASS);
                }
            });

        let doc = Weak::clone(&weak_doc);
        self.document
            .add_event_listener(self.element, EventKind::DragLeave, move |_| {
                if let Some(doc) = doc.upgrade() {
                    doc.remove_class(list, DROPPABLE_CLASS);
                }
            });

        let store = Rc::clone(&self.store);
        self.document
            .add_event_listener(self.element, EventKind::Drop, move |event| {
                event.prevent_default();
                let Some(id) = event
                    .data_transfer()
                    .map(|transfer| transfer.get_data(PAYLOAD_MEDIA_TYPE))
                else {
                    return;
                };
                store.move_project(id.as_str(), status);
            });

        let assigned = Rc::clone(&self.assigned);
        self.store.add_listener(move |projects| {
            let mine: Vec<Project> = projects
                .into_iter()
                .filter(|project| project.status == status)
                .collect();
            *assigned.borrow_mut() = mine.clone();

            let Some(doc) = weak_doc.upgrade() else {
                return;
            };
            if let Err(err) = render_projects(&doc, list, status, mine) {
                error!(
                    "event=render_projects module=component status=error list={status} error={err}"
                );
            }
        });
    }

    fn render_content(&mut self) {
        let doc = &self.document;
        doc.set_id(self.list, self.list_id());
        doc.set_text(
            self.heading,
            format!("{} PROJECTS", self.status.as_str().to_uppercase()),
        );
    }
}

fn list_id(status: ProjectStatus) -> String {
    format!("{status}-projects-list")
}

/// Rebuilds the `ul` from scratch, one item per project.
fn render_projects(
    document: &DocumentHandle,
    list: NodeId,
    status: ProjectStatus,
    projects: Vec<Project>,
) -> ViewResult<()> {
    reset_list(document, list);
    let host_id = list_id(status);
    for project in projects {
        ProjectItem::new(Rc::clone(document), host_id.as_str(), project)?;
    }
    Ok(())
}

fn reset_list(document: &Document, list: NodeId) {
    document.clear_children(list);
    document.remove_class(list, DROPPABLE_CLASS);
}
