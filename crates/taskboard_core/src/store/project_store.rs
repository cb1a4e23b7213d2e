//! Project store: sole owner and mutator of board projects.
//!
//! # Responsibility
//! - Create projects and reassign their status.
//! - Notify listeners synchronously, in registration order.
//!
//! # Invariants
//! - Insertion order is preserved and never reordered.
//! - Unknown ids and same-status moves are silent no-ops without notification.
//! - No internal borrow is held while a listener runs, so listeners may
//!   call back into the store.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use log::{debug, info};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Callback receiving a fresh snapshot of every project after a mutation.
pub type Listener = Rc<dyn Fn(Vec<Project>)>;

/// Shared handle passed from the composition root to each component.
pub type StoreHandle = Rc<ProjectStore>;

/// Single-threaded project store.
///
/// Only the crate can construct one; applications get theirs from
/// [`crate::app::TaskBoard`].
pub struct ProjectStore {
    projects: RefCell<Vec<Project>>,
    listeners: RefCell<Vec<Listener>>,
}

impl ProjectStore {
    pub(crate) fn new() -> StoreHandle {
        Rc::new(Self {
            projects: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Appends a new active project and notifies listeners.
    ///
    /// Input is trusted; callers validate before calling.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let project = Project::new(title, description, people);
        let id = project.id.clone();
        self.projects.borrow_mut().push(project);

        info!(
            "event=project_created module=store status=ok project_id={} people={}",
            id, people
        );
        self.update_listeners();
        id
    }

    /// Moves one project to `new_status`.
    ///
    /// Misses and same-status moves change nothing and notify nobody.
    pub fn move_project(&self, id: &str, new_status: ProjectStatus) {
        // The borrow ends with this statement, before any listener runs.
        let moved = match self
            .projects
            .borrow_mut()
            .iter_mut()
            .find(|project| project.id == id)
        {
            Some(project) if project.status != new_status => {
                project.status = new_status;
                true
            }
            Some(_) => {
                debug!(
                    "event=project_move module=store status=skipped reason=same_status project_id={id}"
                );
                false
            }
            None => {
                debug!("event=project_move module=store status=skipped reason=not_found");
                false
            }
        };

        if moved {
            info!(
                "event=project_move module=store status=ok project_id={id} to={new_status}"
            );
            self.update_listeners();
        }
    }

    /// Registers a listener; duplicates are kept and each is invoked.
    pub fn add_listener(&self, listener: impl Fn(Vec<Project>) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Copy of the current collection in insertion order.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn update_listeners(&self) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            let snapshot = self.projects();
            listener(snapshot);
        }
    }
}

impl Debug for ProjectStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
