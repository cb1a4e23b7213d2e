//! Composition root.
//!
//! # Responsibility
//! - Build the document, the one project store and the three components.
//! - Offer gesture helpers that drive the board through real events.
//!
//! # Invariants
//! - Exactly one store exists per board; every component gets its handle.
//! - Components are created in order: input form, active list, finished list.

use crate::component::project_input::{ProjectInput, SubmitOutcome, INPUT_TEMPLATE_ID};
use crate::component::project_item::ITEM_TEMPLATE_ID;
use crate::component::project_list::{ProjectList, LIST_TEMPLATE_ID};
use crate::config::{BoardConfig, ConfigError};
use crate::drag::DataTransfer;
use crate::logging::{init_logging, LoggingError};
use crate::model::project::ProjectStatus;
use crate::store::project_store::{ProjectStore, StoreHandle};
use crate::view::{
    Document, DocumentHandle, DomEvent, EventKind, TemplateNode, ViewError, ViewResult,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Element id every component mounts into.
pub const APP_HOST_ID: &str = "app";

/// Board bootstrap failures.
#[derive(Debug)]
pub enum BoardError {
    Config(ConfigError),
    Logging(LoggingError),
    View(ViewError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid board config: {err}"),
            Self::Logging(err) => write!(f, "logging init failed: {err}"),
            Self::View(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::View(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BoardError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ViewError> for BoardError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

/// Installs the standard form, list and item templates plus the `app` host.
pub fn install_default_templates(document: &Document) {
    let field = |label: &str, tag: &str, id: &str| {
        TemplateNode::new("div")
            .with_class("form-control")
            .child(TemplateNode::new("label").with_text(label))
            .child(TemplateNode::new(tag).with_id(id))
    };
    document.register_template(
        INPUT_TEMPLATE_ID,
        TemplateNode::new("form")
            .child(field("Title", "input", "title"))
            .child(field("Description", "textarea", "description"))
            .child(field("People", "input", "people"))
            .child(TemplateNode::new("button").with_text("ADD PROJECT")),
    );
    document.register_template(
        LIST_TEMPLATE_ID,
        TemplateNode::new("section")
            .with_class("projects")
            .child(TemplateNode::new("header").child(TemplateNode::new("h2")))
            .child(TemplateNode::new("ul")),
    );
    document.register_template(ITEM_TEMPLATE_ID, TemplateNode::new("li").draggable());

    if document.get_element_by_id(APP_HOST_ID).is_none() {
        let host = document.create_element("div");
        document.set_id(host, APP_HOST_ID);
        document.append_child(document.root(), host);
    }
}

/// The assembled task board.
#[derive(Debug)]
pub struct TaskBoard {
    config: BoardConfig,
    document: DocumentHandle,
    store: StoreHandle,
    input: ProjectInput,
    active: ProjectList,
    finished: ProjectList,
}

impl TaskBoard {
    /// Builds a board on a fresh document with the default templates.
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        let document = Document::new();
        install_default_templates(&document);
        Self::with_document(document, config)
    }

    /// Builds a board on a caller-prepared document.
    ///
    /// The document must already hold the three templates and the `app` host.
    pub fn with_document(document: DocumentHandle, config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        init_logging(&config).map_err(BoardError::Logging)?;

        let store = ProjectStore::new();
        let input = ProjectInput::new(
            Rc::clone(&document),
            Rc::clone(&store),
            config.rules.clone(),
            APP_HOST_ID,
        )?;
        let active = ProjectList::new(
            Rc::clone(&document),
            Rc::clone(&store),
            APP_HOST_ID,
            ProjectStatus::Active,
        )?;
        let finished = ProjectList::new(
            Rc::clone(&document),
            Rc::clone(&store),
            APP_HOST_ID,
            ProjectStatus::Finished,
        )?;

        info!("event=board_ready module=app status=ok");
        Ok(Self {
            config,
            document,
            store,
            input,
            active,
            finished,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn list(&self, status: ProjectStatus) -> &ProjectList {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// Fills the form with raw text and submits it.
    pub fn submit_project(&self, title: &str, description: &str, people: &str) -> SubmitOutcome {
        self.input.fill(title, description, people);
        self.input.submit()
    }

    /// Drags the rendered item of `project_id` onto the `target` list.
    ///
    /// Returns whether the target accepted the drop.
    pub fn drag_project(&self, project_id: &str, target: ProjectStatus) -> ViewResult<bool> {
        let doc = &self.document;
        let source = doc
            .get_element_by_id(project_id)
            .ok_or_else(|| ViewError::ElementNotFound {
                role: format!("#{project_id}"),
            })?;
        let target_list = self.list(target).list_element();
        // The source item may be rebuilt by the drop; keep it until drag-end.
        let _hold = doc.hold_releases();

        let started = doc.dispatch(DomEvent::drag(
            EventKind::DragStart,
            source,
            DataTransfer::new(),
        ));
        let transfer = started.into_data_transfer().unwrap_or_default();

        let over = doc.dispatch(DomEvent::drag(
            EventKind::DragOver,
            target_list,
            transfer.clone(),
        ));
        let accepted = over.default_prevented();
        let finish = if accepted {
            EventKind::Drop
        } else {
            EventKind::DragLeave
        };
        doc.dispatch(DomEvent::drag(finish, target_list, transfer.clone()));
        doc.dispatch(DomEvent::drag(EventKind::DragEnd, source, transfer));
        Ok(accepted)
    }

    /// Text outline of the mounted board.
    pub fn outline(&self) -> String {
        self.document.outline(self.document.root())
    }
}
