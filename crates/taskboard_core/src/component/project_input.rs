//! Input component: the project creation form.
//!
//! # Responsibility
//! - Collect title/description/people, validate them, create the project.
//!
//! # Invariants
//! - Rejected submissions show a notice and leave every field untouched.
//! - Accepted submissions create exactly one project and then clear all fields.

use crate::component::{mount, require_id, Component};
use crate::config::InputRules;
use crate::store::project_store::StoreHandle;
use crate::validation::{validate, FieldValue};
use crate::view::{
    Document, DocumentHandle, DomEvent, EventKind, InsertPosition, NodeId, ViewResult,
};
use log::info;
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Template instantiated for the form.
pub const INPUT_TEMPLATE_ID: &str = "project-input";
/// Element id given to the mounted form.
pub const FORM_ELEMENT_ID: &str = "user-input";
/// Notice shown when any field fails validation.
pub const INVALID_INPUT_NOTICE: &str = "Invalid Input, please try again";

/// Result of one form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected,
}

/// Element ids of the three form fields.
#[derive(Debug, Clone, Copy)]
struct FormFields {
    title: NodeId,
    description: NodeId,
    people: NodeId,
}

/// Everything the submit listener needs, without a strong document handle.
#[derive(Debug, Clone)]
struct SubmitHandler {
    document: Weak<Document>,
    store: StoreHandle,
    rules: InputRules,
    fields: FormFields,
}

impl SubmitHandler {
    fn submit(&self) -> SubmitOutcome {
        let Some(doc) = self.document.upgrade() else {
            return SubmitOutcome::Rejected;
        };
        match self.collect_user_input(&doc) {
            Some((title, description, people)) => {
                self.store.add_project(title, description, people);
                self.clear_inputs(&doc);
                SubmitOutcome::Created
            }
            None => {
                info!("event=project_submit module=component status=rejected");
                doc.alert(INVALID_INPUT_NOTICE);
                SubmitOutcome::Rejected
            }
        }
    }

    fn collect_user_input(&self, doc: &Document) -> Option<(String, String, u32)> {
        let title = doc.value(self.fields.title).unwrap_or_default();
        let description = doc.value(self.fields.description).unwrap_or_default();
        let people = parse_people(&doc.value(self.fields.people).unwrap_or_default());

        let valid = validate(&self.rules.title.bind(FieldValue::Text(title.clone())))
            && validate(&self.rules.description.bind(FieldValue::Text(description.clone())))
            && validate(&self.rules.people.bind(FieldValue::Number(people)));
        if !valid {
            return None;
        }
        Some((title, description, people_count(people)?))
    }

    fn clear_inputs(&self, doc: &Document) {
        for field in [self.fields.title, self.fields.description, self.fields.people] {
            doc.set_value(field, "");
        }
    }
}

/// Whole, non-negative counts that fit a `u32`; anything else is rejected.
fn people_count(value: f64) -> Option<u32> {
    if value.fract() != 0.0 || value < 0.0 {
        return None;
    }
    // `as u64` saturates, so oversized values still fail the conversion.
    u32::try_from(value as u64).ok()
}

/// Numeric coercion of the people field: blank is 0, garbage is NaN.
fn parse_people(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Form component creating projects on submit.
#[derive(Debug)]
pub struct ProjectInput {
    document: DocumentHandle,
    element: NodeId,
    handler: SubmitHandler,
    last_outcome: Rc<Cell<Option<SubmitOutcome>>>,
}

impl ProjectInput {
    /// Mounts the form at the start of `host_id`.
    pub fn new(
        document: DocumentHandle,
        store: StoreHandle,
        rules: InputRules,
        host_id: &str,
    ) -> ViewResult<Self> {
        let element = mount(
            &document,
            INPUT_TEMPLATE_ID,
            host_id,
            InsertPosition::AfterBegin,
            Some(FORM_ELEMENT_ID),
        )?;
        let fields = FormFields {
            title: require_id(&document, element, "title")?,
            description: require_id(&document, element, "description")?,
            people: require_id(&document, element, "people")?,
        };
        let handler = SubmitHandler {
            document: Rc::downgrade(&document),
            store,
            rules,
            fields,
        };

        let mut component = Self {
            document,
            element,
            handler,
            last_outcome: Rc::new(Cell::new(None)),
        };
        component.configure();
        component.render_content();
        Ok(component)
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Types raw text into the three fields.
    pub fn fill(&self, title: &str, description: &str, people: &str) {
        let doc = &self.document;
        doc.set_value(self.handler.fields.title, title);
        doc.set_value(self.handler.fields.description, description);
        doc.set_value(self.handler.fields.people, people);
    }

    /// Current raw field values `(title, description, people)`.
    pub fn values(&self) -> (String, String, String) {
        let doc = &self.document;
        (
            doc.value(self.handler.fields.title).unwrap_or_default(),
            doc.value(self.handler.fields.description).unwrap_or_default(),
            doc.value(self.handler.fields.people).unwrap_or_default(),
        )
    }

    /// Dispatches a submit event on the form and reports what it did.
    pub fn submit(&self) -> SubmitOutcome {
        self.last_outcome.set(None);
        self.document.dispatch(DomEvent::new(EventKind::Submit, self.element));
        self.last_outcome.get().unwrap_or(SubmitOutcome::Rejected)
    }
}

impl Component for ProjectInput {
    fn configure(&mut self) {
        let handler = self.handler.clone();
        let last_outcome = Rc::clone(&self.last_outcome);
        self.document
            .add_event_listener(self.element, EventKind::Submit, move |event| {
                event.prevent_default();
                last_outcome.set(Some(handler.submit()));
            });
    }

    // The form is static markup; nothing to fill in.
    fn render_content(&mut self) {}
}
