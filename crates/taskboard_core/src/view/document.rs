//! Element arena, template registry and event dispatch.
//!
//! # Invariants
//! - Slots of cleared subtrees are released (element and listeners) and
//!   reused by later `create_element` calls.
//! - Release waits while any dispatch or `hold_releases` guard is active, so
//!   an in-flight gesture can still reach a node detached mid-gesture.
//! - Accessors given an unknown or released `NodeId` return `None`/empty
//!   and mutators ignore it.

use crate::view::event::{DomEvent, EventHandler, EventKind};
use crate::view::template::TemplateNode;
use crate::view::{ViewError, ViewResult};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Index of one element slot in the document arena.
pub type NodeId = usize;

/// Shared handle to the render surface.
pub type DocumentHandle = Rc<Document>;

/// Where `Document::insert` places a node inside its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the host's first child.
    AfterBegin,
    /// After the host's last child.
    BeforeEnd,
}

/// One element in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    /// Current value for form inputs.
    pub value: String,
    pub draggable: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            draggable: false,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Postpones slot release until dropped.
#[derive(Debug)]
pub struct ReleaseGuard<'doc> {
    document: &'doc Document,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        let depth = self.document.hold_depth.get() - 1;
        self.document.hold_depth.set(depth);
        if depth == 0 {
            self.document.release_pending();
        }
    }
}

/// Single-threaded document holding every mounted element.
pub struct Document {
    root: NodeId,
    elements: RefCell<Vec<Option<Element>>>,
    free_slots: RefCell<Vec<NodeId>>,
    pending_release: RefCell<Vec<NodeId>>,
    hold_depth: Cell<usize>,
    templates: RefCell<HashMap<String, TemplateNode>>,
    listeners: RefCell<HashMap<(NodeId, EventKind), Vec<EventHandler>>>,
    alerts: RefCell<Vec<String>>,
}

impl Document {
    /// Creates an empty document with a `body` root.
    pub fn new() -> DocumentHandle {
        Rc::new(Self {
            root: 0,
            elements: RefCell::new(vec![Some(Element::new("body"))]),
            free_slots: RefCell::new(Vec::new()),
            pending_release: RefCell::new(Vec::new()),
            hold_depth: Cell::new(0),
            templates: RefCell::new(HashMap::new()),
            listeners: RefCell::new(HashMap::new()),
            alerts: RefCell::new(Vec::new()),
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached element, reusing a released slot when one exists.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let reused = self.free_slots.borrow_mut().pop();
        let mut elements = self.elements.borrow_mut();
        match reused {
            Some(slot) => {
                elements[slot] = Some(Element::new(tag));
                slot
            }
            None => {
                elements.push(Some(Element::new(tag)));
                elements.len() - 1
            }
        }
    }

    /// Number of live elements, attached or not.
    pub fn element_count(&self) -> usize {
        self.elements.borrow().iter().flatten().count()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.read(node, |_| ()).is_some()
    }

    /// Copy of one element's state.
    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.read(node, Element::clone)
    }

    fn read<T>(&self, node: NodeId, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.elements.borrow().get(node).and_then(Option::as_ref).map(f)
    }

    fn write(&self, node: NodeId, f: impl FnOnce(&mut Element)) {
        if let Some(element) = self.elements.borrow_mut().get_mut(node).and_then(Option::as_mut) {
            f(element);
        }
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        self.insert(parent, child, InsertPosition::BeforeEnd);
    }

    /// Attaches `node` to `host`, detaching it from any previous parent.
    pub fn insert(&self, host: NodeId, node: NodeId, position: InsertPosition) {
        if host == node || !self.contains(host) || !self.contains(node) {
            return;
        }
        self.detach(node);
        self.write(host, |element| match position {
            InsertPosition::AfterBegin => element.children.insert(0, node),
            InsertPosition::BeforeEnd => element.children.push(node),
        });
        self.write(node, |element| element.parent = Some(host));
    }

    fn detach(&self, node: NodeId) {
        let mut parent = None;
        self.write(node, |element| parent = element.parent.take());
        if let Some(parent) = parent {
            self.write(parent, |element| element.children.retain(|child| *child != node));
        }
    }

    /// Detaches every child of `node` and schedules their subtrees for release.
    pub fn clear_children(&self, node: NodeId) {
        let mut removed = Vec::new();
        self.write(node, |element| removed = std::mem::take(&mut element.children));
        for child in &removed {
            self.write(*child, |element| element.parent = None);
        }
        self.pending_release.borrow_mut().extend(removed);
        if self.hold_depth.get() == 0 {
            self.release_pending();
        }
    }

    /// Keeps cleared subtrees alive until the returned guard drops.
    pub fn hold_releases(&self) -> ReleaseGuard<'_> {
        self.hold_depth.set(self.hold_depth.get() + 1);
        ReleaseGuard { document: self }
    }

    fn release_pending(&self) {
        let pending = std::mem::take(&mut *self.pending_release.borrow_mut());
        let mut released = Vec::new();
        for node in pending {
            // Re-attached in the meantime.
            if self.parent(node).is_some() {
                continue;
            }
            self.collect_subtree(node, &mut released);
        }
        if released.is_empty() {
            return;
        }

        {
            let mut elements = self.elements.borrow_mut();
            for node in &released {
                elements[*node] = None;
            }
        }
        self.listeners
            .borrow_mut()
            .retain(|(owner, _), _| !released.contains(owner));
        debug!(
            "event=release_nodes module=view status=ok count={}",
            released.len()
        );
        self.free_slots.borrow_mut().extend(released);
    }

    fn collect_subtree(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if !self.contains(node) || out.contains(&node) {
            return;
        }
        out.push(node);
        for child in self.children(node) {
            self.collect_subtree(child, out);
        }
    }

    /// Child ids; empty for unknown nodes.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.read(node, |element| element.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.read(node, |element| element.parent).flatten()
    }

    pub fn set_id(&self, node: NodeId, id: impl Into<String>) {
        let id = id.into();
        self.write(node, |element| element.id = Some(id));
    }

    pub fn id(&self, node: NodeId) -> Option<String> {
        self.read(node, |element| element.id.clone()).flatten()
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.read(node, |element| element.tag.clone())
    }

    pub fn set_text(&self, node: NodeId, text: impl Into<String>) {
        let text = text.into();
        self.write(node, |element| element.text = text);
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.read(node, |element| element.text.clone())
    }

    pub fn set_value(&self, node: NodeId, value: impl Into<String>) {
        let value = value.into();
        self.write(node, |element| element.value = value);
    }

    pub fn value(&self, node: NodeId) -> Option<String> {
        self.read(node, |element| element.value.clone())
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        self.write(node, |element| {
            if !element.classes.iter().any(|existing| existing == class) {
                element.classes.push(class.to_string());
            }
        });
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        self.write(node, |element| element.classes.retain(|existing| existing != class));
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.read(node, |element| element.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    /// Attached element with the given id, searched from the root.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_id(self.root, id)
    }

    /// First node at or below `scope` (depth-first) with the given id.
    pub fn query_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.find(scope, &|element: &Element| element.id.as_deref() == Some(id))
    }

    /// First descendant of `scope` (depth-first) with the given tag.
    pub fn query_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.children(scope)
            .into_iter()
            .find_map(|child| self.find(child, &|element: &Element| element.tag == tag))
    }

    fn find(&self, node: NodeId, predicate: &dyn Fn(&Element) -> bool) -> Option<NodeId> {
        if self.read(node, predicate).unwrap_or(false) {
            return Some(node);
        }
        self.children(node)
            .into_iter()
            .find_map(|child| self.find(child, predicate))
    }

    /// Registers (or replaces) a named template.
    pub fn register_template(&self, template_id: impl Into<String>, content: TemplateNode) {
        self.templates
            .borrow_mut()
            .insert(template_id.into(), content);
    }

    /// Instantiates a detached deep copy of a registered template.
    pub fn import_template(&self, template_id: &str) -> ViewResult<NodeId> {
        let content = self
            .templates
            .borrow()
            .get(template_id)
            .cloned()
            .ok_or_else(|| ViewError::TemplateNotFound(template_id.to_string()))?;
        Ok(self.instantiate(&content))
    }

    fn instantiate(&self, blueprint: &TemplateNode) -> NodeId {
        let node = self.create_element(&blueprint.tag);
        self.write(node, |element| {
            element.id = blueprint.id.clone();
            element.classes = blueprint.classes.clone();
            element.text = blueprint.text.clone();
            element.draggable = blueprint.draggable;
        });
        for child in &blueprint.children {
            let child_node = self.instantiate(child);
            self.append_child(node, child_node);
        }
        node
    }

    /// Registers `handler`; ignored for unknown nodes.
    pub fn add_event_listener(
        &self,
        node: NodeId,
        kind: EventKind,
        handler: impl Fn(&mut DomEvent) + 'static,
    ) {
        if !self.contains(node) {
            return;
        }
        self.listeners
            .borrow_mut()
            .entry((node, kind))
            .or_default()
            .push(Rc::new(handler));
    }

    /// Runs listeners from the target up to the root and returns the event.
    ///
    /// The propagation path is fixed before the first listener runs, and
    /// nothing cleared during dispatch is released before it returns.
    pub fn dispatch(&self, mut event: DomEvent) -> DomEvent {
        let _hold = self.hold_releases();
        let mut path = vec![event.target];
        while let Some(parent) = self.parent(path[path.len() - 1]) {
            path.push(parent);
        }

        for node in path {
            let handlers = self
                .listeners
                .borrow()
                .get(&(node, event.kind))
                .cloned()
                .unwrap_or_default();
            event.current_target = node;
            for handler in handlers {
                handler(&mut event);
            }
        }
        event
    }

    /// Shows a blocking user notice.
    pub fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("event=user_alert module=view status=shown");
        self.alerts.borrow_mut().push(message);
    }

    /// Notices shown so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Indented text rendering of the subtree at `node`.
    pub fn outline(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_outline(node, 0, &mut out);
        out
    }

    fn write_outline(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(element) = self.element(node) else {
            return;
        };
        out.push_str(&"  ".repeat(depth));
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id) = &element.id {
            out.push_str(&format!(" id=\"{id}\""));
        }
        if !element.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", element.classes.join(" ")));
        }
        out.push('>');
        if !element.text.is_empty() {
            out.push(' ');
            out.push_str(&element.text);
        }
        out.push('\n');
        for child in element.children {
            self.write_outline(child, depth + 1, out);
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.element_count())
            .field("templates", &self.templates.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, InsertPosition};
    use crate::view::{DomEvent, EventKind, TemplateNode, ViewError};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn import_template_deep_copies_blueprint() {
        let doc = Document::new();
        doc.register_template(
            "card",
            TemplateNode::new("section")
                .child(TemplateNode::new("h2").with_text("Heading"))
                .child(TemplateNode::new("ul")),
        );

        let first = doc.import_template("card").expect("template exists");
        let second = doc.import_template("card").expect("template exists");
        assert_ne!(first, second);

        let heading = doc.query_tag(first, "h2").expect("h2 role");
        assert_eq!(doc.text(heading).as_deref(), Some("Heading"));
        assert!(doc.query_tag(first, "ul").is_some());
        assert!(doc.parent(first).is_none());
    }

    #[test]
    fn import_missing_template_fails() {
        let doc = Document::new();
        assert_eq!(
            doc.import_template("nope"),
            Err(ViewError::TemplateNotFound("nope".to_string()))
        );
    }

    #[test]
    fn insert_respects_position_and_id_lookup_needs_attachment() {
        let doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.set_id(b, "b");
        assert!(doc.get_element_by_id("b").is_none());

        doc.insert(doc.root(), a, InsertPosition::BeforeEnd);
        doc.insert(doc.root(), b, InsertPosition::AfterBegin);

        assert_eq!(doc.children(doc.root()), vec![b, a]);
        assert_eq!(doc.get_element_by_id("b"), Some(b));
    }

    #[test]
    fn events_bubble_to_ancestors() {
        let doc = Document::new();
        let list = doc.create_element("ul");
        let item = doc.create_element("li");
        doc.append_child(doc.root(), list);
        doc.append_child(list, item);

        let seen = Rc::new(RefCell::new(Vec::new()));
        for node in [item, list] {
            let seen = Rc::clone(&seen);
            doc.add_event_listener(node, EventKind::Drop, move |event| {
                seen.borrow_mut().push(event.current_target);
                event.prevent_default();
            });
        }

        let event = doc.dispatch(DomEvent::new(EventKind::Drop, item));
        assert!(event.default_prevented());
        assert_eq!(*seen.borrow(), vec![item, list]);
    }

    #[test]
    fn held_release_keeps_cleared_item_reachable_until_guard_drops() {
        let doc = Document::new();
        let list = doc.create_element("ul");
        let item = doc.create_element("li");
        doc.append_child(list, item);

        let hits = Rc::new(RefCell::new(Vec::new()));
        for node in [item, list] {
            let hits = Rc::clone(&hits);
            doc.add_event_listener(node, EventKind::DragEnd, move |event| {
                hits.borrow_mut().push(event.current_target)
            });
        }

        {
            let _hold = doc.hold_releases();
            doc.clear_children(list);
            doc.dispatch(DomEvent::new(EventKind::DragEnd, item));
            assert!(doc.contains(item));
            assert_eq!(doc.parent(item), None);
        }

        assert!(doc.children(list).is_empty());
        assert!(!doc.contains(item));
        assert_eq!(*hits.borrow(), vec![item]);

        doc.dispatch(DomEvent::new(EventKind::DragEnd, item));
        assert_eq!(hits.borrow().len(), 1);
    }

    #[test]
    fn cleared_slots_are_reused() {
        let doc = Document::new();
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), list);

        for _ in 0..50 {
            doc.clear_children(list);
            let item = doc.create_element("li");
            let heading = doc.create_element("h2");
            doc.append_child(item, heading);
            doc.append_child(list, item);
            doc.add_event_listener(item, EventKind::DragStart, |_| {});
        }

        assert_eq!(doc.element_count(), 4);
        assert_eq!(doc.listeners.borrow().len(), 1);
    }

    #[test]
    fn unknown_nodes_read_as_empty_and_ignore_writes() {
        let doc = Document::new();
        let missing = 99_999;

        assert!(doc.children(missing).is_empty());
        assert_eq!(doc.parent(missing), None);
        assert_eq!(doc.text(missing), None);
        assert_eq!(doc.tag(missing), None);
        assert!(!doc.has_class(missing, "droppable"));

        doc.set_text(missing, "ignored");
        doc.add_class(missing, "droppable");
        doc.append_child(doc.root(), missing);
        assert!(doc.children(doc.root()).is_empty());
        assert!(doc.outline(missing).is_empty());
    }

    #[test]
    fn handlers_may_mutate_document_during_dispatch() {
        let doc = Document::new();
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), list);

        let weak = Rc::downgrade(&doc);
        doc.add_event_listener(list, EventKind::DragOver, move |event| {
            if let Some(doc) = weak.upgrade() {
                doc.add_class(event.current_target, "droppable");
            }
        });

        doc.dispatch(DomEvent::new(EventKind::DragOver, list));
        assert!(doc.has_class(list, "droppable"));
    }

    #[test]
    fn outline_lists_tags_ids_and_text() {
        let doc = Document::new();
        let heading = doc.create_element("h2");
        doc.set_id(heading, "title");
        doc.set_text(heading, "ACTIVE PROJECTS");
        doc.append_child(doc.root(), heading);

        let outline = doc.outline(doc.root());
        assert!(outline.contains("<body>"));
        assert!(outline.contains("  <h2 id=\"title\"> ACTIVE PROJECTS"));
    }
}
