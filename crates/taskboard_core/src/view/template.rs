//! Declarative element blueprints.

/// Element blueprint instantiated by `Document::import_template`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub draggable: bool,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            draggable: false,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}
