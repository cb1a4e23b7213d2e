//! Drag-and-drop payload carried from a drag source to a drop target.
//!
//! # Responsibility
//! - Model the key/value drag data and the allowed drag effect.
//!
//! # Invariants
//! - Board drags carry exactly one entry: `text/plain` -> project id.
//! - Entries keep the order in which types were first declared.

/// Media type under which a project id travels.
pub const PAYLOAD_MEDIA_TYPE: &str = "text/plain";

/// Effect a drag source allows or a drop target requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Link,
    Move,
}

/// Data attached to one in-flight drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
    pub drop_effect: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `data` for `media_type`, replacing any previous value.
    pub fn set_data(&mut self, media_type: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(kind, _)| kind == media_type) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((media_type.to_string(), data)),
        }
    }

    /// Returns the data for `media_type`, or an empty string when absent.
    pub fn get_data(&self, media_type: &str) -> String {
        self.entries
            .iter()
            .find(|(kind, _)| kind == media_type)
            .map(|(_, data)| data.clone())
            .unwrap_or_default()
    }

    /// Declared media types in declaration order.
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(kind, _)| kind.as_str()).collect()
    }

    /// Whether this drag carries a board payload as its primary type.
    pub fn carries_project(&self) -> bool {
        self.types().first() == Some(&PAYLOAD_MEDIA_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataTransfer, DropEffect, PAYLOAD_MEDIA_TYPE};

    #[test]
    fn set_data_replaces_existing_type() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(PAYLOAD_MEDIA_TYPE, "one");
        transfer.set_data(PAYLOAD_MEDIA_TYPE, "two");

        assert_eq!(transfer.types(), vec![PAYLOAD_MEDIA_TYPE]);
        assert_eq!(transfer.get_data(PAYLOAD_MEDIA_TYPE), "two");
        assert_eq!(transfer.effect_allowed, DropEffect::None);
    }

    #[test]
    fn carries_project_only_when_plain_text_is_first() {
        let mut transfer = DataTransfer::new();
        assert!(!transfer.carries_project());

        transfer.set_data("text/uri-list", "https://example.com");
        transfer.set_data(PAYLOAD_MEDIA_TYPE, "abc");
        assert!(!transfer.carries_project());

        let mut plain = DataTransfer::new();
        plain.set_data(PAYLOAD_MEDIA_TYPE, "abc");
        assert!(plain.carries_project());
    }

    #[test]
    fn missing_type_reads_as_empty() {
        assert_eq!(DataTransfer::new().get_data(PAYLOAD_MEDIA_TYPE), "");
    }
}
