//! Core logic for the task board.
//! The project store is the single source of truth; components only render
//! copies it hands out and ask it for changes.

pub mod app;
pub mod component;
pub mod config;
pub mod drag;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
pub mod view;

pub use app::{install_default_templates, BoardError, TaskBoard, APP_HOST_ID};
pub use component::project_input::{ProjectInput, SubmitOutcome, INVALID_INPUT_NOTICE};
pub use component::project_item::ProjectItem;
pub use component::project_list::{ProjectList, DROPPABLE_CLASS};
pub use component::{mount, Component};
pub use config::{BoardConfig, ConfigError, InputRules};
pub use drag::{DataTransfer, DropEffect, PAYLOAD_MEDIA_TYPE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use store::project_store::{Listener, ProjectStore, StoreHandle};
pub use validation::{validate, FieldRules, FieldValue, Validatable};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
