//! Project domain model.
//!
//! # Responsibility
//! - Define the record shared by the active and finished list projections.
//! - Generate process-unique identities at creation time.
//!
//! # Invariants
//! - `id`, `title`, `description` and `people` never change after creation.
//! - `status` is only reassigned by the project store.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one project.
///
/// Carried verbatim as the drag payload, so it stays a plain string.
pub type ProjectId = String;

/// Board column a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work in progress; default for new projects.
    Active,
    /// Completed.
    Finished,
}

impl ProjectStatus {
    /// Stable lowercase name, shared by wire format and element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// Both statuses in board order.
    pub fn all() -> [ProjectStatus; 2] {
        [Self::Active, Self::Finished]
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task board entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Process-unique identity, assigned at creation.
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned; always positive for validated input.
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        let title = title.into();
        let id = generate_project_id(title.as_str());
        Self::with_id(id, title, description, people)
    }

    /// Creates an active project with a caller-provided id.
    ///
    /// Callers own uniqueness of `id`.
    pub fn with_id(
        id: impl Into<ProjectId>,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    /// Person line shown under the description, e.g. `3 Persons Assigned`.
    pub fn people_label(&self) -> String {
        let noun = if self.people > 1 { "Persons" } else { "Person" };
        format!("{} {noun} Assigned", self.people)
    }
}

/// Random v4 UUID followed by the third title character when present.
fn generate_project_id(title: &str) -> ProjectId {
    let mut id = Uuid::new_v4().simple().to_string();
    if let Some(ch) = title.chars().nth(2) {
        id.push(ch);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::{generate_project_id, Project, ProjectStatus};

    #[test]
    fn new_project_starts_active() {
        let project = Project::new("Build API", "Backend service", 3);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.title, "Build API");
        assert_eq!(project.people, 3);
    }

    #[test]
    fn generated_id_carries_title_character() {
        let id = generate_project_id("Build API");
        assert!(id.ends_with('i'));
        assert_eq!(id.chars().count(), 33);

        let short = generate_project_id("ab");
        assert_eq!(short.chars().count(), 32);
    }

    #[test]
    fn people_label_pluralizes_above_one() {
        assert_eq!(Project::with_id("a", "t", "d", 1).people_label(), "1 Person Assigned");
        assert_eq!(Project::with_id("a", "t", "d", 2).people_label(), "2 Persons Assigned");
        assert_eq!(Project::with_id("a", "t", "d", 0).people_label(), "0 Person Assigned");
    }
}
