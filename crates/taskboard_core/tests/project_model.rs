use taskboard_core::{Project, ProjectStatus};

#[test]
fn project_serializes_with_lowercase_status() {
    let project = Project::with_id("p1", "Build API", "Backend service", 3);

    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["id"], "p1");
    assert_eq!(json["title"], "Build API");
    assert_eq!(json["people"], 3);
    assert_eq!(json["status"], "active");

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn status_names_match_display() {
    for status in ProjectStatus::all() {
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json, status.to_string());
    }
    assert_eq!(ProjectStatus::Finished.as_str(), "finished");
}
