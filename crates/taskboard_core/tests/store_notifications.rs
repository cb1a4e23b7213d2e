use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use taskboard_core::{BoardConfig, Project, ProjectStatus, ProjectStore, TaskBoard};

fn board() -> TaskBoard {
    TaskBoard::new(BoardConfig::default()).expect("board should build")
}

fn record(store: &ProjectStore) -> Rc<RefCell<Vec<Vec<Project>>>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    store.add_listener(move |projects| sink.borrow_mut().push(projects));
    calls
}

#[test]
fn every_created_id_is_distinct() {
    let board = board();
    let store = board.store();
    let mut ids = HashSet::new();
    for index in 0..100 {
        let id = store.add_project(format!("Project {index}"), "Some detail", 2);
        assert!(ids.insert(id), "duplicate id at creation {index}");
    }
}

#[test]
fn created_projects_start_active() {
    let board = board();
    let store = board.store();
    store.add_project("Build API", "Backend service", 3);
    store.add_project("Write docs", "User manual", 1);

    assert!(store
        .projects()
        .iter()
        .all(|project| project.status == ProjectStatus::Active));
}

#[test]
fn create_notifies_each_subscriber_once_with_one_more_project() {
    let board = board();
    let store = board.store();
    store.add_project("Existing one", "Already here", 1);
    let first = record(store);
    let second = record(store);
    let third = record(store);

    let id = store.add_project("Build API", "Backend service", 3);

    for calls in [first, second, third] {
        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        let created = calls[0].last().expect("new project present");
        assert_eq!(created.id, id);
        assert_eq!(created.title, "Build API");
        assert_eq!(created.description, "Backend service");
        assert_eq!(created.people, 3);
    }
}

#[test]
fn move_to_current_status_never_notifies() {
    let board = board();
    let store = board.store();
    let id = store.add_project("Build API", "Backend service", 3);
    let calls = record(store);

    store.move_project(&id, ProjectStatus::Active);
    assert!(calls.borrow().is_empty());

    store.move_project(&id, ProjectStatus::Finished);
    store.move_project(&id, ProjectStatus::Finished);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn move_changes_only_the_target_project() {
    let board = board();
    let store = board.store();
    let keep = store.add_project("Keep active", "Stays put", 1);
    let moved = store.add_project("Ship it now", "Goes done", 4);
    let before = store.projects();
    let calls = record(store);

    store.move_project(&moved, ProjectStatus::Finished);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let after = &calls[0];
    assert_eq!(after.len(), before.len());
    assert_eq!(after[0], before[0]);
    assert_eq!(after[0].id, keep);
    assert_eq!(after[1].id, moved);
    assert_eq!(after[1].status, ProjectStatus::Finished);
    assert_eq!(after[1].title, before[1].title);
}

#[test]
fn move_of_unknown_id_is_silent() {
    let board = board();
    let store = board.store();
    store.add_project("Build API", "Backend service", 3);
    let before = store.projects();
    let calls = record(store);

    store.move_project("no-such-project", ProjectStatus::Finished);

    assert!(calls.borrow().is_empty());
    assert_eq!(store.projects(), before);
}

#[test]
fn snapshots_are_isolated_from_the_store() {
    let board = board();
    let store = board.store();
    store.add_listener(|mut projects| {
        projects.iter_mut().for_each(|project| {
            project.title.clear();
            project.status = ProjectStatus::Finished;
        });
        projects.truncate(0);
    });
    let calls = record(store);

    let first = store.add_project("Build API", "Backend service", 3);
    store.add_project("Write docs", "User manual", 1);
    store.move_project(&first, ProjectStatus::Finished);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].len(), 2);
    assert_eq!(calls[1][0].title, "Build API");
    assert_eq!(calls[1][0].status, ProjectStatus::Active);
    assert_eq!(calls[2][0].status, ProjectStatus::Finished);
    assert_eq!(calls[2][1].status, ProjectStatus::Active);
}
