//! Unit tests for the folder and sharing-group stores.

use bookvault::stores::{FolderStore, GroupStore};
use bookvault::types::{Folder, Group};

// === FolderStore ===

#[test]
fn folders_are_kept_name_sorted() {
    let mut store = FolderStore::new();
    store.add("Work", None);
    store.add("Archive", None);
    store.add("Media", None);

    let names: Vec<&str> = store.all().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Archive", "Media", "Work"]);
}

#[test]
fn folder_rename_restores_name_order() {
    let mut store = FolderStore::new();
    store.add("Alpha", None);
    let id = store.add("Zulu", None);

    let mut renamed = store.all().iter().find(|f| f.id == id).unwrap().clone();
    renamed.name = "Beta".to_string();
    store.update(renamed);

    let names: Vec<&str> = store.all().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn folder_update_of_unknown_id_is_a_no_op() {
    let mut store = FolderStore::new();
    store.add("Only", None);
    store.update(Folder {
        id: "missing".to_string(),
        name: "Ghost".to_string(),
        parent_id: None,
        created_at: 0,
    });
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].name, "Only");
}

#[test]
fn folder_delete_and_name_lookup() {
    let mut store = FolderStore::new();
    let id = store.add("Reading", None);

    assert_eq!(store.name_of(&id), Some("Reading"));
    assert_eq!(store.name_of("dangling"), None);

    store.delete(&id);
    assert!(store.is_empty());
    assert_eq!(store.name_of(&id), None);
}

#[test]
fn folder_keeps_parent_pointer_without_traversal() {
    let mut store = FolderStore::new();
    let parent = store.add("Parent", None);
    let child = store.add("Child", Some(parent.clone()));

    let stored = store.all().iter().find(|f| f.id == child).unwrap();
    assert_eq!(stored.parent_id.as_deref(), Some(parent.as_str()));
}

// === GroupStore ===

#[test]
fn groups_are_kept_newest_first() {
    let mut store = GroupStore::new();
    store.add("First", &["a@example.com".to_string()]);
    let second = store.add("Second", &["b@example.com".to_string()]);

    assert_eq!(store.all()[0].id, second);
    assert_eq!(store.all()[1].name, "First");
}

#[test]
fn group_emails_are_trimmed_and_blanks_dropped() {
    let mut store = GroupStore::new();
    let id = store.add(
        "Team",
        &[
            "  a@example.com ".to_string(),
            String::new(),
            "   ".to_string(),
            "b@example.com".to_string(),
        ],
    );

    let group = store.get(&id).unwrap();
    assert_eq!(group.emails, vec!["a@example.com", "b@example.com"]);
}

#[test]
fn group_update_replaces_record_and_renormalizes_emails() {
    let mut store = GroupStore::new();
    let id = store.add("Team", &["a@example.com".to_string()]);

    store.update(Group {
        id: id.clone(),
        name: "Renamed".to_string(),
        emails: vec![" c@example.com ".to_string()],
    });

    let group = store.get(&id).unwrap();
    assert_eq!(group.name, "Renamed");
    assert_eq!(group.emails, vec!["c@example.com"]);
}

#[test]
fn group_delete_removes_by_id() {
    let mut store = GroupStore::new();
    let keep = store.add("Keep", &["a@example.com".to_string()]);
    let drop = store.add("Drop", &["b@example.com".to_string()]);

    store.delete(&drop);

    assert_eq!(store.len(), 1);
    assert!(store.get(&keep).is_some());
    assert!(store.get(&drop).is_none());
}
