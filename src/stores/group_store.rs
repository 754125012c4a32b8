//! Sharing-group collection store.
//!
//! Groups are kept newest-first. Member emails are trimmed and blanks
//! dropped, but address syntax is not validated.

use crate::types::Group;

use super::fresh_id;

/// In-memory owner of the sharing-group collection.
#[derive(Debug, Default)]
pub struct GroupStore {
    items: Vec<Group>,
}

impl GroupStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Atomically replaces the entire collection.
    pub fn replace_all(&mut self, items: Vec<Group>) {
        self.items = items;
    }

    /// Adds a new group at the front of the collection and returns its id.
    pub fn add(&mut self, name: &str, emails: &[String]) -> String {
        let group = Group {
            id: fresh_id(),
            name: name.trim().to_string(),
            emails: normalize_emails(emails),
        };
        let id = group.id.clone();
        self.items.insert(0, group);
        id
    }

    /// Replaces the record matching `updated.id`, re-normalizing the email
    /// list. A no-op when no record matches.
    pub fn update(&mut self, mut updated: Group) {
        updated.emails = normalize_emails(&updated.emails);
        if let Some(existing) = self.items.iter_mut().find(|g| g.id == updated.id) {
            *existing = updated;
        }
    }

    /// Removes the group with the given id, if present.
    pub fn delete(&mut self, id: &str) {
        self.items.retain(|g| g.id != id);
    }

    pub fn get(&self, id: &str) -> Option<&Group> {
        self.items.iter().find(|g| g.id == id)
    }

    pub fn all(&self) -> &[Group] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn normalize_emails(emails: &[String]) -> Vec<String> {
    emails
        .iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}
