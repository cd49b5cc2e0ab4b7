//! In-memory storage backend.
//!
//! All data lives in a `HashMap` of project name to issue sequence and is lost
//! when the last clone is dropped. One `RwLock` guards the whole map.

use crate::domain::Issue;
use crate::query::IssueFilter;
use crate::storage::IssueStore;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

type Projects = HashMap<String, Vec<Issue>>;

/// In-memory storage backend.
///
/// Uses `Arc<RwLock<>>` so clones share the same data across request handlers.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    projects: Arc<RwLock<Projects>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Projects> {
        self.projects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// Every lookup creates an empty sequence for an unknown project name, so the
// map grows with each distinct name a client sends. Entries are never evicted.
impl IssueStore for InMemoryStorage {
    fn append(&self, project: &str, mut issue: Issue) -> Issue {
        let mut projects = self.write();
        let issues = projects.entry(project.to_string()).or_default();
        while issues.iter().any(|existing| existing.id == issue.id) {
            issue.id = Issue::fresh_id();
        }
        issues.push(issue.clone());
        issue
    }

    fn list(&self, project: &str, filter: &IssueFilter) -> Vec<Issue> {
        self.write()
            .entry(project.to_string())
            .or_default()
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect()
    }

    fn get(&self, project: &str, id: &str) -> Option<Issue> {
        self.write()
            .entry(project.to_string())
            .or_default()
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
    }

    fn modify<R, F>(&self, project: &str, id: &str, change: F) -> Option<R>
    where
        F: FnOnce(&mut Issue) -> R,
    {
        self.write()
            .entry(project.to_string())
            .or_default()
            .iter_mut()
            .find(|issue| issue.id == id)
            .map(change)
    }

    fn remove(&self, project: &str, id: &str) -> Option<Issue> {
        let mut projects = self.write();
        let issues = projects.entry(project.to_string()).or_default();
        let index = issues.iter().position(|issue| issue.id == id)?;
        Some(issues.remove(index))
    }

    fn projects(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .projects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewIssue;

    fn make_issue(title: &str) -> Issue {
        Issue::new(NewIssue {
            title: title.to_string(),
            text: "text".to_string(),
            created_by: "tester".to_string(),
            assigned_to: String::new(),
            status_text: String::new(),
        })
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let storage = InMemoryStorage::new();
        let first = storage.append("p", make_issue("first"));
        let second = storage.append("p", make_issue("second"));

        let issues = storage.list("p", &IssueFilter::new());
        assert_eq!(issues, vec![first, second]);
    }

    #[test]
    fn test_append_replaces_colliding_id() {
        let storage = InMemoryStorage::new();
        let first = storage.append("p", make_issue("first"));

        let mut duplicate = make_issue("second");
        duplicate.id = first.id.clone();
        let stored = storage.append("p", duplicate);

        assert_ne!(stored.id, first.id);
        assert_eq!(storage.list("p", &IssueFilter::new()).len(), 2);
    }

    #[test]
    fn test_same_id_allowed_in_different_projects() {
        let storage = InMemoryStorage::new();
        let first = storage.append("a", make_issue("first"));

        let mut other = make_issue("other");
        other.id = first.id.clone();
        let stored = storage.append("b", other);
        assert_eq!(stored.id, first.id);
    }

    #[test]
    fn test_projects_are_isolated() {
        let storage = InMemoryStorage::new();
        storage.append("a", make_issue("in a"));
        assert!(storage.list("b", &IssueFilter::new()).is_empty());
        assert_eq!(storage.list("a", &IssueFilter::new()).len(), 1);
    }

    #[test]
    fn test_lookup_materializes_unknown_project() {
        let storage = InMemoryStorage::new();
        assert!(storage.projects().is_empty());

        assert!(storage.get("ghost", "nope").is_none());
        assert!(storage.remove("other", "nope").is_none());
        assert_eq!(storage.projects(), vec!["ghost".to_string(), "other".to_string()]);
    }

    #[test]
    fn test_modify_changes_in_place() {
        let storage = InMemoryStorage::new();
        let issue = storage.append("p", make_issue("before"));
        storage.append("p", make_issue("after"));

        let changed = storage.modify("p", &issue.id, |stored| {
            stored.title = "renamed".to_string();
            stored.title.len()
        });
        assert_eq!(changed, Some(7));

        let issues = storage.list("p", &IssueFilter::new());
        assert_eq!(issues[0].title, "renamed");
        assert_eq!(issues[0].id, issue.id);
        assert_eq!(issues[1].title, "after");
    }

    #[test]
    fn test_modify_missing_issue_returns_none() {
        let storage = InMemoryStorage::new();
        let result = storage.modify("p", "missing", |_| ());
        assert!(result.is_none());
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let storage = InMemoryStorage::new();
        let a = storage.append("p", make_issue("a"));
        let b = storage.append("p", make_issue("b"));
        let c = storage.append("p", make_issue("c"));

        let removed = storage.remove("p", &b.id);
        assert_eq!(removed, Some(b.clone()));
        assert_eq!(storage.list("p", &IssueFilter::new()), vec![a, c]);
        assert!(storage.remove("p", &b.id).is_none());
    }

    #[test]
    fn test_clones_share_data() {
        let storage = InMemoryStorage::new();
        let clone = storage.clone();
        let issue = clone.append("p", make_issue("shared"));
        assert_eq!(storage.get("p", &issue.id), Some(issue));
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        let storage = InMemoryStorage::new();
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let storage = storage.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        storage.append("p", make_issue(&format!("{n}-{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(storage.list("p", &IssueFilter::new()).len(), 200);
    }
}
