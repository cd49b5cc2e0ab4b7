//! Storage abstraction for project-partitioned issues.
//!
//! The `IssueStore` trait decouples the command layer from where issues live.
//! Each project holds an ordered sequence of issues (oldest first). Unknown
//! projects are materialized as empty on first access.

use crate::domain::Issue;
use crate::query::IssueFilter;

pub mod memory;

pub use memory::InMemoryStorage;

/// Trait for issue storage backends.
///
/// Every method is a single atomic step: an implementation shared between
/// threads must not let two calls interleave on the same project. Clones
/// share the same underlying data.
///
/// # Examples
///
/// ```
/// use issue_tracker::domain::{Issue, NewIssue};
/// use issue_tracker::query::IssueFilter;
/// use issue_tracker::storage::{InMemoryStorage, IssueStore};
///
/// let storage = InMemoryStorage::new();
/// let issue = storage.append(
///     "apitest",
///     Issue::new(NewIssue {
///         title: "Fix bug".to_string(),
///         text: "Details".to_string(),
///         created_by: "alice".to_string(),
///         assigned_to: String::new(),
///         status_text: String::new(),
///     }),
/// );
///
/// let listed = storage.list("apitest", &IssueFilter::new());
/// assert_eq!(listed, vec![issue]);
/// ```
pub trait IssueStore: Clone + Send + Sync {
    /// Append an issue at the end of the project's sequence.
    ///
    /// If its id is already taken within the project, a fresh one is
    /// assigned first. Returns the issue as stored.
    fn append(&self, project: &str, issue: Issue) -> Issue;

    /// Issues of the project matching the filter, in insertion order.
    fn list(&self, project: &str, filter: &IssueFilter) -> Vec<Issue>;

    /// Look up a single issue.
    fn get(&self, project: &str, id: &str) -> Option<Issue>;

    /// Run `change` against the issue with the given id.
    ///
    /// Returns `None` when no such issue exists.
    fn modify<R, F>(&self, project: &str, id: &str, change: F) -> Option<R>
    where
        F: FnOnce(&mut Issue) -> R;

    /// Remove an issue, keeping the order of the rest.
    fn remove(&self, project: &str, id: &str) -> Option<Issue>;

    /// Names of all materialized projects, sorted.
    #[allow(dead_code)] // Public API used only in tests, not in binary
    fn projects(&self) -> Vec<String>;
}
