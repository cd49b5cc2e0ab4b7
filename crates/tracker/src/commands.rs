//! Issue operations.
//!
//! `CommandExecutor` holds the business rules for creating, listing, updating
//! and deleting issues on top of any [`IssueStore`]. Request bodies come in as
//! loosely typed [`Payload`]s and every failure is an [`IssueError`] the caller
//! renders for the client.

use crate::domain::{Issue, IssuePatch, ID};
use crate::errors::{Acknowledgement, IssueError};
use crate::payload::{self, Payload};
use crate::query::IssueFilter;
use crate::storage::IssueStore;
use tracing::debug;

pub type Result<T> = std::result::Result<T, IssueError>;

/// Executes issue operations against a storage backend.
pub struct CommandExecutor<S> {
    storage: S,
}

impl<S: IssueStore> CommandExecutor<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create an issue at the end of the project's list.
    pub fn create_issue(&self, project: &str, body: &Payload) -> Result<Issue> {
        let Some(issue) = Issue::from_payload(body) else {
            debug!(project, "create rejected: required field(s) missing");
            return Err(IssueError::MissingRequiredFields);
        };

        let issue = self.storage.append(project, issue);
        debug!(project, id = %issue.id, "issue created");
        Ok(issue)
    }

    /// List the project's issues matching every filter, oldest first.
    pub fn list_issues(&self, project: &str, filter: &IssueFilter) -> Vec<Issue> {
        let issues = self.storage.list(project, filter);
        debug!(project, count = issues.len(), "issues listed");
        issues
    }

    /// Look up one issue by id.
    #[allow(dead_code)] // Public API used only in tests, not in binary
    pub fn show_issue(&self, project: &str, id: &str) -> Option<Issue> {
        self.storage.get(project, id)
    }

    /// Apply the whitelisted fields of `body` to the issue named by its `_id`.
    ///
    /// Nothing is touched, `updated_on` included, unless at least one field
    /// is effective.
    pub fn update_issue(&self, project: &str, body: &Payload) -> Result<Acknowledgement> {
        let id = required_id(project, body)?;
        let patch = IssuePatch::from_payload(body);

        let applied = self.storage.modify(project, &id, |issue| {
            if !patch.is_effective() {
                return false;
            }
            issue.apply(&patch);
            true
        });

        match applied {
            None => {
                debug!(project, id = %id, "update rejected: issue not found");
                Err(IssueError::UpdateNotFound { id })
            }
            Some(false) => {
                debug!(project, id = %id, "update rejected: no update field(s) sent");
                Err(IssueError::NoUpdateFields { id })
            }
            Some(true) => {
                debug!(project, id = %id, "issue updated");
                Ok(Acknowledgement::updated(id))
            }
        }
    }

    /// Delete the issue named by the body's `_id`.
    pub fn delete_issue(&self, project: &str, body: &Payload) -> Result<Acknowledgement> {
        let id = required_id(project, body)?;

        match self.storage.remove(project, &id) {
            Some(_) => {
                debug!(project, id = %id, "issue deleted");
                Ok(Acknowledgement::deleted(id))
            }
            None => {
                debug!(project, id = %id, "delete rejected: issue not found");
                Err(IssueError::DeleteNotFound { id })
            }
        }
    }
}

fn required_id(project: &str, body: &Payload) -> Result<String> {
    body.get(ID).and_then(payload::truthy_text).ok_or_else(|| {
        debug!(project, "request rejected: missing _id");
        IssueError::MissingId
    })
}
