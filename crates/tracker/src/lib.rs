//! Issue Tracker Library
//!
//! Project-scoped issue records held in memory, with the create/list/update/delete
//! rules used by the REST server. HTTP concerns live in the server crate.

pub mod commands;
pub mod domain;
pub mod errors;
pub mod payload;
pub mod query;
pub mod storage;

// Re-export commonly used types
pub use commands::CommandExecutor;
pub use domain::{Issue, IssuePatch, NewIssue};
pub use errors::{Acknowledgement, ErrorBody, IssueError};
pub use payload::Payload;
pub use query::IssueFilter;
pub use storage::{InMemoryStorage, IssueStore};
