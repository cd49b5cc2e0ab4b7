//! Issue operation outcomes as clients see them.
//!
//! Failures are ordinary answers here, not faults: each [`IssueError`] renders
//! to an `{"error": ..., "_id": ...}` body and each success to
//! `{"result": ..., "_id": ...}`.

use serde::Serialize;
use thiserror::Error;

/// Errors returned by issue operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueError {
    /// Title, text or reporter absent on create
    #[error("required field(s) missing")]
    MissingRequiredFields,
    /// No `_id` on update or delete
    #[error("missing _id")]
    MissingId,
    /// Update carried no effective field
    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },
    #[error("could not update")]
    UpdateNotFound { id: String },
    #[error("could not delete")]
    DeleteNotFound { id: String },
}

impl IssueError {
    /// Issue id the error refers to, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            IssueError::MissingRequiredFields | IssueError::MissingId => None,
            IssueError::NoUpdateFields { id }
            | IssueError::UpdateNotFound { id }
            | IssueError::DeleteNotFound { id } => Some(id),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            id: self.id().map(str::to_string),
        }
    }
}

/// JSON body of a failed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// JSON body of a successful update or delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl Acknowledgement {
    pub fn updated(id: impl Into<String>) -> Self {
        Self {
            result: "successfully updated".to_string(),
            id: id.into(),
        }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            result: "successfully deleted".to_string(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_bodies() {
        assert_eq!(
            serde_json::to_value(IssueError::MissingRequiredFields.body()).unwrap(),
            json!({ "error": "required field(s) missing" })
        );
        assert_eq!(
            serde_json::to_value(IssueError::MissingId.body()).unwrap(),
            json!({ "error": "missing _id" })
        );
        assert_eq!(
            serde_json::to_value(IssueError::NoUpdateFields { id: "a1".into() }.body()).unwrap(),
            json!({ "error": "no update field(s) sent", "_id": "a1" })
        );
        assert_eq!(
            serde_json::to_value(IssueError::UpdateNotFound { id: "a1".into() }.body()).unwrap(),
            json!({ "error": "could not update", "_id": "a1" })
        );
        assert_eq!(
            serde_json::to_value(IssueError::DeleteNotFound { id: "a1".into() }.body()).unwrap(),
            json!({ "error": "could not delete", "_id": "a1" })
        );
    }

    #[test]
    fn test_acknowledgements() {
        assert_eq!(
            serde_json::to_value(Acknowledgement::updated("x")).unwrap(),
            json!({ "result": "successfully updated", "_id": "x" })
        );
        assert_eq!(
            serde_json::to_value(Acknowledgement::deleted("x")).unwrap(),
            json!({ "result": "successfully deleted", "_id": "x" })
        );
    }
}
