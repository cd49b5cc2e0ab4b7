//! API route definitions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;

use issue_tracker::commands::CommandExecutor;
use issue_tracker::errors::{Acknowledgement, IssueError};
use issue_tracker::query::IssueFilter;
use issue_tracker::storage::IssueStore;
use issue_tracker::Issue;

use crate::extract::IssueBody;

/// Shared application state
pub type AppState<S> = Arc<CommandExecutor<S>>;

/// Issue operation failure.
///
/// Answers `200 OK` like a success; clients tell the two apart by the
/// `error` key in the body.
#[derive(Debug)]
pub struct ApiError(pub IssueError);

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0.body())).into_response()
    }
}

/// Create API routes
pub fn create_routes<S: IssueStore + 'static>(executor: Arc<CommandExecutor<S>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/issues/:project",
            get(list_issues::<S>)
                .post(create_issue::<S>)
                .put(update_issue::<S>)
                .delete(delete_issue::<S>),
        )
        .with_state(executor)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "issue-tracker",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List a project's issues, filtered by the query string
async fn list_issues<S: IssueStore>(
    Path(project): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(executor): State<AppState<S>>,
) -> Json<Vec<Issue>> {
    let filter: IssueFilter = params.into_iter().collect();
    Json(executor.list_issues(&project, &filter))
}

/// Create an issue
async fn create_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(executor): State<AppState<S>>,
    IssueBody(body): IssueBody,
) -> Result<Json<Issue>, ApiError> {
    Ok(Json(executor.create_issue(&project, &body)?))
}

/// Partially update an issue
async fn update_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(executor): State<AppState<S>>,
    IssueBody(body): IssueBody,
) -> Result<Json<Acknowledgement>, ApiError> {
    Ok(Json(executor.update_issue(&project, &body)?))
}

/// Delete an issue
async fn delete_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(executor): State<AppState<S>>,
    IssueBody(body): IssueBody,
) -> Result<Json<Acknowledgement>, ApiError> {
    Ok(Json(executor.delete_issue(&project, &body)?))
}
