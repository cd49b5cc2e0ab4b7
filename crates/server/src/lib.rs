//! Issue Tracker REST API Server Library
//!
//! Exposes the project-scoped issue store over HTTP under `/api/issues/{project}`.

pub mod config;
pub mod extract;
pub mod routes;

use axum::Router;
use issue_tracker::storage::IssueStore;
use issue_tracker::CommandExecutor;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-export for convenience
pub use config::{Cli, ServerConfig};
pub use routes::create_routes;

/// Build the full application: API routes nested under `/api`, with CORS and
/// request tracing.
pub fn create_app<S: IssueStore + 'static>(executor: Arc<CommandExecutor<S>>) -> Router {
    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", create_routes(executor))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
