//! Request body extraction.
//!
//! Issue requests may carry JSON or HTML form bodies. Either way the handler
//! sees a [`Payload`]; a body that is missing or unreadable becomes an empty
//! payload so the operation can answer with its own validation error.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use issue_tracker::payload::{self, Payload};
use std::convert::Infallible;

/// A JSON or form-encoded request body
#[derive(Debug, Clone, Default)]
pub struct IssueBody(pub Payload);

#[async_trait]
impl<S> FromRequest<S> for IssueBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let body = if is_form {
            match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => payload::from_pairs(pairs),
                Err(rejection) => {
                    tracing::debug!("Ignoring unreadable form body: {}", rejection);
                    Payload::new()
                }
            }
        } else {
            match Json::<Payload>::from_request(req, state).await {
                Ok(Json(body)) => body,
                Err(rejection) => {
                    tracing::debug!("Ignoring unreadable JSON body: {}", rejection);
                    Payload::new()
                }
            }
        };

        Ok(IssueBody(body))
    }
}
