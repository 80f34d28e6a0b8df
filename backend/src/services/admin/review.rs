//! # Review handlers
//!
//! `POST /api/admin/submissions/{id}/approve` and `/reject`.
//!
//! Both handlers follow the same order:
//!
//! 1. Resolve the admin from the bearer token (401 otherwise).
//! 2. Parse the body as a [`ReviewRequest`]. An empty body counts as `{}`;
//!    anything else that is not valid JSON is a 400 and nothing is written.
//! 3. Hand off to [`workflow::review_submission`], which rate-limits,
//!    validates the notes and performs the guarded transition.
//!
//! The body is read as raw bytes so that authentication always happens
//! before the payload is inspected.

use super::parse_body;
use crate::auth::require_admin;
use crate::error::AppResult;
use crate::state::AppState;
use crate::workflow;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::status::ReviewDecision;
use common::model::submission::Submission;
use common::requests::ReviewRequest;

/// Approves a pending submission and publishes it to the directory.
///
/// # Arguments
///
/// * `body` - optional `{"review_notes": "..."}`.
///
/// # Returns
///
/// The updated submission, or 401 / 400 / 404 / 409 / 429.
pub(crate) async fn approve(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    respond(review(&req, &state, id.into_inner(), ReviewDecision::Approve, &body).await)
}

/// Rejects a pending submission. `review_notes` is mandatory.
pub(crate) async fn reject(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    respond(review(&req, &state, id.into_inner(), ReviewDecision::Reject, &body).await)
}

fn respond(result: AppResult<Submission>) -> HttpResponse {
    match result {
        Ok(submission) => HttpResponse::Ok().json(submission),
        Err(e) => e.error_response(),
    }
}

async fn review(
    req: &HttpRequest,
    state: &AppState,
    id: String,
    decision: ReviewDecision,
    body: &[u8],
) -> AppResult<Submission> {
    let admin = require_admin(state.identity.as_ref(), req)?;
    let body: ReviewRequest = parse_body(body)?;
    workflow::review_submission(state, &admin, id, decision, body.review_notes.as_deref()).await
}

#[cfg(test)]
mod tests {
    use super::parse_body;
    use common::requests::ReviewRequest;

    #[test]
    fn empty_body_means_no_notes() {
        let empty: ReviewRequest = parse_body(b"").unwrap();
        assert!(empty.review_notes.is_none());
        let blank: ReviewRequest = parse_body(b" \n").unwrap();
        assert!(blank.review_notes.is_none());
    }

    #[test]
    fn malformed_body_is_refused() {
        assert!(parse_body::<ReviewRequest>(b"{\"review_notes\": ").is_err());
        assert!(parse_body::<ReviewRequest>(b"[1, 2]").is_err());
    }
}
