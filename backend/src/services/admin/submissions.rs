//! # Submission queue
//!
//! Read side of structured submissions for admins.
//!
//! - `GET /api/admin/submissions?status=&search=` lists newest first. `search`
//!   is a case-insensitive substring of the church name, accents included.
//! - `GET /api/admin/submissions/{id}` returns one submission or `404`.

use crate::auth::require_admin;
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::submission::Submission;
use common::requests::SubmissionListQuery;
use serde_json::json;

/// # Returns
///
/// `{ "count": n, "submissions": [...] }`.
pub(crate) async fn list(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<SubmissionListQuery>,
) -> impl Responder {
    match list_submissions(&req, &state, query.into_inner()).await {
        Ok(submissions) => HttpResponse::Ok().json(json!({
            "count": submissions.len(),
            "submissions": submissions,
        })),
        Err(e) => e.error_response(),
    }
}

async fn list_submissions(
    req: &HttpRequest,
    state: &AppState,
    query: SubmissionListQuery,
) -> AppResult<Vec<Submission>> {
    require_admin(state.identity.as_ref(), req)?;
    state.store.list_submissions(query).await
}

pub(crate) async fn get(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    let result = match require_admin(state.identity.as_ref(), &req) {
        Ok(_) => state.store.get_submission(id.into_inner()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(submission) => HttpResponse::Ok().json(submission),
        Err(e) => e.error_response(),
    }
}
