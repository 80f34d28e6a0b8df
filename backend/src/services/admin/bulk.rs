//! # Bulk submission moderation
//!
//! `GET /api/admin/bulk-submissions?status=` lists free-text submissions,
//! newest first, as `{ "count": n, "bulk_submissions": [...] }`.
//!
//! `PATCH /api/admin/bulk-submissions/{id}` takes `{status?, review_notes?}`:
//!
//! 1. Authenticate the admin.
//! 2. Decode the body.
//! 3. Run [`workflow::patch_bulk_submission`]: a status decides a pending
//!    item, notes alone annotate it. Decided items refuse both with `409`.

use super::parse_body;
use crate::auth::require_admin;
use crate::error::AppResult;
use crate::state::AppState;
use crate::workflow;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::model::submission::BulkSubmission;
use common::requests::{BulkListQuery, BulkPatchRequest};
use serde_json::json;

pub(crate) async fn list(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<BulkListQuery>,
) -> impl Responder {
    match list_bulk(&req, &state, query.into_inner()).await {
        Ok(items) => HttpResponse::Ok().json(json!({
            "count": items.len(),
            "bulk_submissions": items,
        })),
        Err(e) => e.error_response(),
    }
}

async fn list_bulk(
    req: &HttpRequest,
    state: &AppState,
    query: BulkListQuery,
) -> AppResult<Vec<BulkSubmission>> {
    require_admin(state.identity.as_ref(), req)?;
    state.store.list_bulk_submissions(query).await
}

/// Applies an admin patch to one bulk submission.
///
/// # Returns
///
/// The stored item after the patch, `400` for an empty patch or
/// `status: pending`, `404` for an unknown id, `409` once decided.
pub(crate) async fn patch(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    match patch_bulk(&req, &state, id.into_inner(), &body).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => e.error_response(),
    }
}

async fn patch_bulk(
    req: &HttpRequest,
    state: &AppState,
    id: String,
    body: &[u8],
) -> AppResult<BulkSubmission> {
    let admin = require_admin(state.identity.as_ref(), req)?;
    let patch: BulkPatchRequest = parse_body(body)?;
    workflow::patch_bulk_submission(state, &admin, id, patch).await
}
