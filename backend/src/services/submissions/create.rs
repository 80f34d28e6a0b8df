//! # Church submission intake
//!
//! `POST /api/submissions`
//!
//! 1. Key the caller (socket peer, or forwarded client behind a trusted proxy)
//!    and charge one request to the `submission` rule.
//! 2. Validate the body, collecting every failing field.
//! 3. Store it as `pending`; any `status` the caller sent is ignored.
//! 4. Answer with the stored record and queue a chat notification.

use crate::state::AppState;
use crate::workflow;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use serde_json::Value;

/// # Arguments
///
/// * `payload` - the submission as loose JSON; field checks live in
///   [`crate::validation`] so every problem is reported at once.
///
/// # Returns
///
/// `200` with the stored submission, or `400` / `429` / `500`.
pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> impl Responder {
    match workflow::submit(&state, &state.client_key(&req), &payload).await {
        Ok(submission) => HttpResponse::Ok().json(submission),
        Err(e) => e.error_response(),
    }
}
