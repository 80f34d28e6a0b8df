//! `POST /api/submissions/bulk`: free text (`bulkData`) stored untouched as a
//! pending item. Limited by the stricter `bulk-submission` rule.

use crate::state::AppState;
use crate::workflow;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use serde_json::Value;

pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> impl Responder {
    match workflow::submit_bulk(&state, &state.client_key(&req), &payload).await {
        Ok(bulk) => HttpResponse::Ok().json(bulk),
        Err(e) => e.error_response(),
    }
}
