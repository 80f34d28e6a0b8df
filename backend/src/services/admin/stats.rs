use crate::auth::require_admin;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};

/// `GET /api/admin/stats`: per-status counts for both moderation queues and
/// the number of published churches.
pub(crate) async fn process(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let result = match require_admin(state.identity.as_ref(), &req) {
        Ok(_) => state.store.stats().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => e.error_response(),
    }
}
