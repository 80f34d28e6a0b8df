use crate::auth::require_admin;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use common::requests::AuditListQuery;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 500;

pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<AuditListQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let result = match require_admin(state.identity.as_ref(), &req) {
        Ok(_) => state.store.list_audit(limit).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => e.error_response(),
    }
}
