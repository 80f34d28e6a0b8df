//! Admin-only endpoints under `/api/admin`.
//!
//! Every handler first asks the identity provider whether the caller is an
//! authenticated admin (`Authorization: Bearer <token>`) and answers `401`
//! otherwise. Handlers with a body read it as raw bytes and decode it with
//! [`parse_body`] only after that check, so an anonymous caller never learns
//! anything about payload validation.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /submissions?status=&search=` | `submissions::list` |
//! | `GET /submissions/{id}` | `submissions::get` |
//! | `POST /submissions/{id}/approve` | `review::approve` |
//! | `POST /submissions/{id}/reject` | `review::reject` |
//! | `GET /bulk-submissions?status=` | `bulk::list` |
//! | `PATCH /bulk-submissions/{id}` | `bulk::patch` |
//! | `GET /stats` | `stats::process` |
//! | `GET /audit-logs?limit=` | `audit_logs::process` |
//! | `GET /churches/export` | `export::process` |

mod audit_logs;
mod bulk;
mod export;
mod review;
mod stats;
mod submissions;

use crate::error::{AppError, AppResult};
use actix_web::web::{get, patch, post, scope};
use actix_web::Scope;
use serde::de::DeserializeOwned;

const API_PATH: &str = "/api/admin";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/submissions", get().to(submissions::list))
        .route("/submissions/{id}", get().to(submissions::get))
        .route("/submissions/{id}/approve", post().to(review::approve))
        .route("/submissions/{id}/reject", post().to(review::reject))
        .route("/bulk-submissions", get().to(bulk::list))
        .route("/bulk-submissions/{id}", patch().to(bulk::patch))
        .route("/stats", get().to(stats::process))
        .route("/audit-logs", get().to(audit_logs::process))
        .route("/churches/export", get().to(export::process))
}

/// Decodes a JSON body. Empty or blank bodies become `T::default()`.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|_| AppError::validation("body", "JSON inválido"))
}
