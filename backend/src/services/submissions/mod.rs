//! Public intake endpoints.
//!
//! - `POST /api/submissions`: a single church. Body fields: `jurisdiction`,
//!   `name`, `address`, `responsibleEmail` (required) and `schedule`,
//!   `description`, `pastors`, `website`, `instagram`, `youtube`, `spotify`.
//! - `POST /api/submissions/bulk`: `{ "bulkData": "<free text>" }`.
//!
//! Both answer `200` with the stored record (status `pending`), `400` on
//! invalid input, `429` when the caller exceeded its quota and `500` when the
//! store fails.

mod create;
mod create_bulk;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/submissions";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/bulk", post().to(create_bulk::process))
}
