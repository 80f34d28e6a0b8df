pub mod admin;
pub mod submissions;

use crate::error::AppError;
use actix_web::{error, web};

/// JSON extractor settings shared by every JSON endpoint: size limit plus
/// malformed bodies answered with the regular validation error shape.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = match &err {
                error::JsonPayloadError::Overflow { .. }
                | error::JsonPayloadError::OverflowKnownLength { .. } => "corpo muito grande",
                error::JsonPayloadError::ContentType => "use application/json",
                _ => "JSON inválido",
            };
            AppError::validation("body", message).into()
        })
}

/// Registers every API scope on an application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submissions::configure_routes())
        .service(admin::configure_routes());
}
