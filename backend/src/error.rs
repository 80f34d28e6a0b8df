//! Error taxonomy of the moderation backend and its HTTP mapping.
//!
//! Public callers get short Portuguese messages. Store failures are logged
//! in full (with e-mail addresses redacted) and answered with a generic
//! message. Notification failures never reach this type.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use common::model::status::SubmissionStatus;
use log::error;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// One failing input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("caller is not an authenticated admin")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("submission already {current}")]
    Conflict { current: SubmissionStatus },

    #[error("rate limit '{rule}' exceeded, retry in {retry_after_secs}s")]
    RateLimited {
        rule: &'static str,
        retry_after_secs: u64,
    },

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Dados inválidos.".to_string(),
            Self::Unauthorized => "Acesso não autorizado.".to_string(),
            Self::NotFound(what) => format!("{} não encontrado.", what),
            Self::Conflict { current } => {
                format!("Este envio já foi revisado (status atual: {}).", current)
            }
            Self::RateLimited { retry_after_secs, .. } => format!(
                "Muitas solicitações. Tente novamente em {} minuto(s).",
                retry_after_secs.div_ceil(60).max(1)
            ),
            Self::Persistence(_) => "Erro interno. Tente novamente mais tarde.".to_string(),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        Self::Persistence(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "error": self.error_code(),
            "message": self.user_message(),
        });

        let mut builder = HttpResponse::build(self.status_code());
        match self {
            Self::Validation(fields) => body["fields"] = json!(fields),
            Self::Conflict { current } => body["current_status"] = json!(current),
            Self::RateLimited {
                retry_after_secs, ..
            } => {
                builder.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
            }
            Self::Persistence(detail) => {
                error!("persistence failure: {}", redact(detail));
            }
            _ => {}
        }
        builder.json(body)
    }
}

/// Masks e-mail addresses before a message goes to the operational log.
pub fn redact(message: &str) -> String {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid regex")
    });
    re.replace_all(message, "[redacted]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_email_addresses() {
        let msg = "UNIQUE constraint failed for pastor@igreja.org.br in row 3";
        assert_eq!(redact(msg), "UNIQUE constraint failed for [redacted] in row 3");
    }

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::validation("name", "x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Conflict {
                current: SubmissionStatus::Rejected
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::RateLimited {
                rule: "bulk-submission",
                retry_after_secs: 30
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Persistence("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rate_limited_response_carries_retry_after() {
        let resp = AppError::RateLimited {
            rule: "submission",
            retry_after_secs: 42,
        }
        .error_response();
        assert_eq!(
            resp.headers().get(header::RETRY_AFTER).unwrap().to_str().unwrap(),
            "42"
        );
    }

    #[test]
    fn persistence_message_hides_detail() {
        let err = AppError::Persistence("no such table: church_submissions".into());
        assert!(!err.user_message().contains("church_submissions"));
    }
}
