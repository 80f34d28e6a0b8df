//! Schema checks for public payloads.
//!
//! Payloads arrive as raw JSON so that every failing field can be reported
//! at once instead of stopping at the first serde error.

use crate::error::{AppError, FieldError};
use common::model::status::ReviewDecision;
use common::model::submission::NewSubmission;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const REQUIRED: &str = "campo obrigatório";
const NOT_TEXT: &str = "deve ser um texto";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
    })
}

fn required_text(obj: &Map<String, Value>, key: &str, errors: &mut Vec<FieldError>) -> String {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            errors.push(FieldError::new(key, REQUIRED));
            String::new()
        }
        Some(_) => {
            errors.push(FieldError::new(key, NOT_TEXT));
            String::new()
        }
    }
}

fn optional_text(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(Value::Null) | None => None,
        Some(_) => {
            errors.push(FieldError::new(key, NOT_TEXT));
            None
        }
    }
}

/// Validates a structured single-church submission.
///
/// Required: `jurisdiction`, `name`, `address`, `responsibleEmail`. Any
/// `status` present in the payload is ignored.
pub fn validate_submission(payload: &Value) -> Result<NewSubmission, AppError> {
    let Some(obj) = payload.as_object() else {
        return Err(AppError::validation("body", "deve ser um objeto JSON"));
    };

    let mut errors = Vec::new();
    let jurisdiction = required_text(obj, "jurisdiction", &mut errors);
    let name = required_text(obj, "name", &mut errors);
    let address = required_text(obj, "address", &mut errors);
    let responsible_email = required_text(obj, "responsibleEmail", &mut errors);
    if !responsible_email.is_empty() && !email_regex().is_match(&responsible_email) {
        errors.push(FieldError::new("responsibleEmail", "e-mail inválido"));
    }

    let submission = NewSubmission {
        jurisdiction,
        name,
        address,
        schedule: optional_text(obj, "schedule", &mut errors),
        description: optional_text(obj, "description", &mut errors),
        pastors: optional_text(obj, "pastors", &mut errors),
        responsible_email,
        website: optional_text(obj, "website", &mut errors),
        instagram: optional_text(obj, "instagram", &mut errors),
        youtube: optional_text(obj, "youtube", &mut errors),
        spotify: optional_text(obj, "spotify", &mut errors),
    };

    if errors.is_empty() {
        Ok(submission)
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Validates a free-text submission: `{ "bulkData": "<non-empty text>" }`.
pub fn validate_bulk(payload: &Value) -> Result<String, AppError> {
    match payload.get("bulkData") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(AppError::validation("bulkData", REQUIRED))
        }
        Some(_) => Err(AppError::validation("bulkData", NOT_TEXT)),
    }
}

/// Review notes are mandatory when rejecting and optional when approving.
pub fn validate_review_notes(
    decision: ReviewDecision,
    notes: Option<&str>,
) -> Result<Option<String>, AppError> {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
    if decision == ReviewDecision::Reject && notes.is_none() {
        return Err(AppError::validation("review_notes", REQUIRED));
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_names(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(fields) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_minimal_submission() {
        let s = validate_submission(&json!({
            "jurisdiction": "IEAB",
            "name": "Igreja X",
            "address": "Rua Y",
            "responsibleEmail": "a@b.com"
        }))
        .unwrap();
        assert_eq!(s.name, "Igreja X");
        assert_eq!(s.responsible_email, "a@b.com");
        assert_eq!(s.schedule, None);
    }

    #[test]
    fn reports_every_failing_field() {
        let err = validate_submission(&json!({
            "jurisdiction": 7,
            "name": "",
            "responsibleEmail": "not-an-email",
            "website": ["x"]
        }))
        .unwrap_err();
        assert_eq!(
            field_names(err),
            vec!["jurisdiction", "name", "address", "responsibleEmail", "website"]
        );
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let s = validate_submission(&json!({
            "jurisdiction": "IEAB",
            "name": "Catedral",
            "address": "Av. Central, 1",
            "responsibleEmail": "sec@catedral.org",
            "instagram": "   ",
            "pastors": "Rev. Ana, Rev. João",
            "status": "approved"
        }))
        .unwrap();
        assert_eq!(s.instagram, None);
        assert_eq!(s.pastors.as_deref(), Some("Rev. Ana, Rev. João"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(field_names(validate_submission(&json!("hi")).unwrap_err()), vec!["body"]);
    }

    #[test]
    fn bulk_requires_non_empty_text() {
        assert_eq!(
            validate_bulk(&json!({ "bulkData": "Sugestão: incluir 'Eucaristia'" })).unwrap(),
            "Sugestão: incluir 'Eucaristia'"
        );
        assert!(validate_bulk(&json!({ "bulkData": "" })).is_err());
        assert!(validate_bulk(&json!({ "bulkData": 12 })).is_err());
        assert!(validate_bulk(&json!({})).is_err());
    }

    #[test]
    fn reject_requires_notes() {
        assert!(validate_review_notes(ReviewDecision::Reject, None).is_err());
        assert!(validate_review_notes(ReviewDecision::Reject, Some("  ")).is_err());
        assert_eq!(
            validate_review_notes(ReviewDecision::Reject, Some("duplicate")).unwrap(),
            Some("duplicate".to_string())
        );
        assert_eq!(validate_review_notes(ReviewDecision::Approve, None).unwrap(), None);
    }
}
