//! Moderation pipeline.
//!
//! Intake: rate limit -> validate -> persist (`pending`) -> respond, with the
//! chat notification queued on the side.
//!
//! Review: (admin already authenticated by the handler) -> rate limit on the
//! admin-write rule -> validate notes -> fetch -> require `pending` ->
//! guarded status update -> audit.
//!
//! `pending --approve--> approved` and `pending --reject--> rejected` are the
//! only transitions.

use crate::auth::AdminIdentity;
use crate::error::{AppError, AppResult};
use crate::notifications::EventKind;
use crate::rate_limit::{ADMIN_WRITE, BULK_SUBMISSION, SUBMISSION};
use crate::state::AppState;
use crate::validation::{validate_bulk, validate_review_notes, validate_submission};
use common::model::audit::AuditAction;
use common::model::status::{ReviewDecision, SubmissionStatus};
use common::model::submission::{BulkSubmission, Submission};
use common::requests::BulkPatchRequest;
use log::info;
use serde_json::{json, Value};

pub async fn submit(state: &AppState, client_key: &str, payload: &Value) -> AppResult<Submission> {
    state.limiter.enforce(client_key, &SUBMISSION).await?;
    let new = validate_submission(payload)?;
    let submission = state.store.create_submission(new).await?;
    info!("submission {} queued for moderation", submission.id);

    state
        .relay
        .notify(EventKind::NewSubmission, json!(submission));
    Ok(submission)
}

pub async fn submit_bulk(
    state: &AppState,
    client_key: &str,
    payload: &Value,
) -> AppResult<BulkSubmission> {
    state.limiter.enforce(client_key, &BULK_SUBMISSION).await?;
    let bulk_data = validate_bulk(payload)?;
    let bulk = state.store.create_bulk_submission(bulk_data).await?;
    info!("bulk submission {} queued for moderation", bulk.id);

    state.relay.notify(EventKind::NewBulkSubmission, json!(bulk));
    Ok(bulk)
}

pub async fn review_submission(
    state: &AppState,
    admin: &AdminIdentity,
    id: String,
    decision: ReviewDecision,
    review_notes: Option<&str>,
) -> AppResult<Submission> {
    state.limiter.enforce(&admin.email, &ADMIN_WRITE).await?;
    let notes = validate_review_notes(decision, review_notes)?;

    let current = state.store.get_submission(id.clone()).await?;
    if current.status.is_terminal() {
        return Err(AppError::Conflict {
            current: current.status,
        });
    }

    let updated = state
        .store
        .update_status(id, decision, notes.clone())
        .await?;
    info!(
        "submission {} {} by {}",
        updated.id, updated.status, admin.email
    );

    let action = match decision {
        ReviewDecision::Approve => AuditAction::SubmissionApproved,
        ReviewDecision::Reject => AuditAction::SubmissionRejected,
    };
    state
        .audit
        .log_audit(
            action,
            "church_submission",
            &updated.id,
            &admin.email,
            json!({ "review_notes": notes, "name": updated.content.name }),
        )
        .await;
    Ok(updated)
}

pub async fn patch_bulk_submission(
    state: &AppState,
    admin: &AdminIdentity,
    id: String,
    mut patch: BulkPatchRequest,
) -> AppResult<BulkSubmission> {
    state.limiter.enforce(&admin.email, &ADMIN_WRITE).await?;

    patch.review_notes = patch
        .review_notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    if patch.status.is_none() && patch.review_notes.is_none() {
        return Err(AppError::validation("body", "nada para atualizar"));
    }
    if patch.status == Some(SubmissionStatus::Pending) {
        return Err(AppError::validation("status", "use approved ou rejected"));
    }

    let current = state.store.get_bulk_submission(id.clone()).await?;
    // Decided items are frozen, notes included.
    if current.status.is_terminal() {
        return Err(AppError::Conflict {
            current: current.status,
        });
    }
    let action = match patch.status {
        Some(SubmissionStatus::Rejected) => {
            // Notes written earlier by an annotation count for the rejection.
            let notes = patch.review_notes.as_deref().or(current.review_notes.as_deref());
            validate_review_notes(ReviewDecision::Reject, notes)?;
            AuditAction::BulkSubmissionRejected
        }
        Some(_) => AuditAction::BulkSubmissionApproved,
        None => AuditAction::BulkSubmissionAnnotated,
    };

    let updated = state.store.update_bulk(id, patch).await?;
    info!("bulk submission {} {} by {}", updated.id, action, admin.email);

    state
        .audit
        .log_audit(
            action,
            "bulk_church_submission",
            &updated.id,
            &admin.email,
            json!({ "review_notes": updated.review_notes }),
        )
        .await;
    Ok(updated)
}
