//! Append-only record of administrative actions.
//!
//! Logging happens after the status transition has committed. A failure here
//! is reported to the operational log and swallowed: the transition stays the
//! source of truth.

use crate::error::redact;
use crate::store::Store;
use chrono::Utc;
use common::model::audit::{AuditAction, AuditRecord};
use log::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuditLogger {
    store: Store,
}

impl AuditLogger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn log_audit(
        &self,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        actor_email: &str,
        metadata: serde_json::Value,
    ) {
        let record = AuditRecord {
            id: Uuid::new_v4().to_string(),
            action: action.as_str().to_string(),
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            actor_email: actor_email.to_string(),
            metadata,
            created_at: Utc::now(),
        };

        match self.store.insert_audit(record).await {
            Ok(()) => info!("audit: {} {} {}", action, resource_type, resource_id),
            Err(e) => error!(
                "audit write failed for {} on {} {}: {}",
                action,
                resource_type,
                resource_id,
                redact(&e.to_string())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[actix_web::test]
    async fn appends_record_with_actor_and_metadata() {
        let store = Store::open_in_memory().unwrap();
        let logger = AuditLogger::new(store.clone());
        logger
            .log_audit(
                AuditAction::SubmissionRejected,
                "church_submission",
                "s-1",
                "admin@ieab.org",
                json!({ "review_notes": "duplicate" }),
            )
            .await;

        let records = store.list_audit(10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "submission-rejected");
        assert_eq!(records[0].actor_email, "admin@ieab.org");
        assert_eq!(records[0].resource_id, "s-1");
        assert_eq!(records[0].metadata, json!({ "review_notes": "duplicate" }));
    }
}
