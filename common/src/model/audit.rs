use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative actions recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    SubmissionApproved,
    SubmissionRejected,
    BulkSubmissionApproved,
    BulkSubmissionRejected,
    BulkSubmissionAnnotated,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmissionApproved => "submission-approved",
            Self::SubmissionRejected => "submission-rejected",
            Self::BulkSubmissionApproved => "bulk-submission-approved",
            Self::BulkSubmissionRejected => "bulk-submission-rejected",
            Self::BulkSubmissionAnnotated => "bulk-submission-annotated",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable entry of `audit_logs`. Rows are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub actor_email: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
