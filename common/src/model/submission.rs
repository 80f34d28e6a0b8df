use crate::model::status::SubmissionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content of a single-church submission after validation.
///
/// Carries no status: whatever the caller sent, the store always inserts
/// new rows as `pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub jurisdiction: String,
    pub name: String,
    pub address: String,
    pub schedule: Option<String>,
    pub description: Option<String>,
    pub pastors: Option<String>,
    pub responsible_email: String,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub spotify: Option<String>,
}

/// A stored row of `church_submissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    #[serde(flatten)]
    pub content: NewSubmission,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

/// A stored row of `bulk_church_submissions`.
///
/// `bulk_data` is whatever the visitor typed: glossary suggestions,
/// feedback, or a list of churches. It is read by a human, never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSubmission {
    pub id: String,
    pub bulk_data: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

/// Per-status counters used by the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationStats {
    pub submissions: StatusCounts,
    pub bulk_submissions: StatusCounts,
    pub churches: u64,
}
