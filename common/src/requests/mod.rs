use crate::model::status::SubmissionStatus;
use serde::Deserialize;

/// Body of `POST /api/admin/submissions/{id}/approve` and `/reject`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub review_notes: Option<String>,
}

/// Body of `PATCH /api/admin/bulk-submissions/{id}`. Both fields are optional;
/// a notes-only patch annotates the item without deciding it.
#[derive(Debug, Default, Deserialize)]
pub struct BulkPatchRequest {
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
    #[serde(default)]
    pub review_notes: Option<String>,
}

/// Query string of the admin submission listing.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListQuery {
    pub status: Option<SubmissionStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkListQuery {
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditListQuery {
    pub limit: Option<u32>,
}
