use crate::model::submission::NewSubmission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published directory entry, created when a submission is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Church {
    pub id: String,
    pub submission_id: Option<String>,
    #[serde(flatten)]
    pub details: NewSubmission,
    pub created_at: DateTime<Utc>,
}
