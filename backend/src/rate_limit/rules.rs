use std::time::Duration;

/// A quota: at most `max_requests` per `window` for one client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub id: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

/// Structured single-church submissions: 5 per 10 minutes.
pub const SUBMISSION: RateLimitRule = RateLimitRule {
    id: "submission",
    max_requests: 5,
    window: Duration::from_secs(10 * 60),
};

/// Free-text submissions: 3 per 10 minutes.
pub const BULK_SUBMISSION: RateLimitRule = RateLimitRule {
    id: "bulk-submission",
    max_requests: 3,
    window: Duration::from_secs(10 * 60),
};

/// Admin writes (approve, reject, patch): 30 per minute.
pub const ADMIN_WRITE: RateLimitRule = RateLimitRule {
    id: "admin-write",
    max_requests: 30,
    window: Duration::from_secs(60),
};
