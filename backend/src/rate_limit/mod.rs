//! In-process fixed-window rate limiting.
//!
//! The limiter owns a map from `(client key, rule id)` to a counter and the
//! instant its window opened. It is created once in `main.rs`, shared through
//! `AppState`, and is the only mutable state the server keeps in memory.
//!
//! Check and increment happen under a single lock, so two requests racing on
//! the same key can never both slip past the threshold. A denied request still
//! counts; nothing is rolled back.

mod rules;

pub use rules::{RateLimitRule, ADMIN_WRITE, BULK_SUBMISSION, SUBMISSION};

use crate::error::AppError;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Denied; the current window closes after `retry_after`.
    Deny { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    entries: Arc<Mutex<HashMap<(String, &'static str), RateLimitEntry>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn check(&self, client_key: &str, rule: &RateLimitRule) -> Decision {
        self.check_at(client_key, rule, Instant::now()).await
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub async fn check_at(&self, client_key: &str, rule: &RateLimitRule, now: Instant) -> Decision {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .entry((client_key.to_string(), rule.id))
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        let elapsed = now.saturating_duration_since(entry.window_start);
        if elapsed >= rule.window {
            entry.count = 1;
            entry.window_start = now;
            return Decision::Allow;
        }

        entry.count = entry.count.saturating_add(1);
        if entry.count > rule.max_requests {
            Decision::Deny {
                retry_after: rule.window - elapsed,
            }
        } else {
            Decision::Allow
        }
    }

    /// Checks `rule` for `client_key`, turning a denial into
    /// [`AppError::RateLimited`].
    pub async fn enforce(&self, client_key: &str, rule: &RateLimitRule) -> Result<(), AppError> {
        match self.check(client_key, rule).await {
            Decision::Allow => Ok(()),
            Decision::Deny { retry_after } => {
                warn!("rate limit '{}' exceeded by {}", rule.id, client_key);
                Err(AppError::RateLimited {
                    rule: rule.id,
                    retry_after_secs: retry_after.as_secs().max(1),
                })
            }
        }
    }

    /// Drops entries whose window has closed relative to their own rule.
    pub async fn prune(&self, now: Instant, rules: &[RateLimitRule]) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|(_, rule_id), entry| {
            let window = rules
                .iter()
                .find(|r| r.id == *rule_id)
                .map(|r| r.window)
                .unwrap_or(Duration::ZERO);
            now.saturating_duration_since(entry.window_start) < window
        });
        let removed = before - entries.len();
        if removed > 0 {
            debug!("pruned {} expired rate limit entries", removed);
        }
        removed
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// Periodically prunes expired counters. Spawned once from `main.rs`.
pub async fn start_pruner(limiter: RateLimiter, every: Duration) {
    let rules = [SUBMISSION, BULK_SUBMISSION, ADMIN_WRITE];
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        limiter.prune(Instant::now(), &rules).await;
    }
}
