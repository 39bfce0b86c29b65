use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Warn once when the remaining quota crosses this threshold
const LOW_QUOTA_THRESHOLD: u32 = 5;

/// Passive rate-limit tracker for the GitHub API.
///
/// Updated from `x-ratelimit-*` response headers; observation only. The
/// tracker never delays a request and never retries one.
#[derive(Clone)]
pub struct RateLimitTracker {
    state: Arc<RwLock<RateLimitState>>,
}

#[derive(Debug, Clone)]
struct RateLimitState {
    limit: u32,
    remaining: u32,
    /// Unix timestamp when the quota resets
    reset_at: i64,
}

/// Snapshot of the API quota as last reported by response headers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub resets_at: DateTime<Utc>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RateLimitState {
                limit: 60, // Default for unauthenticated requests
                remaining: 60,
                reset_at: Utc::now().timestamp() + 3600,
            })),
        }
    }

    /// Update the tracked quota from GitHub API response headers
    pub async fn update_from_headers(&self, headers: &reqwest::header::HeaderMap) {
        let mut state = self.state.write().await;
        let before = state.remaining;

        if let Some(limit) = parse_header(headers, "x-ratelimit-limit") {
            state.limit = limit;
        }

        if let Some(remaining) = parse_header(headers, "x-ratelimit-remaining") {
            state.remaining = remaining;
        }

        if let Some(reset) = parse_header(headers, "x-ratelimit-reset") {
            state.reset_at = reset;
        }

        debug!(
            "Rate limit updated: {}/{} (resets at {})",
            state.remaining, state.limit, state.reset_at
        );

        if state.remaining <= LOW_QUOTA_THRESHOLD && before > LOW_QUOTA_THRESHOLD {
            warn!(
                "API quota almost exhausted: {}/{} remaining",
                state.remaining, state.limit
            );
        }
    }

    /// Get the current quota snapshot
    pub async fn status(&self) -> RateLimitStatus {
        let state = self.state.read().await;
        RateLimitStatus {
            limit: state.limit,
            remaining: state.remaining,
            resets_at: DateTime::from_timestamp(state.reset_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

impl Default for RateLimitTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header<T: FromStr>(headers: &reqwest::header::HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}
