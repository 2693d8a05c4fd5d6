//! Per-client fixed-window rate limiting.
//!
//! Each [`ClientKey`] owns one [`RateBucket`]. The first request of a window
//! opens the bucket with `count = 1`; later requests increment it until
//! `max_requests` is reached, after which requests are denied until the
//! window closes and the bucket is replaced wholesale.
//!
//! Buckets live in a `DashMap`. The whole read-modify-write happens under the
//! entry's shard guard and never across an `.await`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use folio_types::config::RateLimitConfig;

use crate::clock::Clock;

/// Identity a rate bucket is keyed by: request host plus the best available
/// client identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

/// Raw identity hints pulled from an inbound request.
#[derive(Debug, Clone, Default)]
pub struct ClientHints {
    pub host: Option<String>,
    pub session_id: Option<String>,
    pub forwarded_for: Option<String>,
    pub cf_connecting_ip: Option<String>,
    pub real_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientKey {
    /// Derive a key from request hints.
    ///
    /// Identity priority: session id, then the first forwarded IP header that
    /// is present (`x-forwarded-for`, `cf-connecting-ip`, `x-real-ip`; first
    /// comma-separated entry), then the user agent. The host is prepended so
    /// tenants sharing a process never share buckets.
    pub fn derive(hints: &ClientHints) -> Self {
        let ip = [
            hints.forwarded_for.as_deref(),
            hints.cf_connecting_ip.as_deref(),
            hints.real_ip.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

        let identity = non_empty(hints.session_id.as_deref())
            .or(ip)
            .or(non_empty(hints.user_agent.as_deref()));

        let parts: Vec<&str> = [non_empty(hints.host.as_deref()), identity]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            Self("anonymous".to_string())
        } else {
            Self(parts.join(":"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Request counter for one client within the current window.
#[derive(Debug, Clone, Copy)]
pub struct RateBucket {
    pub count: u32,
    pub reset_at: Instant,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Denied { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Fixed-window rate limiter keyed by [`ClientKey`].
pub struct RateLimiter {
    buckets: DashMap<ClientKey, RateBucket>,
    window: Duration,
    max_requests: u32,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: DashMap::new(),
            window,
            max_requests,
            clock,
        }
    }

    pub fn from_config(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Duration::from_secs(config.window_secs),
            config.max_requests,
            clock,
        )
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count a request against `key` and decide whether it may proceed.
    pub fn check(&self, key: &ClientKey) -> RateDecision {
        let now = self.clock.now();
        let mut bucket = self.buckets.entry(key.clone()).or_insert(RateBucket {
            count: 0,
            reset_at: now,
        });

        if now >= bucket.reset_at {
            *bucket = RateBucket {
                count: 1,
                reset_at: now + self.window,
            };
            return RateDecision::Allowed {
                remaining: self.max_requests.saturating_sub(1),
            };
        }

        if bucket.count < self.max_requests {
            bucket.count += 1;
            return RateDecision::Allowed {
                remaining: self.max_requests - bucket.count,
            };
        }

        let left = bucket.reset_at - now;
        let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        RateDecision::Denied {
            retry_after_secs: secs.max(1),
        }
    }

    /// Current counter for `key`, if it has a bucket.
    pub fn bucket(&self, key: &ClientKey) -> Option<RateBucket> {
        self.buckets.get(key).map(|b| *b)
    }

    /// Drop buckets whose window has closed. Returns how many were removed.
    ///
    /// An expired bucket would be replaced on its next request anyway, so
    /// pruning never changes a decision.
    pub fn prune(&self) -> usize {
        let now = self.clock.now();
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| now < bucket.reset_at);
        before.saturating_sub(self.buckets.len())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
