//! Per-client admission control for submissions, logins and AI generation.
//!
//! Each action class gets its own [`RateLimiter`] holding one
//! [`RateRecord`] per client key. A client is limited once its count reaches
//! the policy maximum inside a rolling window; the window restarts after
//! `window` passes with no further recorded action.
//!
//! # Flow
//!
//! ```text
//! is_limited(key)  → reject with 429 when true
//! ...perform the action...
//! record_action(key) → only after the action succeeded
//! ```
//!
//! # Scope
//!
//! Tables are process-local. Two replicas behind a load balancer each keep
//! their own counts, so a client can reach `max_count` on every replica.
//! The limiter is abuse prevention, not a quota guarantee.
//!
//! # Example
//!
//! ```
//! use ceo_portal::limiter::{LimitPolicy, RateLimiter};
//!
//! let limiter = RateLimiter::new("submission", LimitPolicy::SUBMISSION);
//! for _ in 0..3 {
//!     assert!(!limiter.is_limited("203.0.113.7"));
//!     limiter.record_action("203.0.113.7");
//! }
//! assert!(limiter.is_limited("203.0.113.7"));
//! ```

mod clock;
mod store;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{MemoryRateStore, RateStore};
pub use sweeper::Sweeper;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Count allowed per rolling window for one action class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    /// Actions allowed per window.
    pub max_count: u32,
    /// Idle time after which a client's count resets.
    pub window: Duration,
}

impl LimitPolicy {
    /// Public registration and participation forms: 3 per hour.
    pub const SUBMISSION: Self = Self::new(3, Duration::from_secs(60 * 60));

    /// Failed admin logins: 5 per 15 minutes.
    pub const LOGIN: Self = Self::new(5, Duration::from_secs(15 * 60));

    /// AI content generation: 10 per hour.
    pub const GENERATION: Self = Self::new(10, Duration::from_secs(60 * 60));

    /// Build a policy.
    #[must_use]
    pub const fn new(max_count: u32, window: Duration) -> Self {
        Self { max_count, window }
    }
}

/// Count and last activity for one client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    /// Actions recorded in the current window.
    pub count: u32,
    /// Instant of the most recent recorded action.
    pub last_activity: Instant,
}

impl RateRecord {
    /// Whether more than `window` has passed since the last action.
    #[must_use]
    pub fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.last_activity) > window
    }
}

/// Rate limiter for a single action class.
pub struct RateLimiter {
    name: &'static str,
    policy: LimitPolicy,
    store: Arc<dyn RateStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("tracked", &self.store.len())
            .finish()
    }
}

impl RateLimiter {
    /// Limiter on an in-memory store and the system clock.
    #[must_use]
    pub fn new(name: &'static str, policy: LimitPolicy) -> Self {
        Self::with_parts(
            name,
            policy,
            Arc::new(MemoryRateStore::new()),
            Arc::new(SystemClock),
        )
    }

    /// Limiter on an explicit store and clock.
    #[must_use]
    pub fn with_parts(
        name: &'static str,
        policy: LimitPolicy,
        store: Arc<dyn RateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name,
            policy,
            store,
            clock,
        }
    }

    /// Action class name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Policy this limiter enforces.
    #[must_use]
    pub const fn policy(&self) -> LimitPolicy {
        self.policy
    }

    /// Whether `key` has used up its window.
    ///
    /// An expired record is deleted here and the call returns false. The
    /// count is never incremented by this check.
    pub fn is_limited(&self, key: &str) -> bool {
        let now = self.clock.now();
        let window = self.policy.window;

        if self.store.remove_if(key, &|record| record.is_expired(now, window)) {
            return false;
        }
        let Some(record) = self.store.get(key) else {
            return false;
        };

        let limited = record.count >= self.policy.max_count;
        if limited {
            debug!(limiter = self.name, key, count = record.count, "Client is rate limited");
        }
        limited
    }

    /// Count one completed action for `key`.
    ///
    /// Starts a fresh window when no live record exists.
    pub fn record_action(&self, key: &str) {
        let now = self.clock.now();
        let window = self.policy.window;

        self.store.update(key, &mut |existing| match existing {
            Some(record) if !record.is_expired(now, window) => RateRecord {
                count: record.count.saturating_add(1),
                last_activity: now,
            },
            _ => RateRecord {
                count: 1,
                last_activity: now,
            },
        });
    }

    /// Forget `key` entirely.
    pub fn clear(&self, key: &str) {
        self.store.delete(key);
    }

    /// Drop every expired record. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let window = self.policy.window;
        self.store.sweep(&|record| record.is_expired(now, window))
    }

    /// Number of client keys currently tracked.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.store.len()
    }
}

/// The limiters the portal runs, one per action class.
#[derive(Debug, Clone)]
pub struct Limiters {
    /// Registration form submissions.
    pub submission: Arc<RateLimiter>,
    /// Participation form submissions.
    pub participation: Arc<RateLimiter>,
    /// Failed admin logins.
    pub login: Arc<RateLimiter>,
    /// AI content generation.
    pub generation: Arc<RateLimiter>,
}

impl Limiters {
    /// Limiters with the standard policies on the system clock.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Limiters with the standard policies sharing `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let build = |name, policy| {
            Arc::new(RateLimiter::with_parts(
                name,
                policy,
                Arc::new(MemoryRateStore::new()),
                Arc::clone(&clock),
            ))
        };

        Self {
            submission: build("submission", LimitPolicy::SUBMISSION),
            participation: build("participation", LimitPolicy::SUBMISSION),
            login: build("login", LimitPolicy::LOGIN),
            generation: build("generation", LimitPolicy::GENERATION),
        }
    }

    /// All limiters, for the sweeper.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<RateLimiter>> {
        vec![
            Arc::clone(&self.submission),
            Arc::clone(&self.participation),
            Arc::clone(&self.login),
            Arc::clone(&self.generation),
        ]
    }
}
