//! Fixed-window request rate limiting.
//!
//! Counters live in a sharded concurrent map keyed by `(client identity,
//! policy)`. Windows are aligned to wall-clock boundaries: the window for
//! an instant is `now / window length`, so every identity's counter resets
//! at the same epoch-aligned instants. These counters are the only shared
//! mutable state in the process; `DashMap` gives each key's updates
//! exclusive access through its shard lock, so two requests from the same
//! identity can never both observe the pre-increment count.
//!
//! Stale entries are swept inline every [`PURGE_EVERY`] admissions instead
//! of from a background task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

/// Admissions between two inline sweeps of expired windows.
const PURGE_EVERY: u64 = 4096;

/// A named quota over a fixed time window.
#[derive(Debug, Clone, Copy)]
pub struct RatePolicy {
    pub name: &'static str,
    pub quota: u32,
    pub window: Duration,
}

impl RatePolicy {
    pub const fn new(name: &'static str, quota: u32, window: Duration) -> Self {
        Self {
            name,
            quota,
            window,
        }
    }
}

/// The policies enforced by the HTTP layer.
///
/// `global` covers every inbound request and is always evaluated before
/// the stricter `shorten` policy on the shortening route.
#[derive(Debug, Clone, Copy)]
pub struct RatePolicies {
    pub global: RatePolicy,
    pub shorten: RatePolicy,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request admitted; `remaining` requests left in the current window.
    Allowed { remaining: u32 },
    /// Quota exhausted until the window rolls over.
    Rejected { retry_after: Duration },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

#[derive(Debug)]
struct WindowSlot {
    reset_at_ms: u64,
    count: u32,
}

/// Fixed-window counters keyed by `(identity, policy name)`.
pub struct RateLimiter {
    windows: DashMap<(String, &'static str), WindowSlot>,
    admissions: AtomicU64,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
            admissions: AtomicU64::new(0),
        }
    }

    /// Counts a request from `identity` against `policy`.
    ///
    /// Only admitted requests consume quota; rejections leave the counter
    /// untouched.
    pub fn admit(&self, identity: &str, policy: &RatePolicy) -> Decision {
        self.admit_at(identity, policy, SystemTime::now())
    }

    /// Admission check against an explicit clock, for tests and callers
    /// that batch a timestamp across several policies.
    pub fn admit_at(&self, identity: &str, policy: &RatePolicy, now: SystemTime) -> Decision {
        let now_ms = epoch_ms(now);
        let window_ms = policy.window.as_millis().max(1) as u64;

        let decision = {
            let mut slot = self
                .windows
                .entry((identity.to_owned(), policy.name))
                .or_insert_with(|| WindowSlot {
                    reset_at_ms: window_end(now_ms, window_ms),
                    count: 0,
                });

            if now_ms >= slot.reset_at_ms {
                slot.reset_at_ms = window_end(now_ms, window_ms);
                slot.count = 0;
            }

            if slot.count >= policy.quota {
                Decision::Rejected {
                    retry_after: Duration::from_millis(slot.reset_at_ms - now_ms),
                }
            } else {
                slot.count += 1;
                Decision::Allowed {
                    remaining: policy.quota - slot.count,
                }
            }
        };

        let admissions = self.admissions.fetch_add(1, Ordering::Relaxed);
        if admissions % PURGE_EVERY == PURGE_EVERY - 1 {
            self.purge_expired(now);
        }

        decision
    }

    /// Drops every window that has already rolled over.
    pub fn purge_expired(&self, now: SystemTime) {
        let now_ms = epoch_ms(now);
        self.windows.retain(|_, slot| slot.reset_at_ms > now_ms);
    }

    /// Number of live `(identity, policy)` windows.
    pub fn tracked_windows(&self) -> usize {
        self.windows.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn epoch_ms(now: SystemTime) -> u64 {
    // A clock before the epoch degrades to the first window.
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn window_end(now_ms: u64, window_ms: u64) -> u64 {
    (now_ms / window_ms + 1) * window_ms
}
