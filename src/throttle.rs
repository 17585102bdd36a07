//! In-process throttling - the per-action cooldown gate and a
//! sliding-window rate limiter.
//!
//! Both structures live in bot-process memory only and are lost on restart;
//! the intervals they guard are short enough that this is acceptable (the
//! 24h daily gate is persisted on the member row instead). All gates are
//! swept on one uniform timer so no map outlives its active users.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Prevents a user from repeating an action more often than a fixed
/// interval. Holds a mapping from user id to the timestamp after which the
/// action becomes available again.
#[derive(Debug, Default)]
pub struct CooldownGate {
    deadlines: Mutex<HashMap<i64, DateTime<Utc>>>,
}

impl CooldownGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits the user if their cooldown has expired, setting the next
    /// deadline to `now + interval`. Rejections return the remaining wait
    /// and leave the stored deadline untouched.
    ///
    /// # Errors
    /// Returns the remaining wait when the user is still cooling down.
    pub fn check_and_set(&self, user_id: i64, interval: Duration) -> Result<(), Duration> {
        self.check_and_set_at(user_id, interval, Utc::now())
    }

    /// Clock-injected variant of [`Self::check_and_set`] for tests.
    ///
    /// # Errors
    /// Returns the remaining wait when the user is still cooling down.
    pub fn check_and_set_at(
        &self,
        user_id: i64,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> Result<(), Duration> {
        let mut deadlines = self.deadlines.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(deadline) = deadlines.get(&user_id) {
            if *deadline > now {
                return Err(*deadline - now);
            }
        }

        deadlines.insert(user_id, now + interval);
        Ok(())
    }

    /// Evicts entries whose deadline has passed.
    pub fn sweep(&self) {
        self.sweep_at(Utc::now());
    }

    /// Clock-injected variant of [`Self::sweep`] for tests.
    pub fn sweep_at(&self, now: DateTime<Utc>) {
        self.deadlines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, deadline| *deadline > now);
    }

    /// Number of tracked users (expired entries included until swept).
    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the gate is tracking no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sliding-window request counter used as a spam brake in front of
/// expensive handlers. Each check prunes the user's window before counting.
#[derive(Debug, Default)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<i64, Vec<DateTime<Utc>>>>,
}

impl RateLimiter {
    /// Creates an empty limiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records the request if the user has made fewer than
    /// `max_requests` requests inside the window; returns false otherwise.
    pub fn check(&self, user_id: i64, max_requests: usize, window: Duration) -> bool {
        self.check_at(user_id, max_requests, window, Utc::now())
    }

    /// Clock-injected variant of [`Self::check`] for tests.
    pub fn check_at(
        &self,
        user_id: i64,
        max_requests: usize,
        window: Duration,
        now: DateTime<Utc>,
    ) -> bool {
        let cutoff = now - window;
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);

        let bucket = buckets.entry(user_id).or_default();
        bucket.retain(|stamp| *stamp > cutoff);

        if bucket.len() >= max_requests {
            return false;
        }

        bucket.push(now);
        true
    }

    /// Drops buckets with no requests inside the window.
    pub fn sweep(&self, window: Duration) {
        self.sweep_at(window, Utc::now());
    }

    /// Clock-injected variant of [`Self::sweep`] for tests.
    pub fn sweep_at(&self, window: Duration, now: DateTime<Utc>) {
        let cutoff = now - window;
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, bucket| bucket.iter().any(|stamp| *stamp > cutoff));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_gate_accepts_then_rejects() {
        let gate = CooldownGate::new();
        let now = Utc::now();
        let interval = Duration::minutes(20);

        assert!(gate.check_and_set_at(42, interval, now).is_ok());

        let remaining = gate
            .check_and_set_at(42, interval, now + Duration::minutes(5))
            .expect_err("second attempt inside the interval must be rejected");
        assert_eq!(remaining, Duration::minutes(15));
    }

    #[test]
    fn test_cooldown_gate_readmits_after_expiry() {
        let gate = CooldownGate::new();
        let now = Utc::now();
        let interval = Duration::hours(1);

        assert!(gate.check_and_set_at(42, interval, now).is_ok());
        assert!(
            gate.check_and_set_at(42, interval, now + Duration::hours(1))
                .is_ok()
        );
    }

    #[test]
    fn test_cooldown_gate_rejection_keeps_deadline() {
        let gate = CooldownGate::new();
        let now = Utc::now();
        let interval = Duration::hours(1);

        assert!(gate.check_and_set_at(42, interval, now).is_ok());
        // A rejected attempt must not push the deadline further out
        let _ = gate.check_and_set_at(42, interval, now + Duration::minutes(30));
        assert!(
            gate.check_and_set_at(42, interval, now + Duration::hours(1))
                .is_ok()
        );
    }

    #[test]
    fn test_cooldown_gate_is_per_user() {
        let gate = CooldownGate::new();
        let now = Utc::now();
        let interval = Duration::hours(1);

        assert!(gate.check_and_set_at(1, interval, now).is_ok());
        assert!(gate.check_and_set_at(2, interval, now).is_ok());
    }

    #[test]
    fn test_cooldown_gate_sweep_evicts_expired_only() {
        let gate = CooldownGate::new();
        let now = Utc::now();

        let _ = gate.check_and_set_at(1, Duration::minutes(5), now);
        let _ = gate.check_and_set_at(2, Duration::hours(5), now);
        assert_eq!(gate.len(), 2);

        gate.sweep_at(now + Duration::hours(1));
        assert_eq!(gate.len(), 1);

        gate.sweep_at(now + Duration::hours(6));
        assert!(gate.is_empty());
    }

    #[test]
    fn test_rate_limiter_enforces_window_cap() {
        let limiter = RateLimiter::new();
        let now = Utc::now();
        let window = Duration::seconds(60);

        assert!(limiter.check_at(42, 3, window, now));
        assert!(limiter.check_at(42, 3, window, now + Duration::seconds(1)));
        assert!(limiter.check_at(42, 3, window, now + Duration::seconds(2)));
        assert!(!limiter.check_at(42, 3, window, now + Duration::seconds(3)));

        // Once the oldest request slides out of the window, room opens up
        assert!(limiter.check_at(42, 3, window, now + Duration::seconds(61)));
    }

    #[test]
    fn test_rate_limiter_is_per_user() {
        let limiter = RateLimiter::new();
        let now = Utc::now();
        let window = Duration::seconds(60);

        assert!(limiter.check_at(1, 1, window, now));
        assert!(!limiter.check_at(1, 1, window, now));
        assert!(limiter.check_at(2, 1, window, now));
    }

    #[test]
    fn test_rate_limiter_sweep_drops_idle_buckets() {
        let limiter = RateLimiter::new();
        let now = Utc::now();
        let window = Duration::seconds(60);

        assert!(limiter.check_at(1, 5, window, now));
        limiter.sweep_at(window, now + Duration::seconds(120));

        let buckets = limiter
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        assert!(buckets.is_empty());
    }
}
