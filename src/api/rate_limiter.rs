// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sliding-window per-key rate limiting

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-key sliding-window admission control.
///
/// Every call is recorded, including denied ones: a caller that keeps
/// hammering past the limit stays denied until its old timestamps age out,
/// rather than being granted a fresh burst the moment the window slides.
///
/// Not internally synchronized; callers hold an explicit lock around it.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: HashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: HashMap::new(),
        }
    }

    /// Record a request under `key` and report whether it is admitted.
    ///
    /// Timestamps outside the window are purged for every tracked key, not
    /// just the queried one, which bounds memory across one-off callers.
    pub fn is_allowed(&mut self, key: &str) -> bool {
        let now = Instant::now();
        self.cleanup(now);

        let entry = self.requests.entry(key.to_string()).or_default();
        entry.push(now);

        entry.len() <= self.max_requests
    }

    /// Drop expired timestamps everywhere; keys left empty are removed.
    fn cleanup(&mut self, now: Instant) {
        let window = self.window;
        self.requests.retain(|_, stamps| {
            stamps.retain(|&t| now.duration_since(t) < window);
            !stamps.is_empty()
        });
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_third_call_in_window_is_denied() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.is_allowed("10.0.0.1"));
        assert!(limiter.is_allowed("10.0.0.1"));
        assert!(!limiter.is_allowed("10.0.0.1"));
    }

    #[test]
    fn test_allowed_again_after_window_elapses() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.is_allowed("10.0.0.1"));
        assert!(limiter.is_allowed("10.0.0.1"));
        assert!(!limiter.is_allowed("10.0.0.1"));

        sleep(Duration::from_millis(60));
        assert!(limiter.is_allowed("10.0.0.1"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.is_allowed("10.0.0.1"));
        assert!(limiter.is_allowed("10.0.0.2"));
        assert!(!limiter.is_allowed("10.0.0.1"));
        assert!(!limiter.is_allowed("10.0.0.2"));
    }

    #[test]
    fn test_denied_calls_still_consume_slots() {
        // A sustained burst keeps being denied even once the first timestamp
        // ages out, because the denied calls were recorded too.
        let mut limiter = RateLimiter::new(1, Duration::from_millis(100));
        assert!(limiter.is_allowed("10.0.0.1"));
        sleep(Duration::from_millis(60));
        assert!(!limiter.is_allowed("10.0.0.1"));
        sleep(Duration::from_millis(60));
        // First timestamp has expired, but the denied one from 60ms ago has not.
        assert!(!limiter.is_allowed("10.0.0.1"));
    }

    #[test]
    fn test_empty_keys_are_removed_on_cleanup() {
        let mut limiter = RateLimiter::new(5, Duration::from_millis(40));
        assert!(limiter.is_allowed("10.0.0.1"));
        assert_eq!(limiter.tracked_keys(), 1);

        sleep(Duration::from_millis(50));
        assert!(limiter.is_allowed("10.0.0.2"));
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
