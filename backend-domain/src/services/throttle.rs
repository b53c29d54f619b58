// Login throttle
// Process-local failed-attempt tracking. Best-effort by design: the map
// is not persisted, so a restart clears it.

use std::collections::HashMap;

#[derive(Debug, Clone)]
struct AttemptWindow {
    count: u32,
    first_failure_at: i64,
}

#[derive(Debug)]
pub struct LoginThrottle {
    max_attempts: u32,
    window_millis: i64,
    attempts: HashMap<String, AttemptWindow>,
}

impl LoginThrottle {
    pub fn new(max_attempts: u32, window_millis: i64) -> Self {
        Self {
            max_attempts,
            window_millis,
            attempts: HashMap::new(),
        }
    }

    fn expired(&self, window: &AttemptWindow, now: i64) -> bool {
        now - window.first_failure_at >= self.window_millis
    }

    pub fn remaining(&self, id_number: &str, now: i64) -> u32 {
        match self.attempts.get(id_number) {
            Some(window) if !self.expired(window, now) => {
                self.max_attempts.saturating_sub(window.count)
            }
            _ => self.max_attempts,
        }
    }

    /// Records one failure and returns the attempts remaining.
    pub fn record_failure(&mut self, id_number: &str, now: i64) -> u32 {
        let window = self
            .attempts
            .entry(id_number.to_string())
            .or_insert(AttemptWindow {
                count: 0,
                first_failure_at: now,
            });
        if now - window.first_failure_at >= self.window_millis {
            window.count = 0;
            window.first_failure_at = now;
        }
        window.count += 1;
        self.max_attempts.saturating_sub(window.count)
    }

    pub fn clear(&mut self, id_number: &str) {
        self.attempts.remove(id_number);
    }

    pub fn sweep(&mut self, now: i64) {
        let window_millis = self.window_millis;
        self.attempts
            .retain(|_, window| now - window.first_failure_at < window_millis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_count_down_to_zero() {
        let mut throttle = LoginThrottle::new(3, 60_000);
        assert_eq!(throttle.record_failure("u1", 0), 2);
        assert_eq!(throttle.record_failure("u1", 10), 1);
        assert_eq!(throttle.record_failure("u1", 20), 0);
        assert_eq!(throttle.remaining("u1", 30), 0);
    }

    #[test]
    fn window_expiry_restores_attempts() {
        let mut throttle = LoginThrottle::new(3, 60_000);
        throttle.record_failure("u1", 0);
        throttle.record_failure("u1", 1);
        assert_eq!(throttle.remaining("u1", 60_000), 3);
        assert_eq!(throttle.record_failure("u1", 60_001), 2);
    }

    #[test]
    fn success_clear_forgets_the_entry() {
        let mut throttle = LoginThrottle::new(3, 60_000);
        throttle.record_failure("u1", 0);
        throttle.clear("u1");
        assert_eq!(throttle.remaining("u1", 1), 3);
    }

    #[test]
    fn sweep_drops_expired_windows_only() {
        let mut throttle = LoginThrottle::new(3, 60_000);
        throttle.record_failure("old", 0);
        throttle.record_failure("new", 50_000);
        throttle.sweep(60_000);
        assert_eq!(throttle.remaining("old", 60_000), 3);
        assert_eq!(throttle.remaining("new", 60_000), 2);
    }
}
