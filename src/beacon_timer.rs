use std::time::{Duration, Instant};

/// Periodic countdown driven by explicit time stamps.
///
/// A timer that has never been started is due immediately. After
/// [`start`](Self::start) it becomes due once `timeout` has elapsed; it does not
/// re-arm itself, the owner restarts it after acting on a firing.
#[derive(Debug, Clone)]
pub struct BeaconTimer {
    timeout: Duration,
    next_check: Option<Instant>,
}

impl BeaconTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            next_check: None,
        }
    }

    /// Arm the timer relative to `now`
    pub fn start(&mut self, now: Instant) {
        self.next_check = Some(now + self.timeout);
    }

    /// Whether the countdown has run out
    pub fn check(&self, now: Instant) -> bool {
        match self.next_check {
            Some(next) => now >= next,
            None => true,
        }
    }

    /// Whole seconds until the timer is due, 0 when due or not started
    pub fn trigger_time_in_sec(&self, now: Instant) -> u64 {
        self.next_check
            .map(|next| next.saturating_duration_since(now).as_secs())
            .unwrap_or(0)
    }
}
