//! Throttle handling policy and the sleep seam it drives.

use std::time::Duration;

/// How the fetcher reacts to throttling responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottlePolicy {
    /// Statuses treated as "slow down" rather than failure
    pub status_codes: Vec<u16>,
    /// Pause before retrying the identical request
    pub cooldown: Duration,
    /// Retry limit; `None` retries forever
    pub max_retries: Option<u32>,
}

impl ThrottlePolicy {
    pub fn is_throttled(&self, status: u16) -> bool {
        self.status_codes.contains(&status)
    }

    /// Whether another attempt is allowed after `retries` cooldowns.
    pub fn allows_retry(&self, retries: u32) -> bool {
        self.max_retries.is_none_or(|max| retries < max)
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            status_codes: vec![403, 429],
            cooldown: Duration::from_secs(30 * 60),
            max_retries: None,
        }
    }
}

/// Blocks the calling thread. Swapped for a recording no-op in tests.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Real sleep via `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
