//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

/// Calculate exponential backoff delay with jitter.
///
/// Attempt 0 is immediate; attempt `n` waits `base_ms * 2^(n-1)`, capped at
/// `max_ms`, plus up to 10% jitter.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // Apply jitter (0 to 10% of the delay)
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

/// Stateful poll schedule for repeated checks against the same resource.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    attempt: u32,
    base_ms: u64,
    max_ms: u64,
}

impl PollSchedule {
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        Self {
            attempt: 0,
            base_ms,
            max_ms,
        }
    }

    /// Delay before the next poll. The first poll is immediate.
    pub fn next_delay(&mut self) -> Duration {
        let delay = calculate_backoff(self.attempt, self.base_ms, self.max_ms);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    /// Number of polls scheduled so far.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }
}
