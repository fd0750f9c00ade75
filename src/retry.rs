//! Retry policy for transient delivery failures.
//!
//! Retries are local to one delivery attempt chain; they never span
//! separate host-delivered events.

use std::time::Duration;

/// Decides whether and when a failed attempt is retried.
pub trait RetryPolicy: Send + Sync {
    /// Delay before the retry following attempt number `attempt` (1-based),
    /// or `None` once the bound is exhausted.
    fn next_delay(&self, attempt: u32) -> Option<Duration>;

    /// Maximum number of retries after the initial attempt.
    fn max_retries(&self) -> u32;
}

/// Exponential backoff: `base * 2^(attempt - 1)`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Delay before the first retry.
    pub base: Duration,
    /// Cap applied to every delay.
    pub max_delay: Duration,
    /// Retry bound.
    pub max_retries: u32,
}

impl ExponentialBackoff {
    /// Creates a backoff policy with a 30s delay cap.
    pub fn new(base: Duration, max_retries: u32) -> Self {
        Self {
            base,
            max_delay: Duration::from_secs(30),
            max_retries,
        }
    }

    /// Sets the delay cap.
    pub fn max_delay(mut self, max: Duration) -> Self {
        self.max_delay = max;
        self
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 3)
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_retries {
            return None;
        }
        let delay = self.base.saturating_mul(2u32.saturating_pow(attempt - 1));
        Some(delay.min(self.max_delay))
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_sequence() {
        let policy = ExponentialBackoff::new(Duration::from_secs(1), 3);

        assert_eq!(policy.next_delay(1), Some(Duration::from_secs(1)));
        assert_eq!(policy.next_delay(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.next_delay(3), Some(Duration::from_secs(4)));
        assert_eq!(policy.next_delay(4), None);
    }

    #[test]
    fn test_delay_cap() {
        let policy =
            ExponentialBackoff::new(Duration::from_secs(10), 8).max_delay(Duration::from_secs(15));

        assert_eq!(policy.next_delay(1), Some(Duration::from_secs(10)));
        assert_eq!(policy.next_delay(2), Some(Duration::from_secs(15)));
        assert_eq!(policy.next_delay(5), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_zero_retries() {
        let policy = ExponentialBackoff::new(Duration::from_secs(1), 0);
        assert_eq!(policy.next_delay(1), None);
    }
}
