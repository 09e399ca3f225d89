//! Backoff for the rate-limit retry loop.
//!
//! Only the upstream "too many requests" signal is retried. Delays double
//! from `min_delay` and are capped at `max_delay`; with the defaults that is
//! 2s, 4s, 8s before giving up.

use crate::config::RetryConfig;
use tokio::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            min_delay: Duration::from_millis(cfg.min_delay_ms),
            max_delay: Duration::from_millis(cfg.max_delay_ms.max(cfg.min_delay_ms)),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Exponential backoff: min_delay * 2^attempt, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = self.min_delay.as_millis() as u64;
        let cap = self.max_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(base.saturating_mul(factor).min(cap))
    }

    /// Delay before retry number `attempt + 1`, or `None` once the budget is spent.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_retries).then(|| self.backoff(attempt))
    }

    /// Every delay the policy will ever hand out, in order.
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_retries).map(|a| self.backoff(a)).collect()
    }

    /// Worst-case time spent sleeping before giving up.
    pub fn total_budget(&self) -> Duration {
        self.delays().into_iter().sum()
    }
}
