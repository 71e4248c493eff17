//! Retry policy for upstream requests.
//!
//! Two separate schedules apply to retry `k` (1-indexed):
//!
//! - the per-attempt timeout grows as `timeout * 1.5^k`, perturbed by a
//!   uniform jitter of ±50% and floored at one second;
//! - the pause before the attempt is `min(30s, 2^k s)`.

use rand::Rng;
use std::time::Duration;

pub use engdocs_core::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Strategy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Growth factor of the per-attempt timeout.
    pub timeout_growth: f64,
    /// Relative jitter applied to escalated timeouts (0.5 = ±50%).
    pub timeout_jitter: f64,
    /// Lower bound for escalated timeouts.
    pub min_timeout: Duration,
    /// Unit of the exponential pause (`unit * 2^k`).
    pub delay_unit: Duration,
    /// Maximum pause between attempts.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates the standard policy.
    pub fn new() -> Self {
        Self {
            timeout_growth: 1.5,
            timeout_jitter: 0.5,
            min_timeout: Duration::from_secs(1),
            delay_unit: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    /// Sets the delay unit. Tests use `Duration::ZERO` to skip the pauses.
    pub fn with_delay_unit(mut self, unit: Duration) -> Self {
        self.delay_unit = unit;
        self
    }

    /// Disables timeout jitter.
    pub fn without_jitter(mut self) -> Self {
        self.timeout_jitter = 0.0;
        self
    }

    /// Pause before retry `retry` (1-indexed).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.delay_unit
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Timeout of retry `retry` for a given jitter sample in `[-1, 1]`.
    ///
    /// The sample is scaled by [`RetryPolicy::timeout_jitter`].
    pub fn timeout_with_sample(&self, base: Duration, retry: u32, sample: f64) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let escalated = base.as_secs_f64() * self.timeout_growth.powi(exponent);
        let jittered = escalated * (1.0 + sample.clamp(-1.0, 1.0) * self.timeout_jitter);
        let secs = jittered.max(self.min_timeout.as_secs_f64());
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Timeout of retry `retry` with a random jitter sample.
    pub fn timeout_for_retry(&self, base: Duration, retry: u32) -> Duration {
        let sample = rand::thread_rng().gen_range(-1.0..=1.0);
        self.timeout_with_sample(base, retry, sample)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
