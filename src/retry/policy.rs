//! Retry policy
//!
//! The policy decides whether a failed attempt is retried and how long to
//! wait first. It holds no per-call state, so one policy can serve any
//! number of concurrent operations.

use crate::error::{ClassifiedError, Error, ErrorKind, Result};
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Decides whether an error kind is worth retrying
pub type RetryPredicate = Arc<dyn Fn(ErrorKind) -> bool + Send + Sync>;

/// Called with `(error, attempt, delay)` right before each backoff sleep
pub type RetryObserver = Arc<dyn Fn(&ClassifiedError, u32, Duration) + Send + Sync>;

/// Exponential backoff policy keyed on [`ErrorKind`]
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter: bool,
    is_retryable: RetryPredicate,
    on_retry: RetryObserver,
}

impl RetryPolicy {
    /// Default maximum number of attempts
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    /// Default delay before the first retry
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
    /// Default cap on the computed delay
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

    /// Create a new policy builder
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn jitter(&self) -> bool {
        self.jitter
    }

    /// Check the predicate for an error kind
    pub fn is_retryable(&self, kind: ErrorKind) -> bool {
        (self.is_retryable)(kind)
    }

    /// Decide whether `attempt` (1-indexed) failing with `error` gets another try
    pub fn should_retry(&self, error: &ClassifiedError, attempt: u32) -> bool {
        attempt < self.max_attempts && self.is_retryable(error.kind())
    }

    pub(crate) fn notify(&self, error: &ClassifiedError, attempt: u32, delay: Duration) {
        (self.on_retry)(error, attempt, delay);
    }

    /// Plain exponential delay for `attempt`: `base * 2^(attempt-1)`, capped
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self
            .base_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay);
        delay.min(self.max_delay)
    }

    /// Delay after `attempt` failed with `error`, before jitter
    ///
    /// A positive `retry-after` hint on a rate-limited error replaces the
    /// exponential schedule. Both paths are capped at `max_delay`.
    pub fn delay_for(&self, error: &ClassifiedError, attempt: u32) -> Duration {
        match (error.kind(), error.retry_after_seconds()) {
            (ErrorKind::RateLimited, Some(seconds)) if seconds > 0 => {
                Duration::from_secs(seconds).min(self.max_delay)
            }
            _ => self.backoff_delay(attempt),
        }
    }

    /// The wait actually used before the next attempt
    ///
    /// Jitter is added after the cap, so the result may exceed `max_delay`
    /// by up to a quarter.
    pub fn next_delay(&self, error: &ClassifiedError, attempt: u32) -> Duration {
        let delay = self.delay_for(error, attempt);
        if self.jitter {
            add_jitter(delay)
        } else {
            delay
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            jitter: true,
            is_retryable: Arc::new(ErrorKind::is_transient),
            on_retry: Arc::new(log_retry),
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("jitter", &self.jitter)
            .finish_non_exhaustive()
    }
}

/// Add a uniform `1..=max(round(delay / 4), 1)` milliseconds
pub fn add_jitter(delay: Duration) -> Duration {
    let millis = delay.as_millis().min(u128::from(u64::MAX)) as u64;
    let spread = (millis.saturating_add(2) / 4).max(1);
    let extra = rand::thread_rng().gen_range(1..=spread);
    delay + Duration::from_millis(extra)
}

fn log_retry(error: &ClassifiedError, attempt: u32, delay: Duration) {
    tracing::warn!(
        kind = %error.kind(),
        status = ?error.http_status(),
        attempt,
        delay_ms = delay.as_millis() as u64,
        "Request failed: {}, retrying",
        error.message()
    );
}

/// Builder for [`RetryPolicy`]
#[derive(Default)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Set the total number of attempts, including the first
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.policy.base_delay = delay;
        self
    }

    /// Set the cap on computed delays
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.policy.max_delay = delay;
        self
    }

    /// Enable or disable jitter
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.policy.jitter = enabled;
        self
    }

    /// Replace the retryable-kind predicate
    pub fn retry_if<P>(mut self, predicate: P) -> Self
    where
        P: Fn(ErrorKind) -> bool + Send + Sync + 'static,
    {
        self.policy.is_retryable = Arc::new(predicate);
        self
    }

    /// Replace the observer called before each retry
    pub fn on_retry<O>(mut self, observer: O) -> Self
    where
        O: Fn(&ClassifiedError, u32, Duration) + Send + Sync + 'static,
    {
        self.policy.on_retry = Arc::new(observer);
        self
    }

    /// Validate and build the policy
    pub fn build(self) -> Result<RetryPolicy> {
        let policy = self.policy;
        if policy.max_attempts == 0 {
            return Err(Error::invalid_value("max_attempts", "must be at least 1"));
        }
        if policy.max_delay < policy.base_delay {
            return Err(Error::invalid_value(
                "max_delay",
                format!(
                    "{:?} is smaller than base_delay {:?}",
                    policy.max_delay, policy.base_delay
                ),
            ));
        }
        Ok(policy)
    }
}
