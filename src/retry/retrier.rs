//! Retry loop

use super::policy::RetryPolicy;
use crate::error::ClassifiedError;
use std::future::Future;

/// Runs operations under a [`RetryPolicy`]
///
/// Attempts are strictly sequential. The operation is assumed safe to
/// repeat; nothing here deduplicates requests.
#[derive(Debug, Clone, Default)]
pub struct Retrier {
    policy: RetryPolicy,
}

impl Retrier {
    /// Create a retrier with the given policy
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Get the policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `op` until it succeeds, fails terminally, or runs out of attempts
    ///
    /// The returned error is the last one `op` produced, untouched.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ClassifiedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClassifiedError>>,
    {
        let mut attempt = 1;
        loop {
            let error = match op().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if !self.policy.should_retry(&error, attempt) {
                return Err(error);
            }

            let delay = self.policy.next_delay(&error, attempt);
            self.policy.notify(&error, attempt, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Run `op` under `policy`
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, op: F) -> Result<T, ClassifiedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClassifiedError>>,
{
    Retrier::new(policy.clone()).run(op).await
}
