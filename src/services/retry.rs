use crate::{
    config::Config,
    error::{UpstreamError, UpstreamExhaustedError},
    services::providers::ModelClient,
};
use std::sync::Arc;
use std::time::Duration;

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay: config.retry_base_delay(),
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`, saturating.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Sum of all waits between attempts; none follows the last one
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts.max(1)).fold(Duration::ZERO, |total, attempt| {
            total.saturating_add(self.delay_after(attempt))
        })
    }
}

/// Wraps a `ModelClient` with the retry state machine.
///
/// Holds no per-call state, so one invoker is shared by all in-flight requests.
/// Backoff waits on the tokio timer and never blocks other calls.
#[derive(Clone)]
pub struct RetryingInvoker {
    client: Arc<dyn ModelClient>,
    policy: RetryPolicy,
}

impl RetryingInvoker {
    pub fn new(client: Arc<dyn ModelClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn client(&self) -> &Arc<dyn ModelClient> {
        &self.client
    }

    /// Calls the model until it answers or the attempt budget is spent
    pub async fn call(&self, prompt: &str) -> Result<String, UpstreamExhaustedError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            tracing::info!(
                attempt,
                max_attempts,
                provider = self.client.name(),
                "Model call attempt"
            );

            let error = match self.client.invoke(prompt).await {
                Ok(text) => {
                    tracing::info!(attempt, provider = self.client.name(), "Model responded");
                    return Ok(text);
                }
                Err(error) => error,
            };

            tracing::warn!(attempt, error = %error, "Model call attempt failed");

            if !self.should_retry(&error, attempt, max_attempts) {
                tracing::error!(
                    attempts = attempt,
                    error = %error,
                    "Model call failed, giving up"
                );
                return Err(UpstreamExhaustedError {
                    attempts: attempt,
                    last: error,
                });
            }

            let delay = self.policy.delay_after(attempt);
            tracing::info!(delay_ms = delay.as_millis() as u64, "Retrying model call");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn should_retry(&self, error: &UpstreamError, attempt: u32, max_attempts: u32) -> bool {
        error.is_retryable() && attempt < max_attempts
    }
}
