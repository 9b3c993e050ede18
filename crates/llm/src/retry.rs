//! Retry with exponential backoff.

use crate::HttpError;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;

/// Retry behaviour for completion requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_interval: Duration,
    /// Upper bound on any single delay.
    pub max_interval: Duration,
    /// Growth factor between delays.
    pub multiplier: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a retry config allowing `max_retries` retries.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Set the initial interval.
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    /// Set the max interval.
    pub fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    /// The backoff strategy.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_interval)
            .with_max_delay(self.max_interval)
            .with_factor(self.multiplier)
            .with_max_times(self.max_retries as usize)
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// runs out of retries.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HttpError>>,
{
    let result = operation
        .retry(config.backoff())
        .sleep(tokio::time::sleep)
        .when(HttpError::is_retryable)
        .notify(|e: &HttpError, delay: Duration| {
            tracing::warn!(
                "{operation_name} failed ({e}), retrying in {}ms",
                delay.as_millis()
            );
        })
        .await;

    if let Err(e) = &result
        && e.is_retryable()
    {
        tracing::warn!(
            "{operation_name} failed after {} retries: {e}",
            config.max_retries
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use backon::BackoffBuilder;

    #[test]
    fn backoff_grows_and_caps() {
        let config = RetryConfig::new(4)
            .with_initial_interval(Duration::from_millis(100))
            .with_max_interval(Duration::from_millis(300));
        let delays: Vec<_> = config.backoff().build().collect();

        assert_eq!(delays.len(), 4);
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert!(delays[0] >= Duration::from_millis(99));
        assert!(delays[1] > delays[0]);
        assert!(delays.iter().all(|d| *d <= Duration::from_millis(300)));
    }

    #[test]
    fn zero_retries_yields_no_delays() {
        assert_eq!(RetryConfig::new(0).backoff().build().count(), 0);
    }
}
