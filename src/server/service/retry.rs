//! Retry logic with exponential backoff for service operations.
//!
//! Read paths wrap their queries in a [`RetryContext`] so a briefly unreachable database
//! (connection refused, pool exhausted) doesn't immediately fail the request. Only errors whose
//! [`ErrorRetryStrategy`] is `Retry` are retried.

use std::{future::Future, pin::Pin, time::Duration};

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Boxed future returned by a retryable operation.
pub type RetryFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, Error>> + Send + 'a>>;

/// Context for executing operations with automatic retry logic.
///
/// - **Max attempts**: 3 (default)
/// - **Backoff strategy**: Exponential starting at 1 second (1s, 2s, ...)
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
///
/// ```ignore
/// let db = self.db.clone();
///
/// RetryContext::new()
///     .execute_with_retry("dashboard metrics", || {
///         let db = db.clone();
///         Box::pin(async move { CompetitorRepository::new(&db).get_trend_totals().await.map_err(Into::into) })
///     })
///     .await
/// ```
pub struct RetryContext {
    /// Max attempts before failure
    max_attempts: u32,
    /// Backoff before the first retry, doubled for every subsequent retry
    initial_backoff: Duration,
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
        }
    }

    /// Override attempts and initial backoff
    pub fn with_backoff(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    /// Execute an operation with automatic retry logic
    ///
    /// # Arguments
    /// - `description`: Description of the operation for logging (e.g., "dashboard metrics")
    /// - `operation`: Builds a fresh future for every attempt
    pub async fn execute_with_retry<'a, R, F>(
        &self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: Fn() -> RetryFuture<'a, R>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => return Err(e),
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.initial_backoff * 2_u32.pow(attempt_count - 1);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}
