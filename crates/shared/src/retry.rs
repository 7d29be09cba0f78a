use std::future::Future;
use std::time::Duration;

use crate::completion::CompletionError;
use crate::summarizer::SummarizeError;

/// How rate-limited completion calls are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 5,
        }
    }
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Retries without waiting, for tests
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(Duration::ZERO, max_attempts)
    }

    /// Runs `op` until it succeeds, fails with something other than a rate limit,
    /// or `max_attempts` calls have been made.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, SummarizeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CompletionError>>,
    {
        let max_attempts = self.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_rate_limit() => {
                    if attempt == max_attempts {
                        tracing::error!(attempts = attempt, "Rate limit retries exhausted");
                        break;
                    }
                    tracing::warn!(
                        attempt,
                        wait = ?self.interval,
                        "Rate limit hit, waiting before retry..."
                    );
                    pause(self.interval).await;
                }
                Err(e) => return Err(SummarizeError::Completion(e)),
            }
        }

        Err(SummarizeError::Exhausted {
            attempts: max_attempts,
        })
    }
}

/// Fixed pauses that keep a run under the upstream rate limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub between_chunks: Duration,
    pub between_posts: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            between_chunks: Duration::from_secs(10),
            between_posts: Duration::from_secs(15),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            between_chunks: Duration::ZERO,
            between_posts: Duration::ZERO,
        }
    }
}

pub(crate) async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = RetryPolicy::immediate(5)
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CompletionError>("done")
            })
            .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::immediate(5)
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CompletionError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            })
            .await;
        assert!(matches!(result, Err(SummarizeError::Completion(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::immediate(0)
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CompletionError::RateLimited("429".into()))
            })
            .await;
        assert!(matches!(
            result,
            Err(SummarizeError::Exhausted { attempts: 1 })
        ));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(RetryPolicy::default().max_attempts, 5);
        assert_eq!(RetryPolicy::default().interval, Duration::from_secs(10));
        assert_eq!(Pacing::default().between_posts, Duration::from_secs(15));
    }
}
