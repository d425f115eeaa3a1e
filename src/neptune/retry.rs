//! Retry policy with exponential backoff for backend calls

use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use crate::config::retry as defaults;
use crate::error::{ErrorKind, Result};

/// Retries an operation while it fails with a transient error
///
/// Conflicts and local errors are returned on first occurrence. Transient
/// errors are retried until `max_attempts` calls have been made, sleeping
/// `base_delay * 2^n` (capped at `max_delay`) before the n-th retry.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::MAX_ATTEMPTS,
            base_delay: Duration::from_millis(defaults::BASE_DELAY_MS),
            max_delay: Duration::from_millis(defaults::MAX_DELAY_MS),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of calls, including the first one (at least 1)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Policy that sleeps zero time between attempts
    pub fn immediate() -> Self {
        Self::default()
            .with_base_delay(Duration::ZERO)
            .with_jitter(false)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `operation` until it succeeds, fails with a non-transient error,
    /// or runs out of attempts
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Request succeeded on attempt {}", attempt);
                    }
                    return Ok(value);
                }
                Err(error) => match error.kind() {
                    ErrorKind::Transient if attempt < self.max_attempts => {
                        let delay = self.delay_for(attempt - 1);
                        debug!(
                            "Attempt {}/{} failed ({}), retrying in {}ms",
                            attempt,
                            self.max_attempts,
                            error,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    ErrorKind::Transient => {
                        if self.max_attempts > 1 {
                            warn!("Giving up after {} attempts: {}", attempt, error);
                        }
                        return Err(error);
                    }
                    ErrorKind::Conflict | ErrorKind::Other => return Err(error),
                },
            }
        }
    }

    /// Delay before retry number `retry` (0-based)
    fn delay_for(&self, retry: u32) -> Duration {
        let base = self.base_delay.as_millis().min(u64::MAX as u128) as u64;
        let cap = self.max_delay.as_millis().min(u64::MAX as u128) as u64;
        let factor = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
        let capped = base.saturating_mul(factor).min(cap);

        let millis = if self.jitter {
            let half = capped / 2;
            capped - half + fastrand::u64(0..=half)
        } else {
            capped
        };

        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NeptuneError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> NeptuneError {
        NeptuneError::Api {
            status: 503,
            message: "Service unavailable".to_string(),
        }
    }

    fn conflict() -> NeptuneError {
        NeptuneError::Api {
            status: 409,
            message: "Conflict".to_string(),
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert!(policy.jitter);
    }

    #[test]
    fn test_max_attempts_at_least_one() {
        let policy = RetryPolicy::new().with_max_attempts(0);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let policy = RetryPolicy::new().with_jitter(false);
        assert_eq!(policy.delay_for(0), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(8_000));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::new()
            .with_jitter(false)
            .with_max_delay(Duration::from_secs(3));
        assert_eq!(policy.delay_for(5), Duration::from_secs(3));
        assert_eq!(policy.delay_for(200), Duration::from_secs(3));
    }

    #[test]
    fn test_jitter_stays_within_upper_half() {
        let policy = RetryPolicy::new();
        for retry in 0..4 {
            let full = 1_000u64 << retry;
            let delay = policy.delay_for(retry).as_millis() as u64;
            assert!(delay >= full / 2 && delay <= full, "delay {}", delay);
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let attempts = AtomicU32::new(0);
        let result = RetryPolicy::immediate()
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Ok("done") }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_on_fifth_attempt() {
        let attempts = AtomicU32::new(0);
        let result = RetryPolicy::immediate()
            .execute(|| {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 5 {
                        Err(transient())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 5);
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_gives_up_after_five_attempts() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate()
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(transient()) }
            })
            .await;

        match result.unwrap_err() {
            NeptuneError::Api { status, .. } => assert_eq!(status, 503),
            other => panic!("Expected NeptuneError::Api, got {:?}", other),
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_conflict_is_not_retried() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate()
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(conflict()) }
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_conflict_after_transient_stops_retrying() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate()
            .execute(|| {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(transient())
                    } else {
                        Err(conflict())
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate()
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(NeptuneError::Json("bad body".to_string())) }
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Other);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_build_failure_is_attempted_once() {
        let started = tokio::time::Instant::now();
        let attempts = AtomicU32::new(0);
        let client = reqwest::Client::new();
        let result: Result<()> = RetryPolicy::new()
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                let request = client.delete("not a url/members/jdoe");
                async move {
                    request.send().await?;
                    Ok(())
                }
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Other);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_custom_attempt_limit() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate()
            .with_max_attempts(2)
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(transient()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_between_attempts() {
        let started = tokio::time::Instant::now();
        let attempts = AtomicU32::new(0);
        let _: Result<()> = RetryPolicy::new()
            .with_jitter(false)
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(transient()) }
            })
            .await;

        // 1s + 2s + 4s + 8s of backoff, no sleep after the last attempt
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(15), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(16), "elapsed {:?}", elapsed);
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
    }
}
