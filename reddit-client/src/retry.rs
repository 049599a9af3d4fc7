//! Bounded retry policy for one request. The loop itself lives in
//! [`crate::api`]; this module only decides whether and how long to wait.

use archivist_core::{ArchivistError, ErrorExt, RedditApiError};
use std::time::Duration;

/// Configuration for retry behavior against the Reddit API.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum attempts per request, counting the first one.
    pub max_attempts: u32,
    /// Base wait between rate-limited attempts; grows linearly with the
    /// attempt number, never exponentially.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::reddit()
    }
}

impl RetryConfig {
    /// Retry config tuned to Reddit's informal rate limits.
    pub fn reddit() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryStrategy {
    /// Wait this long, then try the same request again.
    RetryAfter(Duration),
    /// Give up on this request; the caller degrades to an empty result.
    GiveUp,
}

impl RetryConfig {
    /// Decides the strategy for a failed attempt. `attempt` is 1-based.
    /// Only retryable errors get another attempt, and only while the
    /// attempt budget lasts; a 429 waits at least as long as the server
    /// asked for, increased linearly per attempt.
    pub fn strategy_for(&self, error: &ArchivistError, attempt: u32) -> RetryStrategy {
        if attempt >= self.max_attempts || !error.is_retryable() {
            return RetryStrategy::GiveUp;
        }

        let linear = self.base_delay * attempt;
        let wait = match error {
            ArchivistError::RedditApi(RedditApiError::RateLimitExceeded { .. }) => {
                error.retry_after().map_or(linear, |server| server.max(linear))
            }
            _ => error.retry_after().unwrap_or(linear),
        };
        RetryStrategy::RetryAfter(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limited(retry_after: u64) -> ArchivistError {
        ArchivistError::RedditApi(RedditApiError::RateLimitExceeded { retry_after })
    }

    #[test]
    fn rate_limit_waits_grow_linearly() {
        let config = RetryConfig::reddit();
        let err = rate_limited(1);
        assert_eq!(
            config.strategy_for(&err, 1),
            RetryStrategy::RetryAfter(Duration::from_secs(5))
        );
        assert_eq!(
            config.strategy_for(&err, 2),
            RetryStrategy::RetryAfter(Duration::from_secs(10))
        );
    }

    #[test]
    fn server_retry_after_is_honored_when_longer() {
        let config = RetryConfig::reddit();
        let err = rate_limited(30);
        assert_eq!(
            config.strategy_for(&err, 1),
            RetryStrategy::RetryAfter(Duration::from_secs(30))
        );
    }

    #[test]
    fn attempts_are_bounded() {
        let config = RetryConfig::reddit();
        let err = rate_limited(1);
        assert_eq!(config.strategy_for(&err, 3), RetryStrategy::GiveUp);
    }

    #[test]
    fn non_retryable_errors_give_up_immediately() {
        let config = RetryConfig::reddit();
        let err = ArchivistError::RedditApi(RedditApiError::InvalidResponse {
            details: "bad json".to_string(),
        });
        assert_eq!(config.strategy_for(&err, 1), RetryStrategy::GiveUp);
    }
}
