use crate::error::*;
use std::time::Duration;

pub trait ErrorExt {
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
    fn user_friendly_message(&self) -> String;
}

impl ErrorExt for ArchivistError {
    fn is_retryable(&self) -> bool {
        match self {
            ArchivistError::RedditApi(e) => e.is_retryable(),
            ArchivistError::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            ArchivistError::RedditApi(RedditApiError::RateLimitExceeded { retry_after }) => {
                Some(Duration::from_secs(*retry_after))
            }
            _ if self.is_retryable() => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ArchivistError::Config(ConfigError::MissingCredentials { var }) => format!(
                "Error: Reddit API credentials not found in environment variables ({var})."
            ),
            ArchivistError::RedditApi(e) => format!("Reddit request failed: {e}"),
            ArchivistError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            ArchivistError::EmptyCollection { output } => format!(
                "No posts were collected from any source. \
                 Leaving '{output}' untouched to protect the previous run."
            ),
            ArchivistError::DatasetNotFound { path, candidates } => {
                let mut msg = format!("File not found: {path}\nAvailable files:");
                if candidates.is_empty() {
                    msg.push_str("\n  (no .json files in this directory)");
                } else {
                    for c in candidates {
                        msg.push_str(&format!("\n  - {c}"));
                    }
                }
                msg
            }
            other => format!("{other}"),
        }
    }
}
