use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchivistError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("no posts collected from any source; refusing to overwrite '{output}'")]
    EmptyCollection { output: String },

    #[error("dataset file not found: {path}")]
    DatasetNotFound {
        path: String,
        candidates: Vec<String>,
    },
}

#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Unexpected status {status_code} for {endpoint}")]
    UnexpectedStatus { status_code: u16, endpoint: String },
}

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Reddit API credentials not found in environment ({var})")]
    MissingCredentials { var: String },

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl RedditApiError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RedditApiError::RateLimitExceeded { .. }
                | RedditApiError::RequestTimeout
                | RedditApiError::ServerError { .. }
        )
    }
}
