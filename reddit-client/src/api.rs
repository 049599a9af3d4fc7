use crate::auth::{fetch_app_token, AppToken};
use crate::retry::{RetryConfig, RetryStrategy};
use archivist_core::{ArchivistError, CollectorConfig, RawPost, RedditApiError, Reply};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

/// The standard Reddit listing envelope: `data.children[]` plus the
/// pagination cursor in `data.after`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    pub kind: String,
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<ListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingChild<T> {
    pub kind: String,
    pub data: T,
}

/// A submission as Reddit serves it. Only the fields the archivist reads;
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub subreddit: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub stickied: bool,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub permalink: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommentData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub stickied: bool,
}

impl From<RawPostData> for RawPost {
    fn from(data: RawPostData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            body: data.selftext,
            url: data.url,
            subreddit: data.subreddit,
            score: data.score,
            pinned: data.stickied,
        }
    }
}

impl From<RawCommentData> for Reply {
    fn from(data: RawCommentData) -> Self {
        Self {
            author: data.author,
            body: data.body,
            score: data.score,
        }
    }
}

/// Sequential HTTP client for Reddit's OAuth API. One request at a time,
/// a polite pause before each, and a bounded retry loop on rate limits.
#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    client_id: String,
    client_secret: String,
    token: AppToken,
    retry: RetryConfig,
    request_delay: Duration,
}

impl RedditApiClient {
    /// Builds the HTTP client and performs the initial token exchange.
    pub async fn connect(config: &CollectorConfig) -> Result<Self, ArchivistError> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        let token =
            fetch_app_token(&http_client, &config.client_id, &config.client_secret).await?;

        Ok(Self {
            http_client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token,
            retry: RetryConfig::reddit(),
            request_delay: config.request_delay,
        })
    }

    async fn ensure_token(&mut self) -> Result<(), ArchivistError> {
        if self.token.is_expired() {
            debug!("Refreshing expired application token");
            self.token =
                fetch_app_token(&self.http_client, &self.client_id, &self.client_secret).await?;
        }
        Ok(())
    }

    async fn make_request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, ArchivistError> {
        let url = format!("{REDDIT_API_BASE}{endpoint}");
        debug!("GET {}", endpoint);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token.access_token)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ArchivistError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    ArchivistError::Network(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("Rate limited on {}, retry after {}s", endpoint, retry_after);
            return Err(RedditApiError::RateLimitExceeded { retry_after }.into());
        }
        if status.is_server_error() {
            return Err(RedditApiError::ServerError {
                status_code: status.as_u16(),
            }
            .into());
        }
        error!("Request failed with status {} for {}", status, endpoint);
        Err(RedditApiError::UnexpectedStatus {
            status_code: status.as_u16(),
            endpoint: endpoint.to_string(),
        }
        .into())
    }

    /// One logical fetch: polite delay, request, bounded retry loop on
    /// retryable failures. An explicit attempt counter, never re-entry.
    async fn fetch_json(
        &mut self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ArchivistError> {
        self.ensure_token().await?;
        sleep(self.request_delay).await;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.make_request(endpoint, params).await {
                Ok(response) => {
                    return response.json().await.map_err(|e| {
                        error!("Failed to parse response from {}: {}", endpoint, e);
                        RedditApiError::InvalidResponse {
                            details: format!("invalid JSON from {endpoint}"),
                        }
                        .into()
                    });
                }
                Err(err) => match self.retry.strategy_for(&err, attempt) {
                    RetryStrategy::RetryAfter(wait) => {
                        warn!(
                            "Attempt {} for {} failed ({}); retrying in {:?}",
                            attempt, endpoint, err, wait
                        );
                        sleep(wait).await;
                    }
                    RetryStrategy::GiveUp => return Err(err),
                },
            }
        }
    }

    /// One page of a subreddit's top listing.
    pub async fn top_posts(
        &mut self,
        subreddit: &str,
        time: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Listing<RawPostData>, ArchivistError> {
        let endpoint = format!("/r/{subreddit}/top");
        let mut params = vec![
            ("t", time.to_string()),
            ("limit", limit.to_string()),
            ("raw_json", "1".to_string()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor.to_string()));
        }

        let value = self.fetch_json(&endpoint, &params).await?;
        let listing: Listing<RawPostData> = serde_json::from_value(value).map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            ArchivistError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{subreddit}"),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{} (top/{})",
            listing.data.children.len(),
            subreddit,
            time
        );
        Ok(listing)
    }

    /// One page of search results restricted to the subreddit. Cloudsearch
    /// syntax keeps flair queries working.
    pub async fn search_posts(
        &mut self,
        subreddit: &str,
        query: &str,
        time: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Listing<RawPostData>, ArchivistError> {
        let endpoint = format!("/r/{subreddit}/search");
        let mut params = vec![
            ("q", query.to_string()),
            ("restrict_sr", "on".to_string()),
            ("sort", "top".to_string()),
            ("t", time.to_string()),
            ("syntax", "cloudsearch".to_string()),
            ("limit", limit.to_string()),
            ("raw_json", "1".to_string()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor.to_string()));
        }

        let value = self.fetch_json(&endpoint, &params).await?;
        let listing: Listing<RawPostData> = serde_json::from_value(value).map_err(|e| {
            error!("Failed to parse search results: {}", e);
            ArchivistError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse search results for r/{subreddit}"),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{} for '{}'",
            listing.data.children.len(),
            subreddit,
            query
        );
        Ok(listing)
    }

    /// Top-level comments on one submission, highest scored first as
    /// Reddit returns them.
    pub async fn top_comments(
        &mut self,
        article: &str,
        limit: u32,
    ) -> Result<Vec<RawCommentData>, ArchivistError> {
        let endpoint = format!("/comments/{article}");
        let params = vec![
            ("sort", "top".to_string()),
            ("limit", limit.to_string()),
            ("depth", "1".to_string()),
            ("raw_json", "1".to_string()),
        ];

        let value = self.fetch_json(&endpoint, &params).await?;
        let comments = parse_comment_tree(&value);
        debug!("Retrieved {} comments for {}", comments.len(), article);
        Ok(comments)
    }
}

/// The comments endpoint returns a two-element array: the submission
/// listing first, then the comment listing. Only `t1` children are real
/// comments; `more` stubs are skipped.
pub fn parse_comment_tree(value: &Value) -> Vec<RawCommentData> {
    let mut comments = Vec::new();
    let Some(children) = value
        .get(1)
        .and_then(|listing| listing.get("data"))
        .and_then(|data| data.get("children"))
        .and_then(|c| c.as_array())
    else {
        return comments;
    };

    for child in children {
        if child.get("kind").and_then(|k| k.as_str()) != Some("t1") {
            continue;
        }
        if let Some(data) = child.get("data") {
            match serde_json::from_value::<RawCommentData>(data.clone()) {
                Ok(comment) => comments.push(comment),
                Err(e) => warn!("Skipping malformed comment: {}", e),
            }
        }
    }
    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_envelope_parses() {
        let payload = json!({
            "kind": "Listing",
            "data": {
                "after": "t3_next",
                "dist": 2,
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "id": "abc",
                            "title": "A Marika theory",
                            "selftext": "Radagon is Marika.",
                            "subreddit": "eldenringlore",
                            "url": "https://reddit.com/x",
                            "score": 42,
                            "stickied": false
                        }
                    },
                    {
                        "kind": "t3",
                        "data": {
                            "id": "def",
                            "title": "Weekly thread",
                            "subreddit": "eldenringlore",
                            "stickied": true
                        }
                    }
                ]
            }
        });

        let listing: Listing<RawPostData> = serde_json::from_value(payload).unwrap();
        assert_eq!(listing.data.after.as_deref(), Some("t3_next"));
        assert_eq!(listing.data.children.len(), 2);
        assert_eq!(listing.data.children[0].data.score, 42);
        assert!(listing.data.children[1].data.stickied);
        // Missing selftext defaults to empty, not an error.
        assert!(listing.data.children[1].data.selftext.is_empty());
    }

    #[test]
    fn comment_tree_skips_more_stubs() {
        let payload = json!([
            { "kind": "Listing", "data": { "children": [] } },
            {
                "kind": "Listing",
                "data": {
                    "children": [
                        {
                            "kind": "t1",
                            "data": { "id": "c1", "author": "scholar", "body": "A reply", "score": 9 }
                        },
                        {
                            "kind": "more",
                            "data": { "count": 12, "children": ["c2", "c3"] }
                        },
                        {
                            "kind": "t1",
                            "data": { "id": "c4", "body": "Another reply", "score": 3 }
                        }
                    ]
                }
            }
        ]);

        let comments = parse_comment_tree(&payload);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, "c1");
        assert_eq!(comments[0].author.as_deref(), Some("scholar"));
        assert_eq!(comments[1].score, 3);
    }

    #[test]
    fn raw_post_conversion_maps_stickied_to_pinned() {
        let data = RawPostData {
            id: "abc".to_string(),
            title: "Title".to_string(),
            selftext: "Body".to_string(),
            subreddit: "eldenringlore".to_string(),
            url: "https://reddit.com/x".to_string(),
            score: 11,
            stickied: true,
            over_18: false,
            created_utc: 1700000000.0,
            num_comments: 4,
            permalink: "/r/eldenringlore/abc".to_string(),
        };

        let raw: RawPost = data.into();
        assert_eq!(raw.id, "abc");
        assert_eq!(raw.body, "Body");
        assert!(raw.pinned);
    }
}
