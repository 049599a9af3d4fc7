//! Application-only OAuth2: the client-credentials grant used by script
//! apps that read public listings without acting as a user.

use archivist_core::{ArchivistError, RedditApiError};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// A bearer token obtained via the client-credentials grant.
#[derive(Debug, Clone)]
pub struct AppToken {
    pub access_token: String,
    pub obtained_at: Instant,
    pub expires_in: Duration,
}

impl AppToken {
    pub fn is_expired(&self) -> bool {
        // Refresh a minute early rather than racing the deadline.
        self.obtained_at.elapsed() + Duration::from_secs(60) >= self.expires_in
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    expires_in: u64,
}

/// Exchanges app credentials for a bearer token.
pub async fn fetch_app_token(
    http: &Client,
    client_id: &str,
    client_secret: &str,
) -> Result<AppToken, ArchivistError> {
    debug!("Requesting application-only token");

    let response = http
        .post(TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RedditApiError::AuthenticationFailed {
            reason: format!("token endpoint returned {status}"),
        }
        .into());
    }

    let token: TokenResponse = response.json().await.map_err(|_| {
        ArchivistError::RedditApi(RedditApiError::InvalidResponse {
            details: "Failed to parse token response".to_string(),
        })
    })?;

    info!("Authenticated with Reddit (token valid {}s)", token.expires_in);
    Ok(AppToken {
        access_token: token.access_token,
        obtained_at: Instant::now(),
        expires_in: Duration::from_secs(token.expires_in),
    })
}
