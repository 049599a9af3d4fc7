//! Binds the collector's source boundary to the real Reddit client.

use crate::collector::{Page, PostSource, View};
use archivist_core::{ArchivistError, Reply};
use async_trait::async_trait;
use reddit_client::RedditApiClient;

/// How many top-level comments to pull per post before selection trims
/// them down to the configured few.
const COMMENT_FETCH_LIMIT: u32 = 25;

/// One page of posts per listing view. Both views come back in the same
/// listing envelope, so the mapping is mechanical.
#[async_trait]
impl PostSource for RedditApiClient {
    async fn listing_page(
        &mut self,
        subreddit: &str,
        view: &View,
        after: Option<String>,
    ) -> Result<Page, ArchivistError> {
        let listing = match view {
            View::Top { time } => {
                self.top_posts(subreddit, time, 100, after.as_deref()).await?
            }
            View::Search { query, time } => {
                self.search_posts(subreddit, query, time, 50, after.as_deref())
                    .await?
            }
        };

        Ok(Page {
            posts: listing
                .data
                .children
                .into_iter()
                .map(|child| child.data.into())
                .collect(),
            after: listing.data.after,
        })
    }

    async fn replies(&mut self, post_id: &str) -> Result<Vec<Reply>, ArchivistError> {
        let comments = self.top_comments(post_id, COMMENT_FETCH_LIMIT).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}
