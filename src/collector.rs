//! The deduplicating collector: merges posts arriving from several listing
//! views and search queries into one dataset with no repeated ids.

use archivist_core::{
    dataset, ArchivistError, CollectorConfig, Post, RawPost, Reply, ReplyRules, TopicRules,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// A listing view over one community: the monthly top listing, or one of
/// the archive search queries.
#[derive(Debug, Clone)]
pub enum View {
    Top { time: String },
    Search { query: String, time: String },
}

impl View {
    /// Fresh content: the community's top posts of the last month.
    pub fn top_month() -> Self {
        View::Top {
            time: "month".to_string(),
        }
    }

    /// Deep archives: a top-sorted search over the last year.
    pub fn search_year(query: &str) -> Self {
        View::Search {
            query: query.to_string(),
            time: "year".to_string(),
        }
    }

    fn describe(&self) -> String {
        match self {
            View::Top { time } => format!("top/{time}"),
            View::Search { query, .. } => format!("search '{query}'"),
        }
    }
}

/// One page of raw posts plus the cursor for the next page, if any.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub posts: Vec<RawPost>,
    pub after: Option<String>,
}

/// The remote forum boundary as the collector sees it: one page of raw
/// posts per request, and an ordered reply list per admitted post.
/// Retries and pacing belong to the implementor, never to the collector.
#[async_trait]
pub trait PostSource {
    async fn listing_page(
        &mut self,
        subreddit: &str,
        view: &View,
        after: Option<String>,
    ) -> Result<Page, ArchivistError>;

    async fn replies(&mut self, post_id: &str) -> Result<Vec<Reply>, ArchivistError>;
}

/// Accumulates admitted posts across views, enforcing id uniqueness for
/// the whole run. Owned by a single task; no shared state.
pub struct Collector<S> {
    source: S,
    config: CollectorConfig,
    topics: TopicRules,
    reply_rules: ReplyRules,
    seen_ids: HashSet<String>,
    admitted: Vec<Post>,
}

impl<S: PostSource> Collector<S> {
    pub fn new(
        source: S,
        config: CollectorConfig,
        topics: TopicRules,
        reply_rules: ReplyRules,
    ) -> Self {
        Self {
            source,
            config,
            topics,
            reply_rules,
            seen_ids: HashSet::new(),
            admitted: Vec::new(),
        }
    }

    /// Runs the whole collection: every subreddit gets the monthly top
    /// listing plus each configured search query, in order. Individual
    /// view failures degrade to whatever was already gathered; a run that
    /// gathers nothing at all is an error, so a good prior dataset is
    /// never replaced by an empty one.
    pub async fn run(mut self) -> Result<Vec<Post>, ArchivistError> {
        info!("--- Starting deep dive collection ---");

        let subreddits = self.config.subreddits.clone();
        let queries = self.config.search_queries.clone();

        for subreddit in &subreddits {
            info!("Scanning r/{}", subreddit);
            self.collect_view(subreddit, View::top_month()).await;
            for query in &queries {
                self.collect_view(subreddit, View::search_year(query)).await;
            }
        }

        if self.admitted.is_empty() {
            return Err(ArchivistError::EmptyCollection {
                output: self.config.output_file.display().to_string(),
            });
        }

        info!("Collected {} discussions", self.admitted.len());
        Ok(self.admitted)
    }

    /// Walks one view page by page until the source runs out or the page
    /// cap is hit. A failed page ends the view early; the run continues
    /// with whatever was obtained.
    async fn collect_view(&mut self, subreddit: &str, view: View) {
        let mut after: Option<String> = None;

        for page_index in 0..self.config.page_cap {
            let page = match self
                .source
                .listing_page(subreddit, &view, after.clone())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "Skipping rest of {} on r/{} due to error: {}",
                        view.describe(),
                        subreddit,
                        e
                    );
                    return;
                }
            };

            debug!(
                "r/{} {} page {}: {} candidates",
                subreddit,
                view.describe(),
                page_index + 1,
                page.posts.len()
            );

            for raw in page.posts {
                self.admit(raw).await;
            }

            after = page.after;
            if after.is_none() {
                return;
            }
        }
    }

    /// Admission rules, applied in order: already seen, pinned, score
    /// floor, body length floor. Survivors are categorized, enriched with
    /// replies, and appended in arrival order.
    async fn admit(&mut self, raw: RawPost) {
        if self.seen_ids.contains(&raw.id) {
            return;
        }
        if raw.pinned {
            return;
        }
        if raw.score < self.config.min_score {
            return;
        }
        if raw.body.chars().count() < self.config.min_body_chars {
            return;
        }

        self.seen_ids.insert(raw.id.clone());

        let category = self
            .topics
            .categorize(&format!("{} {}", raw.title, raw.body))
            .to_string();

        // Reply enrichment is best-effort: an error here drops the
        // replies, not the post.
        let raw_replies = match self.source.replies(&raw.id).await {
            Ok(replies) => replies,
            Err(e) => {
                warn!("Skipping replies for {} due to error: {}", raw.id, e);
                Vec::new()
            }
        };
        let comments = self.reply_rules.select(raw_replies);

        self.admitted.push(Post {
            image_url: image_url_from(&raw.url),
            id: raw.id,
            title: raw.title,
            url: raw.url,
            score: raw.score,
            subreddit: raw.subreddit,
            body: raw.body,
            category,
            scraped_at: Utc::now(),
            comments,
        });
    }
}

/// Runs the collector and overwrites the dataset file with the result.
/// Nothing is written when the run admits zero posts.
pub async fn collect_and_save<S: PostSource>(
    collector: Collector<S>,
    path: &Path,
) -> Result<usize, ArchivistError> {
    let posts = collector.run().await?;
    dataset::save_dataset(path, &posts)?;
    Ok(posts.len())
}

fn image_url_from(url: &str) -> Option<String> {
    const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".webp"];
    let lower = url.to_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        Some(url.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_are_recognized_by_extension() {
        assert!(image_url_from("https://i.redd.it/map.PNG").is_some());
        assert!(image_url_from("https://i.redd.it/map.jpeg").is_some());
        assert!(image_url_from("https://reddit.com/r/eldenringlore/abc").is_none());
    }
}
