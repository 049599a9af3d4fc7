use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One archived lore discussion, as persisted in the dataset file.
///
/// Field names are the wire format and must stay stable: the dataset is a
/// plain JSON array of these objects, read and written wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub url: String,
    pub score: i64,
    pub subreddit: String,
    #[serde(default)]
    pub body: String,
    pub category: String,
    pub scraped_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Reply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A community reply attached to a [`Post`], capped at 3 per post and kept
/// in descending score order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
}

/// A candidate post as it arrives from a listing or search view, before
/// admission rules, categorization, and reply enrichment.
#[derive(Debug, Clone)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub url: String,
    pub subreddit: String,
    pub score: i64,
    pub pinned: bool,
}

/// The full persisted sequence of posts for one collection run or one
/// filter pass.
pub type Dataset = Vec<Post>;
