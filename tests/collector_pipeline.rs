use archivist_core::{ArchivistError, CollectorConfig, RawPost, Reply, ReplyRules, TopicRules};
use async_trait::async_trait;
use lore_archivist::{collect_and_save, Collector, Page, PostSource, View};
use std::collections::HashMap;
use std::fs;

/// Serves a fixed queue of pages, one per listing call, and canned
/// replies per post id. No pacing, no retries: the collector under test
/// owns neither.
struct StubSource {
    pages: Vec<Page>,
    calls: usize,
    replies: HashMap<String, Vec<Reply>>,
}

impl StubSource {
    fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            calls: 0,
            replies: HashMap::new(),
        }
    }

    fn with_replies(mut self, post_id: &str, replies: Vec<Reply>) -> Self {
        self.replies.insert(post_id.to_string(), replies);
        self
    }
}

#[async_trait]
impl PostSource for StubSource {
    async fn listing_page(
        &mut self,
        _subreddit: &str,
        _view: &View,
        _after: Option<String>,
    ) -> Result<Page, ArchivistError> {
        let page = self.pages.get(self.calls).cloned().unwrap_or_default();
        self.calls += 1;
        Ok(page)
    }

    async fn replies(&mut self, post_id: &str) -> Result<Vec<Reply>, ArchivistError> {
        Ok(self.replies.get(post_id).cloned().unwrap_or_default())
    }
}

fn test_config() -> CollectorConfig {
    let mut config = CollectorConfig::canonical();
    config.subreddits = vec!["eldenringlore".to_string()];
    config.search_queries = vec!["title:timeline".to_string()];
    config
}

fn raw(id: &str, title: &str, score: i64) -> RawPost {
    RawPost {
        id: id.to_string(),
        title: title.to_string(),
        body: format!(
            "{title}. A body long enough to clear the one hundred fifty \
             character admission floor, with room to spare so the length \
             gate is never the thing a test trips over accidentally."
        ),
        url: format!("https://reddit.com/r/eldenringlore/{id}"),
        subreddit: "eldenringlore".to_string(),
        score,
        pinned: false,
    }
}

fn reply(score: i64, body: &str) -> Reply {
    Reply {
        author: Some("scholar".to_string()),
        body: body.to_string(),
        score,
    }
}

fn collector(source: StubSource) -> Collector<StubSource> {
    Collector::new(
        source,
        test_config(),
        TopicRules::elden_ring(),
        ReplyRules::default(),
    )
}

#[tokio::test]
async fn repeated_id_across_batches_keeps_first_seen() {
    // One subreddit, one search query: two listing calls, one page each.
    let pages = vec![
        Page {
            posts: vec![raw("dup", "First arrival", 30), raw("b", "Another post", 25)],
            after: None,
        },
        Page {
            posts: vec![raw("dup", "Second arrival", 99), raw("c", "Third post", 20)],
            after: None,
        },
    ];

    let posts = collector(StubSource::new(pages)).run().await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["dup", "b", "c"]);
    // First-seen version survives, arrival order is preserved.
    assert_eq!(posts[0].title, "First arrival");
}

#[tokio::test]
async fn admission_rules_gate_in_order() {
    let mut pinned = raw("pin", "Weekly announcement", 500);
    pinned.pinned = true;
    let mut short = raw("short", "Tiny", 50);
    short.body = "Too short to archive.".to_string();

    let pages = vec![Page {
        posts: vec![
            pinned,
            raw("low", "Low score musing", 9),
            short,
            raw("keep", "A real discussion", 10),
        ],
        after: None,
    }];

    let posts = collector(StubSource::new(pages)).run().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "keep");
}

#[tokio::test]
async fn admitted_posts_are_categorized_and_enriched() {
    let mut post = raw("ranni", "On Ranni and the stars she hid", 40);
    post.body.push_str(" Ranni worked her will against the Greater Will.");

    let long = "A reply with enough substance to pass the thirty character gate.";
    let source = StubSource::new(vec![Page {
        posts: vec![post],
        after: None,
    }])
    .with_replies(
        "ranni",
        vec![
            reply(10, long),
            reply(8, long),
            reply(9, long),
            reply(3, long),
            reply(20, long),
        ],
    );

    let posts = collector(source).run().await.unwrap();
    assert_eq!(posts.len(), 1);
    // "stars" belongs to the first-declared bucket, which wins over Ranni's.
    assert_eq!(posts[0].category, "The Outer Gods & Cosmos");

    let scores: Vec<i64> = posts[0].comments.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![20, 10, 9]);
}

#[tokio::test]
async fn page_cursor_is_followed_up_to_the_cap() {
    // Top view: two pages chained by a cursor; the cap of 2 stops there.
    // Search view: nothing.
    let pages = vec![
        Page {
            posts: vec![raw("p1", "Page one post", 20)],
            after: Some("cursor".to_string()),
        },
        Page {
            posts: vec![raw("p2", "Page two post", 20)],
            after: Some("never-followed".to_string()),
        },
        Page::default(),
    ];

    let source = StubSource::new(pages);
    let posts = collector(source).run().await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn empty_run_leaves_previous_dataset_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lore_data.json");
    let previous = br#"[{"precious": "data"}]"#;
    fs::write(&path, previous).unwrap();

    // Every view yields empty pages.
    let result = collect_and_save(collector(StubSource::new(vec![])), &path).await;

    assert!(matches!(
        result,
        Err(ArchivistError::EmptyCollection { .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), previous.to_vec());
}

#[tokio::test]
async fn successful_run_overwrites_the_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lore_data.json");
    fs::write(&path, "[]").unwrap();

    let pages = vec![Page {
        posts: vec![raw("fresh", "A fresh discussion", 15)],
        after: None,
    }];

    let count = collect_and_save(collector(StubSource::new(pages)), &path)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("A fresh discussion"));
}
