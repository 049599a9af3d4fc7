use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OUTPUT_FILE: &str = "lore_data.json";
pub const FILTERED_OUTPUT_FILE: &str = "lore_data_filtered.json";

const CLIENT_ID_VAR: &str = "REDDIT_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "REDDIT_CLIENT_SECRET";

/// Configuration for one collection run. Everything except the credentials
/// has a fixed default; the keyword data driving categorization and reply
/// selection lives in [`crate::categorize::TopicRules`] and
/// [`crate::replies::ReplyRules`] and is passed in separately.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    /// Communities scanned in order; each gets the top listing plus every
    /// search query.
    pub subreddits: Vec<String>,
    /// Flair/title searches that reach into the deep archives beyond the
    /// monthly top listing.
    pub search_queries: Vec<String>,
    pub output_file: PathBuf,
    /// Pages fetched per listing view before moving on, even if the source
    /// still has more.
    pub page_cap: u32,
    /// Admission gate: posts below this score are not collected.
    pub min_score: i64,
    /// Admission gate: posts with a body shorter than this (in characters)
    /// are not collected.
    pub min_body_chars: usize,
    /// Polite pause before every request to the remote source.
    pub request_delay: Duration,
}

impl CollectorConfig {
    /// Reads credentials from the environment and fills in the canonical
    /// collection parameters.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id =
            std::env::var(CLIENT_ID_VAR).map_err(|_| ConfigError::MissingCredentials {
                var: CLIENT_ID_VAR.to_string(),
            })?;
        let client_secret =
            std::env::var(CLIENT_SECRET_VAR).map_err(|_| ConfigError::MissingCredentials {
                var: CLIENT_SECRET_VAR.to_string(),
            })?;

        Ok(Self {
            client_id,
            client_secret,
            ..Self::canonical()
        })
    }

    /// The fixed collection parameters, without credentials. Used directly
    /// by tests that never touch the network.
    pub fn canonical() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: "lore-archivist/2.0 (by /u/LoreBot)".to_string(),
            subreddits: vec![
                "eldenringlore".to_string(),
                "EldenRingLoreTalk".to_string(),
            ],
            search_queries: vec![
                r#"flair:"Lore Theory""#.to_string(),
                r#"flair:"Speculation""#.to_string(),
                r#"flair:"Analysis""#.to_string(),
                "title:timeline".to_string(),
                r#"title:"deep dive""#.to_string(),
            ],
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            page_cap: 2,
            min_score: 10,
            min_body_chars: 150,
            request_delay: Duration::from_secs(2),
        }
    }
}
