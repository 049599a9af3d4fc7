//! Selection of substantial replies to attach to an archived post.

use crate::types::Reply;

/// Gates applied to raw replies before the top few are kept.
///
/// Order of application matters and is fixed: filter, then sort by score
/// descending, then take the first `max_kept`. A long bot reply is dropped
/// by the marker check no matter how high it scored.
#[derive(Debug, Clone)]
pub struct ReplyRules {
    /// Replies at or below this score are discarded.
    pub min_score: i64,
    /// Replies with a body at or below this many characters are discarded.
    pub min_body_chars: usize,
    /// Lowercase marker substrings identifying bot disclaimers.
    pub bot_markers: Vec<String>,
    pub max_kept: usize,
}

impl Default for ReplyRules {
    fn default() -> Self {
        Self {
            min_score: 5,
            min_body_chars: 30,
            bot_markers: vec![
                "i am a bot".to_string(),
                "this action was performed automatically".to_string(),
            ],
            max_kept: 3,
        }
    }
}

impl ReplyRules {
    fn is_substantial(&self, reply: &Reply) -> bool {
        if reply.body.is_empty() {
            return false;
        }
        if reply.score <= self.min_score {
            return false;
        }
        if reply.body.chars().count() <= self.min_body_chars {
            return false;
        }
        let body = reply.body.to_lowercase();
        if self.bot_markers.iter().any(|m| body.contains(m.as_str())) {
            return false;
        }
        true
    }

    /// Keeps up to `max_kept` substantial replies, highest score first.
    pub fn select(&self, replies: Vec<Reply>) -> Vec<Reply> {
        let mut kept: Vec<Reply> = replies
            .into_iter()
            .filter(|r| self.is_substantial(r))
            .collect();
        kept.sort_by(|a, b| b.score.cmp(&a.score));
        kept.truncate(self.max_kept);
        kept
    }
}
