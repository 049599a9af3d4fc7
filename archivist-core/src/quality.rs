//! The aggressive lore filter: seven conjunctive rules deciding whether a
//! collected post is genuine lore discussion rather than gameplay noise.

use crate::types::{Dataset, Post};
use std::collections::HashSet;

/// How many rejected titles are kept as examples for the summary report.
/// Reporting only; never affects which posts survive.
pub const REMOVED_EXAMPLE_CAP: usize = 5;

/// Thresholds and word lists for the quality filter. All matching is
/// case-insensitive substring matching over the combined title+body text;
/// this is a deliberate heuristic and tokenized or fuzzy matching must not
/// be substituted for it.
#[derive(Debug, Clone)]
pub struct QualityRules {
    /// Rule 1: bodies shorter than this (characters) are rejected.
    pub min_body_chars: usize,
    /// Rule 2: posts below this score are rejected.
    pub min_score: i64,
    /// Rule 3: any of these phrases anywhere in the text rejects instantly.
    pub junk_phrases: Vec<String>,
    /// Rule 4: short titles (3 tokens or fewer) containing one of these
    /// are rejected.
    pub title_red_flags: Vec<String>,
    /// Rule 5: at least `min_distinct_keywords` different entries from this
    /// list must appear in the text.
    pub lore_keywords: Vec<String>,
    pub min_distinct_keywords: usize,
    /// Rule 6: splitting the body on '.' must yield at least this many
    /// segments.
    pub min_sentences: usize,
    /// Rule 7: more than this many '?' characters combined with a body
    /// shorter than `short_body_chars` rejects.
    pub max_question_marks: usize,
    pub short_body_chars: usize,
}

/// Result of one filter pass: survivors sorted by score descending plus
/// the numbers the summary report needs.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub kept: Dataset,
    pub total: usize,
    pub removed: usize,
    pub removed_examples: Vec<String>,
}

impl QualityRules {
    /// Strict lore filter: only keeps genuine lore content.
    pub fn strict() -> Self {
        Self {
            min_body_chars: 300,
            min_score: 5,
            junk_phrases: to_strings(JUNK_PHRASES),
            title_red_flags: to_strings(TITLE_RED_FLAGS),
            lore_keywords: to_strings(LORE_KEYWORDS),
            min_distinct_keywords: 2,
            min_sentences: 3,
            max_question_marks: 3,
            short_body_chars: 500,
        }
    }

    /// Applies all seven rules in order, short-circuiting at the first
    /// failure. Cheap length/score checks run before the list scans.
    pub fn is_lore_post(&self, post: &Post) -> bool {
        let title = post.title.to_lowercase();
        let body = post.body.to_lowercase();
        let text = format!("{title} {body}");

        // 1. Minimum length.
        if body.chars().count() < self.min_body_chars {
            return false;
        }

        // 2. Minimum score.
        if post.score < self.min_score {
            return false;
        }

        // 3. Instant reject on junk phrases.
        if self.junk_phrases.iter().any(|p| text.contains(p.as_str())) {
            return false;
        }

        // 4. Short titles made of red-flag words get no benefit of the doubt.
        let title_tokens = title.split_whitespace().count();
        if title_tokens <= 3
            && self
                .title_red_flags
                .iter()
                .any(|f| title.contains(f.as_str()))
        {
            return false;
        }

        // 5. Distinct lore keywords, deduped by keyword: the same keyword
        // appearing many times still counts once.
        let distinct: HashSet<&str> = self
            .lore_keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .map(|k| k.as_str())
            .collect();
        if distinct.len() < self.min_distinct_keywords {
            return false;
        }

        // 6. Crude sentence count: segments between literal periods.
        if body.split('.').count() < self.min_sentences {
            return false;
        }

        // 7. Many questions plus a short body reads as a help request.
        let question_marks = text.matches('?').count();
        if question_marks > self.max_question_marks && body.chars().count() < self.short_body_chars
        {
            return false;
        }

        true
    }

    /// Runs the filter over a whole dataset, collecting up to
    /// [`REMOVED_EXAMPLE_CAP`] rejected titles for the report, and sorts
    /// survivors by score descending (stable, so ties keep input order).
    pub fn filter_posts(&self, posts: Dataset) -> FilterOutcome {
        let total = posts.len();
        let mut kept: Dataset = Vec::new();
        let mut removed_examples = Vec::new();

        for post in posts {
            if self.is_lore_post(&post) {
                kept.push(post);
            } else if removed_examples.len() < REMOVED_EXAMPLE_CAP {
                removed_examples.push(post.title.clone());
            }
        }

        kept.sort_by(|a, b| b.score.cmp(&a.score));

        FilterOutcome {
            total,
            removed: total - kept.len(),
            kept,
            removed_examples,
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Instant-reject phrases: a post containing any of these is not lore.
const JUNK_PHRASES: &[&str] = &[
    // Gameplay help
    "help me",
    "stuck on",
    "can't beat",
    "how do i beat",
    "tips for",
    "struggling with",
    "need help",
    "any tips",
    "advice needed",
    // Build/stats
    "build advice",
    "weapon recommendation",
    "best build",
    "stat allocation",
    "respec",
    "what weapon",
    "which weapon",
    "best weapon for",
    "strength build",
    "dex build",
    "int build",
    "faith build",
    "quality build",
    "hybrid build",
    "op build",
    "meta build",
    // PvP/Multiplayer
    "pvp",
    "invasion",
    "invader",
    "co-op",
    "coop",
    "summon",
    "password",
    "dueling",
    "arena",
    "gank",
    "host",
    "phantom",
    // Trading/Requests
    "looking for",
    "trade",
    "giveaway",
    "free runes",
    "can someone drop",
    "anyone have",
    "spare",
    "duplicate",
    "mule",
    // Achievement/Progress
    "just beat",
    "just killed",
    "finally beat",
    "first time",
    "i did it",
    "platinum",
    "achievement",
    "trophy",
    "all bosses",
    // Questions without substance
    "is it worth",
    "should i",
    "when should",
    "where do i go",
    "what level",
    "how many",
    "which one",
    "better than",
    // Memes/Low effort
    "unpopular opinion",
    "hot take",
    "change my mind",
    "am i the only one",
    "does anyone else",
    "dae",
    "literally unplayable",
    // Technical issues
    "fps",
    "performance",
    "crash",
    "bug",
    "glitch",
    "error",
    "won't launch",
    "black screen",
    "stuttering",
    // Fashion/Screenshots
    "my character",
    "fashion souls",
    "drip",
    "bling",
    "screenshot",
    "photo mode",
    "look at",
    // Sales/Price
    "on sale",
    "worth buying",
    "price",
    "discount",
    "steam sale",
];

/// Titles of 3 words or fewer made of these are usually low quality.
const TITLE_RED_FLAGS: &[&str] = &[
    "question",
    "help",
    "confused",
    "stuck",
    "tips",
    "advice",
    "build",
    "weapon",
    "best",
    "op",
    "broken",
    "easy mode",
];

/// A genuine lore post mentions at least two different entries from here.
const LORE_KEYWORDS: &[&str] = &[
    "lore",
    "theory",
    "timeline",
    "story",
    "explained",
    "analysis",
    "interpretation",
    "marika",
    "radagon",
    "ranni",
    "miquella",
    "malenia",
    "mohg",
    "godwyn",
    "godfrey",
    "erdtree",
    "greater will",
    "outer god",
    "elden ring",
    "shattering",
    "elden lord",
    "demigod",
    "empyrean",
    "tarnished",
    "grace",
    "rune",
    "ending",
    "age of",
    "crucible",
    "dragon",
    "godskin",
    "numen",
    "nox",
    "eternal city",
    "nokron",
    "nokstella",
    "frenzied flame",
    "three fingers",
    "two fingers",
    "elden beast",
    "radabeast",
    "radahn",
    "morgott",
    "rykard",
    "messmer",
    "melina",
    "millicent",
    "renna",
    "destined death",
    "black flame",
    "gloam-eyed",
    "maliketh",
    "gurranq",
    "placidusax",
    "farum azula",
    "beastman",
    "dragon communion",
    "fell god",
    "fire giant",
    "forge",
    "flame of ruin",
    "formless mother",
    "blood star",
    "mohgwyn",
    "dynasty",
    "rot",
    "scarlet",
    "unalloyed",
    "needle",
    "haligtree",
    "carian",
    "raya lucaria",
    "moon",
    "rennala",
    "sorcery",
    "golden order",
    "fundamentalism",
    "corhyn",
    "goldmask",
    "deathroot",
    "those who live in death",
    "tibia mariner",
    "ancestral",
    "siofra",
    "ainsel",
    "spirit",
    "mimic",
    "albinauric",
    "latenna",
    "lobo",
    "phillia",
    "jar",
    "alexander",
    "living jar",
    "potentate",
    "dung eater",
    "omen",
    "curse",
    "seedbed",
    "volcano manor",
    "recusant",
    "tanith",
    "rya",
    "roundtable",
    "gideon",
    "nepheli",
    "fia",
    "rogier",
    "varre",
    "white mask",
    "bloody finger",
    "shabriri",
    "hyetta",
    "irina",
    "edgar",
    "sellen",
    "thops",
    "azur",
    "lusat",
    "hewg",
    "smithing",
    "mending rune",
    "trina",
    "sleep",
    "dream",
    "torch",
    "serpent",
    "blasphemous",
    "gelmir",
    "praetor",
    "inquisitor",
];
