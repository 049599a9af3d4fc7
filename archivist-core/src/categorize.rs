//! Topic bucket assignment over combined title+body text.

/// An ordered list of (label, keywords) buckets plus a fallback label.
///
/// Declaration order is the tie-break: the first bucket with any keyword
/// present wins, not the bucket with the most matches. Keywords are matched
/// as case-insensitive substrings.
#[derive(Debug, Clone)]
pub struct TopicRules {
    buckets: Vec<(String, Vec<String>)>,
    default_label: String,
}

impl TopicRules {
    pub fn new(buckets: Vec<(String, Vec<String>)>, default_label: impl Into<String>) -> Self {
        let buckets = buckets
            .into_iter()
            .map(|(label, kws)| (label, kws.into_iter().map(|k| k.to_lowercase()).collect()))
            .collect();
        Self {
            buckets,
            default_label: default_label.into(),
        }
    }

    /// The lore topic buckets used by the archivist. Order matters.
    pub fn elden_ring() -> Self {
        fn bucket(label: &str, kws: &[&str]) -> (String, Vec<String>) {
            (
                label.to_string(),
                kws.iter().map(|k| k.to_string()).collect(),
            )
        }

        Self::new(
            vec![
                bucket(
                    "The Outer Gods & Cosmos",
                    &[
                        "greater will",
                        "frenzied flame",
                        "formless mother",
                        "fell god",
                        "dark moon",
                        "astel",
                        "fallingstar",
                        "void",
                        "stars",
                    ],
                ),
                bucket(
                    "The Empyreans & Demigods",
                    &[
                        "ranni",
                        "miquella",
                        "malenia",
                        "radahn",
                        "rykard",
                        "morgott",
                        "mohg",
                        "godwyn",
                        "messmer",
                        "gloam-eyed",
                        "trina",
                    ],
                ),
                bucket(
                    "History & Factions",
                    &[
                        "numen",
                        "nox",
                        "eternal city",
                        "marika",
                        "radagon",
                        "golden order",
                        "erdtree",
                        "crucible",
                        "misbegotten",
                        "albinauric",
                    ],
                ),
                bucket(
                    "Death & Destined Death",
                    &[
                        "godskin",
                        "black flame",
                        "maliketh",
                        "destined death",
                        "deathroot",
                        "fia",
                        "those who live in death",
                    ],
                ),
                bucket(
                    "Dragons & Beasts",
                    &[
                        "placidusax",
                        "gransax",
                        "fortissax",
                        "lansseax",
                        "bayle",
                        "farum azula",
                        "beastman",
                        "serosh",
                    ],
                ),
            ],
            "General Lore",
        )
    }

    /// Assigns exactly one category label to the given text. Pure and
    /// deterministic: first declared bucket with a matching keyword wins,
    /// otherwise the default label.
    pub fn categorize(&self, text: &str) -> &str {
        let text = text.to_lowercase();
        for (label, keywords) in &self.buckets {
            if keywords.iter().any(|k| text.contains(k.as_str())) {
                return label;
            }
        }
        &self.default_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_rules() -> TopicRules {
        TopicRules::new(
            vec![
                (
                    "Cosmos".to_string(),
                    vec!["greater will".to_string(), "stars".to_string()],
                ),
                (
                    "Demigods".to_string(),
                    vec!["Ranni".to_string(), "miquella".to_string()],
                ),
            ],
            "General Lore",
        )
    }

    #[test]
    fn first_declared_bucket_wins() {
        let rules = small_rules();
        // Matches keywords from both buckets; earlier declaration wins.
        assert_eq!(
            rules.categorize("ranni wished upon the stars"),
            "Cosmos"
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let rules = small_rules();
        assert_eq!(rules.categorize("RANNI the witch"), "Demigods");
        assert_eq!(rules.categorize("ranni the witch"), "Demigods");
    }

    #[test]
    fn no_match_falls_back_to_default() {
        let rules = small_rules();
        assert_eq!(rules.categorize("a post about nothing"), "General Lore");
    }

    #[test]
    fn categorize_is_deterministic() {
        let rules = TopicRules::elden_ring();
        let text = "Marika and Radagon under the Erdtree";
        let first = rules.categorize(text).to_string();
        for _ in 0..10 {
            assert_eq!(rules.categorize(text), first);
        }
    }

    #[test]
    fn full_buckets_keep_declaration_order() {
        let rules = TopicRules::elden_ring();
        // "stars" (bucket 1) and "ranni" (bucket 2) both present.
        assert_eq!(
            rules.categorize("Ranni and the stars"),
            "The Outer Gods & Cosmos"
        );
    }
}
