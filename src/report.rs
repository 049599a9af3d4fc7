//! Human-readable summary of one filter pass. This output is the
//! product of the `filter` binary, so it goes to stdout, not the log.

use archivist_core::FilterOutcome;

pub fn print_summary(outcome: &FilterOutcome) {
    println!("Lore posts: {}", outcome.kept.len());
    println!("Removed: {}", outcome.removed);
    println!();

    if !outcome.removed_examples.is_empty() {
        println!("Examples of removed posts:");
        for title in &outcome.removed_examples {
            println!("  - {}...", truncated(title, 70));
        }
        println!();
    }

    println!("Stats:");
    if outcome.kept.is_empty() {
        println!("  No posts passed the filter!");
        return;
    }

    let count = outcome.kept.len() as f64;
    let avg_score: f64 = outcome.kept.iter().map(|p| p.score as f64).sum::<f64>() / count;
    let avg_length: f64 = outcome
        .kept
        .iter()
        .map(|p| p.body.chars().count() as f64)
        .sum::<f64>()
        / count;
    println!("  Average score: {avg_score:.0}");
    println!("  Average length: {avg_length:.0} chars");
    println!();

    println!("Top 10 lore posts:");
    for (rank, post) in outcome.kept.iter().take(10).enumerate() {
        println!(
            "  {}. [{:4}] {}...",
            rank + 1,
            post.score,
            truncated(&post.title, 65)
        );
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncated("short", 70), "short");
        let long = "ä".repeat(100);
        assert_eq!(truncated(&long, 70).chars().count(), 70);
    }
}
