use archivist_core::{
    dataset, ArchivistError, ErrorExt, QualityRules, DEFAULT_OUTPUT_FILE, FILTERED_OUTPUT_FILE,
};
use lore_archivist::report;
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("filter=info,lore_archivist=info,archivist_core=info")
        .init();

    // Same exit discipline as the collector: report and end normally.
    if let Err(e) = run() {
        println!("{}", e.user_friendly_message());
    }
}

fn run() -> Result<(), ArchivistError> {
    let input = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

    println!("Loading posts from {}...", input.display());
    let posts = dataset::load_dataset(&input)?;
    println!("Total posts: {}", posts.len());
    println!("Applying aggressive lore filter...");
    println!();

    let outcome = QualityRules::strict().filter_posts(posts);
    report::print_summary(&outcome);

    let output = PathBuf::from(FILTERED_OUTPUT_FILE);
    dataset::save_dataset(&output, &outcome.kept)?;
    println!();
    println!("Saved to {}", output.display());
    Ok(())
}
