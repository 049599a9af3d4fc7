use archivist_core::{ArchivistError, CollectorConfig, ErrorExt, ReplyRules, TopicRules};
use lore_archivist::{collect_and_save, Collector};
use reddit_client::RedditApiClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("collect=info,lore_archivist=info,reddit_client=info,archivist_core=info")
        .init();

    // Errors are reported to stdout and the process exits normally: a
    // failed collection must never look like a crash to the scheduler.
    if let Err(e) = run().await {
        println!("{}", e.user_friendly_message());
    }
}

async fn run() -> Result<(), ArchivistError> {
    let config = CollectorConfig::from_env()?;
    let output = config.output_file.clone();

    let client = RedditApiClient::connect(&config).await?;
    let collector = Collector::new(
        client,
        config,
        TopicRules::elden_ring(),
        ReplyRules::default(),
    );

    let count = collect_and_save(collector, &output).await?;
    println!("Done! Saved {} discussions to '{}'.", count, output.display());
    Ok(())
}
