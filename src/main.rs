use color_eyre::eyre::Result;
use dotenv::dotenv;
use tablesync_discord_bot::{config::BotConfig, keepalive};
use tablesync_store::JsonStore;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting TableSync Discord bot");

    // Load environment variables
    dotenv().ok();

    // Load configuration; a missing token is fatal here, before anything
    // connects.
    let config = BotConfig::from_env()?;

    // Load the persisted signup book
    let store = JsonStore::new(config.data_file.clone());
    let book = store.load()?;

    // Keep-alive endpoint for the hosting platform, independent of bot state
    let port = config.keepalive_port;
    tokio::spawn(async move {
        if let Err(e) = keepalive::serve(port).await {
            error!("Keep-alive endpoint error: {}", e);
        }
    });

    // Start the Discord bot
    match tablesync_discord_bot::start_bot(config, store, book).await {
        Ok(_) => info!("Discord bot shut down gracefully"),
        Err(e) => error!("Discord bot error: {}", e),
    }

    Ok(())
}
