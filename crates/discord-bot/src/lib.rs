use eyre::Result;
use serenity::{
    Client,
    prelude::GatewayIntents,
};
use tablesync_core::models::signup::SignupBook;
use tablesync_store::JsonStore;
use tracing::info;

pub mod commands;
pub mod config;
pub mod handlers;
pub mod keepalive;
pub mod publish;
pub mod render;
pub mod scheduler;

/// Start the Discord bot with the provided configuration, store and state.
///
/// This function initializes and runs the Discord bot with the given
/// configuration, persistence store and previously loaded signup book. It
/// will continue running until the bot disconnects or an error occurs.
///
/// # Arguments
///
/// * `config` - The bot configuration containing token, channel ids, etc.
/// * `store` - The flat-file store every mutation is persisted through
/// * `book` - The signup book loaded from the store at startup
///
/// # Returns
///
/// * `Ok(())` if the bot shut down gracefully
/// * `Err` if an error occurred during initialization or operation
pub async fn start_bot(config: config::BotConfig, store: JsonStore, book: SignupBook) -> Result<()> {
    info!("Starting Discord bot");

    // Create a new Discord client
    let handler = handlers::Handler::new(config.clone(), store, book);

    // Reaction routing needs guild, message and member context on top of
    // the reaction events themselves.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_MEMBERS;

    // Configure the client
    let mut client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await?;

    // Start the client
    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
