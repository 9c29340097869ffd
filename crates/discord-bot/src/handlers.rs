use serenity::{
    async_trait,
    model::{
        application::interaction::{
            Interaction,
            InteractionResponseType,
        },
        channel::Reaction,
        gateway::Ready,
    },
    prelude::*,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tablesync_core::models::signup::SignupBook;
use tablesync_store::JsonStore;
use tokio::sync::Mutex;
use tracing::{error, info};

pub mod reactions;
pub mod signup;

use crate::config::BotConfig;

/// Main Discord handler that processes all events.
///
/// This handler is responsible for responding to Discord events like ready
/// events, commands and raw reactions. It owns the signup book behind a
/// single mutex so every state mutation goes through one serialized path,
/// and persists through the store after each successful mutation.
pub struct Handler {
    config: BotConfig,
    store: JsonStore,
    book: Arc<Mutex<SignupBook>>,
    scheduler_started: AtomicBool,
}

impl Handler {
    /// Create a new handler
    pub fn new(config: BotConfig, store: JsonStore, book: SignupBook) -> Self {
        Self {
            config,
            store,
            book: Arc::new(Mutex::new(book)),
            scheduler_started: AtomicBool::new(false),
        }
    }

    fn handler_context(&self, ctx: Context) -> HandlerContext {
        HandlerContext {
            ctx,
            config: self.config.clone(),
            store: self.store.clone(),
            book: self.book.clone(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Handle ready events (when bot connects to Discord)
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // For dev testing, register for a specific guild to avoid the global
        // command cache delay.
        if let Some(test_guild_id) = self.config.test_guild_id {
            let guild_id = serenity::model::id::GuildId(test_guild_id);

            match guild_id
                .set_application_commands(&ctx.http, |commands| {
                    crate::commands::register_commands(commands)
                })
                .await
            {
                Ok(cmds) => {
                    info!(
                        "Guild commands registered successfully for {}! Total commands: {}",
                        test_guild_id,
                        cmds.len()
                    );
                }
                Err(why) => {
                    error!("Error registering guild commands: {:?}", why);
                }
            }
        }

        // Also register commands globally (visible in all servers, but with cache delay)
        match serenity::model::application::command::Command::set_global_application_commands(
            &ctx.http,
            |commands| crate::commands::register_commands(commands),
        )
        .await
        {
            Ok(cmds) => {
                info!(
                    "Global commands registered successfully! Total commands: {}",
                    cmds.len()
                );
                for cmd in cmds {
                    info!("Command registered: /{} - {}", cmd.name, cmd.description);
                }
            }
            Err(why) => {
                error!("Error registering global commands: {:?}", why);
            }
        }

        // Spawn the hourly scheduler exactly once; ready fires again on
        // every reconnect.
        if !self.scheduler_started.swap(true, Ordering::SeqCst) {
            tokio::spawn(crate::scheduler::run(self.handler_context(ctx)));
        }
    }

    /// Handle interactions (slash commands)
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            info!("Received command: {}", command.data.name);

            // Create a context with shared data
            let handler_ctx = self.handler_context(ctx.clone());

            let result = match command.data.name.as_str() {
                "event" => signup::handle_event_command(handler_ctx, &command).await,
                "rolemsg" => signup::handle_rolemsg_command(handler_ctx, &command).await,
                "autoevent" => signup::handle_autoevent_command(handler_ctx, &command).await,
                _ => {
                    error!("Unknown command: {}", command.data.name);
                    Err(eyre::eyre!("Unknown command"))
                }
            };

            if let Err(e) = result {
                error!("Error handling command: {:?}", e);

                // Try to respond with error
                if let Err(why) = command
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|m| {
                                m.content(format!("Error: {}", e)).ephemeral(true)
                            })
                    })
                    .await
                {
                    error!("Failed to send error response: {:?}", why);
                }
            }
        }
    }

    /// Handle raw reaction adds (signups and role self-assignment)
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let handler_ctx = self.handler_context(ctx);
        if let Err(e) = reactions::handle_reaction(handler_ctx, &reaction, true).await {
            error!("Error handling reaction add: {:?}", e);
        }
    }

    /// Handle raw reaction removals (signup withdrawals and role removal)
    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        let handler_ctx = self.handler_context(ctx);
        if let Err(e) = reactions::handle_reaction(handler_ctx, &reaction, false).await {
            error!("Error handling reaction remove: {:?}", e);
        }
    }
}

/// Shared context for command and reaction handlers.
///
/// This struct provides a convenient way to pass the Discord context, bot
/// configuration, persistence store and the shared signup book to handlers.
pub struct HandlerContext {
    pub ctx: Context,
    pub config: BotConfig,
    pub store: JsonStore,
    pub book: Arc<Mutex<SignupBook>>,
}
