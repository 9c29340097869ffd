//! Posting and refreshing roster messages.

use std::sync::Arc;

use eyre::Result;
use serenity::model::channel::{Message, ReactionType};
use serenity::model::id::{ChannelId, MessageId};
use serenity::prelude::Context;
use tablesync_core::models::reaction::index_emoji;
use tablesync_core::models::signup::{SignupBook, TrackedMessage};
use tablesync_store::JsonStore;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Create an event, post its roster embed, seed the numbered reactions and
/// track the message. Used by /event, /autoevent and the hourly scheduler.
pub async fn publish_roster(
    ctx: &Context,
    book: &Arc<Mutex<SignupBook>>,
    store: &JsonStore,
    channel_id: ChannelId,
    name: &str,
    slots: &[String],
) -> Result<Message> {
    {
        let mut book = book.lock().await;
        book.create_event(name, slots)?;
    }

    let message = channel_id
        .send_message(&ctx.http, |m| {
            m.embed(|e| crate::render::apply_roster_embed(e, name, slots, None))
        })
        .await?;

    for index in 0..slots.len() {
        if let Some(emoji) = index_emoji(index) {
            message
                .react(&ctx.http, ReactionType::Unicode(emoji))
                .await?;
        }
    }

    {
        let mut book = book.lock().await;
        book.track(
            message.id.0,
            TrackedMessage {
                event: name.to_string(),
                slots: slots.to_vec(),
                channel_id: channel_id.0,
            },
        );
        if let Err(e) = store.save(&book) {
            error!("Could not save signup data: {:?}", e);
        }
    }

    info!("Published roster message {} for event {:?}", message.id, name);
    Ok(message)
}

/// Re-render a tracked roster message after a signup change.
///
/// Unlike the lookups in the reaction path, a failure here is surfaced: the
/// message or its channel vanished while we still track it.
pub async fn update_roster_message(
    ctx: &Context,
    book: &Arc<Mutex<SignupBook>>,
    message_id: MessageId,
) -> Result<()> {
    let (event, slots, channel_id, rosters) = {
        let book = book.lock().await;
        let entry = book
            .messages
            .get(&message_id.0)
            .ok_or_else(|| eyre::eyre!("Message {} is not tracked", message_id))?;
        let rosters = book.events.get(&entry.event).cloned().unwrap_or_default();
        (
            entry.event.clone(),
            entry.slots.clone(),
            ChannelId(entry.channel_id),
            rosters,
        )
    };

    channel_id
        .edit_message(&ctx.http, message_id, |m| {
            m.embed(|e| crate::render::apply_roster_embed(e, &event, &slots, Some(&rosters)))
        })
        .await?;

    Ok(())
}
