//! Hourly recurrence tick: sweep expired roster messages, then publish any
//! rule matching the current UTC hour.

use std::collections::HashSet;

use chrono::Utc;
use eyre::Result;
use serenity::model::id::ChannelId;
use tablesync_core::models::signup::ROLE_MESSAGE_EVENT;
use tokio::time::{Duration, interval};
use tracing::{debug, error, info};

use crate::handlers::HandlerContext;
use crate::publish;

const TICK_SECONDS: u64 = 3600;

/// Roster messages older than this are swept together with their events.
const MAX_MESSAGE_AGE_SECONDS: i64 = 7 * 24 * 3600;

/// Run the scheduler until the process exits. Spawned once from `ready`.
pub async fn run(ctx: HandlerContext) {
    // Occurrence names published by this process. Rule matching is only
    // hour-granular, so without this a second tick landing in the same hour
    // would publish the same occurrence twice. A restart within a matching
    // hour can still duplicate; the set is not persisted.
    let mut published: HashSet<String> = HashSet::new();

    let mut ticker = interval(Duration::from_secs(TICK_SECONDS));
    loop {
        ticker.tick().await;
        if let Err(e) = tick(&ctx, &mut published).await {
            error!("Scheduler tick failed: {:?}", e);
        }
    }
}

async fn tick(ctx: &HandlerContext, published: &mut HashSet<String>) -> Result<()> {
    cleanup_expired(ctx).await;

    let now = Utc::now();
    let today = now.date_naive();
    let channel = ChannelId(ctx.config.events_channel_id);

    for rule in &ctx.config.simple_rules {
        if !rule.due_at(now, ctx.config.publish_hour) {
            continue;
        }
        let name = rule.occurrence_name(today);
        if published.contains(&name) {
            debug!("Occurrence {:?} already published this hour", name);
            continue;
        }
        publish::publish_roster(&ctx.ctx, &ctx.book, &ctx.store, channel, &name, &rule.times)
            .await?;
        published.insert(name);
    }

    for rule in &ctx.config.advanced_rules {
        if !rule.due_at(now) {
            continue;
        }
        let name = rule.occurrence_name(today);
        if published.contains(&name) {
            debug!("Occurrence {:?} already published this hour", name);
            continue;
        }
        publish::publish_roster(&ctx.ctx, &ctx.book, &ctx.store, channel, &name, &rule.times)
            .await?;
        published.insert(name);
    }

    Ok(())
}

/// Delete roster messages older than seven days together with their events,
/// then persist once if anything changed.
///
/// Ages come from re-fetching each message, not from a stored timestamp. A
/// fetch failure leaves the entry alone for a later tick. The role-selection
/// message is long-lived and never swept.
pub async fn cleanup_expired(ctx: &HandlerContext) {
    let entries: Vec<(u64, u64, String)> = {
        let book = ctx.book.lock().await;
        book.messages
            .iter()
            .filter(|(_, entry)| entry.event != ROLE_MESSAGE_EVENT)
            .map(|(id, entry)| (*id, entry.channel_id, entry.event.clone()))
            .collect()
    };

    let now = Utc::now().timestamp();
    let mut expired = Vec::new();
    for (message_id, channel_id, event) in entries {
        let Ok(message) = ChannelId(channel_id).message(&ctx.ctx.http, message_id).await else {
            continue;
        };
        if now - message.timestamp.unix_timestamp() < MAX_MESSAGE_AGE_SECONDS {
            continue;
        }

        if let Err(e) = message.delete(&ctx.ctx.http).await {
            debug!("Could not delete expired message {}: {:?}", message_id, e);
        }
        info!("Sweeping expired event {:?}", event);
        expired.push(message_id);
    }

    if expired.is_empty() {
        return;
    }

    let mut book = ctx.book.lock().await;
    for message_id in expired {
        book.forget_message(message_id);
    }
    if let Err(e) = ctx.store.save(&book) {
        error!("Could not save signup data: {:?}", e);
    }
}
