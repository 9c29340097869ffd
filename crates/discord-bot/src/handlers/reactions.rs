use eyre::Result;
use serenity::model::channel::Reaction;
use serenity::model::guild::Member;
use serenity::model::id::{GuildId, RoleId, UserId};
use tablesync_core::models::reaction::RoleConfigEntry;
use tablesync_core::models::signup::MessagePurpose;
use tracing::{debug, error};

use crate::handlers::HandlerContext;
use crate::publish;

/// Route one raw reaction event.
///
/// A reaction is handled as a role toggle or as a roster signup, never both:
/// the role table lookup decides, independently of which message the
/// reaction landed on. Unresolvable lookups (member left, role renamed,
/// message deleted) silently abort this one reaction's effect.
pub async fn handle_reaction(ctx: HandlerContext, reaction: &Reaction, added: bool) -> Result<()> {
    let Some(user_id) = reaction.user_id else {
        return Ok(());
    };
    // The bot seeds every message with its own reactions.
    if user_id == ctx.ctx.cache.current_user_id() {
        return Ok(());
    }
    let Some(guild_id) = reaction.guild_id else {
        return Ok(());
    };

    let emoji = reaction.emoji.to_string();

    if let Some(entry) = ctx.config.role_for_emoji(&emoji) {
        toggle_role(&ctx, guild_id, user_id, entry, added).await;
        return Ok(());
    }

    // Not a role emoji: a signup toggle if the message is a tracked roster
    // and the emoji is a keycap within its slot range.
    let Some((event, slot)) = ({
        let book = ctx.book.lock().await;
        book.messages
            .get(&reaction.message_id.0)
            .and_then(|entry| match entry.purpose() {
                MessagePurpose::RoleSelection => None,
                MessagePurpose::Roster { event, .. } => {
                    let label = entry.slot_for_emoji(&emoji)?;
                    Some((event.to_string(), label.clone()))
                }
            })
    }) else {
        return Ok(());
    };

    let Some(member) = resolve_member(&ctx, guild_id, user_id).await else {
        debug!("Could not resolve member {} in guild {}", user_id, guild_id);
        return Ok(());
    };
    let display_name = member.display_name().to_string();

    // Mutate and persist in one critical section, with no await between
    // the membership check and the roster update.
    let changed = {
        let mut book = ctx.book.lock().await;
        let changed = book.toggle_signup(&event, &slot, &display_name, added);
        if changed {
            if let Err(e) = ctx.store.save(&book) {
                error!("Could not save signup data: {:?}", e);
            }
        }
        changed
    };

    if changed {
        publish::update_roster_message(&ctx.ctx, &ctx.book, reaction.message_id).await?;
    }

    Ok(())
}

/// Add or remove the configured self-service role on the reacting member.
/// Failures are swallowed: a missing role or member makes this reaction a
/// no-op, not an error.
async fn toggle_role(
    ctx: &HandlerContext,
    guild_id: GuildId,
    user_id: UserId,
    entry: &RoleConfigEntry,
    add: bool,
) {
    let Some(role_id) = resolve_role(ctx, guild_id, &entry.role).await else {
        debug!("Role {:?} not found in guild {}", entry.role, guild_id);
        return;
    };
    let Some(mut member) = resolve_member(ctx, guild_id, user_id).await else {
        debug!("Could not resolve member {} in guild {}", user_id, guild_id);
        return;
    };

    let result = if add {
        member.add_role(&ctx.ctx.http, role_id).await
    } else {
        member.remove_role(&ctx.ctx.http, role_id).await
    };

    if let Err(e) = result {
        debug!(
            "Could not toggle role {:?} for member {}: {:?}",
            entry.role, user_id, e
        );
    }
}

async fn resolve_member(ctx: &HandlerContext, guild_id: GuildId, user_id: UserId) -> Option<Member> {
    guild_id.member(&ctx.ctx, user_id).await.ok()
}

/// Resolve a guild role by exact name match.
async fn resolve_role(ctx: &HandlerContext, guild_id: GuildId, name: &str) -> Option<RoleId> {
    let roles = guild_id.roles(&ctx.ctx.http).await.ok()?;
    roles
        .into_iter()
        .find(|(_, role)| role.name == name)
        .map(|(id, _)| id)
}
