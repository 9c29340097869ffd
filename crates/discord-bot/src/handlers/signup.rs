use chrono::{Datelike, Utc};
use eyre::Result;
use serenity::model::application::interaction::{
    InteractionResponseType,
    application_command::{ApplicationCommandInteraction, CommandDataOption},
};
use serenity::model::channel::ReactionType;
use serenity::model::id::ChannelId;
use tablesync_core::models::recurrence::weekday_from_fragment;
use tablesync_core::models::signup::{MAX_SLOTS, ROLE_MESSAGE_EVENT, TrackedMessage};
use tracing::error;

use crate::handlers::HandlerContext;
use crate::{publish, render, scheduler};

/// Handle the /event command: post a signup roster to the invoking channel.
pub async fn handle_event_command(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    if !is_organizer(&ctx, command).await? {
        return respond_text(
            &ctx,
            command,
            &format!(
                "You need the {} role to create events.",
                ctx.config.organizer_role
            ),
        )
        .await;
    }

    let name = get_option_string(&command.data.options, "name")?;
    let times = get_option_string(&command.data.options, "times")?;
    let slots: Vec<String> = times.split_whitespace().map(|s| s.to_string()).collect();

    if slots.is_empty() {
        return respond_text(
            &ctx,
            command,
            "Provide at least one slot time, e.g. `18:00 19:30`.",
        )
        .await;
    }
    if slots.len() > MAX_SLOTS {
        return respond_text(
            &ctx,
            command,
            &format!("An event can offer at most {} slots.", MAX_SLOTS),
        )
        .await;
    }

    publish::publish_roster(
        &ctx.ctx,
        &ctx.book,
        &ctx.store,
        command.channel_id,
        &name,
        &slots,
    )
    .await?;

    respond_text(
        &ctx,
        command,
        &format!("Event **{}** created with {} slots.", name, slots.len()),
    )
    .await
}

/// Handle the /rolemsg command: create the role-selection message, or edit
/// the existing one in place.
pub async fn handle_rolemsg_command(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    if !is_administrator(command) {
        return respond_text(
            &ctx,
            command,
            "Only administrators can manage the role message.",
        )
        .await;
    }

    let existing = {
        let book = ctx.book.lock().await;
        book.role_message().map(|(id, entry)| (id, entry.channel_id))
    };

    if let Some((message_id, channel_id)) = existing {
        let result = ChannelId(channel_id)
            .edit_message(&ctx.ctx.http, message_id, |m| {
                m.embed(|e| render::apply_role_embed(e, &ctx.config.roles))
            })
            .await;

        return match result {
            Ok(_) => respond_text(&ctx, command, "Updated the existing role message.").await,
            Err(e) => {
                respond_text(
                    &ctx,
                    command,
                    &format!("Could not edit the role message: {}", e),
                )
                .await
            }
        };
    }

    let message = command
        .channel_id
        .send_message(&ctx.ctx.http, |m| {
            m.embed(|e| render::apply_role_embed(e, &ctx.config.roles))
        })
        .await?;
    for entry in &ctx.config.roles {
        message
            .react(&ctx.ctx.http, ReactionType::Unicode(entry.emoji.clone()))
            .await?;
    }

    {
        let mut book = ctx.book.lock().await;
        book.track(
            message.id.0,
            TrackedMessage {
                event: ROLE_MESSAGE_EVENT.to_string(),
                slots: Vec::new(),
                channel_id: message.channel_id.0,
            },
        );
        if let Err(e) = ctx.store.save(&book) {
            error!("Could not save signup data: {:?}", e);
        }
    }

    respond_text(&ctx, command, "Created a new role message.").await
}

/// Handle the /autoevent command: manually publish an auto event.
///
/// Resolution order for the optional target: a weekday fragment against the
/// simple table first, then a case-insensitive substring against advanced
/// rule names; with no target, today's weekday against the simple table.
pub async fn handle_autoevent_command(
    ctx: HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    if !is_administrator(command) {
        return respond_text(
            &ctx,
            command,
            "Only administrators can trigger auto events.",
        )
        .await;
    }

    // Same sweep the hourly tick starts with.
    scheduler::cleanup_expired(&ctx).await;

    let channel = ChannelId(ctx.config.events_channel_id);
    let target = get_option_string(&command.data.options, "target").ok();
    let today = Utc::now().date_naive();

    if let Some(target) = &target {
        if let Some(weekday) = weekday_from_fragment(target) {
            if let Some(rule) = ctx
                .config
                .simple_rules
                .iter()
                .find(|rule| rule.weekday == weekday)
                .cloned()
            {
                let name = rule.occurrence_name(today);
                publish::publish_roster(&ctx.ctx, &ctx.book, &ctx.store, channel, &name, &rule.times)
                    .await?;
                return respond_text(&ctx, command, &format!("Created auto event **{}**.", name))
                    .await;
            }
        }

        let needle = target.to_lowercase();
        if let Some(rule) = ctx
            .config
            .advanced_rules
            .iter()
            .find(|rule| rule.name.to_lowercase().contains(&needle))
            .cloned()
        {
            let name = rule.occurrence_name(today);
            publish::publish_roster(&ctx.ctx, &ctx.book, &ctx.store, channel, &name, &rule.times)
                .await?;
            return respond_text(
                &ctx,
                command,
                &format!("Created scheduled event **{}**.", name),
            )
            .await;
        }
    } else {
        let weekday = Utc::now().weekday();
        if let Some(rule) = ctx
            .config
            .simple_rules
            .iter()
            .find(|rule| rule.weekday == weekday)
            .cloned()
        {
            let name = rule.occurrence_name(today);
            publish::publish_roster(&ctx.ctx, &ctx.book, &ctx.store, channel, &name, &rule.times)
                .await?;
            return respond_text(
                &ctx,
                command,
                &format!("Created today's auto event **{}**.", name),
            )
            .await;
        }
    }

    respond_text(
        &ctx,
        command,
        "No matching day or event found. Check the weekday or event name.",
    )
    .await
}

/// Whether the invoker holds the configured organizer role. Administrators
/// always pass.
async fn is_organizer(
    ctx: &HandlerContext,
    command: &ApplicationCommandInteraction,
) -> Result<bool> {
    let member = command
        .member
        .as_ref()
        .ok_or_else(|| eyre::eyre!("Command must be used in a server"))?;
    if is_administrator(command) {
        return Ok(true);
    }

    let guild_id = command
        .guild_id
        .ok_or_else(|| eyre::eyre!("Command must be used in a server"))?;
    let roles = guild_id.roles(&ctx.ctx.http).await?;

    Ok(member.roles.iter().any(|role_id| {
        roles
            .get(role_id)
            .map_or(false, |role| role.name == ctx.config.organizer_role)
    }))
}

fn is_administrator(command: &ApplicationCommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map_or(false, |permissions| permissions.administrator())
}

/// Send an ephemeral text reply to the invoker.
async fn respond_text(
    ctx: &HandlerContext,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&ctx.ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(content).ephemeral(true))
        })
        .await?;

    Ok(())
}

/// Extract a string option from a command
fn get_option_string(options: &[CommandDataOption], name: &str) -> Result<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| eyre::eyre!("Missing {} parameter", name))
}
