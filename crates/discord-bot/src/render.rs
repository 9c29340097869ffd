//! Embed rendering for roster and role-selection messages.
//!
//! The field strings are built by plain functions so the layout can be
//! tested without a Discord connection; the builders only assemble them.

use serenity::builder::CreateEmbed;
use serenity::utils::Color;
use tablesync_core::models::reaction::{RoleConfigEntry, index_emoji};
use tablesync_core::models::signup::{SlotRosters, TableCount};

/// Field body shown for a slot nobody picked yet.
pub const EMPTY_SLOT_MARKER: &str = "No one signed up yet";

/// Field title for slot `index`: the 1-based keycap emoji and the label.
pub fn slot_field_name(index: usize, label: &str) -> String {
    match index_emoji(index) {
        Some(emoji) => format!("{} {}", emoji, label),
        // Unreachable for tracked rosters (slot count is capped), kept as a
        // readable fallback.
        None => format!("{}. {}", index + 1, label),
    }
}

/// Field body for one slot: the signups in order plus the table capacity
/// line, or the empty marker.
pub fn slot_field_value(roster: &[String]) -> String {
    if roster.is_empty() {
        return EMPTY_SLOT_MARKER.to_string();
    }

    let tables = TableCount::for_signups(roster.len());
    let capacity = if tables.needed == 0 {
        format!("🪑 Tables: {} (full)", tables.full)
    } else {
        format!(
            "🪑 Tables: {}, ❗ {} more needed for the next table",
            tables.full, tables.needed
        )
    };

    format!("{}\n{}", roster.join("\n"), capacity)
}

/// Fill `embed` with the roster view of an event: one field per slot, in
/// the message's original slot order.
pub fn apply_roster_embed<'a>(
    embed: &'a mut CreateEmbed,
    name: &str,
    slots: &[String],
    rosters: Option<&SlotRosters>,
) -> &'a mut CreateEmbed {
    embed
        .title(format!("📅 Event: {}", name))
        .description("React with a slot number to sign up.")
        .color(Color::DARK_GREEN);

    for (index, label) in slots.iter().enumerate() {
        let empty = Vec::new();
        let roster = rosters
            .and_then(|rosters| rosters.get(label))
            .unwrap_or(&empty);
        embed.field(slot_field_name(index, label), slot_field_value(roster), true);
    }

    embed
}

/// Fill `embed` with the role-selection view: one field per configured role.
pub fn apply_role_embed<'a>(
    embed: &'a mut CreateEmbed,
    roles: &[RoleConfigEntry],
) -> &'a mut CreateEmbed {
    embed
        .title("🎭 Pick your roles")
        .description("React with an emoji to take a role; remove the reaction to drop it.")
        .color(Color::BLUE);

    for entry in roles {
        embed.field(
            format!("{} {}", entry.emoji, entry.role),
            &entry.description,
            false,
        );
    }

    embed
}
