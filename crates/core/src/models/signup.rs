use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SignupError, SignupResult};
use crate::models::reaction::emoji_to_index;

/// Event name reserved for the role-selection message. Not a real event:
/// its tracked message carries an empty slot tuple and is never swept.
pub const ROLE_MESSAGE_EVENT: &str = "role-selection";

/// People per table; signup counts are partitioned into groups of this size.
pub const TABLE_SIZE: usize = 4;

/// Most slots one event can offer; bounded by the ten keycap emoji.
pub const MAX_SLOTS: usize = 10;

/// One event's rosters: slot label -> ordered list of display names.
pub type SlotRosters = BTreeMap<String, Vec<String>>;

/// A previously sent Discord message and what it renders.
///
/// `slots` is a snapshot of the slot labels at creation time and bounds the
/// keycap indices accepted for this message. It is never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedMessage {
    pub event: String,
    pub slots: Vec<String>,
    pub channel_id: u64,
}

impl TrackedMessage {
    /// Slot label selected by a keycap reaction on this message. `None` for
    /// non-keycap emoji and for indices beyond this message's slot tuple.
    pub fn slot_for_emoji(&self, emoji: &str) -> Option<&String> {
        self.slots.get(emoji_to_index(emoji)?)
    }

    pub fn purpose(&self) -> MessagePurpose<'_> {
        if self.event == ROLE_MESSAGE_EVENT {
            MessagePurpose::RoleSelection
        } else {
            MessagePurpose::Roster {
                event: &self.event,
                slots: &self.slots,
            }
        }
    }
}

/// What a tracked message is for, resolved once at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePurpose<'a> {
    Roster { event: &'a str, slots: &'a [String] },
    RoleSelection,
}

/// The whole in-memory state of the bot: event rosters plus the messages
/// rendering them. Owned explicitly and passed into handlers; persisting it
/// is the caller's responsibility after each successful mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupBook {
    pub events: BTreeMap<String, SlotRosters>,
    pub messages: BTreeMap<u64, TrackedMessage>,
}

impl SignupBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize an event with one empty roster per slot, replacing any
    /// prior event of the same name.
    pub fn create_event(&mut self, name: &str, slots: &[String]) -> SignupResult<()> {
        if slots.is_empty() {
            return Err(SignupError::Validation(
                "an event needs at least one time slot".to_string(),
            ));
        }

        let rosters: SlotRosters = slots
            .iter()
            .map(|slot| (slot.clone(), Vec::new()))
            .collect();
        self.events.insert(name.to_string(), rosters);

        Ok(())
    }

    /// Add or remove a display name on one slot's roster.
    ///
    /// Idempotent: adding a present name or removing an absent one changes
    /// nothing. Returns whether the book changed, so callers can skip the
    /// save/re-render on a no-op.
    pub fn toggle_signup(&mut self, event: &str, slot: &str, display_name: &str, add: bool) -> bool {
        let Some(roster) = self.events.get_mut(event).and_then(|e| e.get_mut(slot)) else {
            return false;
        };

        let position = roster.iter().position(|name| name == display_name);
        match (add, position) {
            (true, None) => {
                roster.push(display_name.to_string());
                true
            }
            (false, Some(index)) => {
                roster.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn roster(&self, event: &str, slot: &str) -> Option<&Vec<String>> {
        self.events.get(event).and_then(|e| e.get(slot))
    }

    pub fn track(&mut self, message_id: u64, message: TrackedMessage) {
        self.messages.insert(message_id, message);
    }

    /// Drop an event together with the message that rendered it.
    pub fn forget_message(&mut self, message_id: u64) -> Option<TrackedMessage> {
        let entry = self.messages.remove(&message_id)?;
        self.events.remove(&entry.event);
        Some(entry)
    }

    /// The tracked role-selection message, if one was ever posted.
    pub fn role_message(&self) -> Option<(u64, &TrackedMessage)> {
        self.messages
            .iter()
            .find(|(_, entry)| entry.event == ROLE_MESSAGE_EVENT)
            .map(|(id, entry)| (*id, entry))
    }
}

/// Roster size partitioned into tables of [`TABLE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCount {
    /// Completely filled tables
    pub full: usize,
    /// Signups still missing to fill the next table; 0 when all tables are full
    pub needed: usize,
}

impl TableCount {
    pub fn for_signups(count: usize) -> Self {
        let full = count / TABLE_SIZE;
        let needed = match count % TABLE_SIZE {
            0 => 0,
            partial => TABLE_SIZE - partial,
        };
        Self { full, needed }
    }
}
