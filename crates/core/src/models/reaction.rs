/// A self-service role behind one reaction emoji on the role-selection
/// message. The table is static configuration; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleConfigEntry {
    pub emoji: String,
    pub role: String,
    pub description: String,
}

impl RoleConfigEntry {
    pub fn new(emoji: &str, role: &str, description: &str) -> Self {
        Self {
            emoji: emoji.to_string(),
            role: role.to_string(),
            description: description.to_string(),
        }
    }
}

/// Map a reaction emoji to a zero-based slot index.
///
/// The keycaps "1️⃣".."9️⃣" map to 0..8 and the dedicated "🔟" glyph to 9.
/// Anything else is not a slot index. The digits are read off the front of
/// the string, so both the bare keycap ("1⃣") and the variation-selector
/// form ("1️⃣") resolve.
pub fn emoji_to_index(emoji: &str) -> Option<usize> {
    if emoji == "🔟" {
        return Some(9);
    }

    let digits: String = emoji.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<usize>().ok()?.checked_sub(1)
}

/// The emoji used to offer slot `index` for signup, inverse of
/// [`emoji_to_index`]. Only the first ten slots have one.
pub fn index_emoji(index: usize) -> Option<String> {
    match index {
        0..=8 => Some(format!("{}\u{fe0f}\u{20e3}", index + 1)),
        9 => Some("🔟".to_string()),
        _ => None,
    }
}
