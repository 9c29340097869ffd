use std::env;
use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use eyre::{Result, eyre};
use tablesync_core::models::reaction::RoleConfigEntry;
use tablesync_core::models::recurrence::{AdvancedRule, SimpleRule};

/// Configuration for the Discord bot.
///
/// This struct contains all the necessary configuration parameters needed
/// for the bot to function properly: Discord connection details, the
/// auto-event schedule tables and the persistence location. Everything is
/// loaded once at startup; nothing is editable at runtime.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// Channel auto-published events are posted to (required)
    pub events_channel_id: u64,
    /// UTC hour at which simple weekly rules publish (defaults to 8)
    pub publish_hour: u32,
    /// Name of the role allowed to create events with /event
    pub organizer_role: String,
    /// Path of the persisted signup book
    pub data_file: PathBuf,
    /// Port for the keep-alive HTTP endpoint
    pub keepalive_port: u16,
    /// Test guild ID for faster command registration during development
    pub test_guild_id: Option<u64>,
    /// Emoji -> self-service role table rendered on the role message
    pub roles: Vec<RoleConfigEntry>,
    /// Weekday-based auto-event rules
    pub simple_rules: Vec<SimpleRule>,
    /// Anchor-date interval auto-event rules
    pub advanced_rules: Vec<AdvancedRule>,
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN")
            .map_err(|_| eyre!("DISCORD_TOKEN environment variable not set"))?;

        let events_channel_id = env::var("EVENTS_CHANNEL_ID")
            .map_err(|_| eyre!("EVENTS_CHANNEL_ID environment variable not set"))?
            .parse::<u64>()
            .map_err(|_| eyre!("EVENTS_CHANNEL_ID must be a valid u64"))?;

        let publish_hour = env::var("AUTO_EVENTS_HOUR")
            .unwrap_or_else(|_| "8".to_string())
            .parse::<u32>()
            .map_err(|_| eyre!("AUTO_EVENTS_HOUR must be a number"))?;
        if publish_hour >= 24 {
            return Err(eyre!("AUTO_EVENTS_HOUR must be an hour between 0 and 23"));
        }

        let organizer_role =
            env::var("ORGANIZER_ROLE").unwrap_or_else(|_| "Organizer".to_string());

        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("events.json"));

        let keepalive_port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| eyre!("PORT must be a valid port number"))?;

        // Optional test guild ID for development
        let test_guild_id = env::var("DISCORD_TEST_GUILD_ID")
            .ok()
            .and_then(|id| id.parse::<u64>().ok());

        Ok(Self {
            token,
            events_channel_id,
            publish_hour,
            organizer_role,
            data_file,
            keepalive_port,
            test_guild_id,
            roles: default_role_config(),
            simple_rules: default_simple_rules(),
            advanced_rules: default_advanced_rules(),
        })
    }

    /// The self-service role behind `emoji`, if one is configured
    pub fn role_for_emoji(&self, emoji: &str) -> Option<&RoleConfigEntry> {
        self.roles.iter().find(|entry| entry.emoji == emoji)
    }
}

/// The emoji -> role table rendered on the role-selection message.
pub fn default_role_config() -> Vec<RoleConfigEntry> {
    vec![
        RoleConfigEntry::new("🎮", "Ranked games", "Ranked club sessions"),
        RoleConfigEntry::new("🎲", "Casual games", "Relaxed games without pressure"),
        RoleConfigEntry::new(
            "🎉",
            "Events",
            "Announcements for conventions, open days and teaching sessions",
        ),
        RoleConfigEntry::new("🏆", "Tournaments", "Club-organized tournaments"),
        RoleConfigEntry::new("🐉", "MCR", "Mahjong Competition Rules sessions"),
    ]
}

/// Weekly auto events keyed on a weekday, published at the configured hour.
pub fn default_simple_rules() -> Vec<SimpleRule> {
    vec![
        SimpleRule::new(Weekday::Wed, "Club Wednesday", &["18:00", "19:30"]),
        SimpleRule::new(Weekday::Sat, "Club Saturday", &["16:00", "18:30"]),
    ]
}

/// Interval auto events anchored on a start date.
pub fn default_advanced_rules() -> Vec<AdvancedRule> {
    vec![
        AdvancedRule {
            name: "Ranked Wednesday".to_string(),
            times: vec![
                "17:30".to_string(),
                "19:00".to_string(),
                "20:30".to_string(),
                "22:00".to_string(),
            ],
            start_date: anchor_date(2025, 10, 1),
            hour: 19,
            interval_days: 7,
        },
        AdvancedRule {
            name: "Ranked Saturday".to_string(),
            times: vec![
                "16:00".to_string(),
                "17:30".to_string(),
                "19:00".to_string(),
                "20:30".to_string(),
                "22:00".to_string(),
            ],
            start_date: anchor_date(2025, 10, 4),
            hour: 19,
            interval_days: 7,
        },
    ]
}

fn anchor_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("static anchor date is valid")
}
