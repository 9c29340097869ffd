//! Flat-file JSON persistence for the signup book.
//!
//! The whole [`SignupBook`] is dumped to and loaded from a single JSON
//! document. There are no partial writes, no migrations and no locking; the
//! bot is the only writer and every successful mutation saves the full
//! current state.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Deserialize;
use serde_json::Value;
use tablesync_core::models::signup::{SignupBook, SlotRosters, TrackedMessage};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

/// Loose mirror of the persisted document. Entries are kept as raw JSON so
/// a single malformed one can be skipped without aborting the whole load.
#[derive(Debug, Default, Deserialize)]
struct RawBook {
    #[serde(default)]
    events: BTreeMap<String, Value>,
    #[serde(default)]
    messages: BTreeMap<String, Value>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted book.
    ///
    /// A missing file yields an empty book (first run). A document that does
    /// not parse at all is logged and replaced by an empty book, matching the
    /// recovery behavior on save: the next successful save rewrites the file
    /// from current in-memory state. Individually malformed entries are
    /// skipped with a warning and the rest of the load proceeds.
    pub fn load(&self) -> Result<SignupBook> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SignupBook::new()),
            Err(e) => return Err(e.into()),
        };

        let raw: RawBook = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(e) => {
                error!(
                    "Could not parse {}: {}; starting with an empty book",
                    self.path.display(),
                    e
                );
                return Ok(SignupBook::new());
            }
        };

        let mut book = SignupBook::new();
        for (name, value) in raw.events {
            match serde_json::from_value::<SlotRosters>(value) {
                Ok(rosters) => {
                    book.events.insert(name, rosters);
                }
                Err(e) => warn!("Skipping malformed event entry {:?}: {}", name, e),
            }
        }
        for (key, value) in raw.messages {
            let Ok(message_id) = key.parse::<u64>() else {
                warn!("Skipping message entry with non-numeric id {:?}", key);
                continue;
            };
            match serde_json::from_value::<TrackedMessage>(value) {
                Ok(entry) => {
                    book.messages.insert(message_id, entry);
                }
                Err(e) => warn!("Skipping malformed message entry {}: {}", key, e),
            }
        }

        info!(
            "Loaded {} events and {} tracked messages from {}",
            book.events.len(),
            book.messages.len(),
            self.path.display()
        );
        Ok(book)
    }

    /// Dump the whole book. The write is a plain single-file write, not an
    /// atomic rename; the bot is the only writer.
    pub fn save(&self, book: &SignupBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)?;
        fs::write(&self.path, json)?;
        info!("Saved signup data to {}", self.path.display());
        Ok(())
    }
}
