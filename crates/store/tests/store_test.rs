use pretty_assertions::assert_eq;
use tablesync_core::models::signup::{ROLE_MESSAGE_EVENT, SignupBook, TrackedMessage};
use tablesync_store::JsonStore;
use tempfile::tempdir;

fn sample_book() -> SignupBook {
    let slots = vec!["18:00".to_string(), "19:30".to_string()];
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots).unwrap();
    book.toggle_signup("Club Night", "18:00", "Ava", true);
    book.toggle_signup("Club Night", "18:00", "Ben", true);
    book.toggle_signup("Club Night", "19:30", "Cleo", true);
    book.track(
        1420866324799946844,
        TrackedMessage {
            event: "Club Night".to_string(),
            slots,
            channel_id: 42,
        },
    );
    book.track(
        7,
        TrackedMessage {
            event: ROLE_MESSAGE_EVENT.to_string(),
            slots: Vec::new(),
            channel_id: 42,
        },
    );
    book
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("events.json"));
    let book = sample_book();

    store.save(&book).expect("Failed to save");
    let loaded = store.load().expect("Failed to load");

    assert_eq!(loaded, book);
}

#[test]
fn test_load_missing_file_yields_empty_book() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("events.json"));

    let loaded = store.load().expect("Missing file is not an error");

    assert_eq!(loaded, SignupBook::new());
}

#[test]
fn test_load_unparseable_document_yields_empty_book() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, "{ not json").unwrap();

    let loaded = JsonStore::new(&path).load().expect("Corrupt file is recovered from");

    assert_eq!(loaded, SignupBook::new());
}

#[test]
fn test_load_skips_malformed_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(
        &path,
        r#"{
            "events": {
                "Club Night": { "18:00": ["Ava"] },
                "Broken": { "18:00": 5 }
            },
            "messages": {
                "42": { "event": "Club Night", "slots": ["18:00"], "channel_id": 7 },
                "not-a-number": { "event": "Club Night", "slots": ["18:00"], "channel_id": 7 },
                "43": { "slots": "wrong shape" }
            }
        }"#,
    )
    .unwrap();

    let loaded = JsonStore::new(&path).load().expect("Failed to load");

    assert_eq!(loaded.events.len(), 1);
    assert_eq!(
        loaded.roster("Club Night", "18:00"),
        Some(&vec!["Ava".to_string()])
    );
    assert_eq!(loaded.messages.len(), 1);
    assert_eq!(loaded.messages[&42].channel_id, 7);
}

#[test]
fn test_message_slot_order_is_preserved() {
    // Slot order on a tracked message is a fixed sequence, independent of
    // the (sorted) events map.
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("events.json"));
    let slots = vec!["19:30".to_string(), "18:00".to_string(), "22:00".to_string()];
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots).unwrap();
    book.track(
        42,
        TrackedMessage {
            event: "Club Night".to_string(),
            slots: slots.clone(),
            channel_id: 7,
        },
    );

    store.save(&book).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.messages[&42].slots, slots);
}

#[test]
fn test_save_overwrites_previous_document() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("events.json"));

    store.save(&sample_book()).unwrap();
    let mut smaller = SignupBook::new();
    smaller
        .create_event("Casual Friday", &["20:00".to_string()])
        .unwrap();
    store.save(&smaller).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, smaller);
}
