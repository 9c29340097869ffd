use pretty_assertions::assert_eq;
use rstest::rstest;
use tablesync_core::models::signup::{
    MessagePurpose, ROLE_MESSAGE_EVENT, SignupBook, TableCount, TrackedMessage,
};

fn slots(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_create_event_initializes_empty_rosters() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00", "19:30"]))
        .expect("Failed to create event");

    assert_eq!(book.roster("Club Night", "18:00"), Some(&Vec::new()));
    assert_eq!(book.roster("Club Night", "19:30"), Some(&Vec::new()));
    assert_eq!(book.roster("Club Night", "21:00"), None);
}

#[test]
fn test_create_event_requires_slots() {
    let mut book = SignupBook::new();
    let result = book.create_event("Club Night", &[]);

    assert!(result.is_err());
    assert!(book.events.is_empty());
}

#[test]
fn test_create_event_overwrites_existing_rosters() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00"])).unwrap();
    book.toggle_signup("Club Night", "18:00", "Ava", true);

    book.create_event("Club Night", &slots(&["18:00", "19:30"]))
        .unwrap();

    assert_eq!(book.roster("Club Night", "18:00"), Some(&Vec::new()));
}

#[test]
fn test_toggle_signup_is_idempotent() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00"])).unwrap();

    assert!(book.toggle_signup("Club Night", "18:00", "Ava", true));
    assert!(!book.toggle_signup("Club Night", "18:00", "Ava", true));
    assert_eq!(
        book.roster("Club Night", "18:00"),
        Some(&vec!["Ava".to_string()])
    );

    assert!(book.toggle_signup("Club Night", "18:00", "Ava", false));
    assert!(!book.toggle_signup("Club Night", "18:00", "Ava", false));
    assert_eq!(book.roster("Club Night", "18:00"), Some(&Vec::new()));
}

#[test]
fn test_toggle_signup_preserves_insertion_order() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00"])).unwrap();

    for name in ["Ava", "Ben", "Cleo", "Dan"] {
        book.toggle_signup("Club Night", "18:00", name, true);
    }
    book.toggle_signup("Club Night", "18:00", "Ben", false);
    book.toggle_signup("Club Night", "18:00", "Eve", true);

    assert_eq!(
        book.roster("Club Night", "18:00"),
        Some(&vec![
            "Ava".to_string(),
            "Cleo".to_string(),
            "Dan".to_string(),
            "Eve".to_string(),
        ])
    );
}

#[test]
fn test_toggle_signup_net_parity() {
    // Any add/remove sequence leaves each name at most once, reflecting
    // the net parity of adds minus removes.
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00"])).unwrap();

    for add in [true, true, false, true, true, false, false, true] {
        book.toggle_signup("Club Night", "18:00", "Ava", add);
    }

    assert_eq!(
        book.roster("Club Night", "18:00"),
        Some(&vec!["Ava".to_string()])
    );
}

#[test]
fn test_toggle_signup_on_unknown_event_or_slot() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00"])).unwrap();

    assert!(!book.toggle_signup("Unknown", "18:00", "Ava", true));
    assert!(!book.toggle_signup("Club Night", "23:00", "Ava", true));
    assert!(book.events.get("Unknown").is_none());
}

#[test]
fn test_forget_message_drops_event_and_tracking() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00"])).unwrap();
    book.track(
        42,
        TrackedMessage {
            event: "Club Night".to_string(),
            slots: slots(&["18:00"]),
            channel_id: 7,
        },
    );

    let forgotten = book.forget_message(42).expect("Message was tracked");

    assert_eq!(forgotten.event, "Club Night");
    assert!(book.events.is_empty());
    assert!(book.messages.is_empty());
    assert!(book.forget_message(42).is_none());
}

#[test]
fn test_role_message_lookup() {
    let mut book = SignupBook::new();
    book.track(
        1,
        TrackedMessage {
            event: "Club Night".to_string(),
            slots: slots(&["18:00"]),
            channel_id: 7,
        },
    );
    assert!(book.role_message().is_none());

    book.track(
        2,
        TrackedMessage {
            event: ROLE_MESSAGE_EVENT.to_string(),
            slots: Vec::new(),
            channel_id: 7,
        },
    );

    let (message_id, entry) = book.role_message().expect("Role message tracked");
    assert_eq!(message_id, 2);
    assert_eq!(entry.purpose(), MessagePurpose::RoleSelection);
}

#[test]
fn test_slot_for_emoji_respects_slot_range() {
    let message = TrackedMessage {
        event: "Club Night".to_string(),
        slots: slots(&["18:00", "19:30"]),
        channel_id: 7,
    };

    assert_eq!(message.slot_for_emoji("1️⃣"), Some(&"18:00".to_string()));
    assert_eq!(message.slot_for_emoji("2️⃣"), Some(&"19:30".to_string()));
    // Keycap beyond the slot tuple, and non-keycap emoji
    assert_eq!(message.slot_for_emoji("3️⃣"), None);
    assert_eq!(message.slot_for_emoji("🔟"), None);
    assert_eq!(message.slot_for_emoji("🎮"), None);
}

#[test]
fn test_message_purpose_resolution() {
    let roster = TrackedMessage {
        event: "Club Night".to_string(),
        slots: slots(&["18:00", "19:30"]),
        channel_id: 7,
    };

    match roster.purpose() {
        MessagePurpose::Roster { event, slots } => {
            assert_eq!(event, "Club Night");
            assert_eq!(slots.len(), 2);
        }
        MessagePurpose::RoleSelection => panic!("Expected a roster message"),
    }
}

#[rstest]
#[case(0, 0, 0)]
#[case(1, 0, 3)]
#[case(3, 0, 1)]
#[case(4, 1, 0)]
#[case(5, 1, 3)]
#[case(8, 2, 0)]
#[case(11, 2, 1)]
fn test_table_count(#[case] signups: usize, #[case] full: usize, #[case] needed: usize) {
    let tables = TableCount::for_signups(signups);
    assert_eq!(tables.full, full);
    assert_eq!(tables.needed, needed);
}

#[test]
fn test_signup_book_serialization() {
    let mut book = SignupBook::new();
    book.create_event("Club Night", &slots(&["18:00", "19:30"]))
        .unwrap();
    book.toggle_signup("Club Night", "18:00", "Ava", true);
    book.track(
        42,
        TrackedMessage {
            event: "Club Night".to_string(),
            slots: slots(&["18:00", "19:30"]),
            channel_id: 7,
        },
    );

    let json = serde_json::to_string(&book).expect("Failed to serialize book");
    let deserialized: SignupBook = serde_json::from_str(&json).expect("Failed to deserialize book");

    assert_eq!(deserialized, book);
}

#[test]
fn test_message_ids_serialize_as_strings() {
    let mut book = SignupBook::new();
    book.track(
        1420866324799946844,
        TrackedMessage {
            event: "Club Night".to_string(),
            slots: slots(&["18:00"]),
            channel_id: 7,
        },
    );

    let json = serde_json::to_value(&book).expect("Failed to serialize book");
    assert!(json["messages"]["1420866324799946844"].is_object());
}
