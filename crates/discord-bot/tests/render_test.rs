use pretty_assertions::assert_eq;
use rstest::rstest;
use tablesync_discord_bot::render::{EMPTY_SLOT_MARKER, slot_field_name, slot_field_value};

fn names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player {}", i)).collect()
}

#[test]
fn test_empty_slot_renders_marker() {
    assert_eq!(slot_field_value(&[]), EMPTY_SLOT_MARKER);
}

#[test]
fn test_slot_value_lists_names_in_signup_order() {
    let roster = vec!["Ava".to_string(), "Ben".to_string()];
    let value = slot_field_value(&roster);

    assert!(value.starts_with("Ava\nBen\n"));
}

#[rstest]
#[case(4, "🪑 Tables: 1 (full)")]
#[case(8, "🪑 Tables: 2 (full)")]
#[case(5, "🪑 Tables: 1, ❗ 3 more needed for the next table")]
#[case(1, "🪑 Tables: 0, ❗ 3 more needed for the next table")]
#[case(7, "🪑 Tables: 1, ❗ 1 more needed for the next table")]
fn test_capacity_line(#[case] count: usize, #[case] expected: &str) {
    let value = slot_field_value(&names(count));
    let capacity = value.lines().last().unwrap();

    assert_eq!(capacity, expected);
}

#[test]
fn test_slot_field_name_uses_keycap_emoji() {
    assert_eq!(slot_field_name(0, "18:00"), "1️⃣ 18:00");
    assert_eq!(slot_field_name(8, "22:00"), "9️⃣ 22:00");
    assert_eq!(slot_field_name(9, "23:30"), "🔟 23:30");
}
