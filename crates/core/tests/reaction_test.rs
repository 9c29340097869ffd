use pretty_assertions::assert_eq;
use rstest::rstest;
use tablesync_core::models::reaction::{emoji_to_index, index_emoji};

#[rstest]
#[case("1️⃣", Some(0))]
#[case("2️⃣", Some(1))]
#[case("5️⃣", Some(4))]
#[case("9️⃣", Some(8))]
#[case("🔟", Some(9))]
fn test_keycap_emoji_map_to_indices(#[case] emoji: &str, #[case] expected: Option<usize>) {
    assert_eq!(emoji_to_index(emoji), expected);
}

#[test]
fn test_bare_keycap_without_variation_selector() {
    // The gateway can deliver the keycap without U+FE0F.
    assert_eq!(emoji_to_index("1\u{20e3}"), Some(0));
    assert_eq!(emoji_to_index("9\u{20e3}"), Some(8));
}

#[rstest]
#[case("🎮")]
#[case("🎉")]
#[case("🪑")]
#[case("")]
#[case("abc")]
fn test_non_keycap_emoji_have_no_index(#[case] emoji: &str) {
    assert_eq!(emoji_to_index(emoji), None);
}

#[test]
fn test_zero_keycap_has_no_index() {
    assert_eq!(emoji_to_index("0\u{fe0f}\u{20e3}"), None);
}

#[test]
fn test_index_emoji_round_trips() {
    for index in 0..10 {
        let emoji = index_emoji(index).expect("First ten slots have an emoji");
        assert_eq!(emoji_to_index(&emoji), Some(index));
    }
}

#[test]
fn test_index_emoji_is_bounded() {
    assert_eq!(index_emoji(10), None);
    assert_eq!(index_emoji(99), None);
}
