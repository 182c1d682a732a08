//! Matching scenarios across strategy tiers

use filter_match::{fuzzy_find, FuzzyMatcher, Match, MatchRange, Strategy};
use pretty_assertions::assert_eq;

fn spans(m: &Match) -> Vec<(usize, usize)> {
    m.ranges.iter().map(|r| (r.start, r.end)).collect()
}

#[test]
fn test_partial_word_is_not_a_match() {
    let m = fuzzy_find("orange", "orangutan");
    assert_eq!(m.score, 0.0);
    assert!(m.ranges.is_empty());
}

#[test]
fn test_exact_match() {
    let m = fuzzy_find("orange", "orange");
    assert_eq!(m.score, 1.0);
    assert_eq!(spans(&m), vec![(0, 6)]);
}

#[test]
fn test_single_character_tiers() {
    let prefix = fuzzy_find("o", "orange");
    // "phone" has no 'o' at a word start, so it falls to the internal tier
    let internal = fuzzy_find("o", "phone");
    let boundary = fuzzy_find("o", "phone operator");
    let other_boundary = fuzzy_find("o", "blood orange");

    assert_eq!(prefix.strategy, Strategy::Prefix);
    assert!(internal.score < prefix.score);
    assert!(internal.score > 0.0);

    assert_eq!(internal.strategy, Strategy::Internal);
    assert_eq!(spans(&internal), vec![(2, 3)]);
    assert_eq!(boundary.strategy, Strategy::WordBoundary);
    assert_eq!(spans(&boundary), vec![(6, 7)]);
    assert!(boundary.score < prefix.score);
    assert_eq!(boundary.score, other_boundary.score);
}

#[test]
fn test_needle_longer_than_haystack() {
    assert_eq!(fuzzy_find("orange juice", "orange").score, 0.0);
}

#[test]
fn test_equal_length_anagram() {
    assert_eq!(fuzzy_find("ranges", "orange").score, 0.0);
}

#[test]
fn test_noncontiguous_subsequence() {
    let m = fuzzy_find("tuot", "Tlön, Uqbar, Orbis Tertius");
    assert!(m.score > 0.0);
    assert_eq!(spans(&m), vec![(0, 1), (6, 7), (13, 14), (19, 20)]);
}

#[test]
fn test_tier_ordering() {
    let mut matcher = FuzzyMatcher::new("o");
    let exact = matcher.find("O").score;
    let prefix = matcher.find("orange").score;
    let boundary = matcher.find("phone operator").score;
    let internal = matcher.find("phone").score;
    let none = matcher.find("xyz").score;

    assert!(exact >= prefix);
    assert!(prefix >= boundary);
    assert!(boundary >= internal);
    assert!(internal > none);
    assert_eq!(none, 0.0);
}

#[test]
fn test_multi_char_tier_ordering() {
    let mut matcher = FuzzyMatcher::new("tab");
    let exact = matcher.find("TAB");
    let prefix = matcher.find("Tabs overview");
    let boundary = matcher.find("New tab");
    let scattered = matcher.find("total bill");

    assert_eq!(exact.strategy, Strategy::Exact);
    assert_eq!(prefix.strategy, Strategy::Prefix);
    assert_eq!(boundary.strategy, Strategy::Alignment);
    assert_eq!(scattered.strategy, Strategy::Alignment);

    assert!(exact.score > prefix.score);
    assert!(prefix.score > boundary.score);
    assert!(boundary.score > scattered.score);
    assert!(scattered.score > 0.0);
    assert_eq!(spans(&boundary), vec![(4, 7)]);
}

#[test]
fn test_case_insensitive() {
    let mut matcher = FuzzyMatcher::new("Bookmarks");
    for haystack in ["bookmarks bar", "Other Bookmarks", "manage bookmark sets"] {
        let lower = matcher.find(haystack);
        let upper = matcher.find(&haystack.to_uppercase());
        assert_eq!(lower, upper, "haystack={haystack:?}");
    }
}

#[test]
fn test_case_insensitive_latin() {
    let lower = fuzzy_find("été", "Fête de l'été");
    let upper = fuzzy_find("ÉTÉ", "FÊTE DE L'ÉTÉ");
    assert!(lower.is_match());
    assert_eq!(spans(&lower), vec![(10, 13)]);
    assert_eq!(lower, upper);
}

#[test]
fn test_multibyte_offsets_are_chars() {
    let m = fuzzy_find("çn", "Français national");
    assert!(m.is_match());
    assert_eq!(m.ranges[0], MatchRange::new(4, 5));
    for range in &m.ranges {
        assert!(range.end <= "Français national".chars().count());
    }
}

#[test]
fn test_cjk() {
    let m = fuzzy_find("编程", "中文编程");
    assert_eq!(m.strategy, Strategy::Alignment);
    assert_eq!(spans(&m), vec![(2, 4)]);
}

#[test]
fn test_prefix_beats_alignment_and_gap_scan() {
    let prefix = fuzzy_find("foo", "foobar");
    let aligned = fuzzy_find("foo", "a foo");
    let long = format!("x foo {}", "y".repeat(2000));
    let scanned = fuzzy_find("foo", &long);

    assert_eq!(scanned.strategy, Strategy::GapScan);
    assert!(prefix.score > aligned.score);
    assert!(prefix.score > scanned.score);
}

#[test]
fn test_special_characters_are_literal() {
    let m = fuzzy_find(".*", "match.*pattern");
    assert_eq!(spans(&m), vec![(5, 7)]);
}

#[test]
fn test_result_serializes_for_host() {
    let m = fuzzy_find("fb", "foo bar");
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["strategy"], "alignment");
    assert_eq!(json["ranges"][1]["start"], 4);
}

#[test]
fn test_empty_needle_yields_empty_range() {
    let m = fuzzy_find("", "History");
    assert_eq!(m.strategy, Strategy::Prefix);
    assert_eq!(m.score, 0.99);
    assert_eq!(m.ranges, vec![MatchRange::new(0, 0)]);
    assert!(m.ranges[0].is_empty());
    assert_eq!(m.matched_len(), 0);
    assert_eq!(m.byte_ranges("History"), vec![0..0]);
}
