//! CYK membership testing against whole grammars.

mod support;

use test_case::test_case;

use cfpq::{cyk, Cfg};

#[test_case("", true; "accepts_the_empty_word")]
#[test_case("()", true; "accepts_one_pair")]
#[test_case("()()", true; "accepts_two_pairs")]
#[test_case("((()))", true; "accepts_nested_pairs")]
#[test_case("((", false; "rejects_unclosed")]
#[test_case("()(", false; "rejects_trailing_open")]
#[test_case("( S ) S", false; "rejects_raw_production_text")]
#[test_case("bb", false; "rejects_bb")]
#[test_case("aba", false; "rejects_aba")]
#[test_case("bab", false; "rejects_bab")]
fn balanced_parentheses(word: &str, expected: bool) {
    let cfg = Cfg::from_text("S -> ( S ) S\nS -> S ( S )\nS -> epsilon").unwrap();
    assert_eq!(cyk(word, &cfg), expected);
}

#[test_case("a", true; "accepts_a")]
#[test_case("aaa", true; "accepts_aaa")]
#[test_case("", true; "accepts_empty")]
#[test_case("aaaaaaaaaaaa", true; "accepts_aaaaaaaaaaaa")]
#[test_case("ba", false; "rejects_ba")]
#[test_case("aaaab", false; "rejects_aaaab")]
#[test_case("abbbaaa", false; "rejects_abbbaaa")]
#[test_case("c", false; "rejects_c")]
fn unary_words(word: &str, expected: bool) {
    let cfg = Cfg::from_text("S -> a S\nS ->").unwrap();
    assert_eq!(cyk(word, &cfg), expected);
}

#[test]
fn epsilon_grammar() {
    let cfg = Cfg::from_text("S -> epsilon").unwrap();
    assert!(cyk("", &cfg));
    for word in ["a", "bbbc", " "] {
        assert!(!cyk(word, &cfg));
    }
}

#[test]
fn cyk_matches_grammar_membership() {
    let cfg = Cfg::from_text("S -> a S b | a b").unwrap();
    for (word, expected) in [
        ("ab", true),
        ("aabb", true),
        ("aaabbb", true),
        ("", false),
        ("a", false),
        ("abab", false),
    ] {
        assert_eq!(cyk(word, &cfg), expected, "word {:?}", word);
        assert_eq!(cfg.contains(word), expected);
    }
}
