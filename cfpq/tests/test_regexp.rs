//! Regex compilation down to minimal DFAs.

mod support;

use cfpq::{regex_to_min_dfa, Regex};
use support::word;

fn min_dfa(text: &str) -> cfpq::Dfa {
    regex_to_min_dfa(&text.parse::<Regex>().unwrap())
}

#[test]
fn minimal_dfa_shape() {
    let dfa = min_dfa("a b c* d");
    // One state per position around the `c` loop, nothing else.
    assert_eq!(dfa.len(), 4);
    assert_eq!(dfa.finals().len(), 1);
}

#[test]
fn accepts_the_same_language() {
    let dfa = min_dfa("a b c* d");
    let accepted = [
        word(&["a", "b", "d"]),
        word(&["a", "b", "c", "d"]),
        word(&["a", "b", "c", "c", "d"]),
        word(&["a", "b", "c", "c", "c", "d"]),
    ];
    let rejected = [word(&["b", "c", "d"]), word(&[""]), word(&["a", "b", "c"])];
    assert!(accepted.iter().all(|w| dfa.accepts(w)));
    assert!(rejected.iter().all(|w| !dfa.accepts(w)));
}

#[test]
fn minimizing_twice_is_minimizing_once() {
    for text in ["a b c* d", "AAAAAA|B", "(A|B)C(D*)(E*)", "(a) | (b* S)"] {
        let once = min_dfa(text);
        let twice = once.minimize();
        assert_eq!(once.len(), twice.len());
        assert!(once.is_equivalent_to(&twice));
    }
}

#[test]
fn multi_character_atoms_are_single_symbols() {
    let dfa = min_dfa("AAAAAA|B");
    assert!(dfa.accepts(&word(&["AAAAAA"])));
    assert!(dfa.accepts(&word(&["B"])));
    assert!(!dfa.accepts(&word(&["A", "A", "A", "A", "A", "A"])));
}

#[test]
fn epsilon_only_regex() {
    let dfa = min_dfa("epsilon");
    assert!(dfa.accepts(&[]));
    assert!(!dfa.accepts(&word(&["epsilon"])));
}
