//! CFG → ECFG → RSM conversions.

mod support;

use cfpq::{regex_to_min_dfa, Cfg, Ecfg, Regex, Rsm, Symbol};

fn assert_production_language(ecfg: &Ecfg, variable: &str, expected: &str) {
    let actual = regex_to_min_dfa(&ecfg.productions()[&Symbol::new(variable)]);
    let expected = regex_to_min_dfa(&expected.parse::<Regex>().unwrap());
    assert!(
        actual.is_equivalent_to(&expected),
        "language of {} differs",
        variable
    );
}

#[test]
fn empty_cfg_converts_to_an_empty_ecfg() {
    let ecfg = Ecfg::from_cfg(&Cfg::from_text("").unwrap());
    assert!(ecfg.productions().is_empty());
}

#[test]
fn single_production() {
    let ecfg = Ecfg::from_cfg(&Cfg::from_text("S -> x").unwrap());
    assert_production_language(&ecfg, "S", "x");
}

#[test]
fn alternatives_fold_into_one_regex() {
    let ecfg = Ecfg::from_cfg(&Cfg::from_text("S -> a S b\nS -> c\nS -> epsilon").unwrap());
    assert_production_language(&ecfg, "S", "(a S b) | c | epsilon");
}

#[test]
fn ecfg_text_round_trips_through_the_regex_parser() {
    let ecfg = Ecfg::from_text("S -> b|S*").unwrap();
    assert_production_language(&ecfg, "S", "b | S*");
}

#[test]
fn rsm_boxes_recognize_their_regexes() {
    let ecfg = Ecfg::from_text("S -> (a) | (b* S)").unwrap();
    let rsm = Rsm::from_ecfg(&ecfg);
    for (variable, regex) in ecfg.productions() {
        let expected = regex_to_min_dfa(regex);
        assert!(rsm.boxes()[variable].is_equivalent_to(&expected));
    }
}

#[test]
fn rsm_boxes_are_already_minimal() {
    for text in ["", "S -> x", "S -> (a) | (b* S)", "S -> b|S*"] {
        let rsm = Rsm::from_ecfg(&Ecfg::from_text(text).unwrap());
        let minimized = rsm.minimize();
        for (variable, dfa) in rsm.boxes() {
            let minimized_box = &minimized.boxes()[variable];
            assert_eq!(dfa.len(), minimized_box.len());
            assert!(dfa.is_equivalent_to(minimized_box));
        }
    }
}
