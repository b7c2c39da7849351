//! CYK membership testing.

use std::collections::BTreeSet;

use cfpq_symbol::Symbol;

use crate::Cfg;

/// Checks whether a grammar derives a word, one terminal per
/// character, by the CYK algorithm on the grammar's Chomsky normal
/// form.
///
/// The empty word is special-cased through the nullable analysis,
/// since the normal form drops ε.
pub fn cyk(word: &str, cfg: &Cfg) -> bool {
    if word.is_empty() {
        return cfg.generates_epsilon();
    }
    let cnf = cfg.to_cnf();
    let letters: Vec<Symbol> = word.chars().map(|c| Symbol::new(c.to_string())).collect();
    let length = letters.len();

    // table[i][j] is the set of variables deriving letters i..=j.
    let mut table = vec![vec![BTreeSet::<Symbol>::new(); length]; length];
    for (i, letter) in letters.iter().enumerate() {
        for (head, terminal) in cnf.terminal_productions() {
            if terminal == letter {
                table[i][i].insert(head.clone());
            }
        }
    }
    for span in 1..length {
        for i in 0..length - span {
            let j = i + span;
            let mut derivable = BTreeSet::new();
            for split in i..j {
                for (head, left, right) in cnf.pair_productions() {
                    if table[i][split].contains(left) && table[split + 1][j].contains(right) {
                        derivable.insert(head.clone());
                    }
                }
            }
            table[i][j].extend(derivable);
        }
    }
    table[0][length - 1].contains(cfg.start_symbol())
}
