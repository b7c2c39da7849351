//! Analysis of symbol usefulness. Useful symbols are both reachable
//! and productive.

use std::collections::{BTreeMap, BTreeSet};

use bit_matrix::BitMatrix;

use cfpq_symbol::Symbol;

use crate::{Cfg, Term};

impl Cfg {
    /// Removes productions that mention useless symbols. The language
    /// represented by the grammar doesn't change.
    ///
    /// Unproductive symbols are dropped first, reachability is then
    /// judged on what remains; the other order would let a
    /// dead-end production keep its body symbols "reachable".
    pub fn remove_useless_symbols(&self) -> Cfg {
        let productive = self.productive_symbols();
        let generating = Cfg::new(
            self.start_symbol().clone(),
            self.productions()
                .filter(|production| {
                    productive.contains(&production.head)
                        && production
                            .body
                            .iter()
                            .all(|term| term_is_productive(term, &productive))
                })
                .cloned()
                .collect(),
        );
        let reachable = generating.reachable_symbols();
        Cfg::new(
            generating.start_symbol().clone(),
            generating
                .productions()
                .filter(|production| reachable.contains(&production.head))
                .cloned()
                .collect(),
        )
    }

    /// Returns the set of productive symbols: those deriving some
    /// word of terminals.
    fn productive_symbols(&self) -> BTreeSet<Symbol> {
        let mut productive = BTreeSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for production in self.productions() {
                if productive.contains(&production.head) {
                    continue;
                }
                if production
                    .body
                    .iter()
                    .all(|term| term_is_productive(term, &productive))
                {
                    productive.insert(production.head.clone());
                    changed = true;
                }
            }
        }
        productive
    }

    /// Returns the symbols reachable from the start symbol, via the
    /// reflexive-transitive closure of direct derivation.
    fn reachable_symbols(&self) -> BTreeSet<Symbol> {
        let mut universe: Vec<Symbol> = self.variables().into_iter().collect();
        universe.extend(self.terminals());
        let positions: BTreeMap<&Symbol, usize> = universe
            .iter()
            .enumerate()
            .map(|(position, symbol)| (symbol, position))
            .collect();
        let position_of = |symbol: &Symbol| positions[symbol];

        let mut derivation = BitMatrix::new(universe.len(), universe.len());
        for production in self.productions() {
            let head = position_of(&production.head);
            derivation.set(head, head, true);
            for term in &production.body {
                derivation.set(head, position_of(term.symbol()), true);
            }
        }
        derivation.transitive_closure();

        let start = position_of(self.start_symbol());
        let mut reachable: BTreeSet<Symbol> = derivation
            .iter_row(start)
            .enumerate()
            .filter_map(|(i, present)| present.then(|| universe[i].clone()))
            .collect();
        reachable.insert(self.start_symbol().clone());
        reachable
    }
}

fn term_is_productive(term: &Term, productive: &BTreeSet<Symbol>) -> bool {
    match term {
        Term::Variable(symbol) => productive.contains(symbol),
        Term::Terminal(_) => true,
    }
}
