//! Grammar normal forms: unit elimination, weak Chomsky normal form,
//! and full Chomsky normal form.

use std::collections::{BTreeMap, BTreeSet};

use bit_matrix::BitMatrix;
use log::debug;

use cfpq_symbol::Symbol;

use crate::{Cfg, Production, Term};

impl Cfg {
    /// Replaces unit productions `A -> B` by the non-unit productions
    /// of every variable `B` derivable from `A` through unit steps.
    /// The language represented by the grammar doesn't change.
    pub fn eliminate_unit_productions(&self) -> Cfg {
        let variables: Vec<Symbol> = self.variables().into_iter().collect();
        let positions: BTreeMap<&Symbol, usize> = variables
            .iter()
            .enumerate()
            .map(|(position, symbol)| (symbol, position))
            .collect();
        let position_of = |symbol: &Symbol| positions[symbol];

        // A rule of form `A ::= A` is a self-loop, not a unit step
        // worth recording; the reflexive closure below covers it.
        let mut unit_derivation = BitMatrix::new(variables.len(), variables.len());
        for (position, _) in variables.iter().enumerate() {
            unit_derivation.set(position, position, true);
        }
        for production in self.productions() {
            if let [Term::Variable(target)] = production.body.as_slice() {
                if *target != production.head {
                    unit_derivation.set(position_of(&production.head), position_of(target), true);
                }
            }
        }
        unit_derivation.transitive_closure();

        let mut productions = vec![];
        for (from, head) in variables.iter().enumerate() {
            for (to, target) in variables.iter().enumerate() {
                if !unit_derivation[(from, to)] {
                    continue;
                }
                for production in self.productions() {
                    let is_unit = matches!(production.body.as_slice(), [Term::Variable(_)]);
                    if production.head == *target && !is_unit {
                        productions.push(Production::new(head.clone(), production.body.clone()));
                    }
                }
            }
        }
        Cfg::new(self.start_symbol().clone(), productions)
    }

    /// Converts the grammar to weak Chomsky normal form.
    ///
    /// Every production body becomes ε, a single terminal, or a pair
    /// of variables. Unlike the full normal form, ε-productions
    /// survive, so the language is preserved exactly.
    pub fn to_weak_cnf(&self) -> Cfg {
        let cleared = self
            .remove_useless_symbols()
            .eliminate_unit_productions()
            .remove_useless_symbols();
        let decomposed = decompose_bodies(&cleared);
        debug!(
            "weak CNF: {} productions from {}",
            decomposed.productions().count(),
            self.productions().count()
        );
        decomposed
    }

    /// Converts the grammar to full Chomsky normal form.
    ///
    /// The result derives every nonempty word of the original
    /// language and no ε; CYK pairs it with a separate
    /// [`fn generates_epsilon`] check for the empty word.
    ///
    /// [`fn generates_epsilon`]: Cfg::generates_epsilon
    pub fn to_cnf(&self) -> Cfg {
        let weak = self.to_weak_cnf();
        let nullable = weak.nullable_symbols();
        let mut productions = vec![];
        for production in weak.productions() {
            match production.body.as_slice() {
                [] => {}
                [Term::Terminal(_)] => productions.push(production.clone()),
                [Term::Variable(left), Term::Variable(right)] => {
                    productions.push(production.clone());
                    if nullable.contains(right) {
                        productions.push(Production::new(
                            production.head.clone(),
                            vec![Term::Variable(left.clone())],
                        ));
                    }
                    if nullable.contains(left) {
                        productions.push(Production::new(
                            production.head.clone(),
                            vec![Term::Variable(right.clone())],
                        ));
                    }
                }
                other => unreachable!("weak CNF body of length {}", other.len()),
            }
        }
        Cfg::new(self.start_symbol().clone(), productions)
            .eliminate_unit_productions()
            .remove_useless_symbols()
    }
}

/// Rewrites every body of length ≥ 2 into pure-variable pairs,
/// wrapping terminals and splitting long bodies with fresh variables.
fn decompose_bodies(cfg: &Cfg) -> Cfg {
    let mut fresh = FreshVariables::new(cfg);
    let mut productions = vec![];
    for production in cfg.productions() {
        if production.body.len() < 2 {
            productions.push(production.clone());
            continue;
        }
        // Terminals inside long bodies move behind wrapper variables.
        let mut body: Vec<Symbol> = vec![];
        for term in &production.body {
            match term {
                Term::Variable(symbol) => body.push(symbol.clone()),
                Term::Terminal(symbol) => {
                    body.push(fresh.wrapper(symbol, &mut productions));
                }
            }
        }
        // Split `A -> X₁ X₂ … Xₖ` into a chain of pairs.
        let mut head = production.head.clone();
        while body.len() > 2 {
            let rest = fresh.splitter();
            productions.push(Production::new(
                head,
                vec![
                    Term::Variable(body[0].clone()),
                    Term::Variable(rest.clone()),
                ],
            ));
            body.remove(0);
            head = rest;
        }
        productions.push(Production::new(
            head,
            body.into_iter().map(Term::Variable).collect(),
        ));
    }
    Cfg::new(cfg.start_symbol().clone(), productions)
}

/// A source of variables that do not collide with a grammar's own.
struct FreshVariables {
    used: BTreeSet<Symbol>,
    wrappers: Vec<(Symbol, Symbol)>,
    splits: usize,
}

impl FreshVariables {
    fn new(cfg: &Cfg) -> Self {
        FreshVariables {
            used: cfg.variables(),
            wrappers: vec![],
            splits: 0,
        }
    }

    /// Returns the wrapper variable of a terminal, minting it and its
    /// production on first use.
    fn wrapper(&mut self, terminal: &Symbol, productions: &mut Vec<Production>) -> Symbol {
        if let Some((_, wrapper)) = self
            .wrappers
            .iter()
            .find(|(wrapped, _)| wrapped == terminal)
        {
            return wrapper.clone();
        }
        let mut name = format!("{}'", terminal);
        while self.used.contains(&Symbol::new(&name)) {
            name.push('\'');
        }
        let wrapper = Symbol::new(name);
        self.used.insert(wrapper.clone());
        self.wrappers.push((terminal.clone(), wrapper.clone()));
        productions.push(Production::new(
            wrapper.clone(),
            vec![Term::Terminal(terminal.clone())],
        ));
        wrapper
    }

    /// Mints a variable for one link of a body-splitting chain.
    fn splitter(&mut self) -> Symbol {
        loop {
            self.splits += 1;
            let candidate = Symbol::new(format!("@{}", self.splits));
            if !self.used.contains(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
        }
    }
}
