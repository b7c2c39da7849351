//! Definitions of the context-free grammar type and its productions.

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use cfpq_symbol::Symbol;

/// One position of a production body.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Term {
    /// A nonterminal occurrence.
    Variable(Symbol),
    /// A terminal occurrence.
    Terminal(Symbol),
}

impl Term {
    /// Checks whether this position holds a nonterminal.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Returns the symbol at this position.
    pub fn symbol(&self) -> &Symbol {
        match self {
            Term::Variable(symbol) | Term::Terminal(symbol) => symbol,
        }
    }
}

/// A grammar production. An empty body is an ε-production.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Production {
    /// The production's left-hand side variable.
    pub head: Symbol,
    /// The production's right-hand side.
    pub body: Vec<Term>,
}

impl Production {
    /// Creates a production.
    pub fn new(head: Symbol, body: Vec<Term>) -> Self {
        Production { head, body }
    }
}

/// A context-free grammar.
///
/// Grammars are immutable once constructed; every transformation
/// returns a fresh grammar. The start symbol travels with the grammar
/// but callers that want a different entry point pass their own (the
/// query façade does).
#[derive(Clone, Debug)]
pub struct Cfg {
    start: Symbol,
    productions: Vec<Production>,
}

impl Cfg {
    /// Creates a grammar from parts, dropping duplicate productions.
    pub fn new(start: Symbol, productions: Vec<Production>) -> Self {
        let mut seen = BTreeSet::new();
        let productions = productions
            .into_iter()
            .filter(|production| seen.insert(production.clone()))
            .collect();
        Cfg { start, productions }
    }

    /// Returns the start symbol.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start
    }

    /// Returns an iterator over the list of grammar productions.
    pub fn productions(&self) -> impl Iterator<Item = &Production> + '_ {
        self.productions.iter()
    }

    /// Checks whether the grammar has no productions.
    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Returns every variable in use: the start symbol, all heads and
    /// all nonterminal body occurrences.
    pub fn variables(&self) -> BTreeSet<Symbol> {
        let mut variables = BTreeSet::from([self.start.clone()]);
        for production in &self.productions {
            variables.insert(production.head.clone());
            for term in &production.body {
                if let Term::Variable(symbol) = term {
                    variables.insert(symbol.clone());
                }
            }
        }
        variables
    }

    /// Returns every terminal in use.
    pub fn terminals(&self) -> BTreeSet<Symbol> {
        let mut terminals = BTreeSet::new();
        for production in &self.productions {
            for term in &production.body {
                if let Term::Terminal(symbol) = term {
                    terminals.insert(symbol.clone());
                }
            }
        }
        terminals
    }

    /// Returns the variables that derive the empty word.
    ///
    /// A variable is nullable if some production body consists of
    /// nullable variables only; the empty body qualifies. Closes over
    /// that rule with a worklist.
    pub fn nullable_symbols(&self) -> BTreeSet<Symbol> {
        let mut nullable = BTreeSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for production in &self.productions {
                if nullable.contains(&production.head) {
                    continue;
                }
                let all_nullable = production.body.iter().all(|term| match term {
                    Term::Variable(symbol) => nullable.contains(symbol),
                    Term::Terminal(_) => false,
                });
                if all_nullable {
                    nullable.insert(production.head.clone());
                    changed = true;
                }
            }
        }
        nullable
    }

    /// Checks whether the grammar derives the empty word from its
    /// start symbol.
    pub fn generates_epsilon(&self) -> bool {
        self.nullable_symbols().contains(&self.start)
    }

    /// Checks whether the grammar derives a word, one terminal per
    /// character.
    pub fn contains(&self, word: &str) -> bool {
        crate::cyk(word, self)
    }

    /// Returns the heads of ε-productions.
    pub fn epsilon_heads(&self) -> BTreeSet<Symbol> {
        self.productions
            .iter()
            .filter(|production| production.body.is_empty())
            .map(|production| production.head.clone())
            .collect()
    }

    /// Iterates over single-terminal productions as `(head, terminal)`
    /// pairs.
    pub fn terminal_productions(&self) -> impl Iterator<Item = (&Symbol, &Symbol)> + '_ {
        self.productions.iter().filter_map(|production| {
            match production.body.as_slice() {
                [Term::Terminal(terminal)] => Some((&production.head, terminal)),
                _ => None,
            }
        })
    }

    /// Iterates over two-variable productions as `(head, left, right)`
    /// triples.
    pub fn pair_productions(&self) -> impl Iterator<Item = (&Symbol, &Symbol, &Symbol)> + '_ {
        self.productions.iter().filter_map(|production| {
            match production.body.as_slice() {
                [Term::Variable(left), Term::Variable(right)] => {
                    Some((&production.head, left, right))
                }
                _ => None,
            }
        })
    }

    /// Formats the grammar, one production per line.
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for production in &self.productions {
            write!(&mut result, "{} ->", production.head).expect("writing to String failed");
            if production.body.is_empty() {
                result.push_str(" epsilon");
            }
            for term in &production.body {
                write!(&mut result, " {}", term.symbol()).expect("writing to String failed");
            }
            result.push('\n');
        }
        result
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
