//! Extended grammars: one regex right-hand side per variable.

use std::collections::BTreeMap;
use std::fmt;

use cfpq_regexp::Regex;
use cfpq_symbol::Symbol;

use crate::{Cfg, CfgError, Term};

/// An extended context-free grammar.
///
/// Each variable maps to a single regex over variables and terminals.
/// This is the middle stop between a plain grammar and a recursive
/// state machine.
#[derive(Clone, Debug)]
pub struct Ecfg {
    start: Symbol,
    productions: BTreeMap<Symbol, Regex>,
}

impl Ecfg {
    /// Creates an extended grammar from parts.
    pub fn new(start: Symbol, productions: BTreeMap<Symbol, Regex>) -> Self {
        Ecfg { start, productions }
    }

    /// Groups a grammar's productions per head, alternating the
    /// concatenations of their bodies. An empty body contributes ε.
    pub fn from_cfg(cfg: &Cfg) -> Self {
        let mut bodies: BTreeMap<Symbol, Vec<Regex>> = BTreeMap::new();
        for production in cfg.productions() {
            let concatenation = Regex::concat_all(production.body.iter().map(|term| match term {
                Term::Variable(symbol) | Term::Terminal(symbol) => {
                    Regex::Symbol(symbol.clone())
                }
            }));
            bodies
                .entry(production.head.clone())
                .or_default()
                .push(concatenation);
        }
        Ecfg {
            start: cfg.start_symbol().clone(),
            productions: bodies
                .into_iter()
                .map(|(head, alternatives)| (head, Regex::alt_all(alternatives)))
                .collect(),
        }
    }

    /// Parses extended grammar text: one `HEAD -> regex` per line,
    /// start symbol `S`.
    pub fn from_text(text: &str) -> Result<Self, CfgError> {
        Self::from_text_with_start(text, Symbol::new("S"))
    }

    /// Parses extended grammar text with an explicit start symbol. A
    /// repeated head keeps its last regex.
    pub fn from_text_with_start(text: &str, start: Symbol) -> Result<Self, CfgError> {
        let mut productions = BTreeMap::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (head, body) = line
                .split_once("->")
                .ok_or_else(|| CfgError::Parse(line.trim().to_string()))?;
            let head = head.trim();
            if head.is_empty() || head.split_whitespace().count() != 1 {
                return Err(CfgError::Parse(line.trim().to_string()));
            }
            productions.insert(Symbol::new(head), body.parse::<Regex>()?);
        }
        Ok(Ecfg { start, productions })
    }

    /// Returns the start symbol.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start
    }

    /// Returns the per-variable regexes.
    pub fn productions(&self) -> &BTreeMap<Symbol, Regex> {
        &self.productions
    }
}

impl fmt::Display for Ecfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (head, regex) in &self.productions {
            writeln!(f, "{} -> {}", head, regex)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Ecfg;
    use crate::Cfg;
    use cfpq_regexp::Regex;
    use cfpq_symbol::Symbol;

    #[test]
    fn cfg_bodies_alternate() {
        let cfg = Cfg::from_text("S -> a S | epsilon").unwrap();
        let ecfg = Ecfg::from_cfg(&cfg);
        let regex = &ecfg.productions()[&Symbol::new("S")];
        let expected = Regex::Symbol(Symbol::new("a"))
            .concat(Regex::Symbol(Symbol::new("S")))
            .alt(Regex::Epsilon);
        assert_eq!(regex, &expected);
    }

    #[test]
    fn text_bodies_are_regexes() {
        let ecfg = Ecfg::from_text("S -> b|S*").unwrap();
        let regex = &ecfg.productions()[&Symbol::new("S")];
        let expected =
            Regex::Symbol(Symbol::new("b")).alt(Regex::Symbol(Symbol::new("S")).star());
        assert_eq!(regex, &expected);
    }

    #[test]
    fn empty_text_has_no_productions() {
        let ecfg = Ecfg::from_text("").unwrap();
        assert!(ecfg.productions().is_empty());
    }

    #[test]
    fn lines_without_an_arrow_are_rejected() {
        assert!(Ecfg::from_text("S b|c").is_err());
    }
}
