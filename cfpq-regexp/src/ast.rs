//! The regular expression tree.

use std::fmt;
use std::str::FromStr;

use cfpq_symbol::Symbol;

use crate::parse;
use crate::RegexError;

/// A regular expression over symbols.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Regex {
    /// The empty language.
    Empty,
    /// The language of the empty word.
    Epsilon,
    /// A single symbol.
    Symbol(Symbol),
    /// Concatenation of two languages.
    Concat(Box<Regex>, Box<Regex>),
    /// Union of two languages.
    Alt(Box<Regex>, Box<Regex>),
    /// Kleene star.
    Star(Box<Regex>),
}

impl Regex {
    /// Creates a single-symbol expression.
    pub fn symbol(name: impl Into<Symbol>) -> Self {
        let symbol = name.into();
        if symbol.is_epsilon() {
            Regex::Epsilon
        } else {
            Regex::Symbol(symbol)
        }
    }

    /// Concatenates two expressions.
    pub fn concat(self, other: Regex) -> Self {
        Regex::Concat(Box::new(self), Box::new(other))
    }

    /// Takes the union of two expressions.
    pub fn alt(self, other: Regex) -> Self {
        Regex::Alt(Box::new(self), Box::new(other))
    }

    /// Wraps the expression in a Kleene star.
    pub fn star(self) -> Self {
        Regex::Star(Box::new(self))
    }

    /// Concatenates every expression of a sequence, in order. An
    /// empty sequence concatenates to the empty word.
    pub fn concat_all(parts: impl IntoIterator<Item = Regex>) -> Self {
        let mut parts = parts.into_iter();
        match parts.next() {
            None => Regex::Epsilon,
            Some(first) => parts.fold(first, Regex::concat),
        }
    }

    /// Takes the union of every expression of a sequence. An empty
    /// sequence unions to the empty language.
    pub fn alt_all(parts: impl IntoIterator<Item = Regex>) -> Self {
        let mut parts = parts.into_iter();
        match parts.next() {
            None => Regex::Empty,
            Some(first) => parts.fold(first, Regex::alt),
        }
    }
}

impl FromStr for Regex {
    type Err = RegexError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse::parse_regex(text)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regex::Empty => write!(f, "∅"),
            Regex::Epsilon => write!(f, "$"),
            Regex::Symbol(symbol) => write!(f, "{}", symbol),
            Regex::Concat(lhs, rhs) => write!(f, "({} {})", lhs, rhs),
            Regex::Alt(lhs, rhs) => write!(f, "({}|{})", lhs, rhs),
            Regex::Star(inner) => write!(f, "{}*", inner),
        }
    }
}
