//! The transition label type.

use std::fmt;
use std::rc::Rc;

/// A transition label. Meant to be cheap to clone.
///
/// The distinguished `Epsilon` value stands for the empty word. It may
/// appear in intermediate automata during regex compilation, but never
/// as a key of a stored transition matrix and never as a grammar
/// terminal.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Symbol {
    /// The empty-word label.
    Epsilon,
    /// An ordinary label, compared by its text.
    Label(Rc<str>),
}

impl Symbol {
    /// Creates a label from its text.
    pub fn new(name: impl AsRef<str>) -> Self {
        Symbol::Label(Rc::from(name.as_ref()))
    }

    /// Checks whether this is the empty-word label.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the label's text. The empty-word label reads as `"ε"`.
    pub fn as_str(&self) -> &str {
        match self {
            Symbol::Epsilon => "ε",
            Symbol::Label(name) => name,
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol::new(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
