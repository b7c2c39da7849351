//! The error type of the query façade.

use cfpq_grammar::CfgError;
use cfpq_regexp::RegexError;

/// Everything that can go wrong before an engine runs.
///
/// Note what is *not* here: a query symbol absent from the graph is
/// not an error (it simply contributes no transitions), and neither
/// is an empty graph or an empty start set.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Malformed regex text.
    #[error(transparent)]
    Regex(#[from] RegexError),
    /// Malformed grammar text.
    #[error(transparent)]
    Grammar(#[from] CfgError),
    /// An algorithm tag outside `hellings`, `matrix`, `tensor`.
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
}
