//! Context-free grammars and their preparation for path querying.
//!
//! The pipeline: a `Cfg` normalizes to weak Chomsky normal form for
//! the triple-based engines, converts through an extended grammar
//! (one regex per variable) to a recursive state machine for the
//! tensor engine, and lowers to full Chomsky normal form for CYK
//! membership testing.

#![deny(unsafe_code)]

mod cfg;
mod cyk;
mod ecfg;
mod normal_form;
mod parse;
mod rsm;
mod usefulness;

pub use self::cfg::{Cfg, Production, Term};
pub use self::cyk::cyk;
pub use self::ecfg::Ecfg;
pub use self::parse::CfgError;
pub use self::rsm::Rsm;
