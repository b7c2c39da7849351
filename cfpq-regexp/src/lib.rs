//! Regular expressions over symbolic alphabets.
//!
//! Atoms are whole symbols, not characters: `AAAAAA|B` denotes the
//! two-word language {`AAAAAA`, `B`}. Concatenation is written by
//! separating atoms with whitespace or group boundaries.

#![deny(unsafe_code)]

mod ast;
mod parse;

pub use self::ast::Regex;
pub use self::parse::RegexError;
