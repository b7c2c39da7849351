//! The regex text parser.
//!
//! Syntax: alternation `|`, postfix Kleene star `*`, grouping `()`,
//! and `epsilon` or `$` for the empty word. An atom is any maximal
//! run of characters outside `()|*$` and whitespace; adjacent atoms
//! and groups concatenate.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use crate::Regex;

/// The error type for malformed regex text.
#[derive(Debug, thiserror::Error)]
pub enum RegexError {
    /// The text is not a well-formed expression.
    #[error("malformed regex {0:?}")]
    Parse(String),
}

/// Parses regex text. Empty or blank text denotes the empty language.
pub fn parse_regex(text: &str) -> Result<Regex, RegexError> {
    if text.trim().is_empty() {
        return Ok(Regex::Empty);
    }
    match all_consuming(delimited(multispace0, alternation, multispace0))(text) {
        Ok((_, regex)) => Ok(regex),
        Err(_) => Err(RegexError::Parse(text.to_string())),
    }
}

fn alternation(input: &str) -> IResult<&str, Regex> {
    map(
        separated_list1(preceded(multispace0, char('|')), concatenation),
        Regex::alt_all,
    )(input)
}

fn concatenation(input: &str) -> IResult<&str, Regex> {
    map(many1(starred), Regex::concat_all)(input)
}

fn starred(input: &str) -> IResult<&str, Regex> {
    map(pair(atom, many0(char('*'))), |(mut regex, stars)| {
        for _ in stars {
            regex = regex.star();
        }
        regex
    })(input)
}

fn atom(input: &str) -> IResult<&str, Regex> {
    preceded(
        multispace0,
        alt((
            delimited(
                char('('),
                alternation,
                preceded(multispace0, char(')')),
            ),
            map(char('$'), |_| Regex::Epsilon),
            map(symbol_text, |name| {
                if name == "epsilon" {
                    Regex::Epsilon
                } else {
                    Regex::symbol(name)
                }
            }),
        )),
    )(input)
}

fn symbol_text(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !"()|*$".contains(c))(input)
}
