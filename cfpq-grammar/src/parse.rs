//! The grammar text parser.
//!
//! One production per line: `HEAD -> body`, with `|` separating
//! alternative bodies. A token starting with an uppercase letter is a
//! variable, anything else is a terminal, and `epsilon` (or an empty
//! alternative) is the empty body. Blank lines are skipped.

use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::space0;
use nom::combinator::{all_consuming, map};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;

use cfpq_symbol::Symbol;

use crate::{Cfg, Production, Term};

/// The error type for malformed grammar text.
#[derive(Debug, thiserror::Error)]
pub enum CfgError {
    /// A line is not a well-formed production.
    #[error("malformed production {0:?}")]
    Parse(String),
    /// A regex body of an extended grammar failed to parse.
    #[error(transparent)]
    Regex(#[from] cfpq_regexp::RegexError),
}

impl Cfg {
    /// Parses grammar text. The start symbol defaults to `S`.
    pub fn from_text(text: &str) -> Result<Cfg, CfgError> {
        Self::from_text_with_start(text, Symbol::new("S"))
    }

    /// Parses grammar text with an explicit start symbol.
    pub fn from_text_with_start(text: &str, start: Symbol) -> Result<Cfg, CfgError> {
        let mut productions = vec![];
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (head, bodies) = parse_production_line(line)
                .map_err(|_| CfgError::Parse(line.trim().to_string()))?;
            for body in bodies {
                productions.push(Production::new(head.clone(), body));
            }
        }
        Ok(Cfg::new(start, productions))
    }
}

fn parse_production_line(line: &str) -> Result<(Symbol, Vec<Vec<Term>>), ()> {
    let result: IResult<&str, (Symbol, Vec<Vec<Term>>)> = all_consuming(delimited(
        space0,
        separated_pair(head, delimited(space0, tag("->"), space0), bodies),
        space0,
    ))(line);
    match result {
        Ok((_, parsed)) => Ok(parsed),
        Err(_) => Err(()),
    }
}

fn head(input: &str) -> IResult<&str, Symbol> {
    map(token, Symbol::new)(input)
}

fn bodies(input: &str) -> IResult<&str, Vec<Vec<Term>>> {
    separated_list1(
        delimited(space0, nom::character::complete::char('|'), space0),
        body,
    )(input)
}

fn body(input: &str) -> IResult<&str, Vec<Term>> {
    map(many0(preceded(space0, term)), |terms| {
        terms.into_iter().flatten().collect()
    })(input)
}

fn term(input: &str) -> IResult<&str, Option<Term>> {
    map(token, |text| match text {
        "epsilon" | "$" => None,
        _ => Some(classify(text)),
    })(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '|')(input)
}

fn classify(text: &str) -> Term {
    if text.chars().next().is_some_and(|c| c.is_uppercase()) {
        Term::Variable(Symbol::new(text))
    } else {
        Term::Terminal(Symbol::new(text))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cfg, Term};
    use cfpq_symbol::Symbol;

    #[test]
    fn case_splits_variables_from_terminals() {
        let cfg = Cfg::from_text("S -> a S").unwrap();
        let production = cfg.productions().next().unwrap();
        assert_eq!(production.head, Symbol::new("S"));
        assert_eq!(
            production.body,
            vec![
                Term::Terminal(Symbol::new("a")),
                Term::Variable(Symbol::new("S")),
            ]
        );
    }

    #[test]
    fn alternation_and_epsilon() {
        let cfg = Cfg::from_text("S -> a S | epsilon").unwrap();
        assert_eq!(cfg.productions().count(), 2);
        assert_eq!(cfg.epsilon_heads().len(), 1);
    }

    #[test]
    fn empty_alternative_is_epsilon() {
        let cfg = Cfg::from_text("S ->").unwrap();
        let production = cfg.productions().next().unwrap();
        assert!(production.body.is_empty());
    }

    #[test]
    fn parenthesis_terminals() {
        let cfg = Cfg::from_text("S -> ( S ) S | S ( S ) | epsilon").unwrap();
        assert_eq!(cfg.productions().count(), 3);
        assert_eq!(
            cfg.terminals(),
            [Symbol::new("("), Symbol::new(")")].into_iter().collect()
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let cfg = Cfg::from_text("\n  S -> x\n\n").unwrap();
        assert_eq!(cfg.productions().count(), 1);
    }

    #[test]
    fn missing_arrow_is_an_error() {
        assert!(Cfg::from_text("S a b").is_err());
    }
}
