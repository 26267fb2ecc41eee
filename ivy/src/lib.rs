//! The ivy language: parse and evaluate source text.

use ivy_eval::EvalError;
use ivy_parser::ParseError;
use ivy_source::{Diagnostic, Span};
use ivy_value::{Scope, Value};
use std::rc::Rc;
use thiserror::Error;

pub use ivy_eval::evaluate_program;
pub use ivy_parser::parse_program;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::Parse(err) => err.span(),
            Error::Eval(err) => err.span(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Parse(err) => err.to_diagnostic(),
            Error::Eval(err) => err.to_diagnostic(),
        }
    }
}

/// Parses and evaluates `source` against `scope`.
/// Nothing is evaluated if `source` does not parse.
pub fn interpret(source: &str, scope: &Rc<Scope>) -> Result<Option<Value>, Error> {
    let program = parse_program(source)?;
    Ok(evaluate_program(&program, scope)?)
}
