use ivy_parser::ast::BinOp;
use ivy_parser::lexer::Token;
use ivy_source::{Diagnostic, Span};
use ivy_value::ScopeError;
use thiserror::Error;

/// Runtime errors. Any of these aborts the evaluation of the whole program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("undefined name `{name}`")]
    UndefinedName { name: String, span: Span },
    #[error("`{name}` is already defined in this scope")]
    DuplicateDefinition { name: String, span: Span },
    #[error("type error: {message}")]
    Type { message: String, span: Span },
    #[error("function `{name}` expects {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },
    #[error("division by zero")]
    DivisionByZero { span: Span },
    #[error("integer overflow in `{lhs} {op} {rhs}`")]
    Overflow {
        lhs: i64,
        op: BinOp,
        rhs: i64,
        span: Span,
    },
}

pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    /// Attaches the location of `token` to a scope lookup or definition failure.
    pub fn from_scope(err: ScopeError, token: &Token) -> Self {
        let span = token.span.clone();
        match err {
            ScopeError::Undefined(name) => EvalError::UndefinedName { name, span },
            ScopeError::Duplicate(name) => EvalError::DuplicateDefinition { name, span },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            EvalError::UndefinedName { span, .. }
            | EvalError::DuplicateDefinition { span, .. }
            | EvalError::Type { span, .. }
            | EvalError::Arity { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::Overflow { span, .. } => span.clone(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self, self.span())
    }
}
