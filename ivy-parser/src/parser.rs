use crate::ast::{BinOp, Block, Expr, Program, Stmt};
use crate::lexer::{LexError, Lexer, Token, TokenKind};
use ivy_source::{Diagnostic, Source, Span};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use tracing::trace;

mod expr;
mod stmt;

/// A construct delimited by an opening and a closing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimited {
    Block,
    Parameters,
    Arguments,
}

impl fmt::Display for Delimited {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Delimited::Block => "block",
            Delimited::Parameters => "parameter list",
            Delimited::Arguments => "argument list",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: TokenKind, span: Span },
    #[error("unterminated {delimited}")]
    Unterminated { delimited: Delimited, span: Span },
    #[error("integer literal `{text}` is too large")]
    InvalidInteger { text: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span.clone(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::Unterminated { span, .. }
            | ParseError::InvalidInteger { span, .. } => span.clone(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self, self.span())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive descent parser. Each production consumes its own terminating token.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> ParseResult<Self> {
        Ok(Self {
            lexer: Lexer::new(source.content)?,
        })
    }
}

impl<'a> Parser<'a> {
    /// Parses statements until the end of input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut body = Vec::new();
        while !self.at(TokenKind::Eof) {
            body.push(self.parse_stmt()?);
        }
        trace!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }
}

/// Parses `source` into a [`Program`].
///
/// # Example
/// ```
/// let program = ivy_parser::parse_program("var x = 2 * 5 + 1;").unwrap();
/// assert_eq!(program.to_string(), "(var x (* 2 (+ 5 1)))");
/// ```
pub fn parse_program(source: &str) -> ParseResult<Program> {
    let source = Source::new(source);
    let mut parser = Parser::new(&source)?;
    parser.parse_program()
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn current(&self) -> &Token {
        self.lexer.current()
    }

    fn peek(&self) -> &Token {
        self.lexer.peek()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Eats the current token and returns it.
    fn next(&mut self) -> ParseResult<Token> {
        Ok(self.lexer.advance()?)
    }

    /// Eats the current token if it is of the specified `kind`.
    fn eat(&mut self, kind: TokenKind) -> ParseResult<Option<Token>> {
        if self.at(kind) {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.eat(kind)? {
            Some(token) => Ok(token),
            None => Err(self.unexpected(kind)),
        }
    }

    /// Raises an unexpected token error.
    fn unexpected(&self, expected: TokenKind) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current().kind,
            span: self.current().span.clone(),
        }
    }

    /// Fails with [`ParseError::Unterminated`] if the input ended inside `delimited`.
    fn not_eof(&self, delimited: Delimited, open: &Token) -> ParseResult<()> {
        if self.at(TokenKind::Eof) {
            Err(ParseError::Unterminated {
                delimited,
                span: open.span.clone(),
            })
        } else {
            Ok(())
        }
    }
}
