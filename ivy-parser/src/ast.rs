//! Abstract syntax tree produced by [`crate::parser::Parser`].
//!
//! Every node keeps the token it was parsed from so that later stages can point
//! diagnostics at the right place. Nodes are never mutated after parsing.

use crate::lexer::{Token, TokenKind};
use std::fmt;
use std::rc::Rc;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    Greater,
    Less,
}

impl BinOp {
    /// Returns the operator for `kind` or `None` if `kind` is not a binary operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Asterisk => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::EqualsEquals => Some(BinOp::Equal),
            TokenKind::NotEquals => Some(BinOp::NotEqual),
            TokenKind::GreaterThan => Some(BinOp::Greater),
            TokenKind::LessThan => Some(BinOp::Less),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::Greater => ">",
            BinOp::Less => "<",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLit {
        token: Token,
        value: i64,
    },
    BoolLit {
        token: Token,
        value: bool,
    },
    /// An identifier (e.g. `foo`).
    Identifier {
        token: Token,
        ident: String,
    },
    /// A binary expression (e.g. `1 + 1`). `token` is the operator token.
    Binary {
        token: Token,
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
    /// A function call (e.g. `foo(1, bar)`). `token` is the callee identifier.
    FnCall {
        token: Token,
        ident: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// The token this expression was parsed from.
    pub fn token(&self) -> &Token {
        match self {
            Expr::IntegerLit { token, .. }
            | Expr::BoolLit { token, .. }
            | Expr::Identifier { token, .. }
            | Expr::Binary { token, .. }
            | Expr::FnCall { token, .. } => token,
        }
    }
}

/// A brace delimited sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The opening `{`.
    pub token: Token,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    ExprStmt {
        token: Token,
        expr: Expr,
    },
    VarDeclaration {
        token: Token,
        ident: String,
        initializer: Expr,
    },
    ReturnStmt {
        token: Token,
        expr: Expr,
    },
    IfElse {
        token: Token,
        condition: Expr,
        consequence: Block,
        alternative: Option<Block>,
    },
    FnDeclaration {
        token: Token,
        ident: String,
        params: Vec<String>,
        /// Shared with every function value created from this declaration.
        body: Rc<Block>,
    },
}

impl Stmt {
    /// The token this statement was parsed from.
    pub fn token(&self) -> &Token {
        match self {
            Stmt::ExprStmt { token, .. }
            | Stmt::VarDeclaration { token, .. }
            | Stmt::ReturnStmt { token, .. }
            | Stmt::IfElse { token, .. }
            | Stmt::FnDeclaration { token, .. } => token,
        }
    }
}

/// Top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/* S-expression printing */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IntegerLit { value, .. } => write!(f, "{}", value),
            Expr::BoolLit { value, .. } => write!(f, "{}", value),
            Expr::Identifier { ident, .. } => f.write_str(ident),
            Expr::Binary { lhs, op, rhs, .. } => write!(f, "({} {} {})", op, lhs, rhs),
            Expr::FnCall { ident, args, .. } => {
                write!(f, "(call {}", ident)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{")?;
        for stmt in &self.body {
            write!(f, " {}", stmt)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::ExprStmt { expr, .. } => write!(f, "{}", expr),
            Stmt::VarDeclaration {
                ident, initializer, ..
            } => write!(f, "(var {} {})", ident, initializer),
            Stmt::ReturnStmt { expr, .. } => write!(f, "(return {})", expr),
            Stmt::IfElse {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "(if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                f.write_str(")")
            }
            Stmt::FnDeclaration {
                ident,
                params,
                body,
                ..
            } => write!(f, "(function {} ({}) {})", ident, params.join(" "), body),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
