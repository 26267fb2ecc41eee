//! Evaluation of AST nodes against a [`Scope`].

use crate::error::{EvalError, EvalResult};
use ivy_parser::ast::{BinOp, Block, Expr, Program, Stmt};
use ivy_parser::lexer::Token;
use ivy_value::{Function, Scope, Value};
use std::rc::Rc;
use tracing::{debug, trace};

/// An AST node that can be evaluated.
///
/// `Ok(None)` means the node produced no value (declarations, empty blocks, an `if`
/// without `else` whose condition was false, or a call to such a body).
pub trait Evaluate {
    fn evaluate(&self, scope: &Rc<Scope>) -> EvalResult<Option<Value>>;
}

impl Evaluate for Program {
    /// Runs every top-level statement, even after a `return`, and yields the last
    /// result. Only an error stops the program early.
    fn evaluate(&self, scope: &Rc<Scope>) -> EvalResult<Option<Value>> {
        let mut result = None;
        for stmt in &self.body {
            result = stmt.evaluate(scope)?;
        }
        Ok(result)
    }
}

impl Evaluate for Block {
    /// Blocks run in the ambient scope; only calls create new scopes.
    /// The first return signal ends the block and is its result.
    fn evaluate(&self, scope: &Rc<Scope>) -> EvalResult<Option<Value>> {
        let mut result = None;
        for stmt in &self.body {
            result = stmt.evaluate(scope)?;
            if let Some(Value::Return(_)) = result {
                break;
            }
        }
        Ok(result)
    }
}

impl Evaluate for Stmt {
    fn evaluate(&self, scope: &Rc<Scope>) -> EvalResult<Option<Value>> {
        trace!(stmt = %self, "evaluate");
        match self {
            Stmt::ExprStmt { expr, .. } => expr.evaluate(scope),
            Stmt::VarDeclaration {
                token,
                ident,
                initializer,
            } => {
                let value = operand(initializer, scope)?;
                define(scope, ident, value, token)?;
                Ok(None)
            }
            Stmt::ReturnStmt { expr, .. } => Ok(Some(Value::returned(operand(expr, scope)?))),
            Stmt::IfElse {
                condition,
                consequence,
                alternative,
                ..
            } => match operand(condition, scope)? {
                Value::Bool(true) => consequence.evaluate(scope),
                Value::Bool(false) => match alternative {
                    Some(alternative) => alternative.evaluate(scope),
                    None => Ok(None),
                },
                other => Err(EvalError::Type {
                    message: format!(
                        "`if` condition must be a boolean, found {}",
                        other.type_name()
                    ),
                    span: condition.token().span.clone(),
                }),
            },
            Stmt::FnDeclaration {
                token,
                ident,
                params,
                body,
            } => {
                let function = Function {
                    name: ident.clone(),
                    params: params.clone(),
                    body: Rc::clone(body),
                    scope: Rc::clone(scope), // capture the live scope, not a copy
                };
                define(scope, ident, Value::Function(Rc::new(function)), token)?;
                Ok(None)
            }
        }
    }
}

impl Evaluate for Expr {
    fn evaluate(&self, scope: &Rc<Scope>) -> EvalResult<Option<Value>> {
        match self {
            Expr::IntegerLit { value, .. } => Ok(Some(Value::Integer(*value))),
            Expr::BoolLit { value, .. } => Ok(Some(Value::Bool(*value))),
            Expr::Identifier { token, ident } => scope
                .get(ident)
                .map(Some)
                .map_err(|err| EvalError::from_scope(err, token)),
            Expr::Binary {
                token,
                lhs,
                op,
                rhs,
            } => {
                let lhs = operand(lhs, scope)?;
                let rhs = operand(rhs, scope)?;
                binary(*op, lhs, rhs, token).map(Some)
            }
            Expr::FnCall { token, ident, args } => call(ident, args, token, scope),
        }
    }
}

/// Evaluates `expr` for a value that is about to be consumed.
/// Return signals are stripped and "no value" is a type error.
fn operand(expr: &Expr, scope: &Rc<Scope>) -> EvalResult<Value> {
    match expr.evaluate(scope)? {
        Some(value) => Ok(value.unwrap_return()),
        None => Err(EvalError::Type {
            message: format!("`{}` does not produce a value", expr),
            span: expr.token().span.clone(),
        }),
    }
}

fn define(scope: &Scope, name: &str, value: Value, token: &Token) -> EvalResult<()> {
    scope
        .define(name, value)
        .map_err(|err| EvalError::from_scope(err, token))
}

/// Calls the function bound to `ident`.
/// The result is whatever the body produces, return signal included.
#[tracing::instrument(level = "debug", skip(args, token, scope))]
fn call(ident: &str, args: &[Expr], token: &Token, scope: &Rc<Scope>) -> EvalResult<Option<Value>> {
    let callee = scope
        .get(ident)
        .map_err(|err| EvalError::from_scope(err, token))?
        .unwrap_return();
    let function = match callee {
        Value::Function(function) => function,
        other => {
            return Err(EvalError::Type {
                message: format!("`{}` is not a function, found {}", ident, other.type_name()),
                span: token.span.clone(),
            })
        }
    };

    // arguments are evaluated left to right in the caller's scope
    let args = args
        .iter()
        .map(|arg| operand(arg, scope))
        .collect::<EvalResult<Vec<_>>>()?;
    if args.len() != function.arity() {
        return Err(EvalError::Arity {
            name: function.name.clone(),
            expected: function.arity(),
            found: args.len(),
            span: token.span.clone(),
        });
    }

    let call_scope = Scope::with_parent(&function.scope);
    for (param, arg) in function.params.iter().zip(args) {
        define(&call_scope, param, arg, token)?;
    }
    debug!(function = %function.name, "entering function body");
    function.body.evaluate(&call_scope)
}

fn binary(op: BinOp, lhs: Value, rhs: Value, token: &Token) -> EvalResult<Value> {
    let (l, r) = match (&lhs, &rhs) {
        (Value::Integer(l), Value::Integer(r)) => (*l, *r),
        _ => {
            return Err(EvalError::Type {
                message: format!(
                    "`{}` expects integer operands, found {} and {}",
                    op,
                    lhs.type_name(),
                    rhs.type_name()
                ),
                span: token.span.clone(),
            })
        }
    };

    /// Generate checked integer arithmetic for a binary operator.
    macro_rules! checked_op {
        ($l: ident, $method: ident, $r: ident) => {
            $l.$method($r)
                .map(Value::Integer)
                .ok_or_else(|| EvalError::Overflow {
                    lhs: $l,
                    op,
                    rhs: $r,
                    span: token.span.clone(),
                })
        };
    }

    match op {
        BinOp::Add => checked_op!(l, checked_add, r),
        BinOp::Sub => checked_op!(l, checked_sub, r),
        BinOp::Mul => checked_op!(l, checked_mul, r),
        BinOp::Div if r == 0 => Err(EvalError::DivisionByZero {
            span: token.span.clone(),
        }),
        // truncates toward zero
        BinOp::Div => checked_op!(l, checked_div, r),
        BinOp::Equal => Ok(Value::Bool(l == r)),
        BinOp::NotEqual => Ok(Value::Bool(l != r)),
        BinOp::Greater => Ok(Value::Bool(l > r)),
        BinOp::Less => Ok(Value::Bool(l < r)),
    }
}
