//! Tree-walking evaluator.

pub mod error;
pub mod interpreter;

pub use error::{EvalError, EvalResult};
pub use interpreter::Evaluate;

use ivy_parser::ast::Program;
use ivy_value::{Scope, Value};
use std::rc::Rc;
use tracing::debug;

/// Evaluates `program` against `scope`. Definitions made by the program stay in `scope`.
///
/// # Example
/// ```
/// use ivy_eval::evaluate_program;
/// use ivy_value::{Scope, Value};
///
/// let program = ivy_parser::parse_program("var x = 5; var y = 3; x - y;").unwrap();
/// let scope = Scope::new();
/// assert_eq!(evaluate_program(&program, &scope), Ok(Some(Value::Integer(2))));
/// assert_eq!(scope.get("x"), Ok(Value::Integer(5)));
/// ```
pub fn evaluate_program(program: &Program, scope: &Rc<Scope>) -> EvalResult<Option<Value>> {
    debug!(statements = program.body.len(), "evaluating program");
    program.evaluate(scope)
}
