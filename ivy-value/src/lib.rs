pub mod function;
pub mod scope;

pub use function::Function;
pub use scope::{Scope, ScopeError};

use std::fmt;
use std::rc::Rc;

/// A runtime value. Only ever produced by the evaluator.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    Function(Rc<Function>),
    /// Internal wrapper carrying the operand of a `return` statement up to the
    /// enclosing call. Must be unwrapped before the value is consumed.
    Return(Box<Value>),
}

impl Value {
    /// Wraps `value` in a return signal.
    pub fn returned(value: Value) -> Self {
        Value::Return(Box::new(value))
    }

    /// Strips every layer of [`Value::Return`].
    ///
    /// # Example
    /// ```
    /// use ivy_value::Value;
    /// let value = Value::returned(Value::returned(Value::Integer(8)));
    /// assert_eq!(value.unwrap_return(), Value::Integer(8));
    /// ```
    pub fn unwrap_return(self) -> Value {
        match self {
            Value::Return(inner) => inner.unwrap_return(),
            value => value,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Value::Return(_))
    }

    pub fn cast_to_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(val) => Some(*val),
            _ => None,
        }
    }

    pub fn cast_to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(val) => Some(*val),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Function(_) => "function",
            Value::Return(_) => "return",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(l), Value::Integer(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
            (Value::Return(l), Value::Return(r)) => l == r,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::Return(val) => fmt::Display::fmt(val, f),
        }
    }
}

// Not derived: a captured scope can (indirectly) contain the function itself.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(val) => write!(f, "Integer({})", val),
            Value::Bool(val) => write!(f, "Bool({})", val),
            Value::Function(func) => write!(f, "Function({}/{})", func.name, func.arity()),
            Value::Return(val) => write!(f, "Return({:?})", val),
        }
    }
}
