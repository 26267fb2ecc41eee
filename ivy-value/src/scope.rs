//! Lexical scopes.

use crate::Value;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("undefined name `{0}`")]
    Undefined(String),
    #[error("`{0}` is already defined in this scope")]
    Duplicate(String),
}

/// A mapping from names to values, chained to the scope it was created in.
///
/// Scopes are shared through [`Rc`]: every function declared in a scope holds a
/// reference to it, and a definition made after the declaration is visible to the
/// function. Definitions use interior mutability so shared scopes can still grow.
///
/// A function defined in the scope it captures forms an `Rc` cycle, so such a
/// scope (for example a call scope declaring an inner function) is never freed.
#[derive(Default)]
pub struct Scope {
    values: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Scope>>,
}

impl Scope {
    /// Creates an empty root scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates an empty scope whose lookups fall back to `parent`.
    pub fn with_parent(parent: &Rc<Scope>) -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    pub fn parent(&self) -> Option<&Rc<Scope>> {
        self.parent.as_ref()
    }

    /// Adds `name` to this scope. Shadowing a name of an enclosing scope is allowed,
    /// defining a name twice in the same scope is not.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Result<(), ScopeError> {
        match self.values.borrow_mut().entry(name.into()) {
            Entry::Occupied(entry) => Err(ScopeError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                trace!(name = %entry.key(), value = %value, "define");
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// Resolves `name` in this scope, then in each enclosing scope.
    pub fn get(&self, name: &str) -> Result<Value, ScopeError> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.values.borrow().get(name) {
                return Ok(value.clone());
            }
            match &scope.parent {
                Some(parent) => scope = parent.as_ref(),
                None => return Err(ScopeError::Undefined(name.to_string())),
            }
        }
    }

    /// Returns `true` if `name` is defined in this scope itself (parents are not searched).
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.borrow().contains_key(name)
    }
}

/// `Drop` is implemented for `Scope` merely to ease debugging of scope lifetimes.
impl Drop for Scope {
    fn drop(&mut self) {
        trace!(bindings = self.values.get_mut().len(), "dropping scope");
    }
}
