use crate::scope::Scope;
use ivy_parser::ast::Block;
use std::rc::Rc;

/// A function value: a declaration closed over the scope it was declared in.
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<Block>,
    /// The live scope the declaration executed in (not a snapshot), so later
    /// definitions in that scope, including the function itself, are visible.
    pub scope: Rc<Scope>,
}

impl Function {
    /// Number of arguments that the function accepts.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
