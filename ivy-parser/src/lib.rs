//! Tokenizer, abstract syntax tree and recursive descent parser.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use parser::{parse_program, ParseError};
