//! Template parser: tokenizer, keyword grammar and block compiler

pub mod ast;
mod compiler;
mod grammar;
pub mod lexer;
pub mod tokenizer;

pub use ast::*;
pub use compiler::compile;
pub use grammar::{parse_keyword, Keyword};
