mod ast;
pub mod error;
pub mod lexer;
mod postfix;
mod syntax;

pub use ast::{Ast, Node, NodeId};
pub use error::CompileError;
pub use lexer::{Token, TokenKind, tokenize};
pub use postfix::to_postfix;
pub use syntax::{Operator, Span};

/// Compile expression text into an AST: tokenize, reorder to postfix, build.
pub fn parse(source: &str) -> Result<Ast, CompileError> {
    let tokens = tokenize(source)?;
    let postfix = to_postfix(tokens)?;
    Ast::from_postfix(&postfix)
}


#[cfg(test)]
mod postfix_test;

#[cfg(test)]
mod parse_test;
