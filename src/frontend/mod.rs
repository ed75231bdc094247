//! Frontend module - Token model, Lexer, Syntax tree

pub mod token;
pub mod lexer;
pub mod ast;

pub use ast::TreeNode;
pub use lexer::{tokenize, Lexer, LexerConfig};
pub use token::{Token, TokenKind, TokenStream, TypeDescriptor};
