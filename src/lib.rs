//! Diesel front end
//!
//! Lexes Diesel source into a position-tagged token stream and provides the
//! tree node type the parser builds from it.

pub mod feedback;
pub mod frontend;
pub mod stdlib;
pub mod utils;

pub use frontend::{tokenize, Lexer, LexerConfig, Token, TokenKind, TokenStream, TreeNode};
pub use utils::{Error, LexError, Result};
