//! Utility module

mod span;
mod error;

pub use span::{Position, Span};
pub(crate) use span::is_continuation;
pub use error::{Error, LexError, Result};
