//! Error handling for the Diesel front end

use crate::utils::{Position, Span};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Lexer failure. Every variant is fatal for the `tokenize` call that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedCharacter {
        ch: char,
        offset: usize,
        position: Position,
    },

    #[error("Unterminated comment opened at {position}")]
    UnterminatedComment { offset: usize, position: Position },

    #[error("Unknown identifier: {name} at {position}")]
    UnknownIdentifier {
        name: String,
        offset: usize,
        position: Position,
    },

    #[error("Unterminated text literal opened at {position}")]
    UnterminatedText { offset: usize, position: Position },
}

impl LexError {
    /// Byte offset of the failure
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { offset, .. }
            | Self::UnterminatedComment { offset, .. }
            | Self::UnknownIdentifier { offset, .. }
            | Self::UnterminatedText { offset, .. } => *offset,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedComment { position, .. }
            | Self::UnknownIdentifier { position, .. }
            | Self::UnterminatedText { position, .. } => *position,
        }
    }

    pub fn line(&self) -> u32 {
        self.position().line
    }

    pub fn column(&self) -> u32 {
        self.position().column
    }

    /// Source range the error points at
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { ch, offset, .. } => {
                Span::new(*offset, *offset + ch.len_utf8())
            }
            Self::UnknownIdentifier { name, offset, .. } => Span::new(*offset, *offset + name.len()),
            Self::UnterminatedComment { offset, .. } | Self::UnterminatedText { offset, .. } => {
                Span::new(*offset, *offset + 1)
            }
        }
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter { .. } => "L0001",
            Self::UnterminatedComment { .. } => "L0002",
            Self::UnknownIdentifier { .. } => "L0003",
            Self::UnterminatedText { .. } => "L0004",
        }
    }
}

/// Front end error
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span()),
            Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_report_location() {
        let err = LexError::UnexpectedCharacter {
            ch: '@',
            offset: 7,
            position: Position { line: 2, column: 3 },
        };
        assert_eq!(err.offset(), 7);
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 3);
        assert_eq!(err.span(), Span::new(7, 8));
        assert_eq!(err.to_string(), "Unexpected character '@' at 2:3");
    }

    #[test]
    fn identifier_span_covers_name() {
        let err = LexError::UnknownIdentifier {
            name: "foo".into(),
            offset: 4,
            position: Position { line: 1, column: 5 },
        };
        assert_eq!(err.span(), Span::new(4, 7));
        assert_eq!(err.code(), "L0003");
    }

    #[test]
    fn wraps_into_crate_error() {
        let err: Error = LexError::UnterminatedComment {
            offset: 0,
            position: Position::default(),
        }
        .into();
        assert_eq!(err.span(), Some(Span::new(0, 1)));
        assert_eq!(err.to_string(), "Unterminated comment opened at 1:1");
    }
}
