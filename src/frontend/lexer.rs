//! Lexer for Diesel
//!
//! Converts source code into a stream of tokens in a single left-to-right
//! scan. Whitespace and `#[ ... ]#` comments are skipped; everything else
//! must match a row of [`TOKEN_TABLE`](super::token::TOKEN_TABLE), a digit
//! run, a text literal or an identifier-class run.

use log::{debug, trace};

use crate::frontend::token::{self, Token, TokenKind, TokenStream, COMMENT_END, COMMENT_START};
use crate::utils::{is_continuation, LexError, Position, Span};

/// Lexer options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Emit `Identifier` for non-keyword names. When off, any
    /// identifier-shaped run that is not a keyword is an `UnknownIdentifier`.
    pub identifiers: bool,
}

impl LexerConfig {
    /// Keyword-only grammar: no user-defined names
    pub fn keywords_only() -> Self {
        Self { identifiers: false }
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self { identifiers: true }
    }
}

/// Tokenize `source` with the default configuration
pub fn tokenize(source: &str) -> Result<TokenStream<'_>, LexError> {
    Lexer::new(source).tokenize()
}

/// The lexer state
pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    /// Current byte offset
    pos: usize,
    line: u32,
    column: u32,
    config: LexerConfig,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &'src str, config: LexerConfig) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            config,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume one byte, keeping line and column in step
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if !is_continuation(b) {
            self.column += 1;
        }
        Some(b)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Check whether the input at the cursor starts with `pattern`
    fn at(&self, pattern: &str) -> bool {
        self.bytes[self.pos..].starts_with(pattern.as_bytes())
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Skip whitespace and comment blocks
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.advance();
                }
                Some(b'#') if self.at(COMMENT_START) => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Consume a comment up to and including the first `]#`. Comments do not nest.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let offset = self.pos;
        let position = self.position();
        self.advance_by(COMMENT_START.len());

        while self.pos < self.bytes.len() {
            if self.at(COMMENT_END) {
                self.advance_by(COMMENT_END.len());
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::UnterminatedComment { offset, position })
    }

    /// Read a maximal `[A-Za-z_][A-Za-z0-9_]*` run, then look it up
    fn read_word(&mut self) -> Result<TokenKind, LexError> {
        let offset = self.pos;
        let position = self.position();
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let word = &self.source[offset..self.pos];
        match token::keyword_from_str(word) {
            Some(row) => Ok(row.kind),
            None if self.config.identifiers => Ok(TokenKind::Identifier),
            None => Err(LexError::UnknownIdentifier {
                name: word.to_string(),
                offset,
                position,
            }),
        }
    }

    /// Read a decimal digit run. `3.14` is three tokens.
    fn read_number(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
        TokenKind::Number
    }

    /// Read a text literal up to the next unescaped `"`.
    ///
    /// A backslash keeps the following byte from closing the literal; the
    /// lexeme is left untranslated.
    fn read_text(&mut self) -> Result<TokenKind, LexError> {
        let offset = self.pos;
        let position = self.position();
        self.advance(); // opening quote

        while let Some(b) = self.advance() {
            match b {
                b'"' => return Ok(TokenKind::Text),
                b'\\' => {
                    self.advance();
                }
                _ => {}
            }
        }

        Err(LexError::UnterminatedText { offset, position })
    }

    /// Try the symbol rows in table order
    fn read_symbol(&mut self) -> Result<TokenKind, LexError> {
        if let Some(row) = token::symbols().find(|row| self.at(row.pattern)) {
            self.advance_by(row.pattern.len());
            return Ok(row.kind);
        }

        let ch = self.source[self.pos..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Err(LexError::UnexpectedCharacter {
            ch,
            offset: self.pos,
            position: self.position(),
        })
    }

    /// Get the next token, `EndOfFile` once the input is exhausted
    fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_trivia()?;

        let start = self.pos;
        let (line, column) = (self.line, self.column);

        let Some(b) = self.peek() else {
            return Ok(Token::eof(start, line, column));
        };

        let kind = match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.read_word()?,
            b'0'..=b'9' => self.read_number(),
            b'"' => self.read_text()?,
            _ => self.read_symbol()?,
        };

        let span = Span::new(start, self.pos);
        Ok(Token::new(kind, span.slice(self.source), span, line, column))
    }

    /// Tokenize the entire source. Any error discards the tokens read so far.
    pub fn tokenize(mut self) -> Result<TokenStream<'src>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            trace!(
                "{:?} {:?} at {}:{}",
                token.kind,
                token.lexeme,
                token.line,
                token.column
            );
            let is_eof = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        debug!("lexed {} tokens from {} bytes", tokens.len(), self.source.len());
        Ok(TokenStream::new(tokens))
    }
}
