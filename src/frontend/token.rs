//! Token definitions for Diesel
//!
//! [`TOKEN_TABLE`] is the single source of truth for every fixed spelling the
//! lexer recognises. Row order is priority order: a longer symbol must sit
//! above every symbol that is a prefix of it, so `>=` is tried before `>`.
//! Adding a keyword or operator means adding a row at the right position.

use serde::Serialize;

use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The exact source text matched
    pub lexeme: &'src str,
    pub span: Span,
    /// 1-based line of `span.start`
    pub line: u32,
    /// 1-based column of `span.start`
    pub column: u32,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span, line: u32, column: u32) -> Self {
        Self { kind, lexeme, span, line, column }
    }

    pub fn eof(offset: usize, line: u32, column: u32) -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            lexeme: "",
            span: Span::point(offset),
            line,
            column,
        }
    }

    /// Type metadata, for scalar type keywords only
    pub fn descriptor(&self) -> Option<TypeDescriptor> {
        self.kind.descriptor()
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // ============ Structural ============
    /// #[
    CommentStart,
    /// ]#
    CommentEnd,

    // ============ I/O ============
    /// output
    Output,
    /// input
    Input,

    // ============ Bindings ============
    /// const
    Const,
    /// var
    Var,
    /// list
    VarList,

    // ============ Scalar types ============
    UInt4,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int4,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Char,
    String,
    Bool,
    Inherit,

    // ============ Declarations ============
    /// def
    FunctionDef,
    /// %entry%
    EntryModifier,

    // ============ Punctuation ============
    /// .
    Period,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// :
    Colon,
    /// (
    ParenOpen,
    /// )
    ParenClose,
    /// [
    SquareOpen,
    /// ]
    SquareClose,
    /// {
    CurlyOpen,
    /// }
    CurlyClose,

    // ============ Operators ============
    /// =
    Assign,
    /// >
    Greater,
    /// <
    Less,
    /// ==
    Equal,
    /// >=
    GreaterOrEqual,
    /// <=
    LessOrEqual,

    // ============ Literals ============
    /// Unsigned decimal digit run
    Number,
    /// Double-quoted text, quotes included in the lexeme
    Text,
    /// Identifier-shaped run that is not a keyword
    Identifier,

    // ============ Special ============
    /// Synthetic terminal token
    EndOfFile,
}

/// Static metadata carried by scalar type keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    /// Storage width in bytes; 0 when resolved later (`string`, `inherit`)
    pub byte_size: u8,
    pub signed: bool,
    pub is_const: bool,
}

impl TypeDescriptor {
    pub const fn new(byte_size: u8, signed: bool) -> Self {
        Self { byte_size, signed, is_const: false }
    }

    /// Const-qualified copy, as applied after a `const` binding
    pub const fn as_const(self) -> Self {
        Self { is_const: true, ..self }
    }

    /// Whether the size is only known after semantic analysis
    pub fn is_deferred(&self) -> bool {
        self.byte_size == 0
    }
}

/// How a table row is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternClass {
    /// Comment delimiters, only meaningful to the comment skipper
    Structural,
    /// Literal byte sequence, tried in table order
    Symbol,
    /// Whole identifier-class run, looked up after maximal munch
    Keyword,
}

/// One row of the token table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPattern {
    pub pattern: &'static str,
    pub kind: TokenKind,
    pub class: PatternClass,
    pub descriptor: Option<TypeDescriptor>,
}

const fn structural(pattern: &'static str, kind: TokenKind) -> TokenPattern {
    TokenPattern { pattern, kind, class: PatternClass::Structural, descriptor: None }
}

const fn symbol(pattern: &'static str, kind: TokenKind) -> TokenPattern {
    TokenPattern { pattern, kind, class: PatternClass::Symbol, descriptor: None }
}

const fn keyword(pattern: &'static str, kind: TokenKind) -> TokenPattern {
    TokenPattern { pattern, kind, class: PatternClass::Keyword, descriptor: None }
}

const fn scalar(pattern: &'static str, kind: TokenKind, byte_size: u8, signed: bool) -> TokenPattern {
    TokenPattern {
        pattern,
        kind,
        class: PatternClass::Keyword,
        descriptor: Some(TypeDescriptor::new(byte_size, signed)),
    }
}

pub const COMMENT_START: &str = "#[";
pub const COMMENT_END: &str = "]#";

/// Every fixed spelling, in priority order.
pub static TOKEN_TABLE: &[TokenPattern] = &[
    structural(COMMENT_START, TokenKind::CommentStart),
    structural(COMMENT_END, TokenKind::CommentEnd),
    // Multi-character symbols before their prefixes
    symbol("%entry%", TokenKind::EntryModifier),
    symbol("==", TokenKind::Equal),
    symbol(">=", TokenKind::GreaterOrEqual),
    symbol("<=", TokenKind::LessOrEqual),
    symbol("=", TokenKind::Assign),
    symbol(">", TokenKind::Greater),
    symbol("<", TokenKind::Less),
    symbol(".", TokenKind::Period),
    symbol(",", TokenKind::Comma),
    symbol(";", TokenKind::Semicolon),
    symbol(":", TokenKind::Colon),
    symbol("(", TokenKind::ParenOpen),
    symbol(")", TokenKind::ParenClose),
    symbol("[", TokenKind::SquareOpen),
    symbol("]", TokenKind::SquareClose),
    symbol("{", TokenKind::CurlyOpen),
    symbol("}", TokenKind::CurlyClose),
    keyword("output", TokenKind::Output),
    keyword("input", TokenKind::Input),
    keyword("const", TokenKind::Const),
    keyword("var", TokenKind::Var),
    keyword("list", TokenKind::VarList),
    keyword("def", TokenKind::FunctionDef),
    // No runtime typedef is narrower than a byte, so the 4-bit types take one.
    scalar("uint4", TokenKind::UInt4, 1, false),
    scalar("uint8", TokenKind::UInt8, 1, false),
    scalar("uint16", TokenKind::UInt16, 2, false),
    scalar("uint32", TokenKind::UInt32, 4, false),
    scalar("uint64", TokenKind::UInt64, 8, false),
    scalar("int4", TokenKind::Int4, 1, true),
    scalar("int8", TokenKind::Int8, 1, true),
    scalar("int16", TokenKind::Int16, 2, true),
    scalar("int32", TokenKind::Int32, 4, true),
    scalar("int64", TokenKind::Int64, 8, true),
    scalar("float32", TokenKind::Float32, 4, true),
    scalar("float64", TokenKind::Float64, 8, true),
    scalar("char", TokenKind::Char, 1, false),
    scalar("string", TokenKind::String, 0, false),
    scalar("bool", TokenKind::Bool, 1, false),
    scalar("inherit", TokenKind::Inherit, 0, false),
];

/// Symbol rows in the order the lexer must try them
pub fn symbols() -> impl Iterator<Item = &'static TokenPattern> {
    TOKEN_TABLE.iter().filter(|p| p.class == PatternClass::Symbol)
}

/// Look up a complete identifier-class run
pub fn keyword_from_str(word: &str) -> Option<&'static TokenPattern> {
    TOKEN_TABLE
        .iter()
        .find(|p| p.class == PatternClass::Keyword && p.pattern == word)
}

impl TokenKind {
    fn row(self) -> Option<&'static TokenPattern> {
        TOKEN_TABLE.iter().find(|p| p.kind == self)
    }

    /// Fixed spelling, if the kind has one
    pub fn pattern(self) -> Option<&'static str> {
        self.row().map(|p| p.pattern)
    }

    pub fn descriptor(self) -> Option<TypeDescriptor> {
        self.row().and_then(|p| p.descriptor)
    }

    /// Check if this token is a keyword
    pub fn is_keyword(self) -> bool {
        self.row().map_or(false, |p| p.class == PatternClass::Keyword)
    }

    /// Check if this token names a scalar type
    pub fn is_type(self) -> bool {
        self.descriptor().is_some()
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Text)
    }

    /// Check if this token is a comparison operator
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Greater
                | TokenKind::Less
                | TokenKind::Equal
                | TokenKind::GreaterOrEqual
                | TokenKind::LessOrEqual
        )
    }

    /// Human-readable name for diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Text => "text",
            TokenKind::Identifier => "identifier",
            TokenKind::EndOfFile => "end of file",
            other => other.pattern().unwrap_or("?"),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pattern() {
            Some(p) => write!(f, "`{}`", p),
            None => f.write_str(self.name()),
        }
    }
}

/// Ordered output of one `tokenize` call, always ending in one `EndOfFile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenStream<'src> {
    pub(crate) fn new(tokens: Vec<Token<'src>>) -> Self {
        debug_assert!(matches!(tokens.last(), Some(t) if t.kind == TokenKind::EndOfFile));
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true for a stream produced by the lexer
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// The terminal token
    pub fn eof(&self) -> Option<&Token<'src>> {
        self.tokens.last()
    }

    pub fn into_vec(self) -> Vec<Token<'src>> {
        self.tokens
    }
}

impl<'src> std::ops::Index<usize> for TokenStream<'src> {
    type Output = Token<'src>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a, 'src> IntoIterator for &'a TokenStream<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<'src> IntoIterator for TokenStream<'src> {
    type Item = Token<'src>;
    type IntoIter = std::vec::IntoIter<Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
