//! Structured Feedback Module
//!
//! Machine-readable output for editors and scripts:
//! - JSON error reports with fix suggestions
//! - Lexing statistics

use serde::{Deserialize, Serialize};

use crate::frontend::token::{PatternClass, TOKEN_TABLE};
use crate::utils::{LexError, Position};

// ==================== Structured Error Report ====================

/// A structured error report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code (e.g., "L0001")
    pub code: String,

    /// Error severity
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Location information
    pub location: Option<Location>,

    /// Suggested fixes
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    /// Byte offset
    pub offset: usize,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the fix
    pub message: String,

    /// The replacement text
    pub replacement: Option<String>,

    /// Confidence in this suggestion (0.0 - 1.0)
    pub confidence: f64,
}

impl Suggestion {
    fn new(message: impl Into<String>, replacement: Option<&str>, confidence: f64) -> Self {
        Self {
            message: message.into(),
            replacement: replacement.map(str::to_string),
            confidence,
        }
    }
}

impl ErrorReport {
    /// Create an error report from a lexer error
    pub fn from_lex_error(error: &LexError, file_name: &str, source: &str) -> Self {
        let span = error.span();
        let start = error.position();
        let end = Position::of(source, span.end);

        let mut report = Self {
            code: error.code().to_string(),
            severity: Severity::Error,
            message: error.to_string(),
            location: Some(Location {
                file: file_name.to_string(),
                offset: error.offset(),
                line: start.line,
                column: start.column,
                end_line: end.line,
                end_column: end.column,
            }),
            suggestions: suggestions_for(error),
        };
        report.sort_suggestions();
        report
    }

    /// Sort suggestions by confidence (highest first)
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// `file:line:column: error[CODE]: message`
    pub fn render(&self) -> String {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let mut out = match &self.location {
            Some(loc) => format!(
                "{}:{}:{}: {}[{}]: {}",
                loc.file, loc.line, loc.column, severity, self.code, self.message
            ),
            None => format!("{}[{}]: {}", severity, self.code, self.message),
        };
        if let Some(best) = self.suggestions.first() {
            out.push_str(&format!("\n  help: {}", best.message));
        }
        out
    }
}

fn suggestions_for(error: &LexError) -> Vec<Suggestion> {
    match error {
        LexError::UnexpectedCharacter { ch, .. } => match ch {
            '%' => vec![Suggestion::new(
                "Entry points are marked with `%entry%`",
                Some("%entry%"),
                0.7,
            )],
            '#' => vec![Suggestion::new("Comments open with `#[` and close with `]#`", Some("#["), 0.7)],
            '+' | '-' | '*' | '/' => vec![Suggestion::new(
                "Arithmetic operators are not part of the language yet",
                None,
                0.5,
            )],
            '\'' => vec![Suggestion::new("Text literals use double quotes", Some("\""), 0.8)],
            _ => vec![Suggestion::new(format!("Remove '{}'", ch), Some(""), 0.3)],
        },
        LexError::UnterminatedComment { .. } => vec![Suggestion::new(
            "Close the comment with `]#`; comments do not nest",
            Some("]#"),
            0.9,
        )],
        LexError::UnterminatedText { .. } => {
            vec![Suggestion::new("Close the text literal with `\"`", Some("\""), 0.9)]
        }
        LexError::UnknownIdentifier { name, .. } => {
            let mut suggestions = vec![Suggestion::new(
                "User-defined names need identifiers enabled (drop --keywords-only)",
                None,
                0.5,
            )];
            if let Some(keyword) = closest_keyword(name) {
                suggestions.push(Suggestion::new(
                    format!("Did you mean '{}'?", keyword),
                    Some(keyword),
                    0.8,
                ));
            }
            suggestions
        }
    }
}

/// Keyword within two edits of `word`, if any
fn closest_keyword(word: &str) -> Option<&'static str> {
    TOKEN_TABLE
        .iter()
        .filter(|p| p.class == PatternClass::Keyword)
        .map(|p| (edit_distance(word, p.pattern), p.pattern))
        .filter(|(d, _)| *d <= 2)
        .min_by_key(|(d, _)| *d)
        .map(|(_, keyword)| keyword)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.bytes().enumerate() {
        let mut cur = vec![i + 1; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        prev = cur;
    }
    prev[b.len()]
}

// ==================== Lexing Feedback ====================

/// Result of checking one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFeedback {
    pub success: bool,

    /// Source file
    pub source_file: String,

    pub diagnostics: Vec<ErrorReport>,

    pub stats: LexStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexStats {
    /// Lex time in microseconds
    pub lex_time_us: u64,

    /// Tokens emitted, `EndOfFile` included
    pub token_count: usize,

    pub bytes: usize,

    /// Lines of code
    pub loc: usize,
}

impl CheckFeedback {
    /// Create a successful feedback
    pub fn success(source_file: String, stats: LexStats) -> Self {
        Self {
            success: true,
            source_file,
            diagnostics: vec![],
            stats,
        }
    }

    /// Create a failed feedback
    pub fn failure(source_file: String, errors: Vec<ErrorReport>, stats: LexStats) -> Self {
        Self {
            success: false,
            source_file,
            diagnostics: errors,
            stats,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::{Lexer, LexerConfig};
    use crate::frontend::lexer::tokenize;

    #[test]
    fn report_locates_error() {
        let source = "var x;\n  @";
        let err = tokenize(source).unwrap_err();
        let report = ErrorReport::from_lex_error(&err, "main.dsl", source);

        assert_eq!(report.code, "L0001");
        assert_eq!(report.severity, Severity::Error);
        let loc = report.location.clone().unwrap();
        assert_eq!((loc.line, loc.column), (2, 3));
        assert_eq!((loc.end_line, loc.end_column), (2, 4));
        assert_eq!(loc.offset, 9);
        assert!(report.render().starts_with("main.dsl:2:3: error[L0001]: Unexpected character '@'"));
    }

    #[test]
    fn unknown_identifier_suggests_keyword() {
        let source = "outptu \"hi\";";
        let err = Lexer::with_config(source, LexerConfig::keywords_only())
            .tokenize()
            .unwrap_err();
        let report = ErrorReport::from_lex_error(&err, "a.dsl", source);

        assert_eq!(report.code, "L0003");
        assert_eq!(report.suggestions[0].replacement.as_deref(), Some("output"));
        assert!(report.render().contains("help: Did you mean 'output'?"));
    }

    #[test]
    fn unterminated_comment_suggests_close() {
        let source = "#[ open";
        let err = tokenize(source).unwrap_err();
        let report = ErrorReport::from_lex_error(&err, "a.dsl", source);
        assert_eq!(report.suggestions[0].replacement.as_deref(), Some("]#"));
    }

    #[test]
    fn closest_keyword_bounds() {
        assert_eq!(closest_keyword("int33"), Some("int32"));
        assert_eq!(closest_keyword("flaot64"), Some("float64"));
        assert_eq!(closest_keyword("completely_unrelated"), None);
        assert_eq!(edit_distance("", "def"), 3);
        assert_eq!(edit_distance("def", "def"), 0);
    }

    #[test]
    fn feedback_json_shape() {
        let stats = LexStats {
            token_count: 3,
            bytes: 10,
            loc: 1,
            ..Default::default()
        };
        let feedback = CheckFeedback::success("a.dsl".into(), stats);
        let value: serde_json::Value = serde_json::from_str(&feedback.to_json()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["stats"]["token_count"], 3);
        assert!(value["diagnostics"].as_array().unwrap().is_empty());
    }
}
