//! Lexical diagnostics
//!
//! Problems found during lexing are collected, never thrown: the lexer always
//! produces a complete best-effort token stream alongside the diagnostic list
//! so downstream parsing can proceed on the unaffected parts of the source.

use std::fmt;

/// The kind of a lexical diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DiagnosticKind {
    /// Unterminated string literal; lexing resumes after the partial literal
    MalformedLiteral,
    /// A character matching no free-form lexical rule; skipped
    UnrecognizedCharacter,
    /// Input line longer than the record width; silently truncated
    LineOverflow,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::MalformedLiteral => "MALFORMED_LITERAL",
            DiagnosticKind::UnrecognizedCharacter => "UNRECOGNIZED_CHARACTER",
            DiagnosticKind::LineOverflow => "LINE_OVERFLOW",
        };
        write!(f, "{}", name)
    }
}

/// A single lexical diagnostic with its source position (1-based).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LexDiagnostic {
    pub kind: DiagnosticKind,
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl LexDiagnostic {
    pub fn malformed_literal(line: u32, col: u32, lexeme: &str) -> Self {
        LexDiagnostic {
            kind: DiagnosticKind::MalformedLiteral,
            line,
            col,
            message: format!("unterminated string literal starting with {:?}", lexeme),
        }
    }

    pub fn unrecognized_character(line: u32, col: u32, text: &str) -> Self {
        LexDiagnostic {
            kind: DiagnosticKind::UnrecognizedCharacter,
            line,
            col,
            message: format!("unrecognized character {:?}", text),
        }
    }

    pub fn line_overflow(line: u32, width: usize, actual: usize) -> Self {
        LexDiagnostic {
            kind: DiagnosticKind::LineOverflow,
            line,
            col: width as u32 + 1,
            message: format!("line is {} characters, truncated to {}", actual, width),
        }
    }
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.line, self.col, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = LexDiagnostic::malformed_literal(4, 12, "'oops");
        assert_eq!(
            diag.to_string(),
            "4:12: MALFORMED_LITERAL: unterminated string literal starting with \"'oops\""
        );
    }

    #[test]
    fn test_overflow_points_past_record_width() {
        let diag = LexDiagnostic::line_overflow(2, 280, 300);
        assert_eq!(diag.col, 281);
        assert_eq!(diag.kind, DiagnosticKind::LineOverflow);
    }
}
