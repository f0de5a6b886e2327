//! Output token types for the RPG lexer
//!
//! This module contains the value types emitted by the lexing pipeline:
//! - Token: a classified lexeme with its source position
//! - TokenKind: the closed set of lexical classifications
//!
//! Tokens are value objects; once emitted they are never mutated. The stream
//! of tokens (together with the diagnostics list) is the complete handoff to
//! the downstream statement parser.

use std::fmt;

/// The classification of an emitted token.
///
/// The line-level kinds (BlankLine, CommentMarker, CommentText, RawText,
/// SpecType, Content, Directive) are produced by the line pipeline; the
/// remaining kinds are produced by the free-form sub-tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    /// Line with no visible content (empty lexeme)
    BlankLine,

    /// A recognized full-line comment marker (`*`, `**`, `C*`, `//`, ...)
    CommentMarker,

    /// Comment body text following a marker, or a whole annotated line
    CommentText,

    /// Verbatim data line emitted after the end-of-source sentinel
    RawText,

    /// The specification-type character of a fixed-form line (H F D I C O P)
    SpecType,

    /// Opaque fixed-form statement text, interpreted by the downstream parser
    Content,

    /// A compiler directive line (`**FREE`, `/COPY`, `/EJECT`, ...)
    Directive,

    // Free-form lexical kinds
    Identifier,
    Keyword,
    Number,
    StringLiteral,
    Punctuation,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::BlankLine => "BLANK_LINE",
            TokenKind::CommentMarker => "COMMENT_MARKER",
            TokenKind::CommentText => "COMMENT_TEXT",
            TokenKind::RawText => "RAW_TEXT",
            TokenKind::SpecType => "SPEC_TYPE",
            TokenKind::Content => "CONTENT",
            TokenKind::Directive => "DIRECTIVE",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::StringLiteral => "STRING",
            TokenKind::Punctuation => "PUNCTUATION",
            TokenKind::Operator => "OPERATOR",
        };
        write!(f, "{}", name)
    }
}

/// A classified lexeme with its source position.
///
/// Columns are 1-based and refer to the normalized record; `end_col` is
/// exclusive. The lexeme carries the token text exactly as it appears in the
/// source (comment and raw text lexemes are trimmed of surrounding spaces,
/// with `start_col` pointing at the first retained character).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based source line number
    pub line: u32,
    /// 1-based starting column
    pub start_col: u32,
    /// 1-based ending column, exclusive
    pub end_col: u32,
}

impl Token {
    /// Build a token at a 1-based start column; the end column is derived
    /// from the lexeme's character length.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, start_col: u32) -> Self {
        let lexeme = lexeme.into();
        let end_col = start_col + lexeme.chars().count() as u32;
        Token {
            kind,
            lexeme,
            line,
            start_col,
            end_col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{} {} {:?}",
            self.line, self.start_col, self.end_col, self.kind, self.lexeme
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_col_is_derived_from_lexeme() {
        let token = Token::new(TokenKind::CommentMarker, "C*", 3, 6);
        assert_eq!(token.end_col, 8);
    }

    #[test]
    fn test_blank_line_token_is_zero_width() {
        let token = Token::new(TokenKind::BlankLine, "", 1, 1);
        assert_eq!(token.start_col, token.end_col);
    }

    #[test]
    fn test_kind_display_names() {
        assert_eq!(TokenKind::BlankLine.to_string(), "BLANK_LINE");
        assert_eq!(TokenKind::CommentMarker.to_string(), "COMMENT_MARKER");
        assert_eq!(TokenKind::RawText.to_string(), "RAW_TEXT");
        assert_eq!(TokenKind::StringLiteral.to_string(), "STRING");
    }

    #[test]
    fn test_non_ascii_lexeme_counts_chars_not_bytes() {
        let token = Token::new(TokenKind::CommentMarker, "\u{FFFD}*", 1, 6);
        assert_eq!(token.end_col, 8);
    }
}
