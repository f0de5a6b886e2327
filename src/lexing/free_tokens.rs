//! Free-Form Sub-Tokenizer
//!
//! Raw tokenization of free-form statement content using the logos lexer
//! library. This is the point where statement text becomes lexical tokens;
//! line classification has already decided that the text is code.
//!
//! Line comments (`// ...`) and whitespace are skipped by the lexer itself
//! and never appear in the output. Lexical problems never stop the scan:
//! an unterminated string is emitted as a partial literal plus a diagnostic,
//! and an unrecognized character is skipped with a diagnostic, after which
//! logos resynchronizes on its own.

use logos::Logos;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::lexing::diagnostics::LexDiagnostic;
use crate::lexing::tokens::{Token, TokenKind};

/// Raw free-form lexical tokens.
///
/// Identifiers allow the hyphen because the language's structural opcodes
/// (`DCL-DS`, `END-PROC`, ...) are single words; binary minus therefore
/// requires surrounding whitespace or a non-word operand, matching the
/// free-form syntax rules.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"//[^\n]*")]
pub enum FreeToken {
    #[regex(r"[A-Za-z#$@][A-Za-z0-9#$@_-]*")]
    Word,

    // Figurative constants (*ON, *BLANKS, ...) and built-in functions
    // (%LEN, %TRIM, ...) read as single names.
    #[regex(r"\*[A-Za-z][A-Za-z0-9]*")]
    Figurative,
    #[regex(r"%[A-Za-z][A-Za-z0-9]*")]
    Builtin,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // Quoted literal with the doubled-quote escape. The unterminated form
    // is a distinct token so the scan can report it and keep going; it must
    // accept the same escape, or a trailing `''` would fall through to the
    // error path and drag the rest of the line with it.
    #[regex(r"'([^'\n]|'')*'", priority = 3)]
    StringLit,
    #[regex(r"'([^'\n]|'')*", priority = 1)]
    UnterminatedString,

    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(".")]
    Period,

    #[token("**", priority = 3)]
    Power,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<>")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equal,
}

/// Structural keywords of the free-form statement syntax. Words are matched
/// case-insensitively; anything else is an identifier.
static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "CTL-OPT", "DCL-C", "DCL-DS", "DCL-PI", "DCL-PR", "DCL-PROC", "DCL-S", "END-DS",
        "END-PI", "END-PR", "END-PROC", "BEGSR", "ENDSR", "EXSR", "IF", "ELSE", "ELSEIF",
        "ENDIF", "DOW", "DOU", "ENDDO", "FOR", "ENDFOR", "ITER", "LEAVE", "SELECT", "WHEN",
        "OTHER", "ENDSL", "MONITOR", "ON-ERROR", "ENDMON", "RETURN",
    ]
    .into_iter()
    .collect()
});

fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

/// Tokenize a slice of free-form statement content.
///
/// `base_col` is the 0-based record column where `content` begins; emitted
/// token columns are absolute 1-based record columns. Lexical problems are
/// pushed onto `diagnostics` and never abort the scan.
pub fn tokenize_free(
    content: &str,
    line: u32,
    base_col: usize,
    diagnostics: &mut Vec<LexDiagnostic>,
) -> Vec<Token> {
    let mut lexer = FreeToken::lexer(content);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let start_col = (base_col + content[..span.start].chars().count()) as u32 + 1;

        let kind = match result {
            Ok(FreeToken::Word) => {
                if is_keyword(slice) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            }
            Ok(FreeToken::Figurative) | Ok(FreeToken::Builtin) => TokenKind::Identifier,
            Ok(FreeToken::Number) => TokenKind::Number,
            Ok(FreeToken::StringLit) => TokenKind::StringLiteral,
            Ok(FreeToken::UnterminatedString) => {
                diagnostics.push(LexDiagnostic::malformed_literal(line, start_col, slice));
                TokenKind::StringLiteral
            }
            Ok(FreeToken::Semicolon)
            | Ok(FreeToken::Colon)
            | Ok(FreeToken::Comma)
            | Ok(FreeToken::OpenParen)
            | Ok(FreeToken::CloseParen)
            | Ok(FreeToken::Period) => TokenKind::Punctuation,
            Ok(_) => TokenKind::Operator,
            Err(()) => {
                diagnostics.push(LexDiagnostic::unrecognized_character(line, start_col, slice));
                continue;
            }
        };

        tokens.push(Token::new(kind, slice, line, start_col));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(content: &str) -> (Vec<Token>, Vec<LexDiagnostic>) {
        let mut diagnostics = Vec::new();
        let tokens = tokenize_free(content, 1, 0, &mut diagnostics);
        (tokens, diagnostics)
    }

    fn lexemes(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.lexeme.as_str()).collect()
    }

    #[test]
    fn test_declaration_statement() {
        let (tokens, diagnostics) = lex("DCL-S COUNT INT(10);");
        assert!(diagnostics.is_empty());
        assert_eq!(
            lexemes(&tokens),
            vec!["DCL-S", "COUNT", "INT", "(", "10", ")", ";"]
        );
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[4].kind, TokenKind::Number);
        assert_eq!(tokens[6].kind, TokenKind::Punctuation);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let (tokens, _) = lex("dcl-ds rec; end-ds;");
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[3].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_operators_and_comparison() {
        let (tokens, _) = lex("X = A ** 2 - B / C <> D;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::Operator,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Identifier,
                TokenKind::Punctuation,
            ]
        );
        assert_eq!(tokens[3].lexeme, "**");
        assert_eq!(tokens[9].lexeme, "<>");
    }

    #[test]
    fn test_string_with_doubled_quote_escape() {
        let (tokens, diagnostics) = lex("MSG = 'IT''S DONE';");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].lexeme, "'IT''S DONE'");
    }

    #[test]
    fn test_unterminated_string_reports_and_continues() {
        let (tokens, diagnostics) = lex("MSG = 'OOPS");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::StringLiteral);
        assert_eq!(tokens.last().unwrap().lexeme, "'OOPS");
    }

    #[test]
    fn test_unterminated_string_with_doubled_quote_escape() {
        // The doubled-quote escape must not break error recovery: the
        // partial literal consumes to the end of the content and is
        // reported as malformed, not as a stray character.
        let (tokens, diagnostics) = lex("X = 'IT'' ;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            crate::lexing::diagnostics::DiagnosticKind::MalformedLiteral
        );
        assert_eq!(lexemes(&tokens), vec!["X", "=", "'IT'' ;"]);
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
    }

    #[test]
    fn test_unrecognized_character_is_skipped() {
        let (tokens, diagnostics) = lex("X = 1 ? 2");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(lexemes(&tokens), vec!["X", "=", "1", "2"]);
    }

    #[test]
    fn test_line_comment_is_invisible() {
        let (tokens, diagnostics) = lex("X = 1; // trailing note");
        assert!(diagnostics.is_empty());
        assert_eq!(lexemes(&tokens), vec!["X", "=", "1", ";"]);
    }

    #[test]
    fn test_figurative_constants_and_builtins() {
        let (tokens, _) = lex("DOW NOT %EOF; FLAG = *ON;");
        let on = tokens.iter().find(|t| t.lexeme == "*ON").unwrap();
        let eof = tokens.iter().find(|t| t.lexeme == "%EOF").unwrap();
        assert_eq!(on.kind, TokenKind::Identifier);
        assert_eq!(eof.kind, TokenKind::Identifier);
    }

    #[test]
    fn test_columns_are_shifted_by_base_col() {
        let mut diagnostics = Vec::new();
        let tokens = tokenize_free("X = 1;", 4, 7, &mut diagnostics);
        // content column 0 is record column 7 (0-based), so 1-based 8.
        assert_eq!(tokens[0].start_col, 8);
        assert_eq!(tokens[0].line, 4);
    }

    #[test]
    fn test_decimal_literal() {
        let (tokens, _) = lex("RATE = 3.25;");
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].lexeme, "3.25");
    }
}
