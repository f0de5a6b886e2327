//! Lexer
//!
//! This module orchestrates the complete tokenization pipeline for RPG/RPGLE
//! source, where token identity depends on physical column position and on a
//! mode carried across lines.
//!
//! The pipeline consists of:
//! 1. Line normalization to the fixed record width ./lexing/normalize.rs
//! 2. Column zone classification per (mode, spec-type) ./lexing/zones.rs
//! 3. Mode control: `**FREE` directive, `**` end-of-source sentinel,
//!    banner comments ./lexing/mode.rs
//! 4. Ordered comment/blank recognition ./lexing/comment_rules.rs
//! 5. Free-form sub-tokenization via logos ./lexing/free_tokens.rs
//!
//! Mode Handling
//!
//!     The legacy format mixes per-line column semantics with a persistent
//!     mode, so each line is lexed by a pure function that takes the current
//!     `LexerMode` and returns the tokens plus the mode for the next line.
//!     The `Lexer` driver folds that function over the source in a single
//!     forward pass; it never re-reads or reorders lines, because the mode's
//!     correctness depends on in-order transitions.
//!
//!     Embedded free-form needs no mode of its own: a fixed-form line whose
//!     spec-type column is blank and whose content is not a comment is
//!     handed to the free-form sub-tokenizer, and the embedding ends by
//!     itself when a later line carries a spec-type character again.

pub mod comment_rules;
pub mod diagnostics;
pub mod free_tokens;
pub mod mode;
pub mod normalize;
pub mod tokens;
pub mod zones;

use std::fmt;

pub use diagnostics::{DiagnosticKind, LexDiagnostic};
pub use mode::LexerMode;
pub use normalize::{normalize, NormalizedRecord, PhysicalLine, RECORD_WIDTH};
pub use tokens::{Token, TokenKind};

use comment_rules::CommentOutcome;
use mode::LeadingStars;
use zones::SPEC_TYPE_COL;

/// Errors surfaced to embedding tools (the CLI). Lexical problems inside a
/// run are `LexDiagnostic` values, never errors: the lexer itself cannot
/// fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    Io(String),
    Serialize(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Io(msg) => write!(f, "I/O error: {}", msg),
            LexError::Serialize(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for LexError {}

/// The complete result of lexing one source: the ordered token stream and
/// the lexical diagnostics collected along the way.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct LexerOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexDiagnostic>,
}

/// The tokens of one line plus the mode for the next line.
#[derive(Debug, Clone, PartialEq)]
pub struct LexedLine {
    pub tokens: Vec<Token>,
    pub next_mode: LexerMode,
}

/// Single-pass forward lexer over one source. Not shareable between
/// callers; parallelism shards at the file level with one `Lexer` each.
#[derive(Debug)]
pub struct Lexer {
    mode: LexerMode,
    first_content_pending: bool,
}

impl Lexer {
    /// A lexer starting in fixed-form, or in the mode an embedding tool
    /// already knows the file to be in.
    pub fn new(initial_mode: Option<LexerMode>) -> Self {
        let mode = initial_mode.unwrap_or(LexerMode::FixedForm);
        Lexer {
            mode,
            // The `**FREE` directive is meaningful in fixed-form only; an
            // explicit fixed-form override must not disable it.
            first_content_pending: mode == LexerMode::FixedForm,
        }
    }

    /// Lex a whole source, consuming the lexer.
    pub fn lex(mut self, source: &str) -> LexerOutput {
        let mut output = LexerOutput::default();
        if source.is_empty() {
            return output;
        }

        let mut lines: Vec<&str> = source.split('\n').collect();
        if source.ends_with('\n') {
            lines.pop();
        }

        for (idx, raw) in lines.into_iter().enumerate() {
            let number = idx as u32 + 1;
            let record = normalize(&PhysicalLine { text: raw, number });
            if record.overflowed() {
                output.diagnostics.push(LexDiagnostic::line_overflow(
                    number,
                    RECORD_WIDTH,
                    record.original_len,
                ));
            }

            let lexed = lex_line(
                &record,
                self.mode,
                self.first_content_pending,
                &mut output.diagnostics,
            );
            if !record.is_blank() {
                self.first_content_pending = false;
            }
            self.mode = lexed.next_mode;
            output.tokens.extend(lexed.tokens);
        }

        output
    }
}

/// Lex an entire source starting in fixed-form.
pub fn lex_source(source: &str) -> LexerOutput {
    Lexer::new(None).lex(source)
}

/// Lex one normalized record under an explicit mode.
///
/// This is the stateless core of the pipeline: everything that persists
/// between lines is in the arguments and the returned `next_mode`.
/// `first_content_pending` must be true until the first non-blank line of
/// the source has been processed (the `**FREE` directive is only valid
/// there).
pub fn lex_line(
    record: &NormalizedRecord,
    mode: LexerMode,
    first_content_pending: bool,
    diagnostics: &mut Vec<LexDiagnostic>,
) -> LexedLine {
    match mode {
        LexerMode::RawTrailer => lex_raw_trailer(record),
        LexerMode::FreeForm => lex_free_form(record, diagnostics),
        LexerMode::FixedForm => lex_fixed_form(record, first_content_pending, diagnostics),
    }
}

fn blank_line_token(record: &NormalizedRecord) -> Token {
    Token::new(TokenKind::BlankLine, "", record.number, 1)
}

fn lex_raw_trailer(record: &NormalizedRecord) -> LexedLine {
    let tokens = if record.is_blank() {
        vec![blank_line_token(record)]
    } else {
        let start = record.first_nonspace_from(0).unwrap_or(0);
        let text = record.slice(start..RECORD_WIDTH).trim_end().to_string();
        vec![Token::new(
            TokenKind::RawText,
            text,
            record.number,
            start as u32 + 1,
        )]
    };
    LexedLine {
        tokens,
        next_mode: LexerMode::RawTrailer,
    }
}

fn lex_free_form(record: &NormalizedRecord, diagnostics: &mut Vec<LexDiagnostic>) -> LexedLine {
    let tokens = if record.is_blank() {
        vec![blank_line_token(record)]
    } else {
        match comment_rules::recognize(record, LexerMode::FreeForm) {
            // A whole-line `//` comment is invisible downstream.
            Some(CommentOutcome::Suppressed) => Vec::new(),
            Some(CommentOutcome::Tokens(tokens)) => tokens,
            None => {
                let range = zones::content_range(record, LexerMode::FreeForm);
                let base_col = range.start;
                // Trailing padding must not leak into token lexemes (an
                // unterminated literal would otherwise absorb it).
                let tokens = free_tokens::tokenize_free(
                    record.slice(range).trim_end(),
                    record.number,
                    base_col,
                    diagnostics,
                );
                // A line of nothing but unrecognizable characters still has
                // to appear in the stream.
                if tokens.is_empty() {
                    vec![blank_line_token(record)]
                } else {
                    tokens
                }
            }
        }
    };
    LexedLine {
        tokens,
        next_mode: LexerMode::FreeForm,
    }
}

fn lex_fixed_form(
    record: &NormalizedRecord,
    first_content_pending: bool,
    diagnostics: &mut Vec<LexDiagnostic>,
) -> LexedLine {
    // Column-1 asterisk runs are sentinels or banners; the mode controller
    // sees them before any zoning.
    if let Some(stars) = mode::classify_leading_stars(record, first_content_pending) {
        return lex_leading_stars(record, stars);
    }

    if record.is_blank() {
        return LexedLine {
            tokens: vec![blank_line_token(record)],
            next_mode: LexerMode::FixedForm,
        };
    }

    if let Some(outcome) = comment_rules::recognize(record, LexerMode::FixedForm) {
        let tokens = match outcome {
            CommentOutcome::Tokens(tokens) => tokens,
            CommentOutcome::Suppressed => Vec::new(),
        };
        return LexedLine {
            tokens,
            next_mode: LexerMode::FixedForm,
        };
    }

    let mut tokens = Vec::new();
    let spec_char = record.char_at(SPEC_TYPE_COL);
    let range = zones::content_range(record, LexerMode::FixedForm);
    let content_start = range.start;
    let content = record.slice(range);
    let trimmed = content.trim_end();

    if spec_char != ' ' {
        tokens.push(Token::new(
            TokenKind::SpecType,
            spec_char,
            record.number,
            SPEC_TYPE_COL as u32 + 1,
        ));
        match record.first_nonspace_from(content_start) {
            // Spec-type only: the content area contributes a blank.
            None => tokens.push(Token::new(
                TokenKind::BlankLine,
                "",
                record.number,
                content_start as u32 + 1,
            )),
            Some(col) => tokens.push(Token::new(
                TokenKind::Content,
                record.slice(col..RECORD_WIDTH).trim_end(),
                record.number,
                col as u32 + 1,
            )),
        }
    } else {
        match record.first_nonspace_from(content_start) {
            // Only sequence-area text; nothing tokenizable.
            None => tokens.push(blank_line_token(record)),
            Some(col) if mode::is_compiler_directive(trimmed.trim_start()) => {
                tokens.push(Token::new(
                    TokenKind::Directive,
                    record.slice(col..RECORD_WIDTH).trim_end(),
                    record.number,
                    col as u32 + 1,
                ));
            }
            // Embedded free-form statement: blank spec-type column followed
            // by statement syntax.
            Some(_) => {
                let free = free_tokens::tokenize_free(
                    trimmed,
                    record.number,
                    content_start,
                    diagnostics,
                );
                if free.is_empty() {
                    tokens.push(blank_line_token(record));
                } else {
                    tokens.extend(free);
                }
            }
        }
    }

    LexedLine {
        tokens,
        next_mode: LexerMode::FixedForm,
    }
}

fn lex_leading_stars(record: &NormalizedRecord, stars: LeadingStars) -> LexedLine {
    match stars {
        LeadingStars::FreeFormDirective => LexedLine {
            tokens: vec![Token::new(
                TokenKind::Directive,
                record.slice(0..RECORD_WIDTH).trim_end(),
                record.number,
                1,
            )],
            next_mode: LexerMode::FreeForm,
        },
        // The bare sentinel swallows its own marker; a blank-line token
        // keeps the line visible in the stream without a comment token.
        LeadingStars::BareSentinel => LexedLine {
            tokens: vec![blank_line_token(record)],
            next_mode: LexerMode::RawTrailer,
        },
        LeadingStars::AnnotatedSentinel => LexedLine {
            tokens: vec![Token::new(
                TokenKind::CommentText,
                record.slice(0..RECORD_WIDTH).trim_end(),
                record.number,
                1,
            )],
            next_mode: LexerMode::RawTrailer,
        },
        LeadingStars::Banner { trailing } => {
            let mut tokens = vec![Token::new(TokenKind::CommentMarker, "**", record.number, 1)];
            if let Some((text, col)) = trailing {
                tokens.push(Token::new(
                    TokenKind::CommentText,
                    text,
                    record.number,
                    col as u32 + 1,
                ));
            }
            LexedLine {
                tokens,
                next_mode: LexerMode::FixedForm,
            }
        }
    }
}
