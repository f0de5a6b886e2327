//! Comment & Blank Recognizer
//!
//! The comment conventions of the legacy format are a closed, order-sensitive
//! rule set, so they are modeled as a static table of tagged variants
//! evaluated in priority order; the first matching rule wins. The rule set
//! is configuration, never mutated at runtime.
//!
//! Rule order matters for correctness:
//! 1. A content-level asterisk run collapses to its minimal marker (`*` for a
//!    single asterisk, `**` for a run), so banner lines beat the indicator
//!    rule when the spec-type column is blank.
//! 2. The comment-indicator column (`*` in column 7) marks a full-line
//!    comment; the marker lexeme spans the spec-type and indicator columns
//!    (`C*`, `*`, and the legacy code-page form).
//! 3. `//` starting the content's first non-space run is a slash comment at
//!    any content column. In fixed-form it is emitted as marker plus text;
//!    in free-form the whole line is suppressed, invisible downstream.
//!
//! Blank lines and the column-1 sentinel/banner family never reach this
//! table; the line pipeline handles them first.

use crate::lexing::mode::LexerMode;
use crate::lexing::normalize::{NormalizedRecord, RECORD_WIDTH};
use crate::lexing::tokens::{Token, TokenKind};
use crate::lexing::zones::{COMMENT_INDICATOR_COL, SPEC_TYPE_COL};

/// The leading pattern a comment rule requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPattern {
    /// Content's first non-space run is one or more `*`
    ContentStarRun,
    /// `*` in the comment-indicator column, spec-type column non-blank
    IndicatorStar,
    /// Content's first non-space run starts with `//`
    SlashSlash,
}

/// What a matched rule emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    /// Emit a COMMENT_MARKER token, then COMMENT_TEXT if text follows
    EmitMarkerAndText,
    /// Emit nothing; the line is invisible to the downstream parser
    Suppress,
}

/// One entry of the recognizer's rule table.
#[derive(Debug)]
pub struct CommentRule {
    pub pattern: CommentPattern,
    pub modes: &'static [LexerMode],
    pub action: CommentAction,
}

/// The rule table, evaluated top to bottom; first match wins.
pub const COMMENT_RULES: &[CommentRule] = &[
    CommentRule {
        pattern: CommentPattern::ContentStarRun,
        modes: &[LexerMode::FixedForm],
        action: CommentAction::EmitMarkerAndText,
    },
    CommentRule {
        pattern: CommentPattern::IndicatorStar,
        modes: &[LexerMode::FixedForm],
        action: CommentAction::EmitMarkerAndText,
    },
    CommentRule {
        pattern: CommentPattern::SlashSlash,
        modes: &[LexerMode::FixedForm],
        action: CommentAction::EmitMarkerAndText,
    },
    CommentRule {
        pattern: CommentPattern::SlashSlash,
        modes: &[LexerMode::FreeForm],
        action: CommentAction::Suppress,
    },
];

/// The result of a matched comment rule.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentOutcome {
    Tokens(Vec<Token>),
    Suppressed,
}

/// Run the rule table against a record. Returns `None` when no rule matches
/// and the line should be treated as code (or blank) by the caller.
pub fn recognize(record: &NormalizedRecord, mode: LexerMode) -> Option<CommentOutcome> {
    for rule in COMMENT_RULES {
        if !rule.modes.contains(&mode) {
            continue;
        }
        if let Some(matched) = match_pattern(rule.pattern, record, mode) {
            return Some(match rule.action {
                CommentAction::Suppress => CommentOutcome::Suppressed,
                CommentAction::EmitMarkerAndText => CommentOutcome::Tokens(emit(record, matched)),
            });
        }
    }
    None
}

/// A matched marker: its text, its 0-based start column, and the 0-based
/// column where any trailing comment text may begin.
struct MarkerMatch {
    marker: String,
    marker_col: usize,
    text_from: usize,
}

fn match_pattern(
    pattern: CommentPattern,
    record: &NormalizedRecord,
    mode: LexerMode,
) -> Option<MarkerMatch> {
    // Fixed-form comment scanning starts at the spec-type column; the
    // sequence area is never comment syntax.
    let scan_from = match mode {
        LexerMode::FixedForm => SPEC_TYPE_COL,
        _ => 0,
    };
    let first = record.first_nonspace_from(scan_from)?;

    match pattern {
        CommentPattern::ContentStarRun => {
            if record.char_at(first) != '*' {
                return None;
            }
            let run = (first..RECORD_WIDTH)
                .take_while(|col| record.char_at(*col) == '*')
                .count();
            // Two or more asterisks collapse into the two-character marker.
            let marker = if run >= 2 { "**" } else { "*" };
            Some(MarkerMatch {
                marker: marker.to_string(),
                marker_col: first,
                text_from: first + run,
            })
        }
        CommentPattern::IndicatorStar => {
            let spec_char = record.char_at(SPEC_TYPE_COL);
            if spec_char == ' ' || record.char_at(COMMENT_INDICATOR_COL) != '*' {
                return None;
            }
            Some(MarkerMatch {
                marker: format!("{}*", spec_char),
                marker_col: SPEC_TYPE_COL,
                text_from: COMMENT_INDICATOR_COL + 1,
            })
        }
        CommentPattern::SlashSlash => {
            if record.char_at(first) != '/' || record.char_at(first + 1) != '/' {
                return None;
            }
            Some(MarkerMatch {
                marker: "//".to_string(),
                marker_col: first,
                text_from: first + 2,
            })
        }
    }
}

fn emit(record: &NormalizedRecord, matched: MarkerMatch) -> Vec<Token> {
    let mut tokens = vec![Token::new(
        TokenKind::CommentMarker,
        matched.marker,
        record.number,
        matched.marker_col as u32 + 1,
    )];

    if let Some(text_col) = record.first_nonspace_from(matched.text_from) {
        let text = record.slice(text_col..RECORD_WIDTH).trim_end().to_string();
        tokens.push(Token::new(
            TokenKind::CommentText,
            text,
            record.number,
            text_col as u32 + 1,
        ));
    }

    tokens
}
