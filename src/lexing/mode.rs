//! Mode Controller
//!
//! The lexer mode is the one piece of state that persists across lines.
//! It is threaded explicitly through each line-processing call (the per-line
//! pipeline returns the mode to use for the next line) rather than living in
//! a shared mutable field, preserving the sequential-dependency semantics of
//! the legacy format without hidden state.
//!
//! Transitions:
//! - FixedForm -> FreeForm on the whole-source `**FREE` directive, honored
//!   only on the first non-blank line of input.
//! - FixedForm -> RawTrailer on the `**` end-of-source sentinel starting at
//!   column 1 (bare, or annotated with trailing text).
//! - RawTrailer is terminal: no transition leaves it.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

use crate::lexing::normalize::{NormalizedRecord, RECORD_WIDTH};

/// The persistent lexing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LexerMode {
    /// Column-positional layout; the initial mode unless overridden
    FixedForm,
    /// Whole-source free-form statement syntax
    FreeForm,
    /// Everything after the end-of-source sentinel is raw data
    RawTrailer,
}

impl fmt::Display for LexerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexerMode::FixedForm => "FIXED_FORM",
            LexerMode::FreeForm => "FREE_FORM",
            LexerMode::RawTrailer => "RAW_TRAILER",
        };
        write!(f, "{}", name)
    }
}

/// Classification of a fixed-form line that begins with `*` characters in
/// column 1. These lines are either comments or mode-changing sentinels, and
/// never reach the ordinary column zoning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadingStars {
    /// `**FREE` on the first non-blank line: the whole source is free-form
    FreeFormDirective,
    /// `**` alone: end of source, remainder is raw data
    BareSentinel,
    /// `**` followed by annotation text: an annotated end-of-source comment
    AnnotatedSentinel,
    /// Three or more `*`: a decorative banner comment. `trailing` holds any
    /// non-space text after the asterisk run.
    Banner { trailing: Option<(String, usize)> },
}

/// Classify a line whose first column is part of a leading asterisk run.
///
/// Returns `None` when the line does not start with at least two `*` in
/// column 1, in which case ordinary zone classification applies. The
/// `**FREE` directive is only recognized while `first_content_pending` is
/// true (no earlier non-blank line has been seen).
pub fn classify_leading_stars(
    record: &NormalizedRecord,
    first_content_pending: bool,
) -> Option<LeadingStars> {
    let run = record.text.chars().take_while(|c| *c == '*').count();
    if run < 2 {
        return None;
    }

    if run == 2 {
        let rest = record.slice(2..RECORD_WIDTH);
        let trimmed = rest.trim();
        if first_content_pending && trimmed.eq_ignore_ascii_case("FREE") {
            return Some(LeadingStars::FreeFormDirective);
        }
        if trimmed.is_empty() {
            return Some(LeadingStars::BareSentinel);
        }
        return Some(LeadingStars::AnnotatedSentinel);
    }

    // Banner: the asterisk run collapses to the two-character marker; any
    // text after the run becomes comment text.
    let trailing = record
        .first_nonspace_from(run)
        .map(|col| (record.slice(col..RECORD_WIDTH).trim_end().to_string(), col));
    Some(LeadingStars::Banner { trailing })
}

/// Compiler directive names recognized in fixed-form content (`/COPY`,
/// `/EJECT`, ...). The directive line is emitted whole as one token; its
/// interpretation belongs to the downstream parser.
static DIRECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "FREE", "END-FREE", "COPY", "INCLUDE", "TITLE", "EJECT", "SPACE", "SET", "RESTORE",
        "DEFINE", "UNDEFINE", "IF", "ELSEIF", "ELSE", "ENDIF", "EOF",
    ]
    .into_iter()
    .collect()
});

/// True if trimmed content is a `/NAME ...` compiler directive line.
pub fn is_compiler_directive(content: &str) -> bool {
    let Some(rest) = content.strip_prefix('/') else {
        return false;
    };
    let name: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    DIRECTIVES.contains(name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::normalize::{normalize, PhysicalLine};

    fn record(text: &str) -> NormalizedRecord {
        normalize(&PhysicalLine { text, number: 1 })
    }

    #[test]
    fn test_free_directive_on_first_line() {
        let rec = record("**FREE");
        assert_eq!(
            classify_leading_stars(&rec, true),
            Some(LeadingStars::FreeFormDirective)
        );
    }

    #[test]
    fn test_free_directive_ignored_after_first_content() {
        // A mid-file `**FREE` is an annotated end-of-source line, not a
        // directive.
        let rec = record("**FREE");
        assert_eq!(
            classify_leading_stars(&rec, false),
            Some(LeadingStars::AnnotatedSentinel)
        );
    }

    #[test]
    fn test_bare_sentinel() {
        let rec = record("**   ");
        assert_eq!(
            classify_leading_stars(&rec, false),
            Some(LeadingStars::BareSentinel)
        );
    }

    #[test]
    fn test_annotated_sentinel() {
        let rec = record("** ZLNG LONG CONSTANTS    Char(25)");
        assert_eq!(
            classify_leading_stars(&rec, false),
            Some(LeadingStars::AnnotatedSentinel)
        );
    }

    #[test]
    fn test_banner_collapses_to_marker() {
        let rec = record("*****************");
        assert_eq!(
            classify_leading_stars(&rec, false),
            Some(LeadingStars::Banner { trailing: None })
        );
    }

    #[test]
    fn test_banner_with_trailing_text() {
        let rec = record("*** section start");
        assert_eq!(
            classify_leading_stars(&rec, false),
            Some(LeadingStars::Banner {
                trailing: Some(("section start".to_string(), 4))
            })
        );
    }

    #[test]
    fn test_single_star_is_not_a_sentinel() {
        let rec = record("* lonely");
        assert_eq!(classify_leading_stars(&rec, false), None);
    }

    #[test]
    fn test_star_not_in_column_one_is_not_a_sentinel() {
        let rec = record(" ** indented");
        assert_eq!(classify_leading_stars(&rec, false), None);
    }

    #[test]
    fn test_compiler_directive_names() {
        assert!(is_compiler_directive("/COPY QRPGLESRC,PROTO"));
        assert!(is_compiler_directive("/free"));
        assert!(is_compiler_directive("/End-Free"));
        assert!(is_compiler_directive("/EJECT"));
        assert!(!is_compiler_directive("/NOSUCH"));
        assert!(!is_compiler_directive("COPY"));
    }
}
