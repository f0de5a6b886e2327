//! Column Zone Classifier
//!
//! All column-position constants of the fixed-column layout live here, as a
//! pure function of (mode, spec-type character). Zones are computed fresh
//! per line and never cached, because the spec-type character can change
//! from one line to the next.
//!
//! Fixed-form layout (0-based columns):
//!     [0,5)  sequence area (ignored for tokenization, kept in positions)
//!     [5,6)  spec-type column (selects the specification kind)
//!     [6,7)  comment-indicator column (`*` marks a full-line comment)
//!     [7,w)  content
//!
//! Free-form and raw-trailer lines have a single content zone spanning the
//! whole record: free-form statements are read left to right regardless of
//! column, and raw-trailer lines are data, not code.

use std::ops::Range;

use crate::lexing::mode::LexerMode;
use crate::lexing::normalize::{NormalizedRecord, RECORD_WIDTH};

/// 0-based column of the spec-type character.
pub const SPEC_TYPE_COL: usize = 5;
/// 0-based column of the fixed-form comment indicator.
pub const COMMENT_INDICATOR_COL: usize = 6;
/// 0-based end of the sequence area.
const SEQUENCE_END: usize = 5;
/// 0-based content start shared by all current specification kinds.
const CONTENT_START: usize = 7;

/// The specification kind selected by the spec-type column character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    Control,
    File,
    Definition,
    Input,
    Calculation,
    Output,
    Procedure,
}

impl SpecKind {
    /// Parse the spec-type column character (case-insensitive).
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'H' => Some(SpecKind::Control),
            'F' => Some(SpecKind::File),
            'D' => Some(SpecKind::Definition),
            'I' => Some(SpecKind::Input),
            'C' => Some(SpecKind::Calculation),
            'O' => Some(SpecKind::Output),
            'P' => Some(SpecKind::Procedure),
            _ => None,
        }
    }

    /// The 0-based column where this kind's content area begins. Every
    /// current kind starts at the same column, but the start is owned by the
    /// kind so a divergent layout only needs a change here.
    pub fn content_start(&self) -> usize {
        CONTENT_START
    }
}

/// The role of a column range within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    SequenceArea,
    SpecType,
    CommentIndicator,
    Content,
}

/// A classified column range, half-open `[start, end)`, 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnZone {
    pub kind: ZoneKind,
    pub range: Range<usize>,
}

/// Classify the column zones of a record under the given mode.
///
/// The returned zones are ordered, contiguous, and cover `[0, RECORD_WIDTH)`.
pub fn classify(record: &NormalizedRecord, mode: LexerMode) -> Vec<ColumnZone> {
    match mode {
        LexerMode::FixedForm => {
            let spec_char = record.char_at(SPEC_TYPE_COL);
            // A line with no recognizable spec kind reserves no comment
            // indicator column; its content starts right after the
            // spec-type column (embedded free-form and directive lines).
            let content_start = SpecKind::from_char(spec_char)
                .map(|kind| kind.content_start())
                .unwrap_or(COMMENT_INDICATOR_COL);
            let mut zones = vec![
                ColumnZone {
                    kind: ZoneKind::SequenceArea,
                    range: 0..SEQUENCE_END,
                },
                ColumnZone {
                    kind: ZoneKind::SpecType,
                    range: SPEC_TYPE_COL..SPEC_TYPE_COL + 1,
                },
            ];
            if content_start > COMMENT_INDICATOR_COL {
                zones.push(ColumnZone {
                    kind: ZoneKind::CommentIndicator,
                    range: COMMENT_INDICATOR_COL..content_start,
                });
            }
            zones.push(ColumnZone {
                kind: ZoneKind::Content,
                range: content_start..RECORD_WIDTH,
            });
            zones
        }
        LexerMode::FreeForm | LexerMode::RawTrailer => vec![ColumnZone {
            kind: ZoneKind::Content,
            range: 0..RECORD_WIDTH,
        }],
    }
}

/// The content range of a record under the given mode.
pub fn content_range(record: &NormalizedRecord, mode: LexerMode) -> Range<usize> {
    classify(record, mode)
        .into_iter()
        .rev()
        .find(|zone| zone.kind == ZoneKind::Content)
        .map(|zone| zone.range)
        .unwrap_or(0..RECORD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::normalize::{normalize, PhysicalLine};

    fn record(text: &str) -> NormalizedRecord {
        normalize(&PhysicalLine { text, number: 1 })
    }

    fn assert_contiguous(zones: &[ColumnZone]) {
        assert_eq!(zones.first().unwrap().range.start, 0);
        assert_eq!(zones.last().unwrap().range.end, RECORD_WIDTH);
        for pair in zones.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }

    #[test]
    fn test_fixed_form_zones() {
        let zones = classify(&record("     C X = Y"), LexerMode::FixedForm);
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].kind, ZoneKind::SequenceArea);
        assert_eq!(zones[1].kind, ZoneKind::SpecType);
        assert_eq!(zones[1].range, 5..6);
        assert_eq!(zones[2].kind, ZoneKind::CommentIndicator);
        assert_eq!(zones[3].kind, ZoneKind::Content);
        assert_eq!(zones[3].range, 7..RECORD_WIDTH);
        assert_contiguous(&zones);
    }

    #[test]
    fn test_blank_spec_type_has_no_indicator_zone() {
        let zones = classify(&record("      DCL-S FOO CHAR(10);"), LexerMode::FixedForm);
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[2].kind, ZoneKind::Content);
        assert_eq!(zones[2].range, 6..RECORD_WIDTH);
        assert_contiguous(&zones);
    }

    #[test]
    fn test_free_form_is_all_content() {
        let zones = classify(&record("DCL-S X INT(10);"), LexerMode::FreeForm);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].kind, ZoneKind::Content);
        assert_contiguous(&zones);
    }

    #[test]
    fn test_raw_trailer_is_all_content() {
        let zones = classify(&record("arbitrary data"), LexerMode::RawTrailer);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].kind, ZoneKind::Content);
    }

    #[test]
    fn test_spec_kind_parsing() {
        assert_eq!(SpecKind::from_char('C'), Some(SpecKind::Calculation));
        assert_eq!(SpecKind::from_char('d'), Some(SpecKind::Definition));
        assert_eq!(SpecKind::from_char('P'), Some(SpecKind::Procedure));
        assert_eq!(SpecKind::from_char(' '), None);
        assert_eq!(SpecKind::from_char('Z'), None);
    }

    #[test]
    fn test_content_range_per_mode() {
        let rec = record("     C X = Y");
        assert_eq!(content_range(&rec, LexerMode::FixedForm), 7..RECORD_WIDTH);
        assert_eq!(content_range(&rec, LexerMode::FreeForm), 0..RECORD_WIDTH);
    }
}
