//! Line Normalizer
//!
//! Projects each physical input line onto the fixed record width used by the
//! legacy fixed-column format. Short lines are right-padded with spaces,
//! long lines are truncated (a pre-existing convention of the format, not an
//! error), and a trailing line terminator is stripped before padding.
//!
//! Columns at or beyond the original line length are synthetic padding: they
//! have no corresponding source column. Everything downstream consumes the
//! `NormalizedRecord` read-only.

use std::ops::Range;

/// The canonical working width of a source record (historically 280 columns).
pub const RECORD_WIDTH: usize = 280;

/// One raw input line plus its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalLine<'a> {
    pub text: &'a str,
    pub number: u32,
}

/// A physical line projected onto the fixed record width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// 1-based source line number
    pub number: u32,
    /// Exactly `RECORD_WIDTH` characters: the line with its terminator
    /// stripped, space-padded or truncated
    pub text: String,
    /// Character count of the original line (terminator excluded), before
    /// padding or truncation
    pub original_len: usize,
}

impl NormalizedRecord {
    /// The character at a 0-based column. Columns past the record width read
    /// as spaces.
    pub fn char_at(&self, col: usize) -> char {
        self.text.chars().nth(col).unwrap_or(' ')
    }

    /// Slice the record by a 0-based column range.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        &self.text[start..end]
    }

    /// True if every column of the record is a space.
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(|c| c == ' ')
    }

    /// The 0-based column of the first non-space character, if any.
    pub fn first_nonspace_from(&self, col: usize) -> Option<usize> {
        self.text
            .chars()
            .enumerate()
            .skip(col)
            .find(|(_, c)| *c != ' ')
            .map(|(i, _)| i)
    }

    /// True if the original line did not fit in the record width.
    pub fn overflowed(&self) -> bool {
        self.original_len > RECORD_WIDTH
    }

    fn byte_offset(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Normalize one physical line to the fixed record width. Always succeeds.
pub fn normalize(line: &PhysicalLine<'_>) -> NormalizedRecord {
    let stripped = line.text.trim_end_matches(['\n', '\r']);
    let original_len = stripped.chars().count();

    let text = if original_len >= RECORD_WIDTH {
        stripped.chars().take(RECORD_WIDTH).collect()
    } else {
        let mut text = String::with_capacity(RECORD_WIDTH);
        text.push_str(stripped);
        for _ in original_len..RECORD_WIDTH {
            text.push(' ');
        }
        text
    };

    NormalizedRecord {
        number: line.number,
        text,
        original_len,
    }
}
