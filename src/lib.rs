//! # rpglex
//!
//! A column-sensitive lexer for RPG/RPGLE source. The language carries two
//! coexisting surface syntaxes: a column-positional fixed-form layout and a
//! free-form statement syntax, which may cover a whole source file or be
//! embedded inside fixed-form blocks. This crate owns the lexical layer:
//! deciding, line by line, which column ranges carry semantic meaning, which
//! text is a comment, which text is a raw-data trailer, and which text is
//! handed to the free-form tokenizer. The resulting token stream and
//! diagnostic list are the handoff to a downstream statement parser.
//!
//! ## Testing
//!
//! Unit tests live next to each pipeline stage; integration tests under
//! `tests/` exercise whole-source scenarios taken from real fixed-form and
//! free-form code.

pub mod lexing;

pub use lexing::{
    lex_line, lex_source, DiagnosticKind, LexDiagnostic, LexError, LexedLine, Lexer, LexerMode,
    LexerOutput, Token, TokenKind,
};
