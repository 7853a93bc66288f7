//! Foundation types for the Groovy analysis core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Range`] - 0-based LSP coordinates
//! - [`SourcePos`], [`SourceSpan`] - 1-based coordinates recorded by the parser
//! - [`LineIndex`] - byte offset to line/column conversion
//! - Identifier extraction at a cursor
//!
//! This module has NO dependencies on other crate modules.

mod line_index;
mod position;
pub mod text_utils;

pub use line_index::LineIndex;
pub use position::{Position, Range, SourcePos, SourceSpan, SpanError};
pub use text_utils::{extract_word_at_cursor, is_word_character, line_at};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
