//! Position tracking for declarations and cursors.
//!
//! Two coordinate spaces meet here:
//! - [`Position`] / [`Range`] are 0-based (line, character), the LSP shape.
//! - [`SourcePos`] / [`SourceSpan`] are 1-based (line, column), the shape the
//!   front end records on every declaration.
//!
//! Every crossing between the two applies the ±1 conversion exactly once.

use std::fmt;

use thiserror::Error;

/// A position in a document (0-indexed, UTF-16 character offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Convert into the front end's 1-based space.
    ///
    /// Saturates at `u32::MAX`; clients may send a character past the end
    /// of the line.
    pub const fn to_source_pos(self) -> SourcePos {
        SourcePos::new(self.line.saturating_add(1), self.character.saturating_add(1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A range in a document (0-indexed, both ends inclusive for containment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range from line/character coordinates
    pub const fn from_coords(
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_character),
            end: Position::new(end_line, end_character),
        }
    }

    /// Check if a position falls within this range.
    pub fn contains(&self, position: Position) -> bool {
        contains(
            (self.start.line, self.start.character),
            (self.end.line, self.end.character),
            (position.line, position.character),
        )
    }

    /// Convert back into the front end's 1-based space.
    pub const fn to_source_span(self) -> SourceSpan {
        SourceSpan::new(self.start.to_source_pos(), self.end.to_source_pos())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A 1-based line/column position as recorded by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Convert into the 0-based LSP space.
    pub fn to_position(self) -> Result<Position, SpanError> {
        let line = self
            .line
            .checked_sub(1)
            .ok_or(SpanError::ZeroCoordinate(self))?;
        let character = self
            .column
            .checked_sub(1)
            .ok_or(SpanError::ZeroCoordinate(self))?;
        Ok(Position::new(line, character))
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A 1-based span (`startLine/startColumn/endLine/endColumn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: SourcePos,
    pub end: SourcePos,
}

impl SourceSpan {
    pub const fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            start: SourcePos::new(start_line, start_column),
            end: SourcePos::new(end_line, end_column),
        }
    }

    /// Inclusive containment in 1-based space.
    pub fn contains(&self, pos: SourcePos) -> bool {
        contains(
            (self.start.line, self.start.column),
            (self.end.line, self.end.column),
            (pos.line, pos.column),
        )
    }

    /// Convert into a 0-based [`Range`], subtracting 1 from all four coordinates.
    pub fn to_range(self) -> Result<Range, SpanError> {
        Ok(Range::new(self.start.to_position()?, self.end.to_position()?))
    }
}

/// Coordinate invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpanError {
    /// A 1-based coordinate was 0, so it has no 0-based counterpart.
    #[error("1-based source position {0} has a zero coordinate")]
    ZeroCoordinate(SourcePos),
}

fn contains(start: (u32, u32), end: (u32, u32), pos: (u32, u32)) -> bool {
    if pos.0 < start.0 || pos.0 > end.0 {
        return false;
    }
    if pos.0 == start.0 && pos.1 < start.1 {
        return false;
    }
    if pos.0 == end.0 && pos.1 > end.1 {
        return false;
    }
    true
}
