//! Byte offset to line/column conversion.

use text_size::TextSize;

use super::SourcePos;

/// Index for converting byte offsets into 1-based line/column positions.
///
/// Columns are counted in UTF-16 code units so that `column - 1` matches the
/// LSP `character` field exactly. End positions produced from an exclusive
/// byte offset are exclusive too, which is the LSP convention for range ends.
#[derive(Clone, Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
}

impl<'a> LineIndex<'a> {
    /// Build a line index from source text.
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self { text, line_starts }
    }

    /// Convert a byte offset to a 1-based source position.
    pub fn source_pos(&self, offset: TextSize) -> SourcePos {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(self.text.len());
        let column: usize = self
            .text
            .get(line_start..end)
            .map(|prefix| prefix.chars().map(char::len_utf16).sum())
            .unwrap_or(end - line_start);

        SourcePos::new(line as u32 + 1, column as u32 + 1)
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    /// Check if there are no lines (never true, an empty text has one line).
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}
