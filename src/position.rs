//! Mapping of byte offsets to human readable line/column positions.

use std::fmt;

/// A 1-indexed line and column within a TOML document.
///
/// Columns count characters (Unicode scalar values), not bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Computes the position of the byte `offset` in `source`.
    ///
    /// The line is one more than the number of `\n` bytes before `offset`,
    /// the column one more than the number of characters between the last
    /// such newline (or the start of input) and `offset`. Offsets past the
    /// end are clamped to the end.
    pub fn locate(source: &str, offset: usize) -> Position {
        let bytes = source.as_bytes();
        let offset = offset.min(bytes.len());
        let before = &bytes[..offset];

        let mut line = 1;
        let mut line_start = 0;
        for (i, &b) in before.iter().enumerate() {
            if b == b'\n' {
                line += 1;
                line_start = i + 1;
            }
        }

        let column = match source.get(line_start..offset) {
            Some(text) => text.chars().count() + 1,
            // Not on a char boundary; fall back to counting bytes.
            None => offset - line_start + 1,
        };

        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Where in a document an error was detected.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Location {
    /// A concrete character position.
    LineColumn(Position),
    /// The input ended before the construct being parsed was complete.
    EndOfDocument,
}

impl Location {
    /// Resolves a byte offset into a [`Location`]. Any offset at or past the
    /// end of `source` is [`Location::EndOfDocument`].
    pub fn of(source: &str, offset: usize) -> Location {
        if offset >= source.len() {
            Location::EndOfDocument
        } else {
            Location::LineColumn(Position::locate(source, offset))
        }
    }

    /// Returns the line/column position, if this is not the end of document.
    pub fn position(&self) -> Option<Position> {
        match self {
            Location::LineColumn(pos) => Some(*pos),
            Location::EndOfDocument => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::LineColumn(pos) => fmt::Display::fmt(pos, f),
            Location::EndOfDocument => f.write_str("end of document"),
        }
    }
}
