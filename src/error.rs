#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

use crate::Span;
use crate::position::{Location, Position};
use std::fmt::{self, Debug, Display};

/// Error produced when a TOML document fails to decode.
///
/// Displays as `"<message> (at line <L>, column <C>)"`, or
/// `"<message> (at end of document)"` when the input ended early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// The byte range where the error was detected.
    pub span: Span,
    /// Line and column of `span.start`, or the end-of-document marker.
    pub location: Location,
}

impl DecodeError {
    /// Builds an error for `kind` detected at byte `offset` of `source`.
    pub fn new(source: &str, kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            location: Location::of(source, span.start as usize),
        }
    }

    /// Line/column of the error, or `None` at end of document.
    pub fn position(&self) -> Option<Position> {
        self.location.position()
    }

    /// The message without location suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl std::error::Error for DecodeError {}

/// The reasons a document can fail to decode.
///
/// The [`Display`] impl yields the message part of the diagnostic.
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value was expected but the text does not start any value.
    InvalidValue,

    /// A top-level line does not start a table header, key/value pair or
    /// comment, or a statement is followed by something other than a comment
    /// or newline.
    InvalidStatement,

    /// A key part starts with a character that is neither a bare-key
    /// character nor a quote.
    InvalidKeyStart,

    /// A key in a key/value pair is not followed by `=`.
    ExpectedEquals,

    /// A table header is missing its closing `]`.
    UnclosedTableHeader,

    /// An array-of-tables header is missing its closing `]]`.
    UnclosedArrayHeader,

    /// An array element is followed by something other than `,` or `]`.
    UnclosedArray,

    /// An inline table entry is followed by something other than `,` or `}`.
    UnclosedInlineTable,

    /// A control character appeared where it is not allowed.
    InvalidCharacter(char),

    /// A backslash in a basic string does not start a valid escape.
    InvalidEscape,

    /// A `\u` or `\U` escape is not followed by enough hex digits.
    InvalidHexValue,

    /// A `\u` or `\U` escape names a surrogate or a value above `0x10FFFF`.
    InvalidScalarValue(u32),

    /// The input ended inside a string.
    UnterminatedString,

    /// An underscore in a number is not between two digits.
    InvalidUnderscore,

    /// An integer does not fit in an `i64`.
    IntegerOutOfRange,

    /// A date that matched the date syntax does not exist on the calendar.
    InvalidDatetime,

    /// A table header names a table that was already defined.
    DuplicateTable {
        /// The full key path of the table.
        key: Vec<String>,
    },

    /// A key/value pair or header would replace an existing value.
    OverwriteValue,

    /// A dotted key reaches into a table defined by a header.
    RedefineNamespace {
        /// The key path of the existing table.
        key: Vec<String>,
    },

    /// A statement tries to extend an inline table or a static array.
    ImmutableNamespace {
        /// The key path that was being extended.
        key: Vec<String>,
    },

    /// An inline table contains the same key twice.
    DuplicateInlineKey {
        /// The repeated key.
        key: String,
    },

    /// Arrays and inline tables are nested deeper than the configured limit.
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },

    /// The input is too large for byte offsets to fit a [`Span`].
    FileTooLarge,
}

impl ErrorKind {
    /// A short, stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidValue => "invalid-value",
            Self::InvalidStatement => "invalid-statement",
            Self::InvalidKeyStart => "invalid-key-start",
            Self::ExpectedEquals => "expected-equals",
            Self::UnclosedTableHeader => "unclosed-table-header",
            Self::UnclosedArrayHeader => "unclosed-array-header",
            Self::UnclosedArray => "unclosed-array",
            Self::UnclosedInlineTable => "unclosed-inline-table",
            Self::InvalidCharacter(..) => "invalid-character",
            Self::InvalidEscape => "invalid-escape",
            Self::InvalidHexValue => "invalid-hex-value",
            Self::InvalidScalarValue(..) => "invalid-scalar-value",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidUnderscore => "invalid-underscore",
            Self::IntegerOutOfRange => "integer-out-of-range",
            Self::InvalidDatetime => "invalid-datetime",
            Self::DuplicateTable { .. } => "duplicate-table",
            Self::OverwriteValue => "overwrite-value",
            Self::RedefineNamespace { .. } => "redefine-namespace",
            Self::ImmutableNamespace { .. } => "immutable-namespace",
            Self::DuplicateInlineKey { .. } => "duplicate-inline-key",
            Self::NestingTooDeep { .. } => "nesting-too-deep",
            Self::FileTooLarge => "file-too-large",
        }
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Renders a character as it would appear in a quoted literal: tab, newline
/// and carriage return by name, other control characters as `\xNN`, and
/// everything else as itself.
pub(crate) struct Escape(pub(crate) char);

impl Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        match self.0 {
            '\t' => f.write_str("\\t"),
            '\n' => f.write_str("\\n"),
            '\r' => f.write_str("\\r"),
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32),
            c => f.write_char(c),
        }
    }
}

/// Renders a key path using TOML dotted-key syntax, quoting any segment that
/// is not a valid bare key.
pub(crate) struct KeyPath<'a>(pub(crate) &'a [String]);

impl Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            KeyPart(part).fmt(f)?;
        }
        Ok(())
    }
}

struct KeyPart<'a>(&'a str);

impl Display for KeyPart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if bare {
            return f.write_str(self.0);
        }
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => Escape(c).fmt(f)?,
            }
        }
        f.write_str("\"")
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue => f.write_str("Invalid value"),
            Self::InvalidStatement => f.write_str("Invalid statement"),
            Self::InvalidKeyStart => f.write_str("Invalid initial character for a key part"),
            Self::ExpectedEquals => f.write_str("Expected '=' after a key in a key/value pair"),
            Self::UnclosedTableHeader => {
                f.write_str("Expected ']' at the end of a table declaration")
            }
            Self::UnclosedArrayHeader => {
                f.write_str("Expected ']]' at the end of an array declaration")
            }
            Self::UnclosedArray => f.write_str("Unclosed array"),
            Self::UnclosedInlineTable => f.write_str("Unclosed inline table"),
            Self::InvalidCharacter(c) => write!(f, "Found invalid character '{}'", Escape(*c)),
            Self::InvalidEscape => f.write_str("Unescaped '\\' in a string"),
            Self::InvalidHexValue => f.write_str("Invalid hex value"),
            Self::InvalidScalarValue(_) => {
                f.write_str("Escaped character is not a Unicode scalar value")
            }
            Self::UnterminatedString => f.write_str("Unterminated string"),
            Self::InvalidUnderscore => f.write_str("Invalid underscore in number"),
            Self::IntegerOutOfRange => f.write_str("Integer out of range"),
            Self::InvalidDatetime => f.write_str("Invalid date or datetime"),
            Self::DuplicateTable { key } => write!(f, "Cannot declare {} twice", KeyPath(key)),
            Self::OverwriteValue => f.write_str("Cannot overwrite a value"),
            Self::RedefineNamespace { key } => {
                write!(f, "Cannot redefine namespace {}", KeyPath(key))
            }
            Self::ImmutableNamespace { key } => {
                write!(f, "Cannot mutate immutable namespace {}", KeyPath(key))
            }
            Self::DuplicateInlineKey { key } => write!(
                f,
                "Duplicate inline table key {}",
                KeyPath(std::slice::from_ref(key))
            ),
            Self::NestingTooDeep { .. } => f.write_str("Maximum nesting depth exceeded"),
            Self::FileTooLarge => f.write_str("File is too large"),
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.kind, self.location)
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl DecodeError {
    /// Converts this [`DecodeError`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diag = Diagnostic::error()
            .with_code(self.kind.code())
            .with_message(self.kind.to_string());

        let label = match &self.kind {
            ErrorKind::InvalidCharacter(c) => Label::primary(fid, self.span)
                .with_message(format!("invalid character '{}'", Escape(*c))),
            ErrorKind::UnterminatedString => {
                Label::primary(fid, self.span).with_message("eof reached before string terminator")
            }
            ErrorKind::InvalidEscape | ErrorKind::InvalidHexValue => {
                Label::primary(fid, self.span).with_message("invalid escape")
            }
            ErrorKind::InvalidScalarValue(value) => Label::primary(fid, self.span)
                .with_message(format!("{value:#x} is not a unicode scalar value")),
            ErrorKind::DuplicateTable { .. } => {
                Label::primary(fid, self.span).with_message("duplicate table")
            }
            ErrorKind::OverwriteValue | ErrorKind::DuplicateInlineKey { .. } => {
                Label::primary(fid, self.span).with_message("duplicate key")
            }
            ErrorKind::NestingTooDeep { limit } => {
                Label::primary(fid, self.span).with_message(format!("nesting limit is {limit}"))
            }
            _ => Label::primary(fid, self.span),
        };

        diag.with_labels(vec![label])
    }
}
