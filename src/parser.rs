//! Recursive-descent TOML parser.
//!
//! The parser walks the source once, left to right, building the value tree
//! as it goes. Failures are recorded on the parser (`error_kind` and
//! `error_span`) and signalled with the zero-sized [`ParseError`]; the public
//! [`DecodeError`] with its line/column is only built once, in [`parse`].

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

mod flags;
mod number;
mod scan;
mod value;

use crate::{
    Span,
    array::Array,
    error::{DecodeError, ErrorKind},
    table::Table,
    value::Value,
};
use flags::{Flag, Flags};

// Lightweight internal error, zero-sized. When a method returns
// Err(ParseError) the details have already been written into
// Parser::error_kind / Parser::error_span.
#[derive(Copy, Clone, Debug)]
struct ParseError;

/// Everything a document accumulates while its statements are processed.
#[derive(Default)]
struct Document {
    root: Table,
    flags: Flags,
    /// Key path of the most recent `[table]` or `[[array]]` header.
    header: Vec<String>,
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    cursor: usize,

    // Error context, populated just before returning ParseError
    error_span: Span,
    error_kind: Option<ErrorKind>,

    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Parser {
            text,
            bytes: text.as_bytes(),
            cursor: 0,
            error_span: Span::new(0, 0),
            error_kind: None,
            depth: 0,
            max_depth,
        }
    }

    // -- error helpers ------------------------------------------------------

    /// Records an error at byte `start`. Without an explicit `end` the span
    /// covers the single character at `start`.
    #[cold]
    fn set_error(&mut self, start: usize, end: Option<usize>, kind: ErrorKind) -> ParseError {
        let len = self.bytes.len();
        let start = start.min(len);
        let end = match end {
            Some(end) => end.min(len),
            None => {
                let mut end = (start + 1).min(len);
                while !self.text.is_char_boundary(end) {
                    end += 1;
                }
                end
            }
        };
        self.error_span = Span::new(start as u32, end as u32);
        self.error_kind = Some(kind);
        ParseError
    }

    fn take_error(&mut self) -> DecodeError {
        debug_assert!(self.error_kind.is_some(), "take_error called without error");
        let kind = self.error_kind.take().unwrap_or(ErrorKind::InvalidStatement);
        DecodeError::new(self.text, kind, self.error_span)
    }

    // -- cursor operations --------------------------------------------------

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.cursor + offset).copied()
    }

    #[inline]
    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.cursor..].starts_with(prefix)
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor += 1;
    }

    #[inline]
    fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek_byte() == Some(b) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_whitespace(&mut self) {
        while let Some(b' ' | b'\t') = self.peek_byte() {
            self.advance();
        }
    }

    /// Consumes a `\n` or `\r\n`.
    fn eat_newline(&mut self) -> bool {
        match self.peek_byte() {
            Some(b'\n') => {
                self.advance();
                true
            }
            Some(b'\r') if self.peek_byte_at(1) == Some(b'\n') => {
                self.cursor += 2;
                true
            }
            _ => false,
        }
    }

    // -- document structure -------------------------------------------------

    fn parse_document(&mut self, doc: &mut Document) -> Result<(), ParseError> {
        loop {
            self.eat_whitespace();
            let Some(b) = self.peek_byte() else {
                break;
            };
            if self.eat_newline() {
                continue;
            }
            match b {
                b'[' => {
                    doc.flags.finalize_pending(&doc.header);
                    if self.peek_byte_at(1) == Some(b'[') {
                        self.array_header(doc)?;
                    } else {
                        self.table_header(doc)?;
                    }
                    self.eat_whitespace();
                }
                b'#' => {}
                b if is_key_initial(b) => {
                    self.key_value_statement(doc)?;
                    self.eat_whitespace();
                }
                _ => return Err(self.set_error(self.cursor, None, ErrorKind::InvalidStatement)),
            }

            self.eat_comment()?;
            if self.peek_byte().is_none() {
                break;
            }
            if !self.eat_newline() {
                return Err(self.set_error(self.cursor, None, ErrorKind::InvalidStatement));
            }
        }
        Ok(())
    }

    /// `[a.b.c]`, with the cursor on the `[`.
    fn table_header(&mut self, doc: &mut Document) -> Result<(), ParseError> {
        self.advance();
        self.eat_whitespace();
        let key = self.key()?;

        if doc.flags.has(&key, Flag::ExplicitNest) || doc.flags.has(&key, Flag::Frozen) {
            return Err(self.set_error(self.cursor, None, ErrorKind::DuplicateTable { key }));
        }
        doc.flags.set(&key, Flag::ExplicitNest, false);
        if get_or_create_nest(&mut doc.root, &key, true).is_none() {
            return Err(self.set_error(self.cursor, None, ErrorKind::OverwriteValue));
        }
        if !self.eat_byte(b']') {
            return Err(self.set_error(self.cursor, None, ErrorKind::UnclosedTableHeader));
        }

        doc.header = key;
        Ok(())
    }

    /// `[[a.b.c]]`, with the cursor on the first `[`.
    fn array_header(&mut self, doc: &mut Document) -> Result<(), ParseError> {
        self.cursor += 2;
        self.eat_whitespace();
        let key = self.key()?;

        if doc.flags.has(&key, Flag::Frozen) {
            return Err(self.set_error(self.cursor, None, ErrorKind::ImmutableNamespace { key }));
        }
        // A fresh array element starts with a clean slate beneath the key.
        doc.flags.unset_all(&key);
        doc.flags.set(&key, Flag::ExplicitNest, false);
        if append_nest_to_list(&mut doc.root, &key).is_none() {
            return Err(self.set_error(self.cursor, None, ErrorKind::OverwriteValue));
        }
        if !self.starts_with(b"]]") {
            return Err(self.set_error(self.cursor, None, ErrorKind::UnclosedArrayHeader));
        }
        self.cursor += 2;

        doc.header = key;
        Ok(())
    }

    /// A top-level `key = value` statement, inserted relative to the current
    /// header.
    fn key_value_statement(&mut self, doc: &mut Document) -> Result<(), ParseError> {
        let (mut key, value) = self.key_value_pair()?;
        let at = self.cursor;
        let Some(stem) = key.pop() else {
            return Err(self.set_error(at, None, ErrorKind::InvalidKeyStart));
        };
        let parent = key;

        if let Some(n) = doc.flags.first_flagged(&doc.header, &parent, Flag::ExplicitNest) {
            let key = doc.header.iter().chain(&parent[..n]).cloned().collect();
            return Err(self.set_error(at, None, ErrorKind::RedefineNamespace { key }));
        }
        if doc.flags.has(doc.header.iter().chain(&parent), Flag::Frozen) {
            let key = doc.header.iter().chain(&parent).cloned().collect();
            return Err(self.set_error(at, None, ErrorKind::ImmutableNamespace { key }));
        }

        let freeze = matches!(value, Value::Table(_) | Value::Array(_));
        let nest = get_or_create_nest(&mut doc.root, &doc.header, true)
            .and_then(|section| get_or_create_nest(section, &parent, true));
        let Some(nest) = nest else {
            return Err(self.set_error(at, None, ErrorKind::OverwriteValue));
        };
        if nest.contains_key(&stem) {
            return Err(self.set_error(at, None, ErrorKind::OverwriteValue));
        }
        nest.insert(stem.clone(), value);

        if freeze {
            let path = doc.header.iter().chain(&parent).chain(Some(&stem));
            doc.flags.set(path, Flag::Frozen, true);
        }
        if !parent.is_empty() {
            doc.flags.add_pending(parent, Flag::ExplicitNest);
        }
        Ok(())
    }

    /// `key = value`, shared by top-level statements and inline tables.
    fn key_value_pair(&mut self) -> Result<(Vec<String>, Value), ParseError> {
        let key = self.key()?;
        if !self.eat_byte(b'=') {
            return Err(self.set_error(self.cursor, None, ErrorKind::ExpectedEquals));
        }
        self.eat_whitespace();
        let value = self.value()?;
        Ok((key, value))
    }
}

/// Walks `path` from `cont`, creating empty tables for missing segments.
///
/// With `access_lists`, an array on the way is entered through its last
/// element, which is how headers reach into arrays of tables. Returns `None`
/// when a segment holds something other than a table.
fn get_or_create_nest<'t>(
    mut cont: &'t mut Table,
    path: &[String],
    access_lists: bool,
) -> Option<&'t mut Table> {
    for k in path {
        if !cont.contains_key(k) {
            cont.insert(k.clone(), Value::Table(Table::new()));
        }
        cont = match cont.get_mut(k)? {
            Value::Array(array) if access_lists => match array.last_mut()? {
                Value::Table(table) => table,
                _ => return None,
            },
            Value::Table(table) => table,
            _ => return None,
        };
    }
    Some(cont)
}

/// Appends a new empty table to the array of tables at `path`, creating the
/// array if needed. Returns `None` if something else is in the way.
fn append_nest_to_list(root: &mut Table, path: &[String]) -> Option<()> {
    let (last, parent) = path.split_last()?;
    let cont = get_or_create_nest(root, parent, true)?;
    match cont.get_mut(last) {
        Some(Value::Array(array)) => array.push(Value::Table(Table::new())),
        Some(_) => return None,
        None => {
            let array = Array::with_single(Value::Table(Table::new()));
            cont.insert(last.clone(), Value::Array(array));
        }
    }
    Some(())
}

#[inline]
fn is_bare_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[inline]
fn is_key_initial(b: u8) -> bool {
    is_bare_key_byte(b) || b == b'"' || b == b'\''
}

/// Largest input whose byte offsets, including the end-of-document offset,
/// fit the `u32` fields of [`Span`].
const MAX_SIZE: usize = u32::MAX as usize;

/// Parses a complete document into its root table.
pub(crate) fn parse(text: &str, max_depth: usize) -> Result<Table, DecodeError> {
    parse_within(text, max_depth, MAX_SIZE)
}

fn parse_within(text: &str, max_depth: usize, max_size: usize) -> Result<Table, DecodeError> {
    if text.len() > max_size {
        return Err(DecodeError::new(text, ErrorKind::FileTooLarge, Span::new(0, 0)));
    }
    let mut parser = Parser::new(text, max_depth);
    let mut doc = Document::default();
    match parser.parse_document(&mut doc) {
        Ok(()) => Ok(doc.root),
        Err(ParseError) => Err(parser.take_error()),
    }
}
