//! Values, including the recursive array and inline-table forms.

use super::flags::{Flag, Flags};
use super::{ParseError, Parser, get_or_create_nest};
use crate::array::Array;
use crate::error::ErrorKind;
use crate::table::Table;
use crate::time::Temporal;
use crate::value::Value;

impl Parser<'_> {
    pub(super) fn value(&mut self) -> Result<Value, ParseError> {
        let start = self.cursor;
        let Some(b) = self.peek_byte() else {
            return Err(self.set_error(start, None, ErrorKind::InvalidValue));
        };
        match b {
            b'"' if self.starts_with(b"\"\"\"") => self.multiline_string(b'"').map(Value::String),
            b'"' => self.basic_string().map(Value::String),
            b'\'' if self.starts_with(b"'''") => {
                self.multiline_string(b'\'').map(Value::String)
            }
            b'\'' => self.literal_string().map(Value::String),
            b't' if self.starts_with(b"true") => {
                self.cursor += 4;
                Ok(Value::Boolean(true))
            }
            b'f' if self.starts_with(b"false") => {
                self.cursor += 5;
                Ok(Value::Boolean(false))
            }
            b'[' => self.array(),
            b'{' => self.inline_table(),
            _ => self.temporal_or_number(start),
        }
    }

    fn temporal_or_number(&mut self, start: usize) -> Result<Value, ParseError> {
        let Some((len, temporal)) = Temporal::munch(&self.bytes[start..]) else {
            return self.number(start);
        };
        if let Some(date) = temporal.date() {
            if !date.is_valid() {
                return Err(self.set_error(start, Some(start + len), ErrorKind::InvalidDatetime));
            }
        }
        self.cursor = start + len;
        Ok(match temporal {
            Temporal::OffsetDateTime(dt) => Value::OffsetDateTime(dt),
            Temporal::LocalDateTime(dt) => Value::LocalDateTime(dt),
            Temporal::Date(date) => Value::LocalDate(date),
            Temporal::Time(time) => Value::LocalTime(time),
        })
    }

    fn enter_nested(&mut self, open: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let limit = self.max_depth;
            return Err(self.set_error(open, None, ErrorKind::NestingTooDeep { limit }));
        }
        Ok(())
    }

    /// Whitespace, newlines and comments between array elements.
    fn eat_array_whitespace(&mut self) -> Result<(), ParseError> {
        loop {
            let before = self.cursor;
            loop {
                self.eat_whitespace();
                if !self.eat_newline() {
                    break;
                }
            }
            self.eat_comment()?;
            if self.cursor == before {
                return Ok(());
            }
        }
    }

    /// `[ v, ... ]`, with the cursor on the `[`.
    fn array(&mut self) -> Result<Value, ParseError> {
        self.enter_nested(self.cursor)?;
        self.advance();
        let mut array = Array::new();

        self.eat_array_whitespace()?;
        if !self.eat_byte(b']') {
            loop {
                array.push(self.value()?);
                self.eat_array_whitespace()?;
                match self.peek_byte() {
                    Some(b']') => {
                        self.advance();
                        break;
                    }
                    Some(b',') => {
                        self.advance();
                        self.eat_array_whitespace()?;
                        if self.eat_byte(b']') {
                            break;
                        }
                    }
                    _ => return Err(self.set_error(self.cursor, None, ErrorKind::UnclosedArray)),
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(array))
    }

    /// `{ k = v, ... }`, with the cursor on the `{`.
    ///
    /// Each inline table keeps its own flags: dotted keys may build up
    /// sub-tables, but a table or array given as a value is frozen.
    fn inline_table(&mut self) -> Result<Value, ParseError> {
        self.enter_nested(self.cursor)?;
        self.advance();
        let mut table = Table::new();
        let mut flags = Flags::default();

        self.eat_whitespace();
        if !self.eat_byte(b'}') {
            loop {
                let (key, value) = self.key_value_pair()?;
                let at = self.cursor;
                if flags.has(&key, Flag::Frozen) {
                    return Err(self.set_error(at, None, ErrorKind::ImmutableNamespace { key }));
                }
                let Some((stem, parent)) = key.split_last() else {
                    return Err(self.set_error(at, None, ErrorKind::InvalidKeyStart));
                };
                let Some(nest) = get_or_create_nest(&mut table, parent, false) else {
                    return Err(self.set_error(at, None, ErrorKind::OverwriteValue));
                };
                if nest.contains_key(stem) {
                    let key = stem.clone();
                    return Err(self.set_error(at, None, ErrorKind::DuplicateInlineKey { key }));
                }
                let freeze = matches!(value, Value::Table(_) | Value::Array(_));
                nest.insert(stem.clone(), value);

                self.eat_whitespace();
                match self.peek_byte() {
                    Some(b'}') => {
                        self.advance();
                        break;
                    }
                    Some(b',') => self.advance(),
                    _ => {
                        return Err(self.set_error(
                            self.cursor,
                            None,
                            ErrorKind::UnclosedInlineTable,
                        ));
                    }
                }
                if freeze {
                    flags.set(&key, Flag::Frozen, true);
                }
                self.eat_whitespace();
            }
        }

        self.depth -= 1;
        Ok(Value::Table(table))
    }
}
