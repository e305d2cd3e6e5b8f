//! The decoded value tree.

#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::array::Array;
use crate::table::Table;
use crate::time::{Date, LocalDateTime, OffsetDateTime, Time};
use std::fmt;

/// A single TOML value.
///
/// The four temporal kinds of TOML are kept apart so that callers can tell
/// an offset date-time from a local one without inspecting its fields.
///
/// # Examples
///
/// ```
/// use toml_decode::Value;
///
/// let table = toml_decode::decode("n = 10")?;
/// match table.get("n") {
///     Some(Value::Integer(i)) => assert_eq!(*i, 10),
///     other => panic!("expected integer, got {other:?}"),
/// }
/// # Ok::<(), toml_decode::DecodeError>(())
/// ```
#[derive(Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A date-time with a UTC offset.
    OffsetDateTime(OffsetDateTime),
    /// A date-time without an offset.
    LocalDateTime(LocalDateTime),
    /// A date without time or offset.
    LocalDate(Date),
    /// A time without date or offset.
    LocalTime(Time),
    /// An array value.
    Array(Array),
    /// A table value.
    Table(Table),
}

impl Value {
    /// Returns the TOML name of this value's type, e.g. `"string"` or
    /// `"offset datetime"`.
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::OffsetDateTime(_) => "offset datetime",
            Value::LocalDateTime(_) => "local datetime",
            Value::LocalDate(_) => "local date",
            Value::LocalTime(_) => "local time",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    /// Returns a borrowed string if this is a string value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns an `i64` if this is an integer value.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns an `f64` if this is a float or integer value.
    ///
    /// Integer values are converted to `f64` via `as` cast (lossy for large
    /// values outside the 2^53 exact-integer range).
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns a `bool` if this is a boolean value.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the offset date-time if this is one.
    pub fn as_offset_datetime(&self) -> Option<&OffsetDateTime> {
        match self {
            Value::OffsetDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the local date-time if this is one.
    pub fn as_local_datetime(&self) -> Option<&LocalDateTime> {
        match self {
            Value::LocalDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the local date if this is one.
    pub fn as_local_date(&self) -> Option<&Date> {
        match self {
            Value::LocalDate(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the local time if this is one.
    pub fn as_local_time(&self) -> Option<&Time> {
        match self {
            Value::LocalTime(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a borrowed array if this is an array value.
    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a borrowed table if this is a table value.
    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable array reference.
    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a mutable table reference.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns `true` if the value is a string.
    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` for any of the four date/time kinds.
    pub fn is_datetime(&self) -> bool {
        matches!(
            self,
            Value::OffsetDateTime(_)
                | Value::LocalDateTime(_)
                | Value::LocalDate(_)
                | Value::LocalTime(_)
        )
    }

    /// Returns `true` if the value is an array.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => fmt::Debug::fmt(s, f),
            Value::Integer(i) => fmt::Debug::fmt(i, f),
            Value::Float(v) => fmt::Debug::fmt(v, f),
            Value::Boolean(b) => fmt::Debug::fmt(b, f),
            Value::OffsetDateTime(dt) => fmt::Debug::fmt(dt, f),
            Value::LocalDateTime(dt) => fmt::Debug::fmt(dt, f),
            Value::LocalDate(d) => fmt::Debug::fmt(d, f),
            Value::LocalTime(t) => fmt::Debug::fmt(t, f),
            Value::Array(a) => fmt::Debug::fmt(a, f),
            Value::Table(t) => fmt::Debug::fmt(t, f),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}
