//! A strict TOML decoder with exact, position-accurate error diagnostics.
//!
//! The input is decoded in a single pass into an owned tree of [`Value`]s
//! rooted at a [`Table`]. On malformed input decoding stops at the first
//! problem and returns a [`DecodeError`] that renders as
//! `"<message> (at line <L>, column <C>)"`, or as
//! `"<message> (at end of document)"` when the input ended too early.
//!
//! # Examples
//!
//! ```
//! use toml_decode::{Value, decode};
//!
//! let content = r#"
//! dev-mode = true
//!
//! [[things]]
//! name = "hammer"
//! value = 43
//!
//! [[things]]
//! name = "drill"
//! value = 300
//! color = "green"
//! "#;
//!
//! let table = decode(content)?;
//! let things = table.get("things").and_then(Value::as_array).unwrap();
//!
//! assert_eq!(things.len(), 2);
//! assert_eq!(things[0].as_table().unwrap().get("name"), Some(&Value::from("hammer")));
//! assert_eq!(table.get("dev-mode").and_then(Value::as_bool), Some(true));
//! # Ok::<(), toml_decode::DecodeError>(())
//! ```
//!
//! Errors point at the offending character:
//!
//! ```
//! let err = toml_decode::decode("\n\nval = .").unwrap_err();
//! assert_eq!(err.to_string(), "Invalid value (at line 3, column 7)");
//! ```

mod array;
mod decoder;
mod error;
mod parser;
mod position;
mod span;
mod table;
mod time;
mod value;

pub use array::Array;
pub use decoder::Decoder;
pub use error::{DecodeError, ErrorKind};
pub use position::{Location, Position};
pub use span::Span;
pub use table::Table;
pub use time::{Date, LocalDateTime, OffsetDateTime, Time, TimeOffset};
pub use value::Value;

#[cfg(feature = "serde")]
pub mod impl_serde;

/// Decodes a complete TOML document with the default [`Decoder`] settings.
pub fn decode(text: &str) -> Result<Table, DecodeError> {
    Decoder::new().decode(text)
}

impl std::str::FromStr for Table {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
