use crate::error::DecodeError;
use crate::parser;
use crate::table::Table;

/// Configurable entry point for decoding TOML documents.
///
/// ```
/// use toml_decode::Decoder;
///
/// let decoder = Decoder::new().max_depth(2);
/// assert!(decoder.decode("a = [[1]]").is_ok());
///
/// let err = decoder.decode("a = [[[1]]]").unwrap_err();
/// assert_eq!(err.to_string(), "Maximum nesting depth exceeded (at line 1, column 7)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// How deeply arrays and inline tables may nest unless configured
    /// otherwise.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Creates a decoder with default settings.
    pub const fn new() -> Self {
        Decoder {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth of arrays and inline tables.
    ///
    /// A value nested deeper fails with
    /// [`ErrorKind::NestingTooDeep`](crate::ErrorKind::NestingTooDeep)
    /// at its opening bracket.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decodes a complete TOML document into its root table.
    #[tracing::instrument(skip_all, fields(source_len = text.len(), max_depth = self.max_depth))]
    pub fn decode(&self, text: &str) -> Result<Table, DecodeError> {
        match parser::parse(text, self.max_depth) {
            Ok(table) => {
                tracing::trace!(keys = table.len(), "decoded document");
                Ok(table)
            }
            Err(err) => {
                tracing::debug!(code = err.kind.code(), %err, "failed to decode document");
                Err(err)
            }
        }
    }
}
