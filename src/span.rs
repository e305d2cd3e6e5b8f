#[cfg(test)]
#[path = "./span_tests.rs"]
mod tests;

/// The byte range of the source text an error points at.
///
/// For most errors this is the single character where decoding stopped; an
/// error at the end of the document has an empty span at the input length.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Span {
    /// First byte of the range.
    pub start: u32,
    /// One past the last byte of the range.
    pub end: u32,
}

impl Span {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

// Labels in `codespan-reporting` take byte ranges.
impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start as usize..s.end as usize
    }
}
