//! Lexical pieces: comments, keys and strings.

use super::{ParseError, Parser, is_bare_key_byte};
use crate::error::ErrorKind;

#[inline]
fn is_forbidden_control(b: u8) -> bool {
    (b < 0x20 && b != b'\t') || b == 0x7F
}

impl Parser<'_> {
    /// Skips a `#` comment up to, but not including, the line ending.
    pub(super) fn eat_comment(&mut self) -> Result<(), ParseError> {
        if !self.eat_byte(b'#') {
            return Ok(());
        }
        while let Some(b) = self.peek_byte() {
            if b == b'\n' || (b == b'\r' && self.peek_byte_at(1) == Some(b'\n')) {
                break;
            }
            if is_forbidden_control(b) {
                return Err(self.set_error(
                    self.cursor,
                    None,
                    ErrorKind::InvalidCharacter(b as char),
                ));
            }
            self.advance();
        }
        Ok(())
    }

    /// A possibly dotted key. Whitespace around the dots and after the last
    /// part is consumed.
    pub(super) fn key(&mut self) -> Result<Vec<String>, ParseError> {
        let mut key = vec![self.key_part()?];
        self.eat_whitespace();
        while self.eat_byte(b'.') {
            self.eat_whitespace();
            key.push(self.key_part()?);
            self.eat_whitespace();
        }
        Ok(key)
    }

    fn key_part(&mut self) -> Result<String, ParseError> {
        let start = self.cursor;
        match self.peek_byte() {
            Some(b'"') => self.basic_string(),
            Some(b'\'') => self.literal_string(),
            Some(b) if is_bare_key_byte(b) => {
                while let Some(b) = self.peek_byte() {
                    if !is_bare_key_byte(b) {
                        break;
                    }
                    self.advance();
                }
                Ok(self.text[start..self.cursor].to_owned())
            }
            _ => Err(self.set_error(start, None, ErrorKind::InvalidKeyStart)),
        }
    }

    #[cold]
    fn unterminated(&mut self) -> ParseError {
        self.set_error(self.bytes.len(), None, ErrorKind::UnterminatedString)
    }

    /// Rejects the control character at `i`. A `\r\n` pair is reported as
    /// the newline it stands for.
    #[cold]
    fn invalid_control(&mut self, i: usize) -> ParseError {
        let b = self.bytes[i];
        let c = if b == b'\r' && self.bytes.get(i + 1) == Some(&b'\n') {
            '\n'
        } else {
            b as char
        };
        self.set_error(i, None, ErrorKind::InvalidCharacter(c))
    }

    /// `"..."`, with the cursor on the opening quote.
    pub(super) fn basic_string(&mut self) -> Result<String, ParseError> {
        self.advance();
        self.basic_string_body(false)
    }

    /// `'...'`, with the cursor on the opening quote.
    pub(super) fn literal_string(&mut self) -> Result<String, ParseError> {
        let content = self.cursor + 1;
        let mut i = content;
        loop {
            match self.bytes.get(i) {
                None => return Err(self.unterminated()),
                Some(b'\'') => break,
                Some(&b) if is_forbidden_control(b) => return Err(self.invalid_control(i)),
                Some(_) => i += 1,
            }
        }
        self.cursor = i + 1;
        Ok(self.text[content..i].to_owned())
    }

    /// `"""..."""` or `'''...'''`, with the cursor on the first delimiter.
    pub(super) fn multiline_string(&mut self, delim: u8) -> Result<String, ParseError> {
        self.cursor += 3;
        // A newline right after the opening delimiter is trimmed.
        self.eat_newline();
        let mut out = if delim == b'"' {
            self.basic_string_body(true)?
        } else {
            self.multiline_literal_body()?
        };
        // One or two quotes right before the closing delimiter are content.
        for _ in 0..2 {
            if !self.eat_byte(delim) {
                break;
            }
            out.push(delim as char);
        }
        Ok(out)
    }

    fn multiline_literal_body(&mut self) -> Result<String, ParseError> {
        let mut out = String::new();
        let mut plain = self.cursor;
        loop {
            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.unterminated());
            };
            match b {
                b'\'' if self.starts_with(b"'''") => {
                    out.push_str(&self.text[plain..i]);
                    self.cursor = i + 3;
                    return Ok(out);
                }
                b'\n' => self.advance(),
                b'\r' if self.bytes.get(i + 1) == Some(&b'\n') => {
                    out.push_str(&self.text[plain..i]);
                    out.push('\n');
                    self.cursor = i + 2;
                    plain = self.cursor;
                }
                b if is_forbidden_control(b) => return Err(self.invalid_control(i)),
                _ => self.advance(),
            }
        }
    }

    /// Body of a basic string, after the opening delimiter, through the
    /// closing one.
    fn basic_string_body(&mut self, multiline: bool) -> Result<String, ParseError> {
        let mut out = String::new();
        let mut plain = self.cursor;
        loop {
            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.unterminated());
            };
            match b {
                b'"' if !multiline || self.starts_with(b"\"\"\"") => {
                    out.push_str(&self.text[plain..i]);
                    self.cursor = i + if multiline { 3 } else { 1 };
                    return Ok(out);
                }
                b'\\' => {
                    out.push_str(&self.text[plain..i]);
                    self.basic_escape(&mut out, multiline)?;
                    plain = self.cursor;
                }
                b'\n' if multiline => self.advance(),
                b'\r' if multiline && self.bytes.get(i + 1) == Some(&b'\n') => {
                    out.push_str(&self.text[plain..i]);
                    out.push('\n');
                    self.cursor = i + 2;
                    plain = self.cursor;
                }
                b if is_forbidden_control(b) => return Err(self.invalid_control(i)),
                _ => self.advance(),
            }
        }
    }

    /// An escape sequence, with the cursor on the backslash.
    fn basic_escape(&mut self, out: &mut String, multiline: bool) -> Result<(), ParseError> {
        let start = self.cursor;
        let Some(&b) = self.bytes.get(start + 1) else {
            return Err(self.set_error(start, None, ErrorKind::InvalidEscape));
        };
        self.cursor = start + 2;
        match b {
            b'b' => out.push('\u{8}'),
            b't' => out.push('\t'),
            b'n' => out.push('\n'),
            b'f' => out.push('\u{c}'),
            b'r' => out.push('\r'),
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'u' => out.push(self.hex_escape(4)?),
            b'U' => out.push(self.hex_escape(8)?),
            b' ' | b'\t' | b'\n' | b'\r' if multiline => {
                // Line-ending backslash: only whitespace may sit between it
                // and the newline, and everything up to the next
                // non-whitespace character is trimmed.
                self.cursor = start + 1;
                self.eat_whitespace();
                if !self.eat_newline() {
                    if self.peek_byte().is_none() {
                        return Ok(());
                    }
                    return Err(self.set_error(start, None, ErrorKind::InvalidEscape));
                }
                loop {
                    self.eat_whitespace();
                    if !self.eat_newline() {
                        break;
                    }
                }
            }
            _ => return Err(self.set_error(start, None, ErrorKind::InvalidEscape)),
        }
        Ok(())
    }

    /// `n` hex digits following `\u` or `\U`.
    fn hex_escape(&mut self, n: usize) -> Result<char, ParseError> {
        let start = self.cursor;
        let digits = match self.bytes.get(start..start + n) {
            Some(digits) if digits.iter().all(u8::is_ascii_hexdigit) => digits,
            _ => return Err(self.set_error(start, None, ErrorKind::InvalidHexValue)),
        };
        let mut value = 0u32;
        for &d in digits {
            // at most 8 digits, cannot overflow
            value = value << 4 | (d as char).to_digit(16).unwrap_or(0);
        }
        match char::from_u32(value) {
            Some(c) => {
                self.cursor = start + n;
                Ok(c)
            }
            None => Err(self.set_error(
                start,
                Some(start + n),
                ErrorKind::InvalidScalarValue(value),
            )),
        }
    }
}
