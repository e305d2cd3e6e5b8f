//! Integers and floats.

use super::{ParseError, Parser};
use crate::error::ErrorKind;
use crate::value::Value;

impl Parser<'_> {
    /// Scans a run of `radix` digits starting at `i`, allowing single
    /// underscores between two digits. Returns the end of the run, which is
    /// `i` itself when there are no digits.
    fn digits(&mut self, i: usize, radix: u32) -> Result<usize, ParseError> {
        let is_digit = |b: Option<&u8>| b.is_some_and(|&b| (b as char).is_digit(radix));
        let mut end = i;
        loop {
            let b = self.bytes.get(end);
            if is_digit(b) {
                end += 1;
            } else if b == Some(&b'_') && end > i {
                if !is_digit(self.bytes.get(end + 1)) {
                    return Err(self.set_error(end, None, ErrorKind::InvalidUnderscore));
                }
                end += 1;
            } else {
                return Ok(end);
            }
        }
    }

    fn clean_digits(&self, start: usize, end: usize) -> String {
        self.text[start..end].chars().filter(|&c| c != '_').collect()
    }

    /// Parses a number starting at `start`.
    ///
    /// Accepts decimal integers with an optional sign, unsigned `0x`, `0o`
    /// and `0b` integers, floats with a fraction and/or an exponent, and
    /// `inf`/`nan` with an optional sign. Only the longest well-formed prefix
    /// is consumed.
    pub(super) fn number(&mut self, start: usize) -> Result<Value, ParseError> {
        let bytes = self.bytes;
        let mut i = start;
        let sign = match bytes.get(i) {
            Some(&s @ (b'+' | b'-')) => {
                i += 1;
                Some(s)
            }
            _ => None,
        };

        let rest = &bytes[i..];
        if rest.starts_with(b"inf") || rest.starts_with(b"nan") {
            self.cursor = i + 3;
            let value = if rest[0] == b'i' {
                f64::INFINITY
            } else {
                f64::NAN
            };
            return Ok(Value::Float(if sign == Some(b'-') {
                -value
            } else {
                value
            }));
        }

        if sign.is_none() && rest.first() == Some(&b'0') {
            let radix = match rest.get(1) {
                Some(b'x') => 16,
                Some(b'o') => 8,
                Some(b'b') => 2,
                _ => 0,
            };
            if radix != 0 {
                let digits_start = i + 2;
                let end = self.digits(digits_start, radix)?;
                if end == digits_start {
                    return Err(self.set_error(start, Some(end), ErrorKind::InvalidValue));
                }
                let digits = self.clean_digits(digits_start, end);
                return match i64::from_str_radix(&digits, radix) {
                    Ok(v) => {
                        self.cursor = end;
                        Ok(Value::Integer(v))
                    }
                    Err(_) => Err(self.set_error(start, Some(end), ErrorKind::IntegerOutOfRange)),
                };
            }
        }

        let int_end = self.digits(i, 10)?;
        if int_end == i {
            return Err(self.set_error(start, None, ErrorKind::InvalidValue));
        }
        if bytes[i] == b'0' && int_end > i + 1 {
            // leading zero
            return Err(self.set_error(start, Some(int_end), ErrorKind::InvalidValue));
        }

        let mut end = int_end;
        let mut is_float = false;
        if bytes.get(end) == Some(&b'.') {
            let frac_start = end + 1;
            let frac_end = self.digits(frac_start, 10)?;
            if frac_end == frac_start {
                return Err(self.set_error(start, Some(frac_start), ErrorKind::InvalidValue));
            }
            end = frac_end;
            is_float = true;
        }
        if let Some(b'e' | b'E') = bytes.get(end) {
            let mut exp_start = end + 1;
            if let Some(b'+' | b'-') = bytes.get(exp_start) {
                exp_start += 1;
            }
            let exp_end = self.digits(exp_start, 10)?;
            if exp_end == exp_start {
                return Err(self.set_error(start, Some(exp_start), ErrorKind::InvalidValue));
            }
            end = exp_end;
            is_float = true;
        }

        let text = self.clean_digits(start, end);
        let value = if is_float {
            match text.parse::<f64>() {
                Ok(f) => Value::Float(f),
                Err(_) => return Err(self.set_error(start, Some(end), ErrorKind::InvalidValue)),
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => Value::Integer(v),
                Err(_) => {
                    return Err(self.set_error(start, Some(end), ErrorKind::IntegerOutOfRange));
                }
            }
        };
        self.cursor = end;
        Ok(value)
    }
}
