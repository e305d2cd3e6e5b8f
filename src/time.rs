//! TOML date and time values, based on RFC 3339.
//!
//! TOML distinguishes four temporal kinds, each represented by its own type:
//! [`OffsetDateTime`], [`LocalDateTime`], [`Date`] (a local date) and
//! [`Time`] (a local time).

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

use std::fmt;

/// A calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    /// Year, `1..=9999` once validated.
    pub year: u16,
    /// Month, `1..=12`.
    pub month: u8,
    /// Day of the month, `1..=31`.
    pub day: u8,
}

/// A wall-clock time.
///
/// Equality and hashing compare the time itself; the number of fraction
/// digits written in the source only affects display.
#[derive(Clone, Copy)]
pub struct Time {
    /// Hour, `0..=23`.
    pub hour: u8,
    /// Minute, `0..=59`.
    pub minute: u8,
    /// Second, `0..=59`.
    pub second: u8,
    /// Fractional seconds in nanoseconds.
    pub nanosecond: u32,
    precision: u8,
}

/// The UTC offset of an [`OffsetDateTime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeOffset {
    /// A suffix which, when applied to a time, denotes a UTC offset of 00:00;
    /// often spoken “Zulu” from the ICAO phonetic alphabet representation of the letter “Z”.
    /// RFC 3339 section 2
    Z,
    /// Offset between local time and UTC
    Custom {
        /// Signed offset in minutes.
        minutes: i16,
    },
}

/// A date and time without an offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    /// The date part.
    pub date: Date,
    /// The time part.
    pub time: Time,
}

/// A date and time with a UTC offset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    /// The date part.
    pub date: Date,
    /// The time part.
    pub time: Time,
    /// The offset from UTC.
    pub offset: TimeOffset,
}

/// Result of scanning a temporal literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Temporal {
    OffsetDateTime(OffsetDateTime),
    LocalDateTime(LocalDateTime),
    Date(Date),
    Time(Time),
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

impl Date {
    /// Returns `true` if the date exists on the proleptic Gregorian calendar,
    /// which starts at year 1.
    pub fn is_valid(&self) -> bool {
        self.year >= 1
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Time {}

impl std::hash::Hash for Time {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Time {
    fn key(&self) -> (u8, u8, u8, u32) {
        (self.hour, self.minute, self.second, self.nanosecond)
    }

    /// Creates a time. `nanosecond` is displayed with as many digits as
    /// needed, up to nine.
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Time {
        let mut precision = 0;
        if nanosecond != 0 {
            precision = 9;
            let mut n = nanosecond;
            while n % 10 == 0 {
                n /= 10;
                precision -= 1;
            }
        }
        Time {
            hour,
            minute,
            second,
            nanosecond,
            precision,
        }
    }

    /// Number of digits of fractional seconds written in the source, capped
    /// at nine. 0 if there was no fraction.
    pub fn subsecond_precision(&self) -> u8 {
        self.precision
    }
}

#[inline]
fn digit(input: &[u8], i: usize) -> Option<u8> {
    match input.get(i) {
        Some(b) if b.is_ascii_digit() => Some(b - b'0'),
        _ => None,
    }
}

#[inline]
fn two_digits(input: &[u8], i: usize) -> Option<u8> {
    Some(digit(input, i)? * 10 + digit(input, i + 1)?)
}

/// `YYYY-MM-DD` with month `01..=12` and day `01..=31`. Calendar validity is
/// checked separately so that it can be reported as its own error.
fn munch_date(input: &[u8]) -> Option<Date> {
    let mut year = 0u16;
    for i in 0..4 {
        year = year * 10 + digit(input, i)? as u16;
    }
    if input.get(4) != Some(&b'-') || input.get(7) != Some(&b'-') {
        return None;
    }
    let month = two_digits(input, 5)?;
    let day = two_digits(input, 8)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(Date { year, month, day })
}

/// `HH:MM:SS(.fraction)?` starting at `i`, returning the time and the index
/// one past its last byte. A dot without following digits is not part of
/// the time.
fn munch_time(input: &[u8], i: usize) -> Option<(Time, usize)> {
    let hour = two_digits(input, i)?;
    let minute = two_digits(input, i + 3)?;
    let second = two_digits(input, i + 6)?;
    if input.get(i + 2) != Some(&b':') || input.get(i + 5) != Some(&b':') {
        return None;
    }
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    let mut end = i + 8;
    let mut nanosecond = 0u32;
    let mut precision = 0u8;
    if input.get(end) == Some(&b'.') && digit(input, end + 1).is_some() {
        end += 1;
        while let Some(d) = digit(input, end) {
            if precision < 9 {
                nanosecond = nanosecond * 10 + d as u32;
                precision += 1;
            }
            end += 1;
        }
        for _ in precision..9 {
            nanosecond *= 10;
        }
    }
    Some((
        Time {
            hour,
            minute,
            second,
            nanosecond,
            precision,
        },
        end,
    ))
}

/// `Z`, `z` or `±HH:MM` starting at `i`.
fn munch_offset(input: &[u8], i: usize) -> Option<(TimeOffset, usize)> {
    match input.get(i)? {
        b'Z' | b'z' => Some((TimeOffset::Z, i + 1)),
        &sign @ (b'+' | b'-') => {
            let hours = two_digits(input, i + 1)?;
            let minutes = two_digits(input, i + 4)?;
            if input.get(i + 3) != Some(&b':') || hours > 23 || minutes > 59 {
                return None;
            }
            let total = hours as i16 * 60 + minutes as i16;
            let minutes = if sign == b'-' { -total } else { total };
            Some((TimeOffset::Custom { minutes }, i + 6))
        }
        _ => None,
    }
}

impl Temporal {
    /// Scans the longest date/time literal at the start of `input`.
    ///
    /// Returns the number of bytes consumed. A date may be followed by a `T`,
    /// `t` or space and a time; the time part (and the offset after it) is
    /// only consumed when it is complete, otherwise the literal ends after
    /// the date (or time) and the remainder is left for the caller.
    pub(crate) fn munch(input: &[u8]) -> Option<(usize, Temporal)> {
        if let Some(date) = munch_date(input) {
            if let Some(b'T' | b't' | b' ') = input.get(10) {
                if let Some((time, end)) = munch_time(input, 11) {
                    if let Some((offset, end)) = munch_offset(input, end) {
                        let value = OffsetDateTime { date, time, offset };
                        return Some((end, Temporal::OffsetDateTime(value)));
                    }
                    return Some((end, Temporal::LocalDateTime(LocalDateTime { date, time })));
                }
            }
            return Some((10, Temporal::Date(date)));
        }
        let (time, end) = munch_time(input, 0)?;
        Some((end, Temporal::Time(time)))
    }

    /// The date component, if any.
    pub(crate) fn date(&self) -> Option<Date> {
        match self {
            Temporal::OffsetDateTime(dt) => Some(dt.date),
            Temporal::LocalDateTime(dt) => Some(dt.date),
            Temporal::Date(date) => Some(*date),
            Temporal::Time(_) => None,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.precision > 0 {
            let mut frac = self.nanosecond;
            for _ in self.precision..9 {
                frac /= 10;
            }
            write!(f, ".{:0width$}", frac, width = self.precision as usize)?;
        }
        Ok(())
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeOffset::Z => f.write_str("Z"),
            TimeOffset::Custom { minutes } => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}{}", self.date, self.time, self.offset)
    }
}

macro_rules! debug_as_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

debug_as_display!(Date, Time, LocalDateTime, OffsetDateTime);
