//! Signed time spans.

use std::fmt;
use std::str::FromStr;

use facet::Facet;

const NANOS_PER_TICK: i64 = 100;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// A signed span of time with nanosecond resolution.
///
/// Parses from two textual forms:
///
/// - the constant form `[-][d.]hh:mm[:ss[.fffffffff]]`, or a bare day count
///   (`"21:30:07"`, `"1.02:00:00"`, `"00:00:00.0468006"`, `"3"`);
/// - an ISO 8601 duration `[-]PnYnMnWnDTnHnMnS` (`"PT21H30M7S"`,
///   `"P1DT0.5S"`), where a year counts as 365 days and a month as 30.
///
/// ```
/// use facet_loose::TimeSpan;
///
/// let a: TimeSpan = "PT21H30M7S".parse().unwrap();
/// let b: TimeSpan = "21:30:07".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "21:30:07");
/// ```
#[derive(Facet, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    nanos: i64,
}

impl TimeSpan {
    /// The empty span.
    pub const ZERO: TimeSpan = TimeSpan { nanos: 0 };

    /// A span of `nanos` nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// A span of `ticks` 100-nanosecond intervals.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self {
            nanos: ticks.saturating_mul(NANOS_PER_TICK),
        }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self {
            nanos: secs.saturating_mul(NANOS_PER_SECOND),
        }
    }

    pub const fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        let secs = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        Self::from_secs(secs)
    }

    pub const fn from_days(days: i64) -> Self {
        Self {
            nanos: days.saturating_mul(NANOS_PER_DAY),
        }
    }

    /// Total length in nanoseconds.
    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Total length in whole 100-nanosecond ticks.
    pub const fn as_ticks(&self) -> i64 {
        self.nanos / NANOS_PER_TICK
    }

    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Parse either textual form.
    pub fn parse(text: &str) -> Result<Self, TimeSpanParseError> {
        let text = text.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if body.is_empty() {
            return Err(TimeSpanParseError::Empty);
        }

        let nanos = match body.strip_prefix('P') {
            Some(iso) => parse_iso(iso)?,
            None => parse_constant(body)?,
        };
        let nanos = i64::try_from(nanos).map_err(|_| TimeSpanParseError::Overflow)?;
        Ok(Self {
            nanos: if negative { -nanos } else { nanos },
        })
    }
}

impl FromStr for TimeSpan {
    type Err = TimeSpanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TimeSpan> for chrono::TimeDelta {
    fn from(span: TimeSpan) -> Self {
        chrono::TimeDelta::nanoseconds(span.nanos)
    }
}

/// Formats in the constant form, `[-][d.]hh:mm:ss[.fffffff]`.
impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos < 0 {
            f.write_str("-")?;
        }
        let total = self.nanos.unsigned_abs();
        let days = total / NANOS_PER_DAY as u64;
        let hours = total % NANOS_PER_DAY as u64 / NANOS_PER_HOUR as u64;
        let minutes = total % NANOS_PER_HOUR as u64 / NANOS_PER_MINUTE as u64;
        let seconds = total % NANOS_PER_MINUTE as u64 / NANOS_PER_SECOND as u64;
        let fraction = total % NANOS_PER_SECOND as u64;

        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if fraction != 0 {
            if fraction % NANOS_PER_TICK as u64 == 0 {
                write!(f, ".{:07}", fraction / NANOS_PER_TICK as u64)?;
            } else {
                write!(f, ".{fraction:09}")?;
            }
        }
        Ok(())
    }
}

/// Why text could not be read as a [`TimeSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpanParseError {
    /// No text, or only a sign.
    Empty,
    /// Not in either accepted form.
    Malformed,
    /// An hour, minute or second component is out of range.
    ComponentOutOfRange,
    /// The span does not fit in 64 bits of nanoseconds.
    Overflow,
}

impl fmt::Display for TimeSpanParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpanParseError::Empty => write!(f, "empty time span"),
            TimeSpanParseError::Malformed => {
                write!(f, "expected [d.]hh:mm[:ss[.f]] or an ISO 8601 duration")
            }
            TimeSpanParseError::ComponentOutOfRange => {
                write!(f, "time span component out of range")
            }
            TimeSpanParseError::Overflow => write!(f, "time span too large"),
        }
    }
}

impl std::error::Error for TimeSpanParseError {}

fn digits(s: &str) -> Result<i128, TimeSpanParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeSpanParseError::Malformed);
    }
    s.parse::<i128>().map_err(|_| TimeSpanParseError::Overflow)
}

/// `value` whole units, as nanoseconds.
fn scaled(value: i128, nanos_per_unit: i64) -> Result<i128, TimeSpanParseError> {
    value
        .checked_mul(i128::from(nanos_per_unit))
        .ok_or(TimeSpanParseError::Overflow)
}

fn sum(parts: &[i128]) -> Result<i128, TimeSpanParseError> {
    parts
        .iter()
        .try_fold(0i128, |total, part| total.checked_add(*part))
        .ok_or(TimeSpanParseError::Overflow)
}

/// Up to nine fractional digits, as nanoseconds.
fn fraction(s: &str) -> Result<i128, TimeSpanParseError> {
    if s.len() > 9 {
        return Err(TimeSpanParseError::Malformed);
    }
    let value = digits(s)?;
    Ok(value * 10i128.pow(9 - s.len() as u32))
}

/// Seconds with an optional fraction, as nanoseconds.
fn seconds(s: &str) -> Result<i128, TimeSpanParseError> {
    match s.split_once(['.', ',']) {
        Some((whole, frac)) => sum(&[scaled(digits(whole)?, NANOS_PER_SECOND)?, fraction(frac)?]),
        None => scaled(digits(s)?, NANOS_PER_SECOND),
    }
}

fn parse_constant(body: &str) -> Result<i128, TimeSpanParseError> {
    let parts: Vec<&str> = body.split(':').collect();
    let (days, hours, minutes, secs) = match parts.as_slice() {
        [days] => return scaled(digits(days)?, NANOS_PER_DAY),
        [first, minutes] => {
            let (days, hours) = day_hours(first)?;
            (days, hours, digits(minutes)?, 0)
        }
        [first, minutes, secs] => {
            let (days, hours) = day_hours(first)?;
            (days, hours, digits(minutes)?, seconds(secs)?)
        }
        [days, hours, minutes, secs] => (digits(days)?, digits(hours)?, digits(minutes)?, seconds(secs)?),
        _ => return Err(TimeSpanParseError::Malformed),
    };

    if hours >= 24 || minutes >= 60 || secs >= 60 * NANOS_PER_SECOND as i128 {
        return Err(TimeSpanParseError::ComponentOutOfRange);
    }
    sum(&[
        scaled(days, NANOS_PER_DAY)?,
        scaled(hours, NANOS_PER_HOUR)?,
        scaled(minutes, NANOS_PER_MINUTE)?,
        secs,
    ])
}

/// `d.hh` or `hh`.
fn day_hours(s: &str) -> Result<(i128, i128), TimeSpanParseError> {
    match s.split_once('.') {
        Some((days, hours)) => Ok((digits(days)?, digits(hours)?)),
        None => Ok((0, digits(s)?)),
    }
}

fn parse_iso(body: &str) -> Result<i128, TimeSpanParseError> {
    const DATE_UNITS: [(char, i64); 4] = [
        ('Y', 365 * NANOS_PER_DAY),
        ('M', 30 * NANOS_PER_DAY),
        ('W', 7 * NANOS_PER_DAY),
        ('D', NANOS_PER_DAY),
    ];
    const TIME_UNITS: [(char, i64); 3] = [
        ('H', NANOS_PER_HOUR),
        ('M', NANOS_PER_MINUTE),
        ('S', NANOS_PER_SECOND),
    ];

    let (date, time) = match body.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return Err(TimeSpanParseError::Malformed);
            }
            (date, Some(time))
        }
        None => (body, None),
    };
    if date.is_empty() && time.is_none() {
        return Err(TimeSpanParseError::Malformed);
    }

    let date = iso_components(date, &DATE_UNITS, false)?;
    let time = match time {
        Some(time) => iso_components(time, &TIME_UNITS, true)?,
        None => 0,
    };
    sum(&[date, time])
}

/// Designators must appear in `units` order, each at most once. Only the
/// last unit of the time part may carry a fraction.
fn iso_components(
    mut s: &str,
    units: &[(char, i64)],
    fractional_seconds: bool,
) -> Result<i128, TimeSpanParseError> {
    let mut total: i128 = 0;
    let mut next_unit = 0;
    while !s.is_empty() {
        let end = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or(TimeSpanParseError::Malformed)?;
        let (number, rest) = s.split_at(end);
        let designator = rest.chars().next().ok_or(TimeSpanParseError::Malformed)?;
        s = &rest[designator.len_utf8()..];

        let offset = units[next_unit..]
            .iter()
            .position(|(unit, _)| *unit == designator)
            .ok_or(TimeSpanParseError::Malformed)?;
        let unit_idx = next_unit + offset;
        let (_, nanos_per_unit) = units[unit_idx];
        next_unit = unit_idx + 1;

        let is_seconds = fractional_seconds && unit_idx == units.len() - 1;
        let nanos = if is_seconds {
            seconds(number)?
        } else {
            scaled(digits(number)?, nanos_per_unit)?
        };
        total = sum(&[total, nanos])?;
    }
    Ok(total)
}
