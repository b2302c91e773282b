//! Date and time parsing.
//!
//! Without a custom format the text is tried as RFC 3339, ISO 8601 local
//! forms, RFC 2822 and finally the culture's general patterns. With a custom
//! format only that format is accepted.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::options::{Culture, DeserializeOptions, english_month};

/// The chrono type a member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateKind {
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
    FixedOffset,
    Utc,
}

/// Whatever the text turned out to contain.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Parsed {
    Offset(DateTime<FixedOffset>),
    Local(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
}

const ISO_OFFSET_PATTERNS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const ISO_LOCAL_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_PATTERNS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

pub(crate) fn parse_naive_date_time(
    text: &str,
    options: &DeserializeOptions,
) -> Result<NaiveDateTime, String> {
    match parse(text, options)? {
        Parsed::Offset(dt) => Ok(dt.naive_local()),
        Parsed::Local(dt) => Ok(dt),
        Parsed::Date(d) => Ok(d.and_time(NaiveTime::MIN)),
        Parsed::Time(_) => Err("time of day without a date".to_string()),
    }
}

pub(crate) fn parse_naive_date(text: &str, options: &DeserializeOptions) -> Result<NaiveDate, String> {
    match parse(text, options)? {
        Parsed::Offset(dt) => Ok(dt.date_naive()),
        Parsed::Local(dt) => Ok(dt.date()),
        Parsed::Date(d) => Ok(d),
        Parsed::Time(_) => Err("time of day without a date".to_string()),
    }
}

pub(crate) fn parse_naive_time(text: &str, options: &DeserializeOptions) -> Result<NaiveTime, String> {
    match parse(text, options)? {
        Parsed::Offset(dt) => Ok(dt.time()),
        Parsed::Local(dt) => Ok(dt.time()),
        Parsed::Time(t) => Ok(t),
        Parsed::Date(_) => Err("date without a time of day".to_string()),
    }
}

/// A missing offset is taken as UTC.
pub(crate) fn parse_fixed_offset(
    text: &str,
    options: &DeserializeOptions,
) -> Result<DateTime<FixedOffset>, String> {
    match parse(text, options)? {
        Parsed::Offset(dt) => Ok(dt),
        Parsed::Local(dt) => Ok(dt.and_utc().fixed_offset()),
        Parsed::Date(d) => Ok(d.and_time(NaiveTime::MIN).and_utc().fixed_offset()),
        Parsed::Time(_) => Err("time of day without a date".to_string()),
    }
}

pub(crate) fn parse_utc(text: &str, options: &DeserializeOptions) -> Result<DateTime<Utc>, String> {
    parse_fixed_offset(text, options).map(|dt| dt.with_timezone(&Utc))
}

fn parse(text: &str, options: &DeserializeOptions) -> Result<Parsed, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("empty text".to_string());
    }
    match &options.date_format {
        Some(format) => parse_with_format(text, format, &options.culture),
        None => parse_lenient(text, &options.culture),
    }
}

fn parse_with_format(text: &str, format: &str, culture: &Culture) -> Result<Parsed, String> {
    let text = to_english_months(text, culture);
    let text = text.as_ref();

    if let Ok(dt) = DateTime::parse_from_str(text, format) {
        return Ok(Parsed::Offset(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
        return Ok(Parsed::Local(dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, format) {
        return Ok(Parsed::Date(d));
    }
    NaiveTime::parse_from_str(text, format)
        .map(Parsed::Time)
        .map_err(|e| format!("does not match format {format:?}: {e}"))
}

fn parse_lenient(text: &str, culture: &Culture) -> Result<Parsed, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Parsed::Offset(dt));
    }
    for pattern in ISO_OFFSET_PATTERNS {
        if let Ok(dt) = DateTime::parse_from_str(text, pattern) {
            return Ok(Parsed::Offset(dt));
        }
    }
    for pattern in ISO_LOCAL_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(Parsed::Local(dt));
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Parsed::Date(d));
    }
    for pattern in TIME_PATTERNS {
        if let Ok(t) = NaiveTime::parse_from_str(text, pattern) {
            return Ok(Parsed::Time(t));
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(Parsed::Offset(dt));
    }

    let localized = to_english_months(text, culture);
    for pattern in culture.date_patterns() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&localized, pattern) {
            return Ok(Parsed::Local(dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(&localized, pattern) {
            return Ok(Parsed::Date(d));
        }
    }

    Err("unrecognized date/time".to_string())
}

/// Replace a culture's month names with the English names chrono understands.
///
/// A `.` following an abbreviated month name is dropped along with it.
fn to_english_months<'a>(text: &'a str, culture: &Culture) -> Cow<'a, str> {
    if culture.uses_english_months() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;
    while let Some(start) = rest.find(char::is_alphabetic) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let end = rest
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(rest.len());
        let word = &rest[..end];
        rest = &rest[end..];

        match culture.month_index(word) {
            Some((idx, abbreviated)) => {
                out.push_str(english_month(idx));
                if abbreviated {
                    rest = rest.strip_prefix('.').unwrap_or(rest);
                }
            }
            None => out.push_str(word),
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
