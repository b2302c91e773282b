//! Text to typed value conversion.

mod datetime;
mod duration;
mod enums;
mod number;
mod uri;

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use facet_core::{EnumType, Facet, Shape, Type, UserType};
use uuid::Uuid;

use crate::deserializer::Wip;
use crate::error::{ConversionError, DeserializeError};
use crate::options::DeserializeOptions;
use crate::trace;

pub use duration::{TimeSpan, TimeSpanParseError};
pub use uri::{Uri, UriParseError};

use datetime::DateKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
}

/// A type populated directly from text.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ScalarKind {
    String,
    Char,
    Bool,
    Int(IntKind),
    F32,
    F64,
    Date(DateKind),
    Uuid,
    Uri,
    Url,
    TimeSpan,
    Enum(&'static EnumType),
}

impl ScalarKind {
    /// Classify a shape, or `None` if it is not populated from text.
    pub(crate) fn of(shape: &'static Shape) -> Option<Self> {
        let kind = if shape.is_type::<String>() {
            ScalarKind::String
        } else if shape.is_type::<TimeSpan>() {
            ScalarKind::TimeSpan
        } else if shape.is_type::<Uri>() {
            ScalarKind::Uri
        } else if shape.is_type::<url::Url>() {
            ScalarKind::Url
        } else if shape.is_type::<Uuid>() {
            ScalarKind::Uuid
        } else if shape.is_type::<NaiveDateTime>() {
            ScalarKind::Date(DateKind::NaiveDateTime)
        } else if shape.is_type::<NaiveDate>() {
            ScalarKind::Date(DateKind::NaiveDate)
        } else if shape.is_type::<NaiveTime>() {
            ScalarKind::Date(DateKind::NaiveTime)
        } else if shape.is_type::<DateTime<FixedOffset>>() {
            ScalarKind::Date(DateKind::FixedOffset)
        } else if shape.is_type::<DateTime<Utc>>() {
            ScalarKind::Date(DateKind::Utc)
        } else if let Type::User(UserType::Enum(enum_type)) = &shape.ty {
            if !enums::is_unit_only(enum_type) {
                return None;
            }
            ScalarKind::Enum(enum_type)
        } else {
            match shape.type_identifier {
                "bool" => ScalarKind::Bool,
                "char" => ScalarKind::Char,
                "f32" => ScalarKind::F32,
                "f64" => ScalarKind::F64,
                "i8" => ScalarKind::Int(IntKind::I8),
                "i16" => ScalarKind::Int(IntKind::I16),
                "i32" => ScalarKind::Int(IntKind::I32),
                "i64" => ScalarKind::Int(IntKind::I64),
                "i128" => ScalarKind::Int(IntKind::I128),
                "isize" => ScalarKind::Int(IntKind::Isize),
                "u8" => ScalarKind::Int(IntKind::U8),
                "u16" => ScalarKind::Int(IntKind::U16),
                "u32" => ScalarKind::Int(IntKind::U32),
                "u64" => ScalarKind::Int(IntKind::U64),
                "u128" => ScalarKind::Int(IntKind::U128),
                "usize" => ScalarKind::Int(IntKind::Usize),
                _ => return None,
            }
        };
        Some(kind)
    }
}

/// Convert `text` and store it into `wip`.
///
/// `path` names the member for error messages.
pub(crate) fn set_scalar(
    wip: Wip,
    kind: ScalarKind,
    text: &str,
    options: &DeserializeOptions,
    path: &dyn fmt::Display,
) -> Result<Wip, DeserializeError> {
    trace!(?kind, text, "converting scalar");
    let culture = &options.culture;
    let store = Store {
        text,
        path,
        shape: wip.shape(),
    };

    match kind {
        ScalarKind::String => Ok(wip.set(text.to_string())?),
        ScalarKind::Char => store.put(wip, number::parse_char(text)),
        ScalarKind::Bool => store.put(wip, number::parse_bool(text, culture)),
        ScalarKind::F32 => store.put(wip, number::parse_number::<f32>(text, culture)),
        ScalarKind::F64 => store.put(wip, number::parse_number::<f64>(text, culture)),
        ScalarKind::Int(int) => {
            macro_rules! int {
                ($ty:ty) => {
                    store.put(wip, number::parse_number::<$ty>(text, culture))
                };
            }
            match int {
                IntKind::I8 => int!(i8),
                IntKind::I16 => int!(i16),
                IntKind::I32 => int!(i32),
                IntKind::I64 => int!(i64),
                IntKind::I128 => int!(i128),
                IntKind::Isize => int!(isize),
                IntKind::U8 => int!(u8),
                IntKind::U16 => int!(u16),
                IntKind::U32 => int!(u32),
                IntKind::U64 => int!(u64),
                IntKind::U128 => int!(u128),
                IntKind::Usize => int!(usize),
            }
        }
        ScalarKind::Date(date) => match date {
            DateKind::NaiveDateTime => store.put(wip, datetime::parse_naive_date_time(text, options)),
            DateKind::NaiveDate => store.put(wip, datetime::parse_naive_date(text, options)),
            DateKind::NaiveTime => store.put(wip, datetime::parse_naive_time(text, options)),
            DateKind::FixedOffset => store.put(wip, datetime::parse_fixed_offset(text, options)),
            DateKind::Utc => store.put(wip, datetime::parse_utc(text, options)),
        },
        ScalarKind::Uuid => {
            let trimmed = text.trim();
            let parsed = if trimmed.is_empty() {
                Ok(Uuid::nil())
            } else {
                Uuid::parse_str(trimmed).map_err(|e| e.to_string())
            };
            store.put(wip, parsed)
        }
        ScalarKind::Uri => store.put(wip, Uri::parse(text).map_err(|e| e.to_string())),
        ScalarKind::Url => store.put(wip, url::Url::parse(text.trim()).map_err(|e| e.to_string())),
        ScalarKind::TimeSpan => store.put(wip, TimeSpan::parse(text).map_err(|e| e.to_string())),
        ScalarKind::Enum(enum_type) => match enums::variant_index(enum_type, text) {
            Some(idx) => Ok(wip.select_nth_variant(idx)?),
            None => Err(store.failure("no variant with this name or value".to_string())),
        },
    }
}

/// Store the value a member of this kind holds when nothing in the document
/// matched it. URLs have no natural default and become `about:blank`.
pub(crate) fn set_scalar_default(wip: Wip, kind: ScalarKind) -> Result<Wip, DeserializeError> {
    let wip = match kind {
        ScalarKind::Date(DateKind::NaiveDateTime) => wip.set(NaiveDateTime::default())?,
        ScalarKind::Date(DateKind::NaiveDate) => wip.set(NaiveDate::default())?,
        ScalarKind::Date(DateKind::NaiveTime) => wip.set(NaiveTime::default())?,
        ScalarKind::Date(DateKind::FixedOffset) => wip.set(DateTime::<FixedOffset>::default())?,
        ScalarKind::Date(DateKind::Utc) => wip.set(DateTime::<Utc>::default())?,
        ScalarKind::Uuid => wip.set(Uuid::nil())?,
        ScalarKind::Uri => wip.set(Uri::default())?,
        ScalarKind::TimeSpan => wip.set(TimeSpan::ZERO)?,
        ScalarKind::Url => match url::Url::parse("about:blank") {
            Ok(blank) => wip.set(blank)?,
            Err(_) => wip.set_default()?,
        },
        // The first declared variant, as with a zeroed enum.
        ScalarKind::Enum(_) => wip.select_nth_variant(0)?,
        ScalarKind::String
        | ScalarKind::Char
        | ScalarKind::Bool
        | ScalarKind::Int(_)
        | ScalarKind::F32
        | ScalarKind::F64 => wip.set_default()?,
    };
    Ok(wip)
}

struct Store<'a> {
    text: &'a str,
    path: &'a dyn fmt::Display,
    shape: &'static Shape,
}

impl Store<'_> {
    fn put<T>(&self, wip: Wip, parsed: Result<T, String>) -> Result<Wip, DeserializeError>
    where
        T: Facet<'static>,
    {
        match parsed {
            Ok(value) => Ok(wip.set(value)?),
            Err(reason) => Err(self.failure(reason)),
        }
    }

    fn failure(&self, reason: String) -> DeserializeError {
        ConversionError {
            path: self.path.to_string(),
            text: self.text.to_string(),
            expected: self.shape.to_string(),
            reason,
        }
        .into()
    }
}
