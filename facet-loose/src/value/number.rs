//! Numbers and booleans under a culture's separators.

use std::borrow::Cow;
use std::str::FromStr;

use crate::options::Culture;

/// Rewrite `text` into the `.`-decimal, ungrouped form Rust's parsers accept.
///
/// Group separators are only accepted in the integer part, between one to
/// three leading digits and following groups of exactly three.
pub(crate) fn normalize<'a>(text: &'a str, culture: &Culture) -> Result<Cow<'a, str>, String> {
    let text = text.trim();
    let decimal = culture.decimal_separator();
    let (integer, fraction) = match text.split_once(decimal) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };
    if fraction.is_some_and(|f| f.chars().any(|c| culture.is_group_separator(c))) {
        return Err("group separator after the decimal separator".to_string());
    }

    let grouped = integer.chars().any(|c| culture.is_group_separator(c));
    if !grouped && (decimal == '.' || fraction.is_none()) {
        return Ok(Cow::Borrowed(text));
    }

    let (sign, digits) = integer.split_at(usize::from(integer.starts_with(['+', '-'])));
    if grouped {
        let mut groups = digits.split(|c: char| culture.is_group_separator(c));
        let leading = groups
            .next()
            .is_some_and(|g| (1..=3).contains(&g.chars().count()));
        if !leading || !groups.all(|g| g.chars().count() == 3) {
            return Err("misplaced group separator".to_string());
        }
    }

    let mut out = String::with_capacity(text.len());
    out.push_str(sign);
    out.extend(digits.chars().filter(|c| !culture.is_group_separator(*c)));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    Ok(Cow::Owned(out))
}

pub(crate) fn parse_number<T>(text: &str, culture: &Culture) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let normalized = normalize(text, culture)?;
    if normalized.is_empty() {
        return Err("empty text".to_string());
    }
    normalized.parse::<T>().map_err(|e| e.to_string())
}

/// `true`/`false` in any case, or a number where nonzero means `true`.
pub(crate) fn parse_bool(text: &str, culture: &Culture) -> Result<bool, String> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    match parse_number::<f64>(trimmed, culture) {
        Ok(n) if !n.is_nan() => Ok(n != 0.0),
        _ => Err("expected true, false or a number".to_string()),
    }
}

pub(crate) fn parse_char(text: &str) -> Result<char, String> {
    fn single(s: &str) -> Option<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
    single(text)
        .or_else(|| single(text.trim()))
        .ok_or_else(|| "expected exactly one character".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_normalize_per_culture() {
        let invariant = Culture::invariant();
        assert_eq!(normalize(" 1,234.5 ", &invariant).as_deref(), Ok("1234.5"));
        assert_eq!(normalize("-12,345,678", &invariant).as_deref(), Ok("-12345678"));
        assert!(matches!(normalize("42", &invariant), Ok(Cow::Borrowed("42"))));

        let de = Culture::de_de();
        assert_eq!(normalize("1.234,5", &de).as_deref(), Ok("1234.5"));

        let fr = Culture::fr_fr();
        assert_eq!(normalize("1\u{202f}234,5", &fr).as_deref(), Ok("1234.5"));
        assert_eq!(normalize("1 234,5", &fr).as_deref(), Ok("1234.5"));
    }

    #[test]
    fn test_normalize_rejects_misplaced_group_separators() {
        let invariant = Culture::invariant();
        for text in ["1,2,3", "1,5", "1234,567", ",5", "1,", "1,234.5,6"] {
            assert!(normalize(text, &invariant).is_err(), "{text}");
        }
        // `.` groups thousands in German, so `1.5` is not one and a half
        assert!(normalize("1.5", &Culture::de_de()).is_err());
    }

    #[test]
    fn test_parse_number() {
        let invariant = Culture::invariant();
        assert_eq!(parse_number::<i32>("-17", &invariant), Ok(-17));
        assert_eq!(parse_number::<u64>("+8", &invariant), Ok(8));
        assert_eq!(parse_number::<f64>("3.25", &invariant), Ok(3.25));
        assert_eq!(parse_number::<f64>("3,25", &Culture::de_de()), Ok(3.25));
        assert!(parse_number::<i32>("3.5", &invariant).is_err());
        assert!(parse_number::<u8>("300", &invariant).is_err());
        assert!(parse_number::<i32>("", &invariant).is_err());
        assert!(parse_number::<i32>("abc", &invariant).is_err());
        assert_eq!(parse_number::<i32>("1,234", &invariant), Ok(1234));
        assert!(parse_number::<i32>("1,5", &invariant).is_err());
        assert!(parse_number::<i64>("1,2,3", &invariant).is_err());
    }

    #[test]
    fn test_parse_bool() {
        let invariant = Culture::invariant();
        assert_eq!(parse_bool("true", &invariant), Ok(true));
        assert_eq!(parse_bool("FALSE", &invariant), Ok(false));
        assert_eq!(parse_bool("1", &invariant), Ok(true));
        assert_eq!(parse_bool("0", &invariant), Ok(false));
        assert_eq!(parse_bool("-2.5", &invariant), Ok(true));
        assert!(parse_bool("yes", &invariant).is_err());
        assert!(parse_bool("", &invariant).is_err());
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(parse_char("x"), Ok('x'));
        assert_eq!(parse_char(" y "), Ok('y'));
        assert_eq!(parse_char(" "), Ok(' '));
        assert!(parse_char("xy").is_err());
        assert!(parse_char("").is_err());
    }
}
