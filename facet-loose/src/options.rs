//! Per-call deserialization options.

/// Options controlling one deserialization call.
///
/// Options are read-only during a call and can be shared between threads.
///
/// ```
/// use facet_loose::{Culture, DeserializeOptions};
///
/// let options = DeserializeOptions::new()
///     .root_element("response.calls")
///     .culture(Culture::de_de())
///     .date_format("%d. %B %Y");
/// assert_eq!(options.root_element.as_deref(), Some("response.calls"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeserializeOptions {
    /// Path of the element to start from, segments separated by `.` or `/`.
    ///
    /// Each segment is searched among the descendants of the previous one
    /// (the first segment may name the document root itself).
    pub root_element: Option<String>,

    /// Culture used for numbers and dates.
    pub culture: Culture,

    /// A `chrono` strftime format applied to every date/time member.
    ///
    /// When set, dates that do not match it fail to convert.
    pub date_format: Option<String>,
}

impl DeserializeOptions {
    /// Default options: document root, invariant culture, lenient dates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the element at `path` instead of the document root.
    pub fn root_element(mut self, path: impl Into<String>) -> Self {
        self.root_element = Some(path.into());
        self
    }

    /// Use `culture` for numbers and dates.
    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Parse every date/time member strictly with `format`.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const ENGLISH_ABBREVIATED_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number and date conventions of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Culture {
    name: &'static str,
    decimal_separator: char,
    group_separator: char,
    month_names: [&'static str; 12],
    abbreviated_month_names: [&'static str; 12],
    date_patterns: &'static [&'static str],
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

impl Culture {
    /// Culture-neutral conventions: `.` decimals, month/day/year dates.
    pub const fn invariant() -> Self {
        Self {
            name: "",
            decimal_separator: '.',
            group_separator: ',',
            month_names: ENGLISH_MONTHS,
            abbreviated_month_names: ENGLISH_ABBREVIATED_MONTHS,
            date_patterns: &[
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y %H:%M",
                "%m/%d/%Y",
                "%Y/%m/%d %H:%M:%S",
                "%Y/%m/%d",
                "%d %B %Y %H:%M:%S",
                "%d %B %Y",
                "%B %d, %Y",
            ],
        }
    }

    /// English (United States).
    pub const fn en_us() -> Self {
        Self {
            name: "en-US",
            date_patterns: &[
                "%m/%d/%Y %I:%M:%S %p",
                "%m/%d/%Y %I:%M %p",
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y",
                "%A, %B %d, %Y",
                "%B %d, %Y",
            ],
            ..Self::invariant()
        }
    }

    /// English (United Kingdom).
    pub const fn en_gb() -> Self {
        Self {
            name: "en-GB",
            date_patterns: &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M", "%d/%m/%Y", "%d %B %Y"],
            ..Self::invariant()
        }
    }

    /// German (Germany).
    pub const fn de_de() -> Self {
        Self {
            name: "de-DE",
            decimal_separator: ',',
            group_separator: '.',
            month_names: [
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ],
            abbreviated_month_names: [
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
            ],
            date_patterns: &[
                "%d.%m.%Y %H:%M:%S",
                "%d.%m.%Y %H:%M",
                "%d.%m.%Y",
                "%d. %B %Y",
            ],
        }
    }

    /// French (France).
    pub const fn fr_fr() -> Self {
        Self {
            name: "fr-FR",
            decimal_separator: ',',
            group_separator: '\u{202f}',
            month_names: [
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
            abbreviated_month_names: [
                "janv", "févr", "mars", "avr", "mai", "juin", "juil", "août", "sept", "oct", "nov",
                "déc",
            ],
            date_patterns: &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M", "%d/%m/%Y", "%d %B %Y"],
        }
    }

    /// Look up a preset by its BCP 47 name (case-insensitive, `_` accepted
    /// for `-`). The empty name is the invariant culture.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.replace('_', "-");
        [
            Self::invariant(),
            Self::en_us(),
            Self::en_gb(),
            Self::de_de(),
            Self::fr_fr(),
        ]
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(&name))
    }

    /// The culture's name; empty for the invariant culture.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Character separating the integer and fractional parts.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Character grouping digits in large numbers.
    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    pub(crate) fn date_patterns(&self) -> &'static [&'static str] {
        self.date_patterns
    }

    pub(crate) fn uses_english_months(&self) -> bool {
        self.month_names == ENGLISH_MONTHS
    }

    pub(crate) fn is_group_separator(&self, c: char) -> bool {
        c == self.group_separator || (self.group_separator.is_whitespace() && c.is_whitespace())
    }

    /// Index (0-based) of a localized month name, and whether `word` was the
    /// abbreviated form.
    pub(crate) fn month_index(&self, word: &str) -> Option<(usize, bool)> {
        let word = word.to_lowercase();
        if let Some(idx) = self.month_names.iter().position(|m| m.to_lowercase() == word) {
            return Some((idx, false));
        }
        self.abbreviated_month_names
            .iter()
            .position(|m| m.to_lowercase() == word)
            .map(|idx| (idx, true))
    }
}

pub(crate) fn english_month(index: usize) -> &'static str {
    ENGLISH_MONTHS[index % 12]
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_culture_lookup() {
        assert_eq!(Culture::from_name("de-de"), Some(Culture::de_de()));
        assert_eq!(Culture::from_name("en_GB"), Some(Culture::en_gb()));
        assert_eq!(Culture::from_name(""), Some(Culture::invariant()));
        assert_eq!(Culture::from_name("xx-YY"), None);
    }

    #[test]
    fn test_month_index() {
        let de = Culture::de_de();
        assert_eq!(de.month_index("März"), Some((2, false)));
        assert_eq!(de.month_index("dez"), Some((11, true)));
        assert_eq!(de.month_index("Mai"), Some((4, false)));
        assert_eq!(de.month_index("May"), None);
        assert!(!de.uses_english_months());
        assert!(Culture::en_us().uses_english_months());
    }

    #[test]
    fn test_group_separator_accepts_any_space_for_spacey_cultures() {
        let fr = Culture::fr_fr();
        assert!(fr.is_group_separator(' '));
        assert!(fr.is_group_separator('\u{a0}'));
        assert!(!fr.is_group_separator(','));
        assert!(!Culture::invariant().is_group_separator(' '));
    }
}
