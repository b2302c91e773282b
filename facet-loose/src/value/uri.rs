//! URI references, absolute or relative.

use std::fmt;
use std::str::FromStr;

use facet::Facet;
use url::Url;

// Relative references are validated by resolving them against this.
const PROBE_BASE: &str = "http://relative.invalid/";

/// A URI reference as it appeared in the document.
///
/// Unlike [`url::Url`], which only represents absolute URLs, this also holds
/// relative references such as `/images/logo.png` or `../up`.
///
/// ```
/// use facet_loose::Uri;
///
/// let abs = Uri::parse("http://example.com/a").unwrap();
/// assert!(abs.is_absolute());
///
/// let rel = Uri::parse("/a/b?c=d").unwrap();
/// assert!(!rel.is_absolute());
/// assert_eq!(rel.as_str(), "/a/b?c=d");
/// ```
#[derive(Facet, Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    text: String,
    absolute: bool,
}

impl Uri {
    pub fn parse(text: &str) -> Result<Self, UriParseError> {
        let text = text.trim();
        let absolute = match Url::parse(text) {
            Ok(_) => true,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(PROBE_BASE)
                    .and_then(|base| base.join(text))
                    .map_err(UriParseError)?;
                false
            }
            Err(e) => return Err(UriParseError(e)),
        };
        Ok(Self {
            text: text.to_string(),
            absolute,
        })
    }

    /// The reference as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// The absolute URL, or `None` for a relative reference.
    pub fn to_url(&self) -> Option<Url> {
        if self.absolute {
            Url::parse(&self.text).ok()
        } else {
            None
        }
    }

    /// Resolve this reference against `base`.
    pub fn resolve(&self, base: &Url) -> Result<Url, UriParseError> {
        base.join(&self.text).map_err(UriParseError)
    }
}

impl FromStr for Uri {
    type Err = UriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Text that is not a valid URI reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriParseError(pub url::ParseError);

impl fmt::Display for UriParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI: {}", self.0)
    }
}

impl std::error::Error for UriParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_absolute_and_relative() {
        let uri = Uri::parse(" http://example.com/x ").unwrap();
        assert!(uri.is_absolute());
        assert_eq!(uri.as_str(), "http://example.com/x");
        assert_eq!(uri.to_url().unwrap().host_str(), Some("example.com"));

        let rel = Uri::parse("/photos/1.jpg").unwrap();
        assert!(!rel.is_absolute());
        assert_eq!(rel.to_url(), None);
        let base = Url::parse("https://cdn.example.com/a/").unwrap();
        assert_eq!(
            rel.resolve(&base).unwrap().as_str(),
            "https://cdn.example.com/photos/1.jpg"
        );
    }

    #[test]
    fn test_invalid() {
        assert!(Uri::parse("http://[::1").is_err());
        assert!(Uri::parse("http://exa mple.com").is_err());
    }
}
