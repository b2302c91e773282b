//! Schema-free XML to Facet type mapping.
//!
//! `facet-loose` populates any `#[derive(Facet)]` type from an XML document
//! without a schema and without per-type code. Element and attribute names are
//! matched to members leniently (`FirstName`, `first_name`, `first-name` and
//! `firstname` all bind to a `first_name` field), lists are accepted with or
//! without a wrapping element, and text is coerced into numbers, booleans,
//! dates, GUIDs, URIs, durations and enumerations.
//!
//! # Example
//!
//! ```
//! use facet::Facet;
//!
//! #[derive(Facet, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     nick_names: Vec<String>,
//! }
//!
//! let xml = r#"
//!     <Person Age="36">
//!         <Name>John Sheehan</Name>
//!         <nick-names><nick>Johnny</nick><nick>JS</nick></nick-names>
//!     </Person>
//! "#;
//! let person: Person = facet_loose::from_str(xml).unwrap();
//! assert_eq!(person.name, "John Sheehan");
//! assert_eq!(person.age, 36);
//! assert_eq!(person.nick_names, ["Johnny", "JS"]);
//! ```
//!
//! # Overrides
//!
//! Heuristics can be overridden per member:
//!
//! ```
//! use facet::Facet;
//! use facet_loose as loose;
//!
//! #[derive(Facet, Debug)]
//! struct Note {
//!     #[facet(loose::attribute)]
//!     #[facet(loose::name = "lang")]
//!     language: String,
//!     #[facet(loose::content)]
//!     body: String,
//! }
//!
//! let note: Note = facet_loose::from_str(r#"<note lang="en">Hello</note>"#).unwrap();
//! assert_eq!(note.language, "en");
//! assert_eq!(note.body, "Hello");
//! ```

extern crate self as facet_loose;

mod deserializer;
mod error;
pub mod naming;
mod options;
mod value;

pub use deserializer::Deserializer;
pub use deserializer::descriptor::{BindingKind, MemberDescriptor, TypeDescriptor};
pub use error::{ConversionError, DeserializeError, SchemaConflict};
pub use facet_loose_node::{Content, Element, ParseError};
pub use options::{Culture, DeserializeOptions};
pub use value::{TimeSpan, TimeSpanParseError, Uri, UriParseError};

use facet_core::Facet;

// Generate the member override grammar. This provides:
// - `Attr` enum with the override variants
// - the `loose::*` attribute paths usable inside `#[facet(...)]`
facet::define_attr_grammar! {
    ns "loose";
    crate_path ::facet_loose;

    /// Member override attributes.
    pub enum Attr {
        /// Binds the member to a child element only (no attribute fallback).
        Element,
        /// Binds the member to an attribute of the current element.
        Attribute,
        /// Binds the member to the current element's own text.
        ///
        /// At most one member per type may carry this.
        Content,
        /// Exact name to match, with no case or separator tolerance.
        ///
        /// Usage: `#[facet(loose::name = "node-value")]`
        Name(&'static str),
    }
}

/// Deserialize an XML document into `T` with default options.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed, if a value cannot be
/// converted to its member's type, or if `T` declares conflicting overrides.
pub fn from_str<T>(body: &str) -> Result<T, DeserializeError>
where
    T: Facet<'static>,
{
    from_str_with_options(body, &DeserializeOptions::default())
}

/// Deserialize an XML document into `T` with the given options.
pub fn from_str_with_options<T>(body: &str, options: &DeserializeOptions) -> Result<T, DeserializeError>
where
    T: Facet<'static>,
{
    Deserializer::new(options.clone()).deserialize_str(body)
}

/// Deserialize an already-parsed [`Element`] tree into `T`.
pub fn from_element<T>(root: &Element, options: &DeserializeOptions) -> Result<T, DeserializeError>
where
    T: Facet<'static>,
{
    Deserializer::new(options.clone()).deserialize_element(root)
}

#[cfg(any(test, feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(any(test, feature = "tracing")))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

pub(crate) use trace;
