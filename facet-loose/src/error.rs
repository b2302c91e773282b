//! Errors returned by deserialization.

use std::fmt;

use facet_loose_node::ParseError;
use facet_reflect::ReflectError;

/// Error returned when a document cannot be mapped onto a type.
///
/// A member with no matching node is not an error; it keeps its default value.
#[derive(Debug)]
pub enum DeserializeError {
    /// The body is not a well-formed document.
    Parse(ParseError),

    /// A segment of the configured root element path was not found.
    RootNotFound {
        /// The full configured path.
        path: String,
    },

    /// Text could not be converted to the member's type.
    Conversion(Box<ConversionError>),

    /// The target type declares overrides that contradict each other.
    SchemaConflict(SchemaConflict),

    /// The target type contains a member type this engine cannot populate.
    Unsupported {
        /// Where the type was encountered.
        path: String,
        /// The unsupported type.
        type_name: String,
    },

    /// Building the value through reflection failed.
    Reflect(ReflectError),
}

impl fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeserializeError::Parse(e) => write!(f, "parse error: {e}"),
            DeserializeError::RootNotFound { path } => {
                write!(f, "root element path `{path}` not found in document")
            }
            DeserializeError::Conversion(e) => write!(f, "{e}"),
            DeserializeError::SchemaConflict(e) => write!(f, "{e}"),
            DeserializeError::Unsupported { path, type_name } => {
                write!(f, "unsupported type {type_name} at {path}")
            }
            DeserializeError::Reflect(e) => write!(f, "reflection error: {e}"),
        }
    }
}

impl std::error::Error for DeserializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeserializeError::Parse(e) => Some(e),
            DeserializeError::Conversion(e) => Some(e.as_ref()),
            DeserializeError::SchemaConflict(e) => Some(e),
            DeserializeError::Reflect(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for DeserializeError {
    fn from(e: ParseError) -> Self {
        DeserializeError::Parse(e)
    }
}

impl From<ReflectError> for DeserializeError {
    fn from(e: ReflectError) -> Self {
        DeserializeError::Reflect(e)
    }
}

impl From<ConversionError> for DeserializeError {
    fn from(e: ConversionError) -> Self {
        DeserializeError::Conversion(Box::new(e))
    }
}

impl From<SchemaConflict> for DeserializeError {
    fn from(e: SchemaConflict) -> Self {
        DeserializeError::SchemaConflict(e)
    }
}

/// Text that could not be converted to a member's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Dotted path of the member, starting at the root element.
    pub path: String,
    /// The raw text that failed to convert.
    pub text: String,
    /// The expected target type.
    pub expected: String,
    /// Why conversion failed.
    pub reason: String,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert {:?} at {} to {}: {}",
            self.text, self.path, self.expected, self.reason
        )
    }
}

impl std::error::Error for ConversionError {}

/// Overrides on a type that cannot all be honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConflict {
    /// The type carrying the conflicting overrides.
    pub type_name: String,
    /// The members involved.
    pub members: Vec<&'static str>,
    /// What is wrong.
    pub reason: &'static str,
}

impl fmt::Display for SchemaConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schema conflict in {}: {} ({})",
            self.type_name,
            self.reason,
            self.members.join(", ")
        )
    }
}

impl std::error::Error for SchemaConflict {}
