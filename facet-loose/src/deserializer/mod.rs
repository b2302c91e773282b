//! Tree-walking deserializer from [`Element`] nodes into Facet values.

use std::fmt;

use facet_loose_node::Element;
use facet_reflect::Partial;

use crate::error::DeserializeError;
use crate::options::DeserializeOptions;
use crate::trace;
use crate::value;

mod collection;
pub(crate) mod descriptor;
mod entrypoints;
mod root;
mod struct_deser;

use descriptor::Target;

/// The value under construction. Everything built is owned.
pub(crate) type Wip = Partial<'static, false>;

/// Populates Facet values from document trees.
///
/// A deserializer only holds its [`DeserializeOptions`]; it can be shared
/// across threads and used for any number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Deserializer {
    options: DeserializeOptions,
}

impl Deserializer {
    /// Populate `wip` from `node` as a value of `target`.
    fn deserialize_node(
        &self,
        wip: Wip,
        node: &Element,
        target: &Target,
        path: &MemberPath<'_>,
    ) -> Result<Wip, DeserializeError> {
        #[cfg(any(test, feature = "tracing"))]
        {
            use owo_colors::OwoColorize;
            let shape = wip.shape();
            let module_path = shape.module_path.unwrap_or("?");
            let module = module_path.dimmed();
            let name = shape.cyan();
            trace!(into = %format_args!("{module}::{name}"), tag = %node.tag, path = %path);
        }

        match target {
            Target::Scalar(kind) => {
                value::set_scalar(wip, *kind, &node.own_text(), &self.options, path)
            }
            Target::Optional(inner) => {
                if inner.is_text_valued() && node.own_text().trim().is_empty() {
                    return Ok(wip.set_default()?);
                }
                let wip = wip.begin_some()?;
                let wip = self.deserialize_node(wip, node, inner, path)?;
                Ok(wip.end()?)
            }
            Target::Pointer(inner) => {
                let wip = wip.begin_smart_ptr()?;
                let wip = self.deserialize_node(wip, node, inner, path)?;
                Ok(wip.end()?)
            }
            Target::Composite => self.deserialize_struct(wip, node, path),
            Target::Sequence { kind, target, .. } => {
                self.fill_sequence(wip, *kind, node.child_elements(), target, path)
            }
            Target::Skipped => Ok(wip.set_default()?),
        }
    }

    /// Populate `wip` from an attribute value or an element's own text.
    fn deserialize_text(
        &self,
        wip: Wip,
        text: &str,
        target: &Target,
        path: &MemberPath<'_>,
    ) -> Result<Wip, DeserializeError> {
        match target {
            Target::Scalar(kind) => value::set_scalar(wip, *kind, text, &self.options, path),
            Target::Optional(inner) => {
                if text.trim().is_empty() {
                    return Ok(wip.set_default()?);
                }
                let wip = wip.begin_some()?;
                let wip = self.deserialize_text(wip, text, inner, path)?;
                Ok(wip.end()?)
            }
            Target::Pointer(inner) => {
                let wip = wip.begin_smart_ptr()?;
                let wip = self.deserialize_text(wip, text, inner, path)?;
                Ok(wip.end()?)
            }
            _ => Err(DeserializeError::Unsupported {
                path: path.to_string(),
                type_name: wip.shape().to_string(),
            }),
        }
    }

    /// Populate `wip` for a member nothing in the document matched.
    fn deserialize_missing(
        &self,
        wip: Wip,
        target: &Target,
        path: &MemberPath<'_>,
    ) -> Result<Wip, DeserializeError> {
        trace!(path = %path, "no match, using default");
        match target {
            Target::Scalar(kind) => value::set_scalar_default(wip, *kind),
            Target::Optional(_) | Target::Skipped => Ok(wip.set_default()?),
            Target::Pointer(inner) => {
                let wip = wip.begin_smart_ptr()?;
                let wip = self.deserialize_missing(wip, inner, path)?;
                Ok(wip.end()?)
            }
            Target::Sequence { kind, target, .. } => {
                self.fill_sequence(wip, *kind, std::iter::empty(), target, path)
            }
            Target::Composite => self.deserialize_struct(wip, &Element::default(), path),
        }
    }
}

/// Location of a member within the document, for error messages.
///
/// Paths are built on the stack as the deserializer descends.
#[derive(Clone, Copy)]
pub(crate) struct MemberPath<'a> {
    parent: Option<&'a MemberPath<'a>>,
    segment: Segment<'a>,
}

#[derive(Clone, Copy)]
enum Segment<'a> {
    Root(&'a str),
    Member(&'a str),
    Index(usize),
}

impl<'a> MemberPath<'a> {
    pub(crate) fn root(tag: &'a str) -> Self {
        Self {
            parent: None,
            segment: Segment::Root(tag),
        }
    }

    pub(crate) fn member(&'a self, name: &'a str) -> Self {
        Self {
            parent: Some(self),
            segment: Segment::Member(name),
        }
    }

    pub(crate) fn index(&'a self, index: usize) -> Self {
        Self {
            parent: Some(self),
            segment: Segment::Index(index),
        }
    }
}

impl fmt::Display for MemberPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            write!(f, "{parent}")?;
        }
        match self.segment {
            Segment::Root(tag) => write!(f, "{tag}"),
            Segment::Member(name) => write!(f, ".{name}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_member_path_display() {
        let root = MemberPath::root("Person");
        let friends = root.member("friends");
        let second = friends.index(1);
        let name = second.member("name");
        assert_eq!(name.to_string(), "Person.friends[1].name");
    }
}
