//! Deserializer construction and main entry points.
//!
//! This module contains the public API for creating deserializers and deserializing values.
//! These are separated from the implementation details for easy auditing.

use facet_core::Facet;
use facet_loose_node::Element;
use facet_reflect::{HeapValue, Partial};

use super::descriptor::Target;
use super::{Deserializer, MemberPath, Wip, root};
use crate::error::DeserializeError;
use crate::options::DeserializeOptions;
use crate::trace;

impl Deserializer {
    /// Create a deserializer with the given options.
    pub fn new(options: DeserializeOptions) -> Self {
        Self { options }
    }

    /// The options every call uses.
    pub fn options(&self) -> &DeserializeOptions {
        &self.options
    }

    /// Parse `body` and deserialize it into `T`.
    pub fn deserialize_str<T>(&self, body: &str) -> Result<T, DeserializeError>
    where
        T: Facet<'static>,
    {
        let document = facet_loose_node::parse(body)?;
        self.deserialize_element(&document)
    }

    /// Deserialize a parsed document into `T`.
    ///
    /// The configured root element path is resolved first. A `Vec` target
    /// takes the resolved element's children as its items.
    pub fn deserialize_element<T>(&self, document: &Element) -> Result<T, DeserializeError>
    where
        T: Facet<'static>,
    {
        let node = root::resolve(document, self.options.root_element.as_deref())?;
        trace!(root = %node.tag, "resolved root element");

        let wip: Wip = Partial::alloc_owned::<T>()?;
        let shape = wip.shape();
        let target = Target::of(shape).ok_or_else(|| DeserializeError::Unsupported {
            path: node.tag.clone(),
            type_name: shape.to_string(),
        })?;

        let path = MemberPath::root(&node.tag);
        let wip = self.deserialize_node(wip, node, &target, &path)?;
        let heap_value: HeapValue<'static, false> = wip.build()?;
        Ok(heap_value.materialize::<T>()?)
    }
}
