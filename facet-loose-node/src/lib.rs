//! Schema-free document nodes.
//!
//! An [`Element`] is a read-only view of one node of a parsed document: its
//! local tag name, its attributes, and its ordered children (child elements
//! interleaved with text). Names of sibling elements are not unique.
//!
//! ```
//! use facet_loose_node::{Element, parse};
//!
//! let root = parse(r#"<person id="7"><name>Ada</name></person>"#).unwrap();
//! assert_eq!(root.tag, "person");
//! assert_eq!(root.get_attr("id"), Some("7"));
//! assert_eq!(root.child_elements().next().map(Element::own_text).as_deref(), Some("Ada"));
//! ```

mod parser;

use std::borrow::Cow;

pub use parser::{ParseError, parse};

/// Content that can appear inside an element - either a child element or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Text content.
    Text(String),
    /// A child element.
    Element(Element),
}

impl Content {
    /// Returns `Some(&str)` if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns `Some(&Element)` if this is an element.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Content::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// A document element with any tag name, attributes, and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// The element's local name (namespace prefix stripped).
    pub tag: String,

    /// Attributes in document order. Names are unique.
    pub attrs: Vec<(String, String)>,

    /// Child content (elements and text) in document order.
    pub children: Vec<Content>,
}

impl Element {
    /// Create a new element with just a tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute, replacing any previous value under the same name.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Add text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Get an attribute value by exact name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over attributes as `(name, value)` pairs in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over child elements (skipping text nodes).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| c.as_element())
    }

    /// Whether this element has at least one child element.
    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Whether this element has no attributes and no children at all.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty() && self.children.is_empty()
    }

    /// The element's own text: its direct text children, concatenated.
    ///
    /// Text nested inside child elements is not included; see
    /// [`Element::text_content`] for that.
    pub fn own_text(&self) -> Cow<'_, str> {
        let mut texts = self.children.iter().filter_map(|c| c.as_text());
        let Some(first) = texts.next() else {
            return Cow::Borrowed("");
        };
        match texts.next() {
            None => Cow::Borrowed(first),
            Some(second) => {
                let mut result = String::with_capacity(first.len() + second.len());
                result.push_str(first);
                result.push_str(second);
                for t in texts {
                    result.push_str(t);
                }
                Cow::Owned(result)
            }
        }
    }

    /// Get the combined text content of the whole subtree.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        for child in &self.children {
            match child {
                Content::Text(t) => result.push_str(t),
                Content::Element(e) => result.push_str(&e.text_content()),
            }
        }
        result
    }

    /// Iterate over this element and all of its descendant elements, in
    /// document (pre-)order.
    pub fn descendants_or_self(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Element::descendants_or_self`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(next.child_elements());
        self.stack[start..].reverse();
        Some(next)
    }
}

impl From<Element> for Content {
    fn from(e: Element) -> Self {
        Content::Element(e)
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}
