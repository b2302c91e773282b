//! Builds an [`Element`] tree from an XML body with `quick-xml`.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};

use crate::{Content, Element};

/// Error produced while parsing a document body into an [`Element`] tree.
#[derive(Debug)]
pub enum ParseError {
    /// The reader rejected the input (malformed markup, mismatched tags, bad escapes).
    Xml {
        position: u64,
        source: quick_xml::Error,
    },
    /// An attribute was malformed or duplicated.
    Attribute { position: u64, source: AttrError },
    /// A name or CDATA section was not valid UTF-8.
    Utf8 {
        position: u64,
        source: std::str::Utf8Error,
    },
    /// The body contained no element at all.
    NoRootElement,
    /// A second top-level element followed the root.
    MultipleRootElements { position: u64 },
    /// An end tag appeared with no open element.
    UnexpectedEndTag { position: u64 },
    /// The body ended while an element was still open.
    UnclosedElement { tag: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Xml { position, source } => {
                write!(f, "malformed XML at byte {position}: {source}")
            }
            ParseError::Attribute { position, source } => {
                write!(f, "malformed attribute at byte {position}: {source}")
            }
            ParseError::Utf8 { position, source } => {
                write!(f, "invalid UTF-8 at byte {position}: {source}")
            }
            ParseError::NoRootElement => write!(f, "document has no root element"),
            ParseError::MultipleRootElements { position } => {
                write!(f, "second root element at byte {position}")
            }
            ParseError::UnexpectedEndTag { position } => {
                write!(f, "end tag without matching start tag at byte {position}")
            }
            ParseError::UnclosedElement { tag } => {
                write!(f, "element <{tag}> is never closed")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Xml { source, .. } => Some(source),
            ParseError::Attribute { source, .. } => Some(source),
            ParseError::Utf8 { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse a document body into its root [`Element`].
///
/// Declarations, comments, processing instructions and doctypes are skipped.
/// CDATA sections become text. Whitespace-only text between elements is
/// dropped; other text is kept verbatim. Namespace prefixes are stripped from
/// element and attribute names, and `xmlns` declarations are not kept as
/// attributes.
pub fn parse(body: &str) -> Result<Element, ParseError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    let mut reader = Reader::from_str(body);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|source| ParseError::Xml { position, source })?;

        match event {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::MultipleRootElements { position });
                }
                stack.push(start_element(&e, position)?);
            }
            Event::Empty(e) => {
                let element = start_element(&e, position)?;
                close_element(&mut stack, &mut root, element, position)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or(ParseError::UnexpectedEndTag { position })?;
                close_element(&mut stack, &mut root, element, position)?;
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|source| ParseError::Xml { position, source })?;
                push_text(&mut stack, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|source| ParseError::Utf8 { position, source })?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Content::Text(text.to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement { tag: open.tag });
    }
    root.ok_or(ParseError::NoRootElement)
}

fn start_element(e: &BytesStart<'_>, position: u64) -> Result<Element, ParseError> {
    let local = e.local_name();
    let tag = std::str::from_utf8(local.as_ref())
        .map_err(|source| ParseError::Utf8 { position, source })?;
    let mut element = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|source| ParseError::Attribute { position, source })?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = attr.key.local_name();
        let name = std::str::from_utf8(key.as_ref())
            .map_err(|source| ParseError::Utf8 { position, source })?;
        let value = attr
            .unescape_value()
            .map_err(|source| ParseError::Xml { position, source })?;
        // Prefixed duplicates (`a:id`, `b:id`) collapse onto the first one.
        if element.get_attr(name).is_none() {
            element.attrs.push((name.to_string(), value.into_owned()));
        }
    }

    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: u64,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Content::Element(element)),
        None if root.is_some() => return Err(ParseError::MultipleRootElements { position }),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Content::Text(text.to_string()));
    }
}
