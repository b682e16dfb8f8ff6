//! Minimal owned XML element tree built on top of `quick-xml` events.
//!
//! Purchase-order exports are small, so the whole document is materialized
//! and navigated by tag paths afterwards. Only elements and their direct
//! text are kept; attributes, comments and processing instructions are
//! dropped.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::trace;

use crate::error::ParseError;

/// An element with its direct text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local tag name (namespace prefix stripped).
    pub name: String,
    /// Concatenated direct text and CDATA content, entities resolved.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Direct text, trimmed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// First direct child with the given tag.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant reached by following `path` one child level at a time.
    ///
    /// Every sibling sharing a tag is tried, so a later `A` holding `B` is
    /// found even when the first `A` does not.
    pub fn find_path(&self, path: &[&str]) -> Option<&XmlElement> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };

        self.children
            .iter()
            .filter(|child| child.name == *first)
            .find_map(|child| child.find_path(rest))
    }

    /// `(tag, trimmed text)` pairs of the direct children.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.children
            .iter()
            .map(|c| (c.name.as_str(), c.trimmed_text()))
    }
}

/// Read a complete document and return its root element.
pub fn parse_tree<R: BufRead>(input: R) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ParseError::malformed(reader.error_position() as u64, e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                if root.is_some() {
                    return Err(ParseError::malformed(
                        reader.buffer_position() as u64,
                        "content after the root element",
                    ));
                }
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(XmlElement::new(name));
            }
            Event::Empty(ref e) => {
                if root.is_some() {
                    return Err(ParseError::malformed(
                        reader.buffer_position() as u64,
                        "content after the root element",
                    ));
                }
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                attach(&mut stack, &mut root, XmlElement::new(name));
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(ParseError::malformed(
                        reader.buffer_position() as u64,
                        "unexpected closing tag",
                    ));
                };
                attach(&mut stack, &mut root, element);
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| ParseError::malformed(reader.buffer_position() as u64, err.to_string()))?;
                push_text(&mut stack, &text, reader.buffer_position() as u64)?;
            }
            Event::CData(ref e) => {
                let text = reader
                    .decoder()
                    .decode(e)
                    .map_err(|err| ParseError::malformed(reader.buffer_position() as u64, err.to_string()))?;
                push_text(&mut stack, &text, reader.buffer_position() as u64)?;
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::malformed(
            reader.buffer_position() as u64,
            format!("unclosed element <{}>", open.name),
        ));
    }

    let root = root.ok_or_else(|| {
        ParseError::malformed(reader.buffer_position() as u64, "no root element")
    })?;

    trace!("Parsed XML tree rooted at <{}>", root.name);
    Ok(root)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [XmlElement], text: &str, position: u64) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::malformed(position, "text outside the root element")),
    }
}
