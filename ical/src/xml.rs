// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Neutral XML fragments for xCal (RFC 6321) property values.
//!
//! Marshallers read and write [`XmlFragment`]s; turning them into markup
//! and back goes through `quick-xml`. Namespaces and attributes are not
//! modelled: an xCal value is a handful of named elements holding text.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Errors from rendering or reading XML markup.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    /// The markup is not well-formed
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// A closing tag does not match the open element
    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    /// The input ended inside an element
    #[error("unclosed element <{0}>")]
    Unclosed(String),

    /// Character data outside of any element
    #[error("text outside of any element: {0:?}")]
    StrayText(String),

    /// An entity reference that is neither predefined nor a character reference
    #[error("unknown entity &{0};")]
    UnknownEntity(String),
}

fn malformed(err: impl std::fmt::Display) -> XmlError {
    XmlError::Malformed(err.to_string())
}

/// An element with its text and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Local name
    pub name: String,

    /// Character data, trimmed
    pub text: String,

    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// An element holding only text.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// An element holding only child elements.
    #[must_use]
    pub fn parent(name: impl Into<String>, children: Vec<XmlElement>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children,
        }
    }

    /// First child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    fn write_to(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<(), XmlError> {
        if self.text.is_empty() && self.children.is_empty() {
            writer
                .write_event(Event::Empty(BytesStart::new(self.name.as_str())))
                .map_err(malformed)?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(BytesStart::new(self.name.as_str())))
            .map_err(malformed)?;
        if !self.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&self.text)))
                .map_err(malformed)?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(malformed)?;
        Ok(())
    }
}

/// The value elements of one xCal property, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlFragment {
    /// Top-level elements
    pub elements: Vec<XmlElement>,
}

impl XmlFragment {
    /// A fragment with the given top-level elements.
    #[must_use]
    pub const fn new(elements: Vec<XmlElement>) -> Self {
        Self { elements }
    }

    /// Whether the fragment has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// First top-level element with the given local name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Render the fragment as markup, without declaration or root element.
    ///
    /// # Errors
    ///
    /// Returns an error if `quick-xml` rejects an element name.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        for element in &self.elements {
            element.write_to(&mut writer)?;
        }
        String::from_utf8(writer.into_inner().into_inner()).map_err(malformed)
    }

    /// Read a fragment from markup. The input may hold several top-level
    /// elements; an empty input yields an empty fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup is not a well-formed sequence of
    /// elements.
    pub fn from_xml_str(src: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(src);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut elements = Vec::new();

        let mut attach = |stack: &mut Vec<XmlElement>, mut element: XmlElement| {
            element.text = element.text.trim().to_owned();
            match stack.last_mut() {
                Some(parent) => parent.children.push(element),
                None => elements.push(element),
            }
        };

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).map_err(malformed)? {
                Event::Start(e) => {
                    let name = std::str::from_utf8(e.local_name().as_ref())
                        .map_err(malformed)?
                        .to_owned();
                    stack.push(XmlElement::parent(name, Vec::new()));
                }
                Event::Empty(e) => {
                    let name = std::str::from_utf8(e.local_name().as_ref())
                        .map_err(malformed)?
                        .to_owned();
                    attach(&mut stack, XmlElement::parent(name, Vec::new()));
                }
                Event::End(e) => {
                    let name = std::str::from_utf8(e.local_name().as_ref())
                        .map_err(malformed)?
                        .to_owned();
                    match stack.pop() {
                        Some(element) if element.name == name => attach(&mut stack, element),
                        _ => return Err(XmlError::UnexpectedEnd(name)),
                    }
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(e.as_ref()).map_err(malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = reader.decoder().decode(e.as_ref()).map_err(malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::GeneralRef(e) => {
                    let name = reader.decoder().decode(e.as_ref()).map_err(malformed)?;
                    let resolved = match e.resolve_char_ref().map_err(malformed)? {
                        Some(c) => c.to_string(),
                        None => quick_xml::escape::resolve_predefined_entity(&name)
                            .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))?
                            .to_owned(),
                    };
                    push_text(&mut stack, &resolved)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        match stack.pop() {
            Some(open) => Err(XmlError::Unclosed(open.name)),
            None => Ok(Self { elements }),
        }
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(top) => top.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(XmlError::StrayText(text.to_owned())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fragment() {
        let src = "<period><start>2013-06-11T12:43:02Z</start>\n  <duration>PT2H</duration></period><period/>";
        let fragment = XmlFragment::from_xml_str(src).unwrap();
        assert_eq!(fragment.elements.len(), 2);

        let period = fragment.find("period").unwrap();
        assert_eq!(period.child("start").unwrap().text, "2013-06-11T12:43:02Z");
        assert_eq!(period.child("duration").unwrap().text, "PT2H");
        assert!(period.child("end").is_none());
        assert!(fragment.elements.get(1).unwrap().children.is_empty());
    }

    #[test]
    fn reads_entities_and_empty_input() {
        let fragment = XmlFragment::from_xml_str("<text>a &amp; b &#65;</text>").unwrap();
        assert_eq!(fragment.elements.first().unwrap().text, "a & b A");

        assert!(XmlFragment::from_xml_str("").unwrap().is_empty());
        assert!(XmlFragment::from_xml_str("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_markup() {
        let fail_cases = [
            "<start>x</end>",
            "<start>x",
            "stray",
            "<text>&bogus;</text>",
        ];
        for src in fail_cases {
            assert!(XmlFragment::from_xml_str(src).is_err(), "Read {src} should fail");
        }
    }

    #[test]
    fn writes_fragment() {
        let fragment = XmlFragment::new(vec![
            XmlElement::text("latitude", "12.34"),
            XmlElement::parent(
                "recur",
                vec![
                    XmlElement::text("freq", "DAILY"),
                    XmlElement::text("x-note", "a < b"),
                ],
            ),
            XmlElement::parent("period", Vec::new()),
        ]);
        let xml = fragment.to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<latitude>12.34</latitude><recur><freq>DAILY</freq><x-note>a &lt; b</x-note></recur><period/>"
        );
        assert_eq!(XmlFragment::from_xml_str(&xml).unwrap(), fragment);
        assert_eq!(XmlFragment::default().to_xml_string().unwrap(), "");
    }
}
