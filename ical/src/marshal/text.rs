// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codec for textual values.
//!
//! TEXT is escaped in the text format only; URI, CAL-ADDRESS and values of
//! unknown type are copied verbatim everywhere.

use crate::keyword::{XML_CAL_ADDRESS, XML_TEXT, XML_UNKNOWN, XML_URI};
use crate::marshal::util::{cannot_parse, element_text, single_text};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::{PropertyKind, ValueClass};
use crate::tree::JCalValue;
use crate::value::{escape_text, unescape_text};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for TEXT, URI and CAL-ADDRESS values, and for any property
/// without a dedicated codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMarshaller {
    kind: PropertyKind,
    element: &'static str,
    escaped: bool,
}

impl TextMarshaller {
    /// Create the marshaller for a property kind, picking the xCal element
    /// and escaping from its value class.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        let (element, escaped) = match kind.value_class() {
            ValueClass::Uri => (XML_URI, false),
            ValueClass::CalAddress => (XML_CAL_ADDRESS, false),
            ValueClass::Unknown => (XML_UNKNOWN, false),
            _ => (XML_TEXT, true),
        };
        Self {
            kind,
            element,
            escaped,
        }
    }
}

impl PropertyMarshaller for TextMarshaller {
    type Value = String;

    fn write_text(&self, value: &Self::Value) -> String {
        if self.escaped {
            escape_text(value)
        } else {
            value.clone()
        }
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        if !self.escaped {
            return Ok(Parsed::new(src.to_owned()));
        }
        unescape_text(src)
            .map(Parsed::new)
            .ok_or_else(|| cannot_parse(&self.kind, "invalid escape sequence", Vec::new()))
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        XmlFragment::new(vec![XmlElement::text(self.element, value.clone())])
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        element_text(fragment, self.element)
            .map(|text| Parsed::new(text.to_owned()))
            .ok_or_else(|| {
                cannot_parse(&self.kind, format!("missing <{}> element", self.element), Vec::new())
            })
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        JCalValue::single(value.as_str())
    }

    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value> {
        single_text(value)
            .map(Parsed::new)
            .ok_or_else(|| cannot_parse(&self.kind, "expected a single value", Vec::new()))
    }
}
