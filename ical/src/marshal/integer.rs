// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::keyword::XML_INTEGER;
use crate::marshal::util::{cannot_parse, element_text};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::{JCalScalar, JCalValue};
use crate::value::{parse_complete, value_integer};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for INTEGER values such as SEQUENCE and PRIORITY.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerMarshaller {
    kind: PropertyKind,
}

impl IntegerMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }
}

impl PropertyMarshaller for IntegerMarshaller {
    type Value = i32;

    fn write_text(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        parse_complete(value_integer(), src)
            .map(Parsed::new)
            .ok_or_else(|| {
                cannot_parse(&self.kind, format!("invalid integer {src:?}"), Vec::new())
            })
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        XmlFragment::new(vec![XmlElement::text(XML_INTEGER, value.to_string())])
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let text = element_text(fragment, XML_INTEGER)
            .ok_or_else(|| cannot_parse(&self.kind, "missing <integer> element", Vec::new()))?;
        self.parse_text(text)
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        JCalValue::single(i64::from(*value))
    }

    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value> {
        match value {
            JCalValue::Single(JCalScalar::Integer(n)) => i32::try_from(*n)
                .map(Parsed::new)
                .map_err(|_| cannot_parse(&self.kind, format!("{n} out of range"), Vec::new())),
            JCalValue::Single(JCalScalar::Text(s)) => self.parse_text(s),
            _ => Err(cannot_parse(&self.kind, "expected a single integer", Vec::new())),
        }
    }
}
