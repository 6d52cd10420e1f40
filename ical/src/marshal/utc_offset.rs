// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::keyword::XML_UTC_OFFSET;
use crate::marshal::util::{cannot_parse, element_text, single_text};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::JCalValue;
use crate::value::{ValueUtcOffset, parse_complete, value_utc_offset};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for TZOFFSETFROM and TZOFFSETTO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcOffsetMarshaller {
    kind: PropertyKind,
}

impl UtcOffsetMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }
}

impl PropertyMarshaller for UtcOffsetMarshaller {
    type Value = ValueUtcOffset;

    fn write_text(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        parse_complete(value_utc_offset(), src)
            .map(Parsed::new)
            .ok_or_else(|| {
                cannot_parse(&self.kind, format!("invalid UTC offset {src:?}"), Vec::new())
            })
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        XmlFragment::new(vec![XmlElement::text(
            XML_UTC_OFFSET,
            value.to_extended_string(),
        )])
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let text = element_text(fragment, XML_UTC_OFFSET)
            .ok_or_else(|| cannot_parse(&self.kind, "missing <utc-offset> element", Vec::new()))?;
        self.parse_text(text)
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        JCalValue::single(value.to_extended_string())
    }

    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value> {
        let text = single_text(value)
            .ok_or_else(|| cannot_parse(&self.kind, "expected a single string", Vec::new()))?;
        self.parse_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_basic_and_extended_forms() {
        let marshaller = UtcOffsetMarshaller::new(PropertyKind::TzOffsetTo);
        let offset = marshaller.parse_text("-0500").unwrap().value;
        assert_eq!(offset.seconds(), -5 * 3600);
        assert_eq!(marshaller.write_text(&offset), "-0500");
        assert_eq!(marshaller.write_json(&offset), JCalValue::single("-05:00"));
        assert_eq!(
            marshaller.parse_xml(&marshaller.write_xml(&offset)).unwrap().value,
            offset
        );
        assert!(marshaller.parse_text("0500").is_err());
    }
}
