// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::keyword::XML_DURATION;
use crate::marshal::util::{cannot_parse, element_text, single_text};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::JCalValue;
use crate::value::{ValueDuration, parse_complete, value_duration};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for DURATION values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationMarshaller {
    kind: PropertyKind,
}

impl DurationMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }
}

impl PropertyMarshaller for DurationMarshaller {
    type Value = ValueDuration;

    fn write_text(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        parse_complete(value_duration(), src)
            .map(Parsed::new)
            .ok_or_else(|| {
                cannot_parse(&self.kind, format!("invalid duration {src:?}"), Vec::new())
            })
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        XmlFragment::new(vec![XmlElement::text(XML_DURATION, value.to_string())])
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let text = element_text(fragment, XML_DURATION)
            .ok_or_else(|| cannot_parse(&self.kind, "missing <duration> element", Vec::new()))?;
        self.parse_text(text)
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        JCalValue::single(value.to_string())
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
    fn reads_all_formats() {
        let marshaller = DurationMarshaller::new(PropertyKind::Duration);
        let expected = ValueDuration::time(1, 30, 0);

        assert_eq!(marshaller.parse_text("PT1H30M").unwrap().value, expected);
        assert_eq!(marshaller.write_text(&expected), "PT1H30M");

        let xml = marshaller.write_xml(&expected);
        assert_eq!(xml.to_xml_string().unwrap(), "<duration>PT1H30M</duration>");
        assert_eq!(marshaller.parse_xml(&xml).unwrap().value, expected);

        let json = marshaller.write_json(&expected);
        assert_eq!(marshaller.parse_json(&json).unwrap().value, expected);
    }

    #[test]
    fn fails_as_a_whole() {
        let marshaller = DurationMarshaller::new(PropertyKind::Duration);
        assert!(marshaller.parse_text("").is_err());
        assert!(marshaller.parse_text("PT1H30").is_err());
        assert!(marshaller.parse_xml(&XmlFragment::default()).is_err());
        assert!(marshaller.parse_json(&JCalValue::default()).is_err());
    }
}
