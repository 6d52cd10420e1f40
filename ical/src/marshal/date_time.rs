// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codec for DATE and DATE-TIME values.
//!
//! Text uses the basic form, xCal and jCal the extended form. UTC values are
//! written with `Z`; values with an offset are read as UTC.

use crate::keyword::{XML_DATE, XML_DATE_TIME};
use crate::marshal::util::{cannot_parse, single_text};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::JCalValue;
use crate::value::{
    DateOrDateTime, parse_complete, value_date, value_date_or_date_time, value_date_time,
};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for DTSTART, DTEND, DUE and the other date-valued kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeMarshaller {
    kind: PropertyKind,
}

impl DateTimeMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }
}

impl PropertyMarshaller for DateTimeMarshaller {
    type Value = DateOrDateTime;

    fn write_text(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        parse_complete(value_date_or_date_time(), src)
            .map(Parsed::new)
            .ok_or_else(|| {
                cannot_parse(&self.kind, format!("invalid date or date-time {src:?}"), Vec::new())
            })
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        let name = if value.has_time() { XML_DATE_TIME } else { XML_DATE };
        XmlFragment::new(vec![XmlElement::text(name, value.to_extended_string())])
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let value = if let Some(e) = fragment.find(XML_DATE_TIME) {
            parse_complete(value_date_time(), &e.text).map(DateOrDateTime::DateTime)
        } else if let Some(e) = fragment.find(XML_DATE) {
            parse_complete(value_date(), &e.text).map(DateOrDateTime::Date)
        } else {
            return Err(cannot_parse(
                &self.kind,
                "missing <date> or <date-time> element",
                Vec::new(),
            ));
        };
        value
            .map(Parsed::new)
            .ok_or_else(|| cannot_parse(&self.kind, "invalid date or date-time", Vec::new()))
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
