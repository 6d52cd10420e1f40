// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codec for FREEBUSY period lists.
//!
//! Each entry is read on its own: a malformed entry is dropped with one
//! warning and the remaining entries are kept.

use crate::keyword::{XML_DURATION, XML_END, XML_PERIOD, XML_START};
use crate::marshal::util::{cannot_parse, dropped_entry};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::{JCalScalar, JCalValue};
use crate::value::{
    PeriodEnd, ValuePeriod, parse_complete, value_date_time, value_duration, value_period_end,
};
use crate::warning::{Warning, WarningKind};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for comma-separated PERIOD values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodMarshaller {
    kind: PropertyKind,
}

impl PeriodMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }

    /// Keep the surviving periods, or give up when none survived.
    fn collect(
        &self,
        entries: Vec<Result<ValuePeriod, WarningKind>>,
    ) -> ParseResult<Vec<ValuePeriod>> {
        let mut periods = Vec::with_capacity(entries.len());
        let mut warnings: Vec<Warning> = Vec::new();
        for entry in entries {
            match entry {
                Ok(period) => periods.push(period),
                Err(warning) => warnings.push(dropped_entry(&self.kind, warning)),
            }
        }

        if periods.is_empty() {
            return Err(cannot_parse(&self.kind, "no valid period", warnings));
        }
        Ok(Parsed::with_warnings(periods, warnings))
    }
}

impl PropertyMarshaller for PeriodMarshaller {
    type Value = Vec<ValuePeriod>;

    fn write_text(&self, value: &Self::Value) -> String {
        value
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        if src.is_empty() {
            return Ok(Parsed::new(Vec::new()));
        }
        self.collect(src.split(',').map(parse_entry).collect())
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        let elements = value
            .iter()
            .map(|period| {
                let end = match &period.end {
                    PeriodEnd::DateTime(end) => XmlElement::text(XML_END, end.to_extended_string()),
                    PeriodEnd::Duration(duration) => {
                        XmlElement::text(XML_DURATION, duration.to_string())
                    }
                };
                XmlElement::parent(
                    XML_PERIOD,
                    vec![
                        XmlElement::text(XML_START, period.start.to_extended_string()),
                        end,
                    ],
                )
            })
            .collect();
        XmlFragment::new(elements)
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let entries = fragment
            .elements
            .iter()
            .filter(|e| e.name == XML_PERIOD)
            .map(parse_element)
            .collect();
        self.collect(entries)
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        JCalValue::Multi(
            value
                .iter()
                .map(|period| JCalScalar::Text(period.to_extended_string()))
                .collect(),
        )
    }

    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value> {
        if value.is_empty() {
            return Err(cannot_parse(&self.kind, "empty value", Vec::new()));
        }
        let (JCalValue::Single(_) | JCalValue::Multi(_)) = value else {
            return Err(cannot_parse(&self.kind, "structured value", Vec::new()));
        };

        let entries = value
            .scalars()
            .iter()
            .map(|scalar| match scalar {
                JCalScalar::Text(text) => parse_entry(text),
                other => Err(WarningKind::InvalidPeriodStart {
                    value: other.as_text().unwrap_or_default(),
                }),
            })
            .collect();
        self.collect(entries)
    }
}

/// Read one `start/end` entry; the start is checked first.
fn parse_entry(entry: &str) -> Result<ValuePeriod, WarningKind> {
    let Some((start, end)) = entry.split_once('/') else {
        return Err(WarningKind::MissingPeriodEnd {
            value: entry.to_owned(),
        });
    };

    let start = parse_complete(value_date_time(), start).ok_or_else(|| {
        WarningKind::InvalidPeriodStart {
            value: start.to_owned(),
        }
    })?;

    if end.is_empty() {
        return Err(WarningKind::MissingPeriodEnd {
            value: entry.to_owned(),
        });
    }

    let end = parse_complete(value_period_end(), end).ok_or_else(|| {
        WarningKind::InvalidPeriodEnd {
            value: end.to_owned(),
        }
    })?;
    Ok(ValuePeriod { start, end })
}

/// Read one `<period>` element.
fn parse_element(element: &XmlElement) -> Result<ValuePeriod, WarningKind> {
    let start_text = element.child(XML_START).map(|e| e.text.as_str());
    let start = start_text
        .and_then(|text| parse_complete(value_date_time(), text))
        .ok_or_else(|| WarningKind::InvalidPeriodStart {
            value: start_text.unwrap_or_default().to_owned(),
        })?;

    let end = match (element.child(XML_END), element.child(XML_DURATION)) {
        (Some(_), Some(_)) => return Err(WarningKind::AmbiguousPeriodEnd),
        (None, None) => {
            return Err(WarningKind::MissingPeriodEnd {
                value: start_text.unwrap_or_default().to_owned(),
            });
        }
        (Some(end), None) => parse_complete(value_date_time(), &end.text)
            .map(PeriodEnd::DateTime)
            .ok_or_else(|| WarningKind::InvalidPeriodEnd {
                value: end.text.clone(),
            })?,
        (None, Some(duration)) => parse_complete(value_duration(), &duration.text)
            .map(PeriodEnd::Duration)
            .ok_or_else(|| WarningKind::InvalidPeriodEnd {
                value: duration.text.clone(),
            })?,
    };
    Ok(ValuePeriod { start, end })
}
