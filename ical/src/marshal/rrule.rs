// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codec for RRULE descriptors.
//!
//! Rule parts are read one item at a time. A malformed part or list item is
//! dropped with one warning; parts with unknown names are kept verbatim.

use crate::keyword::XML_RECUR;
use crate::marshal::util::{cannot_parse, dropped_entry};
use crate::marshal::{Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::{JCalField, JCalScalar, JCalValue};
use crate::value::{RecurrenceItem, RecurrencePart, RecurrencePartName, ValueRecurrenceRule};
use crate::warning::{Warning, WarningKind};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for recurrence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRuleMarshaller {
    kind: PropertyKind,
}

/// Rule under construction with the warnings raised so far.
#[derive(Debug, Default)]
struct RuleBuilder {
    rule: ValueRecurrenceRule,
    warnings: Vec<Warning>,
    attempted: bool,
    survived: bool,
}

impl RecurrenceRuleMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }

    fn drop_part(&self, builder: &mut RuleBuilder, part: String) {
        let warning = WarningKind::InvalidRecurrencePart { part };
        builder.warnings.push(dropped_entry(&self.kind, warning));
    }

    /// Merge the items of one named part.
    fn apply(&self, builder: &mut RuleBuilder, name: &str, items: Vec<String>) {
        builder.attempted = true;

        let Ok(part_name) = name.parse::<RecurrencePartName>() else {
            let name = name.to_uppercase();
            match builder.rule.extensions.iter_mut().find(|(n, _)| *n == name) {
                Some((_, values)) => values.extend(items),
                None => builder.rule.extensions.push((name, items)),
            }
            builder.survived = true;
            return;
        };

        let name = part_name.as_ref();
        if items.is_empty() {
            self.drop_part(builder, format!("{name}="));
        }
        for item in items {
            let applied = RecurrencePart::parse(part_name, &item)
                .is_some_and(|part| builder.rule.apply(part));
            if applied {
                builder.survived = true;
            } else {
                self.drop_part(builder, format!("{name}={item}"));
            }
        }
    }

    fn finish(&self, builder: RuleBuilder) -> ParseResult<ValueRecurrenceRule> {
        if builder.attempted && !builder.survived {
            return Err(cannot_parse(&self.kind, "no valid rule part", builder.warnings));
        }
        Ok(Parsed::with_warnings(builder.rule, builder.warnings))
    }
}

impl PropertyMarshaller for RecurrenceRuleMarshaller {
    type Value = ValueRecurrenceRule;

    fn write_text(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        let mut builder = RuleBuilder::default();
        for segment in src.split(';').filter(|s| !s.is_empty()) {
            let Some((name, value)) = segment.split_once('=') else {
                builder.attempted = true;
                self.drop_part(&mut builder, segment.to_owned());
                continue;
            };

            // Only list parts are split on commas
            let items = match name.parse::<RecurrencePartName>() {
                Ok(part) if !part.is_list() => vec![value.to_owned()],
                _ if value.is_empty() => Vec::new(),
                _ => value.split(',').map(str::to_owned).collect(),
            };
            self.apply(&mut builder, name, items);
        }
        self.finish(builder)
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        if value.is_empty() {
            return XmlFragment::default();
        }

        let children = value
            .to_parts(true)
            .into_iter()
            .flat_map(|(name, items)| {
                let name = name.to_lowercase();
                items
                    .into_iter()
                    .map(move |item| XmlElement::text(name.clone(), item.to_string()))
            })
            .collect();
        XmlFragment::new(vec![XmlElement::parent(XML_RECUR, children)])
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let Some(recur) = fragment.find(XML_RECUR) else {
            return Err(cannot_parse(&self.kind, "missing <recur> element", Vec::new()));
        };

        // Group repeated elements so list parts see all their items at once
        let mut parts: Vec<(&str, Vec<String>)> = Vec::new();
        for child in &recur.children {
            match parts.iter_mut().find(|(n, _)| *n == child.name) {
                Some((_, items)) => items.push(child.text.clone()),
                None => parts.push((child.name.as_str(), vec![child.text.clone()])),
            }
        }

        let mut builder = RuleBuilder::default();
        for (name, items) in parts {
            self.apply(&mut builder, name, items);
        }
        self.finish(builder)
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        if value.is_empty() {
            return JCalValue::default();
        }

        let fields = value
            .to_parts(true)
            .into_iter()
            .map(|(name, items)| {
                let values = items
                    .into_iter()
                    .map(|item| match item {
                        RecurrenceItem::Integer(n) => JCalScalar::Integer(n),
                        RecurrenceItem::Text(s) => JCalScalar::Text(s),
                    })
                    .collect();
                JCalField::named(name.to_lowercase(), values)
            })
            .collect();
        JCalValue::Structured(fields)
    }

    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value> {
        if value.is_empty() {
            return Err(cannot_parse(&self.kind, "empty value", Vec::new()));
        }
        let JCalValue::Structured(fields) = value else {
            return Err(cannot_parse(&self.kind, "expected a structured value", Vec::new()));
        };

        let mut builder = RuleBuilder::default();
        for field in fields {
            let Some(name) = &field.name else {
                builder.attempted = true;
                self.drop_part(&mut builder, "unnamed field".to_owned());
                continue;
            };
            let items = field.values.iter().filter_map(JCalScalar::as_text).collect();
            self.apply(&mut builder, name, items);
        }
        self.finish(builder)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::value::{Frequency, WeekDay, WeekDayNum};
    use crate::warning::codes;

    use super::*;

    fn marshaller() -> RecurrenceRuleMarshaller {
        RecurrenceRuleMarshaller::new(PropertyKind::RRule)
    }

    #[test]
    fn reads_text_parts() {
        let parsed = marshaller()
            .parse_text("FREQ=WEEKLY;BYDAY=MO,XX,FR;COUNT=4;X-NAME=a,b")
            .unwrap();
        let rule = parsed.value;
        assert_eq!(rule.freq, Some(Frequency::Weekly));
        assert_eq!(rule.count, Some(4));
        assert_eq!(
            rule.by_day,
            vec![
                WeekDayNum {
                    day: WeekDay::Monday,
                    occurrence: None
                },
                WeekDayNum {
                    day: WeekDay::Friday,
                    occurrence: None
                },
            ]
        );
        assert_eq!(
            rule.extensions,
            vec![("X-NAME".to_owned(), vec!["a".to_owned(), "b".to_owned()])]
        );
        assert_eq!(codes(&parsed.warnings), vec![34]);
    }

    #[test]
    fn drops_malformed_parts() {
        #[rustfmt::skip]
        let cases = [
            ("FREQ=DAILY;COUNT",          1),
            ("FREQ=DAILY;COUNT=0",        1),
            ("FREQ=DAILY;FREQ=WEEKLY",    1),
            ("FREQ=DAILY;BYHOUR=25,26",   2),
            ("FREQ=DAILY;;",              0),
        ];
        for (src, warnings) in cases {
            let parsed = marshaller().parse_text(src).unwrap();
            assert_eq!(parsed.value.freq, Some(Frequency::Daily), "{src}");
            assert_eq!(parsed.warnings.len(), warnings, "{src}");
        }
    }

    #[test]
    fn handles_empty_input() {
        assert_eq!(
            marshaller().parse_text("").unwrap(),
            Parsed::new(ValueRecurrenceRule::default())
        );
        assert!(marshaller().parse_text("FREQ=NEVER").is_err());
        assert!(marshaller().parse_xml(&XmlFragment::default()).is_err());
        assert!(marshaller().parse_json(&JCalValue::default()).is_err());

        let empty = ValueRecurrenceRule::default();
        assert_eq!(marshaller().write_text(&empty), "");
        assert!(marshaller().write_xml(&empty).is_empty());
        assert!(marshaller().write_json(&empty).is_empty());
    }

    #[test]
    fn writes_xml_and_json() {
        let rule = marshaller()
            .parse_text("FREQ=MONTHLY;UNTIL=20240101T000000Z;BYMONTHDAY=1,-1")
            .unwrap()
            .value;

        let xml = marshaller().write_xml(&rule);
        assert_eq!(
            xml.to_xml_string().unwrap(),
            "<recur><freq>MONTHLY</freq><until>2024-01-01T00:00:00Z</until>\
             <bymonthday>1</bymonthday><bymonthday>-1</bymonthday></recur>"
        );
        assert_eq!(marshaller().parse_xml(&xml).unwrap().value, rule);

        let json = marshaller().write_json(&rule);
        assert_eq!(
            json.to_json_values(),
            vec![json!({
                "freq": "MONTHLY",
                "until": "2024-01-01T00:00:00Z",
                "bymonthday": [1, -1],
            })]
        );
        assert_eq!(marshaller().parse_json(&json).unwrap().value, rule);
    }
}
