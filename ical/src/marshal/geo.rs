// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codec for GEO positions.
//!
//! A position is one indivisible value: any unreadable coordinate fails the
//! whole parse.
//!
//! Text and jCal keep a position with one coordinate, but xCal requires both
//! `<latitude>` and `<longitude>` and reads a lone coordinate as
//! [`CannotParse`]. Such a position therefore survives text and jCal but not
//! an xCal round trip.

use crate::config::CodecConfig;
use crate::keyword::{XML_LATITUDE, XML_LONGITUDE};
use crate::marshal::util::{cannot_parse, element_text};
use crate::marshal::{CannotParse, Parsed, ParseResult, PropertyMarshaller};
use crate::property::PropertyKind;
use crate::tree::{JCalField, JCalScalar, JCalValue};
use crate::value::{ValueGeo, format_float, parse_complete, value_float};
use crate::xml::{XmlElement, XmlFragment};

/// Marshaller for latitude/longitude pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoMarshaller {
    kind: PropertyKind,
    fraction_digits: usize,
}

impl GeoMarshaller {
    /// Create the marshaller for a property kind.
    #[must_use]
    pub const fn new(kind: PropertyKind, config: &CodecConfig) -> Self {
        Self {
            kind,
            fraction_digits: config.geo_fraction_digits,
        }
    }

    fn format(&self, value: f64) -> String {
        format_float(value, self.fraction_digits)
    }

    fn round(&self, value: f64) -> f64 {
        lexical::parse(self.format(value)).unwrap_or(value)
    }

    fn number(&self, src: &str) -> Result<f64, CannotParse> {
        parse_complete(value_float(), src).ok_or_else(|| {
            cannot_parse(&self.kind, format!("invalid coordinate {src:?}"), Vec::new())
        })
    }

    /// An empty side is an absent coordinate.
    fn optional_number(&self, src: &str) -> Result<Option<f64>, CannotParse> {
        if src.is_empty() {
            Ok(None)
        } else {
            self.number(src).map(Some)
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn json_coordinate(&self, field: &JCalField) -> Result<Option<f64>, CannotParse> {
        match field.values.as_slice() {
            [JCalScalar::Null] => Ok(None),
            [JCalScalar::Integer(n)] => Ok(Some(*n as f64)),
            [JCalScalar::Float(f)] => Ok(Some(*f)),
            [JCalScalar::Text(s)] => self.optional_number(s),
            _ => Err(cannot_parse(&self.kind, "invalid coordinate", Vec::new())),
        }
    }
}

impl PropertyMarshaller for GeoMarshaller {
    type Value = ValueGeo;

    fn write_text(&self, value: &Self::Value) -> String {
        let side = |v: Option<f64>| v.map(|v| self.format(v)).unwrap_or_default();
        format!("{};{}", side(value.latitude), side(value.longitude))
    }

    fn parse_text(&self, src: &str) -> ParseResult<Self::Value> {
        let Some((latitude, longitude)) = src.split_once(';') else {
            return Err(cannot_parse(&self.kind, "missing ';' separator", Vec::new()));
        };
        Ok(Parsed::new(ValueGeo {
            latitude: self.optional_number(latitude)?,
            longitude: self.optional_number(longitude)?,
        }))
    }

    fn write_xml(&self, value: &Self::Value) -> XmlFragment {
        let mut elements = Vec::with_capacity(2);
        if let Some(latitude) = value.latitude {
            elements.push(XmlElement::text(XML_LATITUDE, self.format(latitude)));
        }
        if let Some(longitude) = value.longitude {
            elements.push(XmlElement::text(XML_LONGITUDE, self.format(longitude)));
        }
        XmlFragment::new(elements)
    }

    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value> {
        let (Some(latitude), Some(longitude)) = (
            element_text(fragment, XML_LATITUDE),
            element_text(fragment, XML_LONGITUDE),
        ) else {
            return Err(cannot_parse(
                &self.kind,
                "latitude and longitude are both required",
                Vec::new(),
            ));
        };
        Ok(Parsed::new(ValueGeo::new(
            self.number(latitude)?,
            self.number(longitude)?,
        )))
    }

    fn write_json(&self, value: &Self::Value) -> JCalValue {
        let side = |v: Option<f64>| JCalField::positional(v.map(|v| self.round(v)));
        JCalValue::Structured(vec![side(value.latitude), side(value.longitude)])
    }

    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value> {
        let JCalValue::Structured(fields) = value else {
            return Err(cannot_parse(&self.kind, "expected a structured value", Vec::new()));
        };
        let [latitude, longitude] = fields.as_slice() else {
            return Err(cannot_parse(&self.kind, "expected two coordinates", Vec::new()));
        };
        Ok(Parsed::new(ValueGeo {
            latitude: self.json_coordinate(latitude)?,
            longitude: self.json_coordinate(longitude)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marshaller() -> GeoMarshaller {
        GeoMarshaller::new(PropertyKind::Geo, &CodecConfig::default())
    }

    #[test]
    fn writes_present_coordinates_only() {
        #[rustfmt::skip]
        let cases = [
            (ValueGeo::new(12.34, 56.78),                                      "12.34;56.78"),
            (ValueGeo { latitude: Some(12.34), longitude: None },              "12.34;"),
            (ValueGeo { latitude: None, longitude: Some(56.78) },              ";56.78"),
            (ValueGeo::default(),                                              ";"),
        ];
        for (geo, text) in cases {
            assert_eq!(marshaller().write_text(&geo), text);
            assert_eq!(marshaller().parse_text(text).unwrap().value, geo);
        }
    }

    #[test]
    fn rounds_to_configured_digits() {
        let config = CodecConfig {
            geo_fraction_digits: 2,
        };
        let marshaller = GeoMarshaller::new(PropertyKind::Geo, &config);
        let geo = ValueGeo::new(12.345_678, -0.001);
        assert_eq!(marshaller.write_text(&geo), "12.35;0");
        assert_eq!(
            marshaller.write_json(&geo),
            JCalValue::Structured(vec![
                JCalField::positional(12.35),
                JCalField::positional(0.0),
            ])
        );
    }

    #[test]
    fn rejects_partial_input() {
        for src in ["invalid;56.78", "12.34;invalid", "12.34", ""] {
            assert!(marshaller().parse_text(src).is_err(), "{src}");
        }
        assert!(marshaller().parse_json(&JCalValue::single("")).is_err());
        assert!(
            marshaller()
                .parse_json(&JCalValue::Structured(vec![JCalField::positional(1.0)]))
                .is_err()
        );
    }

    #[test]
    fn lone_coordinate_survives_json_but_not_xml() {
        let geo = ValueGeo {
            latitude: Some(12.34),
            longitude: None,
        };

        let json = marshaller().write_json(&geo);
        assert_eq!(marshaller().parse_json(&json).unwrap().value, geo);

        let xml = marshaller().write_xml(&geo);
        assert_eq!(xml.elements.len(), 1);
        let err = marshaller().parse_xml(&xml).unwrap_err();
        assert_eq!(err.property, "GEO");
    }
}
