// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests across the three wire formats
//!
//! A value read from text and written to xCal or jCal markup must read back
//! to the same typed value.

use calwire_ical::{
    CodecConfig, JCalValue, Property, PropertyKind, XmlFragment, parse_json, parse_text,
    parse_xml, write_json, write_text, write_xml,
};

fn round_trip(kind: PropertyKind, src: &str) {
    let config = CodecConfig::default();
    let parsed = parse_text(&kind, src, &config).unwrap();
    assert!(parsed.warnings.is_empty(), "{kind}: {src}");
    let property = Property::new(kind.clone(), parsed.value);

    assert_eq!(write_text(&property, &config), src, "{kind}");

    let markup = write_xml(&property, &config).to_xml_string().unwrap();
    let fragment = XmlFragment::from_xml_str(&markup).unwrap();
    let from_xml = parse_xml(&kind, &fragment, &config).unwrap();
    assert_eq!(from_xml.value, property.value, "{kind}: {markup}");

    let document = serde_json::to_string(&write_json(&property, &config).to_json_values()).unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&document).unwrap();
    let tree = JCalValue::from_json_values(&values).unwrap();
    let from_json = parse_json(&kind, &tree, &config).unwrap();
    assert_eq!(from_json.value, property.value, "{kind}: {document}");
}

#[test]
fn round_trips_structured_values() {
    #[rustfmt::skip]
    let cases = [
        (PropertyKind::FreeBusy,     "20130611T124302Z/20130611T144302Z,20130611T124302Z/PT2H"),
        (PropertyKind::Geo,          "37.386013;-122.082932"),
        (PropertyKind::Duration,     "-P1DT2H30M"),
        (PropertyKind::Duration,     "P2W"),
        (PropertyKind::RRule,        "FREQ=WEEKLY;COUNT=10;INTERVAL=2;BYDAY=-1MO,TU;WKST=SU"),
        (PropertyKind::RRule,        "FREQ=YEARLY;UNTIL=20301231T235959Z;BYMONTH=1,7;BYSETPOS=-1"),
    ];
    for (kind, src) in cases {
        round_trip(kind, src);
    }
}

#[test]
fn round_trips_scalar_values() {
    #[rustfmt::skip]
    let cases = [
        (PropertyKind::DtStart,      "20240315T093000Z"),
        (PropertyKind::DtStart,      "20240315T093000"),
        (PropertyKind::Due,          "20240315"),
        (PropertyKind::Sequence,     "42"),
        (PropertyKind::TzOffsetFrom, "-0500"),
        (PropertyKind::TzOffsetTo,   "+053045"),
        (PropertyKind::Summary,      r"Team sync\, weekly\; bring notes"),
        (PropertyKind::Url,          "https://example.com/calendar?id=1,2"),
        (PropertyKind::Attendee,     "mailto:someone@example.com"),
        (PropertyKind::from("X-CUSTOM"), "anything at all"),
    ];
    for (kind, src) in cases {
        round_trip(kind, src);
    }
}
