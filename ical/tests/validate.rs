// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for component validation
//!
//! These tests build component trees the way a caller would, reading values
//! through the text codecs, and check the ordered warning codes.

use calwire_ical::warning::codes;
use calwire_ical::{
    CalendarComponent, CodecConfig, ComponentKind, Property, PropertyKind, PropertyValue,
    parse_text, validate,
};

/// Build a property by reading its text form.
fn prop(kind: PropertyKind, src: &str) -> Property {
    let value = parse_text(&kind, src, &CodecConfig::default()).unwrap().value;
    Property::new(kind, value)
}

/// A journal entry with its required properties.
fn journal() -> CalendarComponent {
    CalendarComponent::from(ComponentKind::Journal)
        .with_property(prop(PropertyKind::Uid, "journal-1"))
        .with_property(prop(PropertyKind::DtStamp, "20000101T000000Z"))
}

#[test]
fn journal_requires_uid_and_dtstamp() {
    let component = CalendarComponent::from(ComponentKind::Journal);
    let warnings = validate(&component);
    assert_eq!(codes(&warnings), vec![2, 2]);
    assert_eq!(
        warnings.iter().map(|w| w.path.join("/")).collect::<Vec<_>>(),
        vec!["VJOURNAL/UID", "VJOURNAL/DTSTAMP"]
    );
}

#[test]
fn journal_flags_each_duplicated_optional_property() {
    let properties = [
        (PropertyKind::Class, "CONFIDENTIAL"),
        (PropertyKind::Created, "20000101T000000Z"),
        (PropertyKind::DtStart, "20000101T000000Z"),
        (PropertyKind::LastModified, "20000101T000000Z"),
        (PropertyKind::Organizer, ""),
        (PropertyKind::RecurrenceId, "20000101T000000Z"),
        (PropertyKind::Sequence, "1"),
        (PropertyKind::Status, "CANCELLED"),
        (PropertyKind::Summary, ""),
        (PropertyKind::Url, ""),
    ];

    let mut component = journal();
    for (kind, src) in properties {
        component.push_property(prop(kind.clone(), src));
        component.push_property(prop(kind, src));
    }

    let warnings = validate(&component);
    assert_eq!(codes(&warnings), vec![3; 10]);
    assert_eq!(
        warnings.first().map(|w| w.message()),
        Some("CLASS must not occur more than once".to_owned())
    );
}

#[test]
fn journal_flags_every_extra_occurrence() {
    let component = journal()
        .with_property(prop(PropertyKind::Uid, "journal-2"))
        .with_property(prop(PropertyKind::Uid, "journal-3"))
        .with_property(prop(PropertyKind::Summary, "a"))
        .with_property(prop(PropertyKind::Summary, "b"))
        .with_property(prop(PropertyKind::Summary, "c"));

    let warnings = validate(&component);
    assert_eq!(codes(&warnings), vec![3, 3, 3, 3]);
    assert_eq!(
        warnings.iter().map(|w| w.path.join("/")).collect::<Vec<_>>(),
        vec![
            "VJOURNAL/UID",
            "VJOURNAL/UID",
            "VJOURNAL/SUMMARY",
            "VJOURNAL/SUMMARY"
        ]
    );
}

#[test]
fn journal_restricts_status() {
    let component = journal().with_property(prop(PropertyKind::Status, "TENTATIVE"));
    let warnings = validate(&component);
    assert_eq!(codes(&warnings), vec![13]);

    let component = journal().with_property(prop(PropertyKind::Status, "final"));
    assert!(validate(&component).is_empty());
}

#[test]
fn journal_requires_matching_date_types() {
    let component = journal()
        .with_property(prop(PropertyKind::DtStart, "20000101"))
        .with_property(prop(PropertyKind::RecurrenceId, "20000101T000000Z"));
    assert_eq!(codes(&validate(&component)), vec![19]);
}

#[test]
fn journal_rejects_time_rules_with_date_start() {
    let rules = [
        "FREQ=DAILY;BYHOUR=1",
        "FREQ=DAILY;BYMINUTE=1",
        "FREQ=DAILY;BYSECOND=1",
    ];
    for rule in rules {
        let component = journal()
            .with_property(prop(PropertyKind::DtStart, "20000101"))
            .with_property(prop(PropertyKind::RRule, rule));
        assert_eq!(codes(&validate(&component)), vec![5], "{rule}");
    }

    let component = journal()
        .with_property(prop(PropertyKind::DtStart, "20000101T000000Z"))
        .with_property(prop(PropertyKind::RRule, "FREQ=DAILY;BYHOUR=1"));
    assert!(validate(&component).is_empty());
}

#[test]
fn journal_rejects_multiple_rules() {
    let component = journal()
        .with_property(prop(PropertyKind::DtStart, "20000101"))
        .with_property(prop(PropertyKind::RRule, "FREQ=DAILY"))
        .with_property(prop(PropertyKind::RRule, "FREQ=DAILY"));
    assert_eq!(codes(&validate(&component)), vec![6]);
}

#[test]
fn validates_whole_calendar_in_traversal_order() {
    let event = CalendarComponent::from(ComponentKind::Event)
        .with_property(prop(PropertyKind::Uid, "event-1"))
        .with_property(prop(PropertyKind::DtStamp, "20240101T000000Z"))
        .with_property(prop(PropertyKind::DtStart, "20240102"))
        .with_property(prop(PropertyKind::DtEnd, "20240101"))
        .with_property(prop(PropertyKind::Geo, ";"))
        .with_property(prop(PropertyKind::RRule, "FREQ=DAILY;COUNT=2;UNTIL=20240110"));

    let alarm = CalendarComponent::from(ComponentKind::Alarm)
        .with_property(prop(PropertyKind::Action, "DISPLAY"))
        .with_property(prop(PropertyKind::Trigger, "-PT15M"))
        .with_property(prop(PropertyKind::Duration, "PT5M"));

    let freebusy = CalendarComponent::from(ComponentKind::FreeBusy)
        .with_property(prop(PropertyKind::Uid, "fb-1"))
        .with_property(prop(PropertyKind::DtStamp, "20240101T000000Z"))
        .with_property(prop(
            PropertyKind::FreeBusy,
            "20240101T100000Z/20240101T090000Z,20240101T100000Z/PT1H",
        ));

    let calendar = CalendarComponent::from(ComponentKind::Calendar)
        .with_property(prop(PropertyKind::ProdId, "-//calwire//tests//EN"))
        .with_property(prop(PropertyKind::Version, "2.0"))
        .with_property(prop(PropertyKind::CalScale, "JULIAN"))
        .with_component(event.with_component(alarm))
        .with_component(freebusy);

    let warnings = validate(&calendar);
    assert_eq!(codes(&warnings), vec![13, 7, 41, 42, 21, 10, 23]);

    let paths: Vec<String> = warnings.iter().map(|w| w.path.join("/")).collect();
    assert_eq!(
        paths,
        vec![
            "VCALENDAR/CALSCALE",
            "VCALENDAR/VEVENT/DTEND",
            "VCALENDAR/VEVENT/GEO",
            "VCALENDAR/VEVENT/GEO",
            "VCALENDAR/VEVENT/RRULE",
            "VCALENDAR/VEVENT/VALARM",
            "VCALENDAR/VFREEBUSY/FREEBUSY",
        ]
    );
}

#[test]
fn validation_does_not_need_known_kinds() {
    let component = CalendarComponent::new("X-VENDOR")
        .with_property(Property::new(
            PropertyKind::FreeBusy,
            PropertyValue::Periods(Vec::new()),
        ))
        .with_property(prop(PropertyKind::RRule, "INTERVAL=2"));
    assert_eq!(codes(&validate(&component)), vec![22, 20]);
    assert!(validate(&CalendarComponent::default()).is_empty());
}
