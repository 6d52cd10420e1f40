// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Validation of component trees.
//!
//! The walk visits a component, then its own properties in insertion order,
//! then its children in order. Component rules come from the profile of the
//! component kind; kinds without a profile only get property checks. The
//! tree is never modified and validation never fails.

mod profile;

use std::cmp::Ordering;

use crate::component::{Component, ComponentKind};
use crate::property::{Property, PropertyKind, PropertyValue};
use crate::value::{DateOrDateTime, ValueGeo, ValuePeriod, ValueRecurrenceRule};
use crate::warning::{Warning, WarningKind};

use self::profile::{Profile, profile};

/// Validate a component tree, returning warnings in traversal order.
#[must_use]
pub fn validate<C: Component>(root: &C) -> Vec<Warning> {
    let mut validator = Validator::default();
    validator.visit(root);
    tracing::debug!(count = validator.warnings.len(), "validation finished");
    validator.warnings
}

#[derive(Debug, Default)]
struct Validator {
    path: Vec<String>,
    warnings: Vec<Warning>,
}

impl Validator {
    fn visit<C: Component>(&mut self, component: &C) {
        self.path.push(component.kind().to_owned());
        tracing::trace!(path = %self.path.join("/"), "validating component");

        let properties = component.properties();
        if let Ok(kind) = component.kind().parse::<ComponentKind>() {
            let children: Vec<&str> = component.components().iter().map(C::kind).collect();
            self.check_component(profile(kind), properties, &children);
        }

        for property in properties {
            self.check_property(property);
        }

        for child in component.components() {
            self.visit(child);
        }
        self.path.pop();
    }

    fn warn(&mut self, kind: WarningKind, property: Option<&PropertyKind>) {
        let mut path = self.path.clone();
        if let Some(property) = property {
            path.push(property.name().to_owned());
        }
        self.warnings.push(Warning::new(kind, path));
    }

    fn check_component(&mut self, profile: &Profile, properties: &[Property], children: &[&str]) {
        let count = |kind: &PropertyKind| properties.iter().filter(|p| &p.kind == kind).count();
        let date = |kind: &PropertyKind| {
            properties
                .iter()
                .find(|p| &p.kind == kind)
                .and_then(|p| p.value.as_date_time())
        };

        // One warning per occurrence beyond the first.
        for kind in profile.required {
            let n = count(kind);
            if n == 0 {
                self.warn(missing(kind), Some(kind));
            }
            for _ in 1..n {
                self.warn(duplicate(kind), Some(kind));
            }
        }

        for kind in profile.optional {
            for _ in 1..count(kind) {
                self.warn(duplicate(kind), Some(kind));
            }
        }

        for (kind, allowed) in profile.restricted {
            for property in properties.iter().filter(|p| &p.kind == kind) {
                let Some(value) = property.value.as_text() else {
                    continue;
                };
                if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
                    let warning = WarningKind::InvalidValue {
                        property: kind.name().to_owned(),
                        value: value.to_owned(),
                        allowed: allowed.join(", "),
                    };
                    self.warn(warning, Some(kind));
                }
            }
        }

        for (first, second) in profile.same_date_type {
            if let (Some(a), Some(b)) = (date(first), date(second)) {
                if a.has_time() != b.has_time() {
                    let warning = WarningKind::MismatchedDateTypes {
                        first: first.name().to_owned(),
                        second: second.name().to_owned(),
                    };
                    self.warn(warning, Some(second));
                }
            }
        }

        for (start, end) in profile.chronological {
            if let (Some(a), Some(b)) = (date(start), date(end)) {
                if ends_before(a, b) {
                    let warning = WarningKind::EndBeforeStart {
                        start: start.name().to_owned(),
                        end: end.name().to_owned(),
                    };
                    self.warn(warning, Some(end));
                }
            }
        }

        for (first, second) in profile.exclusive {
            if count(first) > 0 && count(second) > 0 {
                let warning = WarningKind::MutuallyExclusive {
                    first: first.name().to_owned(),
                    second: second.name().to_owned(),
                };
                self.warn(warning, None);
            }
        }

        for (property, required) in profile.dependent {
            if count(property) > 0 && count(required) == 0 {
                let warning = WarningKind::DependentPropertyMissing {
                    property: property.name().to_owned(),
                    required: required.name().to_owned(),
                };
                self.warn(warning, Some(property));
            }
        }

        for (first, second) in profile.together {
            if (count(first) > 0) != (count(second) > 0) {
                let warning = WarningKind::PropertiesMustAppearTogether {
                    first: first.name().to_owned(),
                    second: second.name().to_owned(),
                };
                self.warn(warning, None);
            }
        }

        if profile.recurrence {
            let date_only_start = date(&PropertyKind::DtStart).is_some_and(|d| !d.has_time());
            self.check_recurrence(properties, date_only_start);
        }

        for alternatives in profile.subcomponents {
            let present = children.iter().any(|child| {
                alternatives
                    .iter()
                    .any(|kind| kind.name().eq_ignore_ascii_case(child))
            });
            if !present {
                let names: Vec<&str> = alternatives.iter().map(|kind| kind.name()).collect();
                let warning = WarningKind::MissingComponent {
                    component: names.join(" or "),
                };
                self.warn(warning, None);
            }
        }
    }

    /// One warning per RRULE restricting the time of day of a date-only
    /// start, then one for any RRULE beyond the first.
    fn check_recurrence(&mut self, properties: &[Property], date_only_start: bool) {
        let kind = PropertyKind::RRule;
        let rules: Vec<&Property> = properties.iter().filter(|p| p.kind == kind).collect();

        if date_only_start {
            for rule in &rules {
                if let PropertyValue::Recurrence(rule) = &rule.value {
                    if rule.has_time_restriction() {
                        self.warn(WarningKind::RecurrenceTimeWithDateStart, Some(&kind));
                    }
                }
            }
        }

        if rules.len() > 1 {
            self.warn(WarningKind::MultipleRecurrenceRules, Some(&kind));
        }
    }

    fn check_property(&mut self, property: &Property) {
        let kind = &property.kind;
        match &property.value {
            PropertyValue::Recurrence(rule) => {
                for warning in recurrence_warnings(rule) {
                    self.warn(warning, Some(kind));
                }
            }
            PropertyValue::Geo(geo) => {
                for warning in geo_warnings(geo) {
                    self.warn(warning, Some(kind));
                }
            }
            PropertyValue::Periods(periods) => {
                for warning in period_warnings(periods) {
                    self.warn(warning, Some(kind));
                }
            }
            _ => {}
        }
    }
}

fn missing(kind: &PropertyKind) -> WarningKind {
    WarningKind::MissingProperty {
        property: kind.name().to_owned(),
    }
}

fn duplicate(kind: &PropertyKind) -> WarningKind {
    WarningKind::DuplicateProperty {
        property: kind.name().to_owned(),
    }
}

/// Values of different shapes or zone tags are not compared.
fn ends_before(start: &DateOrDateTime, end: &DateOrDateTime) -> bool {
    end.compare(start) == Some(Ordering::Less)
}

fn recurrence_warnings(rule: &ValueRecurrenceRule) -> Vec<WarningKind> {
    let mut warnings = Vec::new();
    if rule.freq.is_none() {
        warnings.push(WarningKind::RecurrenceMissingFrequency);
    }
    if rule.count.is_some() && rule.until.is_some() {
        warnings.push(WarningKind::RecurrenceCountAndUntil);
    }
    warnings
}

fn geo_warnings(geo: &ValueGeo) -> Vec<WarningKind> {
    let mut warnings = Vec::new();
    if geo.latitude.is_none() {
        warnings.push(WarningKind::GeoMissingLatitude);
    }
    if geo.longitude.is_none() {
        warnings.push(WarningKind::GeoMissingLongitude);
    }
    warnings
}

fn period_warnings(periods: &[ValuePeriod]) -> Vec<WarningKind> {
    if periods.is_empty() {
        return vec![WarningKind::EmptyPeriodList];
    }
    periods
        .iter()
        .filter(|period| {
            period
                .end_instant()
                .is_some_and(|end| end.compare(&period.start) == Some(Ordering::Less))
        })
        .map(|period| WarningKind::PeriodEndsBeforeStart {
            period: period.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::component::CalendarComponent;
    use crate::value::{ValueDate, ValueDateTime, ValueDuration, ValueTime};
    use crate::warning::codes;

    use super::*;

    fn date_time(day: i8, hour: u8) -> DateOrDateTime {
        DateOrDateTime::DateTime(ValueDateTime::utc(
            ValueDate {
                year: 2024,
                month: 1,
                day,
            },
            ValueTime::new(hour, 0, 0),
        ))
    }

    fn event() -> CalendarComponent {
        CalendarComponent::from(ComponentKind::Event)
            .with_property(Property::text(PropertyKind::Uid, "1"))
            .with_property(Property::new(
                PropertyKind::DtStamp,
                PropertyValue::DateTime(date_time(1, 0)),
            ))
    }

    #[test]
    fn accepts_a_minimal_event() {
        assert!(validate(&event()).is_empty());
    }

    #[test]
    fn checks_event_rules() {
        let component = event()
            .with_property(Property::new(
                PropertyKind::DtStart,
                PropertyValue::DateTime(date_time(2, 10)),
            ))
            .with_property(Property::new(
                PropertyKind::DtEnd,
                PropertyValue::DateTime(date_time(2, 9)),
            ))
            .with_property(Property::new(
                PropertyKind::Duration,
                PropertyValue::Duration(ValueDuration::time(1, 0, 0)),
            ))
            .with_property(Property::text(PropertyKind::Transp, "opaque"));
        let warnings = validate(&component);
        assert_eq!(codes(&warnings), vec![7, 8]);
        assert_eq!(
            warnings.first().map(|w| w.path.clone()),
            Some(vec!["VEVENT".to_owned(), "DTEND".to_owned()])
        );
    }

    #[test]
    fn checks_todo_dependencies() {
        let todo = CalendarComponent::from(ComponentKind::Todo)
            .with_property(Property::text(PropertyKind::Uid, "1"))
            .with_property(Property::new(
                PropertyKind::DtStamp,
                PropertyValue::DateTime(date_time(1, 0)),
            ))
            .with_property(Property::new(
                PropertyKind::Duration,
                PropertyValue::Duration(ValueDuration::time(1, 0, 0)),
            ));
        assert_eq!(codes(&validate(&todo)), vec![9]);
    }

    #[test]
    fn checks_alarm_pairs() {
        let alarm = CalendarComponent::from(ComponentKind::Alarm)
            .with_property(Property::text(PropertyKind::Action, "SING"))
            .with_property(Property::text(PropertyKind::Trigger, "-PT15M"))
            .with_property(Property::new(PropertyKind::Repeat, PropertyValue::Integer(2)));
        assert_eq!(codes(&validate(&alarm)), vec![13, 10]);
    }

    #[test]
    fn walks_children_in_order() {
        let timezone = CalendarComponent::from(ComponentKind::TimeZone)
            .with_property(Property::text(PropertyKind::TzId, "Europe/Paris"));
        let calendar = CalendarComponent::from(ComponentKind::Calendar)
            .with_property(Property::text(PropertyKind::ProdId, "-//calwire//EN"))
            .with_property(Property::text(PropertyKind::Version, "2.0"))
            .with_component(timezone)
            .with_component(CalendarComponent::from(ComponentKind::Event));

        let warnings = validate(&calendar);
        assert_eq!(codes(&warnings), vec![4, 2, 2]);
        assert_eq!(
            warnings.first().map(|w| w.path.clone()),
            Some(vec!["VCALENDAR".to_owned(), "VTIMEZONE".to_owned()])
        );
        assert_eq!(
            warnings.last().map(|w| w.path.clone()),
            Some(vec![
                "VCALENDAR".to_owned(),
                "VEVENT".to_owned(),
                "DTSTAMP".to_owned()
            ])
        );
    }

    #[test]
    fn checks_properties_of_unknown_components() {
        let component = CalendarComponent::new("X-THING")
            .with_property(Property::new(
                PropertyKind::Geo,
                PropertyValue::Geo(ValueGeo::default()),
            ))
            .with_property(Property::new(
                PropertyKind::RRule,
                PropertyValue::Recurrence(ValueRecurrenceRule::default()),
            ))
            .with_property(Property::new(
                PropertyKind::FreeBusy,
                PropertyValue::Periods(Vec::new()),
            ));
        assert_eq!(codes(&validate(&component)), vec![41, 42, 20, 22]);
    }

    #[test]
    fn flags_periods_ending_early() {
        let start = ValueDateTime::utc(
            ValueDate {
                year: 2024,
                month: 1,
                day: 2,
            },
            ValueTime::new(10, 0, 0),
        );
        let DateOrDateTime::DateTime(end) = date_time(2, 9) else {
            unreachable!()
        };
        let backwards = ValuePeriod::explicit(start.clone(), end);
        let negative = ValuePeriod::with_duration(
            start.clone(),
            ValueDuration::DateTime {
                positive: false,
                day: 0,
                hour: 1,
                minute: 0,
                second: 0,
            },
        );
        let fine = ValuePeriod::with_duration(start, ValueDuration::time(1, 0, 0));
        let warnings = period_warnings(&[backwards, fine, negative]);
        assert_eq!(warnings.len(), 2);
    }
}
