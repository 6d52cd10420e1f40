// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component tree contract walked by the validator.
//!
//! Any representation exposing a kind, its properties in insertion order and
//! its child components can be validated. [`CalendarComponent`] is a plain
//! container implementing the contract.

use crate::keyword::{
    KW_DAYLIGHT, KW_STANDARD, KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL,
    KW_VTIMEZONE, KW_VTODO,
};
use crate::property::{Property, PropertyKind};

/// A node of a calendar component tree.
pub trait Component {
    /// The component name, such as `VEVENT`.
    fn kind(&self) -> &str;

    /// Properties in insertion order; a kind may repeat.
    fn properties(&self) -> &[Property];

    /// Child components in order.
    fn components(&self) -> &[Self]
    where
        Self: Sized;
}

/// Component kinds defined by RFC 5545.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ComponentKind {
    /// The calendar object
    #[strum(serialize = "VCALENDAR")]
    Calendar,
    /// An event
    #[strum(serialize = "VEVENT")]
    Event,
    /// A to-do
    #[strum(serialize = "VTODO")]
    Todo,
    /// A journal entry
    #[strum(serialize = "VJOURNAL")]
    Journal,
    /// A free/busy request or reply
    #[strum(serialize = "VFREEBUSY")]
    FreeBusy,
    /// A time zone definition
    #[strum(serialize = "VTIMEZONE")]
    TimeZone,
    /// Standard time observance of a time zone
    #[strum(serialize = "STANDARD")]
    Standard,
    /// Daylight saving observance of a time zone
    #[strum(serialize = "DAYLIGHT")]
    Daylight,
    /// An alarm
    #[strum(serialize = "VALARM")]
    Alarm,
}

impl ComponentKind {
    /// The component name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calendar => KW_VCALENDAR,
            Self::Event => KW_VEVENT,
            Self::Todo => KW_VTODO,
            Self::Journal => KW_VJOURNAL,
            Self::FreeBusy => KW_VFREEBUSY,
            Self::TimeZone => KW_VTIMEZONE,
            Self::Standard => KW_STANDARD,
            Self::Daylight => KW_DAYLIGHT,
            Self::Alarm => KW_VALARM,
        }
    }
}

/// A generic component: a kind, a property list and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarComponent {
    /// Component name
    pub kind: String,

    /// Properties in insertion order
    pub properties: Vec<Property>,

    /// Child components
    pub components: Vec<CalendarComponent>,
}

impl CalendarComponent {
    /// An empty component of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Append a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Append a child component.
    #[must_use]
    pub fn with_component(mut self, component: CalendarComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Append a property in place.
    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Append a child component in place.
    pub fn push_component(&mut self, component: CalendarComponent) {
        self.components.push(component);
    }

    /// Properties of the given kind, in insertion order.
    pub fn properties_of<'a>(
        &'a self,
        kind: &'a PropertyKind,
    ) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties.iter().filter(move |p| &p.kind == kind)
    }
}

impl From<ComponentKind> for CalendarComponent {
    fn from(kind: ComponentKind) -> Self {
        Self::new(kind.name())
    }
}

impl Component for CalendarComponent {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn components(&self) -> &[Self] {
        &self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_component_kinds() {
        assert_eq!("vevent".parse::<ComponentKind>(), Ok(ComponentKind::Event));
        assert_eq!(ComponentKind::Daylight.to_string(), "DAYLIGHT");
        assert_eq!(ComponentKind::Alarm.as_ref(), ComponentKind::Alarm.name());
        assert!("X-THING".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn builds_trees() {
        let event = CalendarComponent::from(ComponentKind::Event)
            .with_property(Property::text(PropertyKind::Summary, "a"))
            .with_property(Property::text(PropertyKind::Summary, "b"));
        let mut calendar = CalendarComponent::from(ComponentKind::Calendar);
        calendar.push_component(event);

        assert_eq!(calendar.kind(), "VCALENDAR");
        let child = calendar.components().first().unwrap();
        assert_eq!(child.properties_of(&PropertyKind::Summary).count(), 2);
        assert!(child.components().is_empty());
    }
}
