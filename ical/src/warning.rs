// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Warning catalog shared by the marshallers and the validator.
//!
//! Every kind has a stable numeric code; the message text is only a
//! rendering of the kind and its arguments.

use std::fmt;

/// The closed set of warnings, with their arguments.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum WarningKind {
    /// A required property is absent
    #[error("{property} is required")]
    MissingProperty {
        /// Property name
        property: String,
    },

    /// A property allowed at most once appears more than once
    #[error("{property} must not occur more than once")]
    DuplicateProperty {
        /// Property name
        property: String,
    },

    /// A component needs at least one subcomponent of a kind
    #[error("at least one {component} component is required")]
    MissingComponent {
        /// Component name, or names joined with " or "
        component: String,
    },

    /// RRULE restricts the time of day while DTSTART has no time
    #[error("RRULE uses BYHOUR, BYMINUTE or BYSECOND but DTSTART is a date")]
    RecurrenceTimeWithDateStart,

    /// More than one RRULE in a component
    #[error("RRULE should not occur more than once")]
    MultipleRecurrenceRules,

    /// An end property precedes the start property
    #[error("{end} must not be before {start}")]
    EndBeforeStart {
        /// Start property name
        start: String,
        /// End property name
        end: String,
    },

    /// Two properties that must not appear together both appear
    #[error("{first} and {second} are mutually exclusive")]
    MutuallyExclusive {
        /// First property name
        first: String,
        /// Second property name
        second: String,
    },

    /// A property requires another one that is absent
    #[error("{property} requires {required}")]
    DependentPropertyMissing {
        /// Present property name
        property: String,
        /// Missing property name
        required: String,
    },

    /// Two properties must either both appear or both be absent
    #[error("{first} and {second} must appear together")]
    PropertiesMustAppearTogether {
        /// First property name
        first: String,
        /// Second property name
        second: String,
    },

    /// A property value lies outside its allowed domain
    #[error("{property} value {value:?} is not one of: {allowed}")]
    InvalidValue {
        /// Property name
        property: String,
        /// Offending value
        value: String,
        /// Allowed values, comma separated
        allowed: String,
    },

    /// Two properties must share the same DATE or DATE-TIME type
    #[error("{first} and {second} must both be dates or both be date-times")]
    MismatchedDateTypes {
        /// First property name
        first: String,
        /// Second property name
        second: String,
    },

    /// A recurrence rule without FREQ
    #[error("recurrence rule has no FREQ")]
    RecurrenceMissingFrequency,

    /// A recurrence rule with both COUNT and UNTIL
    #[error("recurrence rule must not have both COUNT and UNTIL")]
    RecurrenceCountAndUntil,

    /// A FREEBUSY property without periods
    #[error("FREEBUSY has no periods")]
    EmptyPeriodList,

    /// A period whose end precedes its start
    #[error("period {period} ends before it starts")]
    PeriodEndsBeforeStart {
        /// The period, as text
        period: String,
    },

    /// GEO without latitude
    #[error("GEO has no latitude")]
    GeoMissingLatitude,

    /// GEO without longitude
    #[error("GEO has no longitude")]
    GeoMissingLongitude,

    /// A period entry whose start could not be read
    #[error("invalid period start {value:?}")]
    InvalidPeriodStart {
        /// Offending text
        value: String,
    },

    /// A period entry whose end or duration could not be read
    #[error("invalid period end or duration {value:?}")]
    InvalidPeriodEnd {
        /// Offending text
        value: String,
    },

    /// A period entry without end or duration
    #[error("period {value:?} has no end or duration")]
    MissingPeriodEnd {
        /// Offending entry
        value: String,
    },

    /// A period entry with both an end and a duration
    #[error("period has both an end and a duration")]
    AmbiguousPeriodEnd,

    /// A recurrence rule part or list item that could not be read
    #[error("invalid recurrence rule part {part:?}")]
    InvalidRecurrencePart {
        /// Offending text
        part: String,
    },
}

impl WarningKind {
    /// The stable numeric code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::MissingProperty { .. } => 2,
            Self::DuplicateProperty { .. } => 3,
            Self::MissingComponent { .. } => 4,
            Self::RecurrenceTimeWithDateStart => 5,
            Self::MultipleRecurrenceRules => 6,
            Self::EndBeforeStart { .. } => 7,
            Self::MutuallyExclusive { .. } => 8,
            Self::DependentPropertyMissing { .. } => 9,
            Self::PropertiesMustAppearTogether { .. } => 10,
            Self::InvalidValue { .. } => 13,
            Self::MismatchedDateTypes { .. } => 19,
            Self::RecurrenceMissingFrequency => 20,
            Self::RecurrenceCountAndUntil => 21,
            Self::EmptyPeriodList => 22,
            Self::PeriodEndsBeforeStart { .. } => 23,
            Self::InvalidPeriodStart { .. } => 30,
            Self::InvalidPeriodEnd { .. } => 31,
            Self::MissingPeriodEnd { .. } => 32,
            Self::AmbiguousPeriodEnd => 33,
            Self::InvalidRecurrencePart { .. } => 34,
            Self::GeoMissingLatitude => 41,
            Self::GeoMissingLongitude => 42,
        }
    }
}

/// A warning with the path of the component kinds and property it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Warning {
    /// What went wrong
    pub kind: WarningKind,

    /// Context path from the root, e.g. `["VCALENDAR", "VEVENT", "DTEND"]`
    pub path: Vec<String>,
}

impl Warning {
    /// Create a warning.
    #[must_use]
    pub const fn new(kind: WarningKind, path: Vec<String>) -> Self {
        Self { kind, path }
    }

    /// The stable numeric code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.kind.code()
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) ", self.code())?;
        if !self.path.is_empty() {
            write!(f, "{}: ", self.path.join("/"))?;
        }
        write!(f, "{}", self.kind)
    }
}

/// The codes of a warning list, in order.
#[must_use]
pub fn codes(warnings: &[Warning]) -> Vec<u16> {
    warnings.iter().map(Warning::code).collect()
}
