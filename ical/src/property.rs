// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property kinds, their value classes, and typed property values.
//!
//! This module defines the `PropertyKind` enum that represents all standard
//! iCalendar properties defined in RFC 5545, along with the value class that
//! decides which codec reads and writes them.

use std::fmt;

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_EXDATE, KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD,
    KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID,
    KW_RELATED_TO, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS,
    KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO,
    KW_TZURL, KW_UID, KW_URL, KW_VERSION,
};
use crate::value::{
    DateOrDateTime, ValueDuration, ValueGeo, ValuePeriod, ValueRecurrenceRule, ValueUtcOffset,
};

/// Which codec handles a property's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// Comma-separated PERIOD list
    PeriodList,
    /// Latitude/longitude pair
    Geo,
    /// DURATION
    Duration,
    /// DATE or DATE-TIME
    DateTime,
    /// RECUR
    RecurrenceRule,
    /// INTEGER
    Integer,
    /// UTC-OFFSET
    UtcOffset,
    /// TEXT, with escaping
    Text,
    /// URI, copied verbatim
    Uri,
    /// CAL-ADDRESS, copied verbatim
    CalAddress,
    /// Any other value type, copied verbatim
    Unknown,
}

/// Whether a value is read as a list of independent entries.
///
/// List-valued kinds drop a malformed entry and keep the rest; scalar kinds
/// succeed or fail as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueArity {
    /// Independent entries
    List,
    /// One indivisible value
    Scalar,
}

impl ValueClass {
    /// The arity of the class.
    #[must_use]
    pub const fn arity(self) -> ValueArity {
        match self {
            Self::PeriodList | Self::RecurrenceRule => ValueArity::List,
            _ => ValueArity::Scalar,
        }
    }
}

/// Macro to define `PropertyKind` with associated value classes.
///
/// Usage: `property_kind!(Variant => KW => ValueClass::X, ...)`
macro_rules! property_kind {
    (
        $(
            $(#[$attr:meta])*
            $variant:ident => $kw:ident => $class:expr $(,)?
        )*
    ) => {
        /// Kind of iCalendar property.
        /// Represents all standard properties defined in RFC 5545.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[expect(missing_docs)]
        pub enum PropertyKind {
            $(
                $(#[$attr])*
                $variant,
            )*
            /// Custom experimental x-name property (must start with "X-" or "x-")
            XName(String),
            /// Unrecognized property (not a known standard property)
            Unrecognized(String),
        }

        impl PropertyKind {
            /// The value class deciding the codec. Extension and
            /// unrecognized properties are text.
            #[must_use]
            pub const fn value_class(&self) -> ValueClass {
                match self {
                    $(PropertyKind::$variant => $class,)*
                    PropertyKind::XName(_) | PropertyKind::Unrecognized(_) => ValueClass::Text,
                }
            }

            /// The property name, upper case for standard kinds.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(PropertyKind::$variant => $kw,)*
                    PropertyKind::XName(s) | PropertyKind::Unrecognized(s) => s,
                }
            }
        }

        impl From<&str> for PropertyKind {
            fn from(name: &str) -> Self {
                // Property names are case-insensitive per RFC 5545
                let name_upper = name.to_uppercase();
                match name_upper.as_str() {
                    $(
                        $kw => PropertyKind::$variant,
                    )*
                    _ => {
                        if name_upper.starts_with("X-") {
                            PropertyKind::XName(name.to_owned())
                        } else {
                            PropertyKind::Unrecognized(name.to_owned())
                        }
                    }
                }
            }
        }

        #[cfg(test)]
        const KINDS: &[PropertyKind] = &[
            $(
                PropertyKind::$variant,
            )*
        ];
    };
}

// Define PropertyKind with all RFC 5545 properties and their value classes
property_kind! {
    // 3.7.1.  Calendar Scale
    CalScale    => KW_CALSCALE  => ValueClass::Text,
    // 3.7.2.  Method
    Method      => KW_METHOD    => ValueClass::Text,
    // 3.7.3.  Product Identifier
    ProdId      => KW_PRODID    => ValueClass::Text,
    // 3.7.4.  Version
    Version     => KW_VERSION   => ValueClass::Text,
    // 3.8.1.1.  Attachment
    Attach      => KW_ATTACH    => ValueClass::Uri,
    // 3.8.1.2.  Categories
    Categories  => KW_CATEGORIES => ValueClass::Text,
    // 3.8.1.3.  Classification
    Class       => KW_CLASS     => ValueClass::Text,
    // 3.8.1.4.  Comment
    Comment     => KW_COMMENT   => ValueClass::Text,
    // 3.8.1.5.  Description
    Description => KW_DESCRIPTION => ValueClass::Text,
    // 3.8.1.6.  Geographic Position
    Geo         => KW_GEO       => ValueClass::Geo,
    // 3.8.1.7.  Location
    Location    => KW_LOCATION  => ValueClass::Text,
    // 3.8.1.8.  Percent Complete
    PercentComplete => KW_PERCENT_COMPLETE => ValueClass::Integer,
    // 3.8.1.9.  Priority
    Priority    => KW_PRIORITY  => ValueClass::Integer,
    // 3.8.1.10.  Resources
    Resources   => KW_RESOURCES => ValueClass::Text,
    // 3.8.1.11.  Status
    Status      => KW_STATUS    => ValueClass::Text,
    // 3.8.1.12.  Summary
    Summary     => KW_SUMMARY   => ValueClass::Text,
    // 3.8.2.1.  Date-Time Completed
    Completed   => KW_COMPLETED => ValueClass::DateTime,
    // 3.8.2.2.  Date-Time End
    DtEnd       => KW_DTEND     => ValueClass::DateTime,
    // 3.8.2.3.  Date-Time Due
    Due         => KW_DUE       => ValueClass::DateTime,
    // 3.8.2.4.  Date-Time Start
    DtStart     => KW_DTSTART   => ValueClass::DateTime,
    // 3.8.2.5.  Duration
    Duration    => KW_DURATION  => ValueClass::Duration,
    // 3.8.2.6.  Free/Busy Time
    FreeBusy    => KW_FREEBUSY  => ValueClass::PeriodList,
    // 3.8.2.7.  Time Transparency
    Transp      => KW_TRANSP    => ValueClass::Text,
    // 3.8.3.1.  Time Zone Identifier
    TzId        => KW_TZID      => ValueClass::Text,
    // 3.8.3.2.  Time Zone Name
    TzName      => KW_TZNAME    => ValueClass::Text,
    // 3.8.3.3.  Time Zone Offset From
    TzOffsetFrom => KW_TZOFFSETFROM => ValueClass::UtcOffset,
    // 3.8.3.4.  Time Zone Offset To
    TzOffsetTo  => KW_TZOFFSETTO => ValueClass::UtcOffset,
    // 3.8.3.5.  Time Zone URL
    TzUrl       => KW_TZURL     => ValueClass::Uri,
    // 3.8.4.1.  Attendee
    Attendee    => KW_ATTENDEE  => ValueClass::CalAddress,
    // 3.8.4.2.  Contact
    Contact     => KW_CONTACT   => ValueClass::Text,
    // 3.8.4.3.  Organizer
    Organizer   => KW_ORGANIZER => ValueClass::CalAddress,
    // 3.8.4.4.  Recurrence ID
    RecurrenceId => KW_RECURRENCE_ID => ValueClass::DateTime,
    // 3.8.4.5.  Related To
    RelatedTo   => KW_RELATED_TO => ValueClass::Text,
    // 3.8.4.6.  Uniform Resource Locator
    Url         => KW_URL       => ValueClass::Uri,
    // 3.8.4.7.  Unique Identifier
    Uid         => KW_UID       => ValueClass::Text,
    // 3.8.5.1.  Exception Date-Times
    ExDate      => KW_EXDATE    => ValueClass::Unknown,
    // 3.8.5.2.  Recurrence Date-Times
    RDate       => KW_RDATE     => ValueClass::Unknown,
    // 3.8.5.3.  Recurrence Rule
    RRule       => KW_RRULE     => ValueClass::RecurrenceRule,
    // 3.8.6.1.  Action
    Action      => KW_ACTION    => ValueClass::Text,
    // 3.8.6.2.  Repeat Count
    Repeat      => KW_REPEAT    => ValueClass::Integer,
    // 3.8.6.3.  Trigger
    Trigger     => KW_TRIGGER   => ValueClass::Text,
    // 3.8.7.1.  Date-Time Created
    Created     => KW_CREATED   => ValueClass::DateTime,
    // 3.8.7.2.  Date-Time Stamp
    DtStamp     => KW_DTSTAMP   => ValueClass::DateTime,
    // 3.8.7.3.  Last Modified
    LastModified => KW_LAST_MODIFIED => ValueClass::DateTime,
    // 3.8.7.4.  Sequence Number
    Sequence    => KW_SEQUENCE  => ValueClass::Integer,
    // 3.8.8.3.  Request Status
    RequestStatus => KW_REQUEST_STATUS => ValueClass::Unknown,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// FREEBUSY periods
    Periods(Vec<ValuePeriod>),
    /// GEO position
    Geo(ValueGeo),
    /// DURATION
    Duration(ValueDuration),
    /// DATE or DATE-TIME
    DateTime(DateOrDateTime),
    /// RRULE descriptor
    Recurrence(ValueRecurrenceRule),
    /// INTEGER
    Integer(i32),
    /// UTC-OFFSET
    UtcOffset(ValueUtcOffset),
    /// TEXT, URI, CAL-ADDRESS or an unknown type, unescaped
    Text(String),
}

impl PropertyValue {
    /// The text, if this is a textual value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The date or date-time, if this is one.
    #[must_use]
    pub const fn as_date_time(&self) -> Option<&DateOrDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

/// A property: its kind and typed value.
///
/// Parameters are handled by the caller and not modelled here.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property kind
    pub kind: PropertyKind,

    /// Property value
    pub value: PropertyValue,
}

impl Property {
    /// Create a property.
    #[must_use]
    pub const fn new(kind: PropertyKind, value: PropertyValue) -> Self {
        Self { kind, value }
    }

    /// Create a textual property.
    #[must_use]
    pub fn text(kind: PropertyKind, value: impl Into<String>) -> Self {
        Self::new(kind, PropertyValue::Text(value.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_names() {
        for kind in KINDS {
            assert_eq!(&PropertyKind::from(kind.name()), kind);
            assert_eq!(&PropertyKind::from(kind.name().to_lowercase().as_str()), kind);
        }
    }

    #[test]
    fn classifies_kinds() {
        assert_eq!(PropertyKind::FreeBusy.value_class(), ValueClass::PeriodList);
        assert_eq!(PropertyKind::FreeBusy.value_class().arity(), ValueArity::List);
        assert_eq!(PropertyKind::Geo.value_class().arity(), ValueArity::Scalar);
        assert_eq!(PropertyKind::RRule.value_class().arity(), ValueArity::List);

        let ext = PropertyKind::from("X-WR-CALNAME");
        assert_eq!(ext, PropertyKind::XName("X-WR-CALNAME".to_owned()));
        assert_eq!(ext.value_class(), ValueClass::Text);
        assert_eq!(ext.to_string(), "X-WR-CALNAME");

        let other = PropertyKind::from("FOO");
        assert_eq!(other, PropertyKind::Unrecognized("FOO".to_owned()));
    }
}
