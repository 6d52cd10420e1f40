// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, time and date-time values as defined in RFC 5545 Section 3.3.4,
//! 3.3.5, 3.3.12 and 3.3.14.
//!
//! The text format uses the ISO 8601 basic representation (`19970714T133000Z`)
//! while xCal and jCal use the extended one (`1997-07-14T13:30:00Z`). Every
//! grammar in this module accepts both.

use std::cmp::Ordering;
use std::fmt;

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::label::LabelError;
use chumsky::prelude::*;

use crate::value::miscellaneous::{
    ValueExpected, i8_0_1, i8_0_2, i8_0_9, i8_1_2, i8_1_9, i16_0_9, sign, u8_0_1, u8_0_3, u8_0_5,
    u8_0_9,
};

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`, if the components name a real date.
    #[must_use]
    pub fn civil_date(self) -> Option<jiff::civil::Date> {
        jiff::civil::Date::new(self.year, self.month, self.day).ok()
    }

    /// Format as ISO 8601 extended `YYYY-MM-DD`.
    #[must_use]
    pub fn to_extended_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl From<jiff::civil::Date> for ValueDate {
    fn from(value: jiff::civil::Date) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
        }
    }
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: u8,

    /// Minute component, 0-59.
    pub minute: u8,

    /// Second component, 0-60 (60 for leap second).
    pub second: u8,
}

impl ValueTime {
    /// Create a new `ValueTime` from components.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Convert to `jiff::civil::Time`.
    ///
    /// NOTE: a leap second 60 is contracted to 59.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn civil_time(self) -> Option<jiff::civil::Time> {
        jiff::civil::Time::new(
            self.hour as i8,
            self.minute as i8,
            self.second.min(59) as i8,
            0,
        )
        .ok()
    }
}

impl fmt::Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)
    }
}

/// How a date-time relates to a time zone.
///
/// The tag is carried next to the civil date-time instead of being folded
/// into an offset, so callers can still tell a floating value from a UTC one
/// after a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TimeZoneTag {
    /// Local time with no zone ("floating").
    #[default]
    Floating,

    /// UTC, written with a trailing `Z`.
    Utc,

    /// Local time in the zone named by a TZID parameter.
    Zoned(String),
}

/// Date-Time value defined in the RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,

    /// Zone tag.
    pub zone: TimeZoneTag,
}

impl ValueDateTime {
    /// Create a new date-time.
    #[must_use]
    pub const fn new(date: ValueDate, time: ValueTime, zone: TimeZoneTag) -> Self {
        Self { date, time, zone }
    }

    /// Create a UTC date-time.
    #[must_use]
    pub const fn utc(date: ValueDate, time: ValueTime) -> Self {
        Self::new(date, time, TimeZoneTag::Utc)
    }

    /// Create a floating date-time.
    #[must_use]
    pub const fn floating(date: ValueDate, time: ValueTime) -> Self {
        Self::new(date, time, TimeZoneTag::Floating)
    }

    /// Create a UTC date-time from an instant.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn from_timestamp(timestamp: jiff::Timestamp) -> Self {
        let dt = jiff::tz::Offset::UTC.to_datetime(timestamp);
        Self::utc(
            dt.date().into(),
            ValueTime::new(dt.hour() as u8, dt.minute() as u8, dt.second() as u8),
        )
    }

    /// Whether the value is tagged as UTC.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.zone == TimeZoneTag::Utc
    }

    /// Convert to `jiff::civil::DateTime`, ignoring the zone tag.
    #[must_use]
    pub fn civil_date_time(&self) -> Option<jiff::civil::DateTime> {
        Some(self.date.civil_date()?.to_datetime(self.time.civil_time()?))
    }

    /// Add a duration, keeping the zone tag.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn checked_add(&self, duration: jiff::SignedDuration) -> Option<Self> {
        let dt = self.civil_date_time()?.checked_add(duration).ok()?;
        Some(Self::new(
            dt.date().into(),
            ValueTime::new(dt.hour() as u8, dt.minute() as u8, dt.second() as u8),
            self.zone.clone(),
        ))
    }

    /// Compare two date-times sharing the same zone tag.
    ///
    /// Values with different tags cannot be ordered without a time zone
    /// database and yield `None`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if self.zone != other.zone {
            return None;
        }
        Some((self.date, self.time).cmp(&(other.date, other.time)))
    }

    /// Format as ISO 8601 extended `YYYY-MM-DDTHH:MM:SS[Z]`.
    #[must_use]
    pub fn to_extended_string(&self) -> String {
        let utc = if self.is_utc() { "Z" } else { "" };
        format!(
            "{}T{:02}:{:02}:{:02}{utc}",
            self.date.to_extended_string(),
            self.time.hour,
            self.time.minute,
            self.time.second
        )
    }
}

impl fmt::Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)?;
        if self.is_utc() {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// A DATE or DATE-TIME value, as taken by DTSTART, DTEND, DUE and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateOrDateTime {
    /// Date-only value
    Date(ValueDate),

    /// Date with time of day
    DateTime(ValueDateTime),
}

impl DateOrDateTime {
    /// Whether the value carries a time-of-day component.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    /// The date component.
    #[must_use]
    pub const fn date(&self) -> ValueDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(dt) => dt.date,
        }
    }

    /// Compare two values of the same shape and zone tag.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => a.compare(b),
            _ => None,
        }
    }

    /// Format as ISO 8601 extended.
    #[must_use]
    pub fn to_extended_string(&self) -> String {
        match self {
            Self::Date(date) => date.to_extended_string(),
            Self::DateTime(dt) => dt.to_extended_string(),
        }
    }
}

impl fmt::Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => date.fmt(f),
            Self::DateTime(dt) => dt.fmt(f),
        }
    }
}

impl From<ValueDate> for DateOrDateTime {
    fn from(value: ValueDate) -> Self {
        Self::Date(value)
    }
}

impl From<ValueDateTime> for DateOrDateTime {
    fn from(value: ValueDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// UTC Offset Value defined in RFC 5545 Section 3.3.14
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueUtcOffset {
    /// Whether the offset is positive
    pub positive: bool,

    /// Hour, 0-23
    pub hour: u8,

    /// Minute, 0-59
    pub minute: u8,

    /// Second, 0-60, optional
    pub second: Option<u8>,
}

impl ValueUtcOffset {
    /// Offset in seconds east of UTC.
    #[must_use]
    pub fn seconds(&self) -> i32 {
        let secs = i32::from(self.hour) * 3600
            + i32::from(self.minute) * 60
            + i32::from(self.second.unwrap_or(0));
        if self.positive { secs } else { -secs }
    }

    /// Format as `+HH:MM[:SS]`, the form used by xCal and jCal.
    #[must_use]
    pub fn to_extended_string(&self) -> String {
        let sign = if self.positive { '+' } else { '-' };
        match self.second {
            Some(s) => format!("{sign}{:02}:{:02}:{s:02}", self.hour, self.minute),
            None => format!("{sign}{:02}:{:02}", self.hour, self.minute),
        }
    }
}

impl fmt::Display for ValueUtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}{:02}{:02}", self.hour, self.minute)?;
        if let Some(s) = self.second {
            write!(f, "{s:02}")?;
        }
        Ok(())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
///
/// The ISO 8601 extended separators (`YYYY-MM-DD`) are accepted as well.
pub fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then_ignore(just('-').or_not())
        .then(month)
        .then_ignore(just('-').or_not())
        .then(day)
        .try_map(|((year, month), day), span| {
            if jiff::civil::Date::new(year, month, day).is_err() {
                Err(E::Error::expected_found([ValueExpected::Date], None, span))
            } else {
                Ok(ValueDate { year, month, day })
            }
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
///
/// The zone suffix is handled by [`value_date_time`]; this parser only reads
/// the clock fields, with optional `:` separators.
pub fn value_time<'src, I, E>() -> impl Parser<'src, I, ValueTime, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_hour()
        .then_ignore(just(':').or_not())
        .then(time_minute())
        .then_ignore(just(':').or_not())
        .then(time_second())
        .map(|((hour, minute), second)| ValueTime::new(hour, minute, second))
}

#[derive(Debug, Clone, Copy)]
enum ZoneSuffix {
    Utc,
    Offset(i32),
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
///
/// A trailing `Z` tags the value as UTC. A numeric offset (`+01:00`,
/// `-0500`) is accepted for ISO 8601 input and normalized to UTC here, so the
/// returned value is then tagged UTC. Anything else is floating.
pub fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let offset = sign()
        .then(time_hour())
        .then_ignore(just(':').or_not())
        .then(time_minute())
        .map(|((sign, hour), minute)| {
            let secs = i32::from(hour) * 3600 + i32::from(minute) * 60;
            ZoneSuffix::Offset(if sign == '-' { -secs } else { secs })
        });

    let suffix = choice((just('Z').to(ZoneSuffix::Utc), offset)).or_not();

    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .then(suffix)
        .try_map(|((date, time), suffix), span| match suffix {
            None => Ok(ValueDateTime::floating(date, time)),
            Some(ZoneSuffix::Utc) => Ok(ValueDateTime::utc(date, time)),
            Some(ZoneSuffix::Offset(secs)) => normalize_offset(date, time, secs)
                .ok_or_else(|| E::Error::expected_found([ValueExpected::DateTime], None, span)),
        })
}

fn normalize_offset(date: ValueDate, time: ValueTime, secs: i32) -> Option<ValueDateTime> {
    let civil = ValueDateTime::floating(date, time).civil_date_time()?;
    let offset = jiff::tz::Offset::from_seconds(secs).ok()?;
    let timestamp = offset.to_timestamp(civil).ok()?;
    Some(ValueDateTime::from_timestamp(timestamp))
}

/// DATE-TIME first, falling back to DATE.
pub fn value_date_or_date_time<'src, I, E>() -> impl Parser<'src, I, DateOrDateTime, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((
        value_date_time().map(DateOrDateTime::DateTime),
        value_date().map(DateOrDateTime::Date),
    ))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
pub fn value_utc_offset<'src, I, E>() -> impl Parser<'src, I, ValueUtcOffset, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    sign()
        .then(time_hour())
        .then_ignore(just(':').or_not())
        .then(time_minute())
        .then(just(':').or_not().ignore_then(time_second()).or_not())
        .map(|(((sign, hour), minute), second)| ValueUtcOffset {
            positive: sign != '-',
            hour,
            minute,
            second,
        })
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').ignored().to(60)), // leap second
    ))
}
