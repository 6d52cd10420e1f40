// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value types and their grammars.
//!
//! This module handles the parsing and formatting of the iCalendar value
//! types as defined in RFC 5545 Section 3.3. Grammars are `chumsky` parsers
//! generic over the input, so they run on plain strings as well as on
//! character streams.

mod datetime;
mod duration;
mod geo;
mod miscellaneous;
mod numeric;
mod period;
mod rrule;
mod text;

pub use datetime::{
    DateOrDateTime, TimeZoneTag, ValueDate, ValueDateTime, ValueTime, ValueUtcOffset, value_date,
    value_date_or_date_time, value_date_time, value_time, value_utc_offset,
};
pub use duration::{ValueDuration, value_duration};
pub use geo::ValueGeo;
pub use miscellaneous::ValueExpected;
pub use numeric::{format_float, value_float, value_integer};
pub use period::{PeriodEnd, ValuePeriod, value_period_end};
pub use rrule::{
    Frequency, RecurrenceItem, RecurrencePart, RecurrencePartName, ValueRecurrenceRule, WeekDay,
    WeekDayNum,
};
pub use text::{escape_text, unescape_text, value_text};

pub(crate) use miscellaneous::parse_complete;
