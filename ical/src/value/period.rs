// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period value type as defined in RFC 5545 Section 3.3.9.

use std::fmt;

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::datetime::{ValueDateTime, value_date_time};
use crate::value::duration::{ValueDuration, value_duration};
use crate::value::miscellaneous::ValueExpected;

/// The right-hand side of a period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PeriodEnd {
    /// Explicit end date-time
    ///
    /// Format: `date-time "/" date-time`
    DateTime(ValueDateTime),

    /// Duration from the start
    ///
    /// Format: `date-time "/" dur-value`
    Duration(ValueDuration),
}

/// Period of Time value defined in RFC 5545 Section 3.3.9
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValuePeriod {
    /// Start date-time
    pub start: ValueDateTime,

    /// End date-time or duration
    pub end: PeriodEnd,
}

impl ValuePeriod {
    /// Create a period with an explicit end.
    #[must_use]
    pub const fn explicit(start: ValueDateTime, end: ValueDateTime) -> Self {
        Self {
            start,
            end: PeriodEnd::DateTime(end),
        }
    }

    /// Create a period with a duration.
    #[must_use]
    pub const fn with_duration(start: ValueDateTime, duration: ValueDuration) -> Self {
        Self {
            start,
            end: PeriodEnd::Duration(duration),
        }
    }

    /// The end date-time, computing it from the duration when needed.
    #[must_use]
    pub fn end_instant(&self) -> Option<ValueDateTime> {
        match &self.end {
            PeriodEnd::DateTime(end) => Some(end.clone()),
            PeriodEnd::Duration(duration) => self.start.checked_add(duration.to_signed_duration()),
        }
    }

    /// Format as `start/end` with extended date-times, the jCal form.
    #[must_use]
    pub fn to_extended_string(&self) -> String {
        format!("{}/{}", self.start.to_extended_string(), self.end.to_extended_string())
    }
}

impl PeriodEnd {
    /// Format with an extended date-time; durations are unaffected.
    #[must_use]
    pub fn to_extended_string(&self) -> String {
        match self {
            Self::DateTime(end) => end.to_extended_string(),
            Self::Duration(duration) => duration.to_string(),
        }
    }
}

impl fmt::Display for PeriodEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(end) => end.fmt(f),
            Self::Duration(duration) => duration.fmt(f),
        }
    }
}

impl fmt::Display for ValuePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// period-start = date-time "/" dur-value
/// ```
///
/// This parser reads the part after the `/`: a date-time first, then a
/// duration.
pub fn value_period_end<'src, I, E>() -> impl Parser<'src, I, PeriodEnd, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((
        value_date_time().map(PeriodEnd::DateTime),
        value_duration().map(PeriodEnd::Duration),
    ))
}

#[cfg(test)]
mod tests {
    use chumsky::extra;
    use chumsky::input::Stream;

    use crate::value::{ValueDate, ValueTime};

    use super::*;

    fn parse(src: &str) -> Result<PeriodEnd, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        value_period_end::<'_, _, extra::Err<_>>()
            .parse(stream)
            .into_result()
    }

    fn utc(year: i16, month: i8, day: i8, hour: u8) -> ValueDateTime {
        ValueDateTime::utc(ValueDate { year, month, day }, ValueTime::new(hour, 0, 0))
    }

    #[test]
    fn parses_period_end() {
        #[rustfmt::skip]
        let success_cases = [
            ("19970102T070000Z",     PeriodEnd::DateTime(utc(1997, 1, 2, 7))),
            ("1997-01-02T07:00:00Z", PeriodEnd::DateTime(utc(1997, 1, 2, 7))),
            ("PT5H30M",              PeriodEnd::Duration(ValueDuration::time(5, 30, 0))),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "Failed to parse: {src}");
        }

        let fail_cases = [
            "",                  // empty string
            "P",                 // invalid duration
            "invalid",           // invalid end
            "19970102T070000Z/", // trailing separator
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn computes_end_instant() {
        let period = ValuePeriod::with_duration(utc(2013, 6, 11, 12), ValueDuration::time(2, 0, 0));
        assert_eq!(period.end_instant(), Some(utc(2013, 6, 11, 14)));

        let period = ValuePeriod::explicit(utc(2013, 6, 11, 12), utc(2013, 6, 11, 14));
        assert_eq!(period.end_instant(), Some(utc(2013, 6, 11, 14)));
    }

    #[test]
    fn formats_period() {
        let period = ValuePeriod::with_duration(utc(2013, 6, 11, 12), ValueDuration::time(2, 0, 0));
        assert_eq!(period.to_string(), "20130611T120000Z/PT2H");
        assert_eq!(period.to_extended_string(), "2013-06-11T12:00:00Z/PT2H");
    }
}
