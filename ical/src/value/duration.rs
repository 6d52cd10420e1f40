// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type as defined in RFC 5545 Section 3.3.6.

use std::fmt;

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::miscellaneous::ValueExpected;

/// Duration Value defined in RFC 5545 Section 3.3.6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDuration {
    /// Date and Time Duration
    DateTime {
        /// Whether the duration is positive
        positive: bool,
        /// Day Duration
        day: u32,
        /// Hour Duration
        hour: u32,
        /// Minute Duration
        minute: u32,
        /// Second Duration
        second: u32,
    },

    /// Week Duration
    Week {
        /// Whether the duration is positive
        positive: bool,
        /// Week Duration
        week: u32,
    },
}

impl ValueDuration {
    /// A positive duration of hours, minutes and seconds.
    #[must_use]
    pub const fn time(hour: u32, minute: u32, second: u32) -> Self {
        Self::DateTime {
            positive: true,
            day: 0,
            hour,
            minute,
            second,
        }
    }

    /// Whether the duration is positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        match self {
            Self::DateTime { positive, .. } | Self::Week { positive, .. } => *positive,
        }
    }

    /// Convert to `jiff::SignedDuration`, counting a day as 24 hours.
    #[must_use]
    pub fn to_signed_duration(&self) -> jiff::SignedDuration {
        let (positive, secs) = match *self {
            Self::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => (
                positive,
                i64::from(day) * 86_400
                    + i64::from(hour) * 3600
                    + i64::from(minute) * 60
                    + i64::from(second),
            ),
            Self::Week { positive, week } => (positive, i64::from(week) * 7 * 86_400),
        };
        jiff::SignedDuration::from_secs(if positive { secs } else { -secs })
    }
}

impl fmt::Display for ValueDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_positive() {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        match *self {
            Self::Week { week, .. } => write!(f, "{week}W"),
            Self::DateTime {
                day,
                hour,
                minute,
                second,
                ..
            } => {
                if day > 0 {
                    write!(f, "{day}D")?;
                }
                if hour == 0 && minute == 0 && second == 0 {
                    // zero duration still needs one field
                    return if day == 0 { write!(f, "T0S") } else { Ok(()) };
                }
                write!(f, "T")?;
                if hour > 0 {
                    write!(f, "{hour}H")?;
                }
                if minute > 0 {
                    write!(f, "{minute}M")?;
                }
                if second > 0 {
                    write!(f, "{second}S")?;
                }
                Ok(())
            }
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
///
/// The time part accepts any ordered subset of hour, minute and second
/// (`PT1H30S` included), which is what the writer produces after dropping
/// zero fields.
pub fn value_duration<'src, I, E>() -> impl Parser<'src, I, ValueDuration, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let week = dur_int().then_ignore(just('W'));

    let time = just('T')
        .ignore_then(dur_int().then_ignore(just('H')).or_not())
        .then(dur_int().then_ignore(just('M')).or_not())
        .then(dur_int().then_ignore(just('S')).or_not())
        .try_map(|((hour, minute), second), span| {
            if hour.is_none() && minute.is_none() && second.is_none() {
                Err(E::Error::expected_found(
                    [ValueExpected::DurationTime],
                    None,
                    span,
                ))
            } else {
                Ok((
                    hour.unwrap_or(0),
                    minute.unwrap_or(0),
                    second.unwrap_or(0),
                ))
            }
        });

    let date = dur_int()
        .then_ignore(just('D'))
        .then(time.clone().or_not())
        .map(|(day, time)| (day, time.unwrap_or((0, 0, 0))));

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));

    sign.then_ignore(just('P')).then(choice((
        week.map(Either::Week),
        date.map(|(day, (h, m, s))| Either::DateTime(day, h, m, s)),
        time.map(|(h, m, s)| Either::DateTime(0, h, m, s)),
    )))
    .map(|(positive, body)| match body {
        Either::Week(week) => ValueDuration::Week { positive, week },
        Either::DateTime(day, hour, minute, second) => ValueDuration::DateTime {
            positive,
            day,
            hour,
            minute,
            second,
        },
    })
}

#[derive(Debug, Clone, Copy)]
enum Either {
    Week(u32),
    DateTime(u32, u32, u32, u32),
}

fn dur_int<'src, I, E>() -> impl Parser<'src, I, u32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map_with(|str, e| match lexical::parse_partial::<u32, _>(&str) {
            Ok((v, n)) if n == str.len() => Ok(v),
            _ => Err(E::Error::expected_found([ValueExpected::U32], None, e.span())),
        })
}

#[cfg(test)]
mod tests {
    use chumsky::extra;
    use chumsky::input::Stream;

    use super::*;

    fn parse(src: &str) -> Result<ValueDuration, Vec<Rich<'_, char>>> {
        let stream = Stream::from_iter(src.chars());
        value_duration::<'_, _, extra::Err<_>>()
            .parse(stream)
            .into_result()
    }

    #[test]
    fn parses_duration() {
        use ValueDuration::{DateTime, Week};

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.6
            ("P15DT5H0M20S", DateTime { positive: true, day: 15, hour: 5, minute: 0, second: 20 }),
            ("P7W",          Week { positive: true,  week: 7 }),
            // extra tests
            ("+P3W",         Week { positive: true,  week: 3 }),
            ("-P1W",         Week { positive: false, week: 1 }),
            ("+P3DT4H5M6S",  DateTime { positive:  true, day: 3, hour:  4, minute:  5, second:  6 }),
            ("-PT10H11M12S", DateTime { positive: false, day: 0, hour: 10, minute: 11, second: 12 }),
            ("PT15M",        DateTime { positive: true,  day: 0, hour:  0, minute: 15, second:  0 }),
            ("PT2H",         DateTime { positive: true,  day: 0, hour:  2, minute:  0, second:  0 }),
            ("PT1H30S",      DateTime { positive: true,  day: 0, hour:  1, minute:  0, second: 30 }),
            ("P1D",          DateTime { positive: true,  day: 1, hour:  0, minute:  0, second:  0 }),
            ("PT0S",         DateTime { positive: true,  day: 0, hour:  0, minute:  0, second:  0 }),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "Failed to parse: {src}");
        }

        let fail_cases = [
            "P",           // missing duration value
            "PT",          // missing time value
            "P3X",         // invalid designator
            "P-3W",        // invalid negative sign position
            "P3DT4H5M6",   // missing 'S' designator
            "3W",          // missing 'P' designator
            "P10H11M12S3", // missing 'T' designator
            "PT30S1H",     // out of order
            "",
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn writes_duration() {
        use ValueDuration::{DateTime, Week};

        #[rustfmt::skip]
        let cases = [
            (DateTime { positive: true,  day: 15, hour: 5, minute: 0, second: 20 }, "P15DT5H20S"),
            (DateTime { positive: true,  day: 0,  hour: 2, minute: 0, second: 0 },  "PT2H"),
            (DateTime { positive: false, day: 0,  hour: 0, minute: 0, second: 0 },  "-PT0S"),
            (DateTime { positive: true,  day: 2,  hour: 0, minute: 0, second: 0 },  "P2D"),
            (Week { positive: false, week: 3 }, "-P3W"),
        ];
        for (duration, expected) in cases {
            let written = duration.to_string();
            assert_eq!(written, expected);
            assert_eq!(parse(&written).unwrap(), duration, "Round trip of {written}");
        }
    }

    #[test]
    fn converts_to_signed_duration() {
        assert_eq!(
            ValueDuration::time(2, 0, 0).to_signed_duration(),
            jiff::SignedDuration::from_hours(2)
        );
        let week = ValueDuration::Week {
            positive: false,
            week: 1,
        };
        assert_eq!(
            week.to_signed_duration(),
            jiff::SignedDuration::from_hours(-7 * 24)
        );
    }
}
