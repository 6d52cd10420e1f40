// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule descriptor as defined in RFC 5545 Section 3.3.10.
//!
//! The rule is kept as a descriptor only: parts are parsed one by one so that
//! a malformed part can be dropped without losing the rest, and unknown parts
//! are carried along untouched. Nothing here expands occurrences.

use std::fmt::{self, Display};

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{DateOrDateTime, value_date_or_date_time};
use crate::value::miscellaneous::{ValueExpected, digits, parse_complete, sign};

/// Recurrence rule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueRecurrenceRule {
    /// Frequency of recurrence, required by RFC 5545 but optional here
    pub freq: Option<Frequency>,
    /// Until date for recurrence
    pub until: Option<DateOrDateTime>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Position in set
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<WeekDay>,
    /// Unrecognized parts, name and values as read
    pub extensions: Vec<(String, Vec<String>)>,
}

/// Recurrence frequency
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum WeekDay {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence in month or year (optional), -53 to 53 without 0
    pub occurrence: Option<i8>,
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.occurrence {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Names of the rule parts defined by RFC 5545.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum RecurrencePartName {
    #[strum(serialize = "FREQ")]
    Freq,
    #[strum(serialize = "UNTIL")]
    Until,
    #[strum(serialize = "COUNT")]
    Count,
    #[strum(serialize = "INTERVAL")]
    Interval,
    #[strum(serialize = "BYSECOND")]
    BySecond,
    #[strum(serialize = "BYMINUTE")]
    ByMinute,
    #[strum(serialize = "BYHOUR")]
    ByHour,
    #[strum(serialize = "BYDAY")]
    ByDay,
    #[strum(serialize = "BYMONTHDAY")]
    ByMonthDay,
    #[strum(serialize = "BYYEARDAY")]
    ByYearDay,
    #[strum(serialize = "BYWEEKNO")]
    ByWeekNo,
    #[strum(serialize = "BYMONTH")]
    ByMonth,
    #[strum(serialize = "BYSETPOS")]
    BySetPos,
    #[strum(serialize = "WKST")]
    Wkst,
}

impl RecurrencePartName {
    /// Whether the part takes a comma-separated list.
    #[must_use]
    pub const fn is_list(self) -> bool {
        !matches!(
            self,
            Self::Freq | Self::Until | Self::Count | Self::Interval | Self::Wkst
        )
    }
}

/// One parsed item of a rule part.
///
/// List parts yield one `RecurrencePart` per list item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum RecurrencePart {
    Freq(Frequency),
    Until(DateOrDateTime),
    Count(u32),
    Interval(u32),
    BySecond(u8),
    ByMinute(u8),
    ByHour(u8),
    ByDay(WeekDayNum),
    ByMonthDay(i8),
    ByYearDay(i16),
    ByWeekNo(i8),
    ByMonth(u8),
    BySetPos(i16),
    Wkst(WeekDay),
}

impl RecurrencePart {
    /// Parse a single item of the named part.
    #[must_use]
    pub fn parse(name: RecurrencePartName, item: &str) -> Option<Self> {
        use RecurrencePartName as N;

        let int = |min, max, signed| parse_complete(ranged(min, max, signed), item);
        Some(match name {
            N::Freq => Self::Freq(item.parse().ok()?),
            N::Until => Self::Until(parse_complete(value_date_or_date_time(), item)?),
            N::Count => Self::Count(u32::try_from(int(1, i32::MAX, false)?).ok()?),
            N::Interval => Self::Interval(u32::try_from(int(1, i32::MAX, false)?).ok()?),
            N::BySecond => Self::BySecond(u8::try_from(int(0, 60, false)?).ok()?),
            N::ByMinute => Self::ByMinute(u8::try_from(int(0, 59, false)?).ok()?),
            N::ByHour => Self::ByHour(u8::try_from(int(0, 23, false)?).ok()?),
            N::ByDay => Self::ByDay(parse_complete(weekdaynum(), item)?),
            N::ByMonthDay => Self::ByMonthDay(i8::try_from(int(1, 31, true)?).ok()?),
            N::ByYearDay => Self::ByYearDay(i16::try_from(int(1, 366, true)?).ok()?),
            N::ByWeekNo => Self::ByWeekNo(i8::try_from(int(1, 53, true)?).ok()?),
            N::ByMonth => Self::ByMonth(u8::try_from(int(1, 12, false)?).ok()?),
            N::BySetPos => Self::BySetPos(i16::try_from(int(1, 366, true)?).ok()?),
            N::Wkst => Self::Wkst(item.parse().ok()?),
        })
    }
}

/// A rule-part item as written out: jCal keeps numbers as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceItem {
    /// Numeric item
    Integer(i64),
    /// Any other item
    Text(String),
}

impl Display for RecurrenceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl ValueRecurrenceRule {
    /// Whether the rule has no parts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the rule restricts occurrences below day granularity.
    #[must_use]
    pub fn has_time_restriction(&self) -> bool {
        !self.by_hour.is_empty() || !self.by_minute.is_empty() || !self.by_second.is_empty()
    }

    /// Merge a parsed part item into the rule.
    ///
    /// Returns `false`, leaving the rule untouched, when a single-valued part
    /// is already set.
    pub fn apply(&mut self, part: RecurrencePart) -> bool {
        fn set<T>(slot: &mut Option<T>, value: T) -> bool {
            if slot.is_some() {
                return false;
            }
            *slot = Some(value);
            true
        }

        match part {
            RecurrencePart::Freq(v) => return set(&mut self.freq, v),
            RecurrencePart::Until(v) => return set(&mut self.until, v),
            RecurrencePart::Count(v) => return set(&mut self.count, v),
            RecurrencePart::Interval(v) => return set(&mut self.interval, v),
            RecurrencePart::Wkst(v) => return set(&mut self.wkst, v),
            RecurrencePart::BySecond(v) => self.by_second.push(v),
            RecurrencePart::ByMinute(v) => self.by_minute.push(v),
            RecurrencePart::ByHour(v) => self.by_hour.push(v),
            RecurrencePart::ByDay(v) => self.by_day.push(v),
            RecurrencePart::ByMonthDay(v) => self.by_month_day.push(v),
            RecurrencePart::ByYearDay(v) => self.by_year_day.push(v),
            RecurrencePart::ByWeekNo(v) => self.by_week_no.push(v),
            RecurrencePart::ByMonth(v) => self.by_month.push(v),
            RecurrencePart::BySetPos(v) => self.by_set_pos.push(v),
        }
        true
    }

    /// The parts in canonical order, extensions last.
    ///
    /// Names are upper case. With `extended`, UNTIL is formatted in the
    /// ISO 8601 extended form used by xCal and jCal.
    #[must_use]
    pub fn to_parts(&self, extended: bool) -> Vec<(String, Vec<RecurrenceItem>)> {
        fn ints<T: Copy + Into<i64>>(values: &[T]) -> Vec<RecurrenceItem> {
            values
                .iter()
                .map(|v| RecurrenceItem::Integer((*v).into()))
                .collect()
        }

        let mut parts = Vec::new();
        let mut push = |name: &str, items: Vec<RecurrenceItem>| {
            if !items.is_empty() {
                parts.push((name.to_owned(), items));
            }
        };

        push(
            KW_RRULE_FREQ,
            self.freq
                .iter()
                .map(|f| RecurrenceItem::Text(f.to_string()))
                .collect(),
        );
        push(
            KW_RRULE_UNTIL,
            self.until
                .iter()
                .map(|u| {
                    RecurrenceItem::Text(if extended {
                        u.to_extended_string()
                    } else {
                        u.to_string()
                    })
                })
                .collect(),
        );
        push(KW_RRULE_COUNT, ints(self.count.as_slice()));
        push(KW_RRULE_INTERVAL, ints(self.interval.as_slice()));
        push(KW_RRULE_BYSECOND, ints(&self.by_second));
        push(KW_RRULE_BYMINUTE, ints(&self.by_minute));
        push(KW_RRULE_BYHOUR, ints(&self.by_hour));
        push(
            KW_RRULE_BYDAY,
            self.by_day
                .iter()
                .map(|d| RecurrenceItem::Text(d.to_string()))
                .collect(),
        );
        push(KW_RRULE_BYMONTHDAY, ints(&self.by_month_day));
        push(KW_RRULE_BYYEARDAY, ints(&self.by_year_day));
        push(KW_RRULE_BYWEEKNO, ints(&self.by_week_no));
        push(KW_RRULE_BYMONTH, ints(&self.by_month));
        push(KW_RRULE_BYSETPOS, ints(&self.by_set_pos));
        push(
            KW_RRULE_WKST,
            self.wkst
                .iter()
                .map(|d| RecurrenceItem::Text(d.to_string()))
                .collect(),
        );
        for (name, values) in &self.extensions {
            push(
                name.as_str(),
                values.iter().cloned().map(RecurrenceItem::Text).collect(),
            );
        }
        parts
    }
}

impl Display for ValueRecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, items)) in self.to_parts(false).iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{name}=")?;
            for (j, item) in items.iter().enumerate() {
                if j > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{item}")?;
            }
        }
        Ok(())
    }
}

/// An integer within `min..=max`; signed variants accept `+`/`-` and check
/// the magnitude, unsigned ones reject any sign.
fn ranged<'src, I, E>(min: i32, max: i32, signed: bool) -> impl Parser<'src, I, i32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    sign()
        .or_not()
        .then(digits())
        .try_map(move |(sign, digits), span| {
            let out_of_range = || E::Error::expected_found([ValueExpected::OutOfRange], None, span);
            if sign.is_some() && !signed {
                return Err(out_of_range());
            }
            let magnitude = lexical::parse::<i32, _>(&digits).map_err(|_| out_of_range())?;
            if !(min..=max).contains(&magnitude) {
                return Err(out_of_range());
            }
            Ok(if sign == Some('-') {
                -magnitude
            } else {
                magnitude
            })
        })
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let ordwk = ranged(1, 53, true).map(|n| i8::try_from(n).unwrap_or_default());

    let weekday = select! { c if char::is_ascii_alphabetic(&c) => c }
        .repeated()
        .exactly(2)
        .collect::<String>()
        .try_map(|s, span| {
            s.parse::<WeekDay>()
                .map_err(|_| E::Error::expected_found([ValueExpected::WeekDay], None, span))
        });

    ordwk
        .or_not()
        .then(weekday)
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

#[cfg(test)]
mod tests {
    use crate::value::ValueDate;

    use super::*;

    #[test]
    fn parses_parts() {
        use RecurrencePartName as N;

        #[rustfmt::skip]
        let success_cases = [
            (N::Freq,       "DAILY",    RecurrencePart::Freq(Frequency::Daily)),
            (N::Freq,       "weekly",   RecurrencePart::Freq(Frequency::Weekly)),
            (N::Until,      "19971224", RecurrencePart::Until(DateOrDateTime::Date(ValueDate { year: 1997, month: 12, day: 24 }))),
            (N::Count,      "10",       RecurrencePart::Count(10)),
            (N::Interval,   "2",        RecurrencePart::Interval(2)),
            (N::BySecond,   "60",       RecurrencePart::BySecond(60)),
            (N::ByHour,     "9",        RecurrencePart::ByHour(9)),
            (N::ByDay,      "MO",       RecurrencePart::ByDay(WeekDayNum { day: WeekDay::Monday, occurrence: None })),
            (N::ByDay,      "-1SU",     RecurrencePart::ByDay(WeekDayNum { day: WeekDay::Sunday, occurrence: Some(-1) })),
            (N::ByDay,      "+2TU",     RecurrencePart::ByDay(WeekDayNum { day: WeekDay::Tuesday, occurrence: Some(2) })),
            (N::ByMonthDay, "-31",      RecurrencePart::ByMonthDay(-31)),
            (N::ByYearDay,  "366",      RecurrencePart::ByYearDay(366)),
            (N::ByWeekNo,   "-53",      RecurrencePart::ByWeekNo(-53)),
            (N::ByMonth,    "12",       RecurrencePart::ByMonth(12)),
            (N::BySetPos,   "-1",       RecurrencePart::BySetPos(-1)),
            (N::Wkst,       "SU",       RecurrencePart::Wkst(WeekDay::Sunday)),
        ];
        for (name, item, expected) in success_cases {
            assert_eq!(RecurrencePart::parse(name, item), Some(expected), "Failed: {item}");
        }

        #[rustfmt::skip]
        let fail_cases = [
            (N::Freq,       "FORTNIGHTLY"),
            (N::Until,      "invalid"),
            (N::Count,      "0"),
            (N::Count,      "-1"),
            (N::BySecond,   "61"),
            (N::ByMinute,   "60"),
            (N::ByHour,     "24"),
            (N::ByHour,     "+1"),
            (N::ByDay,      "XX"),
            (N::ByDay,      "54MO"),
            (N::ByMonthDay, "0"),
            (N::ByMonthDay, "32"),
            (N::ByMonth,    "13"),
            (N::Wkst,       "1MO"),
        ];
        for (name, item) in fail_cases {
            assert!(RecurrencePart::parse(name, item).is_none(), "Parse {item} should fail");
        }
    }

    #[test]
    fn reads_weekday_letters() {
        let day = |item: &str| parse_complete(weekdaynum(), item);
        assert_eq!(
            day("1FR"),
            Some(WeekDayNum {
                day: WeekDay::Friday,
                occurrence: Some(1)
            })
        );
        for item in ["M0", "MON", "2", "", "1 MO"] {
            assert!(day(item).is_none(), "{item}");
        }
    }

    #[test]
    fn applies_and_writes_parts() {
        let mut rule = ValueRecurrenceRule::default();
        assert!(rule.is_empty());
        assert!(rule.apply(RecurrencePart::Freq(Frequency::Monthly)));
        assert!(!rule.apply(RecurrencePart::Freq(Frequency::Daily)));
        assert!(rule.apply(RecurrencePart::ByDay(WeekDayNum {
            day: WeekDay::Monday,
            occurrence: Some(-1),
        })));
        assert!(rule.apply(RecurrencePart::ByDay(WeekDayNum {
            day: WeekDay::Friday,
            occurrence: None,
        })));
        assert!(rule.apply(RecurrencePart::Count(5)));
        rule.extensions
            .push(("X-NAME".to_owned(), vec!["value".to_owned()]));

        assert_eq!(rule.freq, Some(Frequency::Monthly));
        assert!(!rule.has_time_restriction());
        assert_eq!(
            rule.to_string(),
            "FREQ=MONTHLY;COUNT=5;BYDAY=-1MO,FR;X-NAME=value"
        );

        assert!(rule.apply(RecurrencePart::ByMinute(30)));
        assert!(rule.has_time_restriction());
    }
}
