// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Marshal iCalendar property values and validate component trees.
//!
//! Every supported property value reads and writes three wire forms: the
//! RFC 5545 text form, xCal (RFC 6321) XML elements and jCal (RFC 7265) JSON
//! values. Readers collect coded warnings instead of failing on the first
//! malformed entry, and [`validate`] checks a component tree against the
//! RFC 5545 cardinality and consistency rules.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
pub mod config;
pub mod keyword;
pub mod marshal;
pub mod property;
pub mod tree;
pub mod validate;
pub mod value;
pub mod warning;
pub mod xml;

pub use crate::component::{CalendarComponent, Component, ComponentKind};
pub use crate::config::{CodecConfig, ConfigError};
pub use crate::marshal::{
    CannotParse, ParseResult, Parsed, PropertyMarshaller, parse_json, parse_text, parse_xml,
    write_json, write_text, write_xml,
};
pub use crate::property::{Property, PropertyKind, PropertyValue, ValueArity, ValueClass};
pub use crate::tree::{JCalField, JCalScalar, JCalValue};
pub use crate::validate::validate;
pub use crate::value::{
    DateOrDateTime, Frequency, PeriodEnd, TimeZoneTag, ValueDate, ValueDateTime, ValueDuration,
    ValueGeo, ValuePeriod, ValueRecurrenceRule, ValueTime, ValueUtcOffset, WeekDay, WeekDayNum,
};
pub use crate::warning::{Warning, WarningKind};
pub use crate::xml::{XmlElement, XmlError, XmlFragment};
