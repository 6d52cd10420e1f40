// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property value marshalling across the three wire formats.
//!
//! Every value class has a codec implementing [`PropertyMarshaller`]: six
//! pure functions writing and parsing the text format (RFC 5545), xCal
//! (RFC 6321) and jCal (RFC 7265). Writers never fail. Parsers recover what
//! they can: list-valued kinds drop a malformed entry with one warning,
//! scalar kinds succeed or fail as a whole, and an input with nothing usable
//! yields [`CannotParse`].
//!
//! The free functions at the bottom pick the codec for a [`PropertyKind`].

mod date_time;
mod duration;
mod geo;
mod integer;
mod period;
mod rrule;
mod text;
mod utc_offset;
mod util;

pub use date_time::DateTimeMarshaller;
pub use duration::DurationMarshaller;
pub use geo::GeoMarshaller;
pub use integer::IntegerMarshaller;
pub use period::PeriodMarshaller;
pub use rrule::RecurrenceRuleMarshaller;
pub use text::TextMarshaller;
pub use utc_offset::UtcOffsetMarshaller;

use crate::config::CodecConfig;
use crate::property::{Property, PropertyKind, PropertyValue, ValueClass};
use crate::tree::JCalValue;
use crate::warning::Warning;
use crate::xml::XmlFragment;

/// A parsed value with the warnings raised while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// The value
    pub value: T,

    /// Recoverable problems, in input order
    pub warnings: Vec<Warning>,
}

impl<T> Parsed<T> {
    /// A value read without warnings.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// A value with warnings.
    #[must_use]
    pub const fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// Map the value, keeping the warnings.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Nothing usable could be read from the input.
///
/// Distinct from an empty value with warnings: the caller should drop the
/// property rather than keep an empty one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {property} value: {reason}")]
pub struct CannotParse {
    /// Property name
    pub property: String,

    /// What was wrong
    pub reason: String,

    /// Warnings gathered before giving up
    pub warnings: Vec<Warning>,
}

/// Outcome of a parse.
pub type ParseResult<T> = Result<Parsed<T>, CannotParse>;

/// Reads and writes one class of property values in all three formats.
pub trait PropertyMarshaller {
    /// The typed value.
    type Value;

    /// Write the raw, unfolded text value.
    fn write_text(&self, value: &Self::Value) -> String;

    /// Read a raw, unfolded text value.
    ///
    /// # Errors
    ///
    /// Returns [`CannotParse`] when nothing usable could be read.
    fn parse_text(&self, src: &str) -> ParseResult<Self::Value>;

    /// Write the xCal value elements.
    fn write_xml(&self, value: &Self::Value) -> XmlFragment;

    /// Read the xCal value elements.
    ///
    /// # Errors
    ///
    /// Returns [`CannotParse`] when nothing usable could be read.
    fn parse_xml(&self, fragment: &XmlFragment) -> ParseResult<Self::Value>;

    /// Write the jCal value tail.
    fn write_json(&self, value: &Self::Value) -> JCalValue;

    /// Read the jCal value tail.
    ///
    /// # Errors
    ///
    /// Returns [`CannotParse`] when nothing usable could be read.
    fn parse_json(&self, value: &JCalValue) -> ParseResult<Self::Value>;
}

macro_rules! dispatch_write {
    ($property:expr, $config:expr, $method:ident) => {{
        let kind = $property.kind.clone();
        match &$property.value {
            PropertyValue::Periods(v) => PeriodMarshaller::new(kind).$method(v),
            PropertyValue::Geo(v) => GeoMarshaller::new(kind, $config).$method(v),
            PropertyValue::Duration(v) => DurationMarshaller::new(kind).$method(v),
            PropertyValue::DateTime(v) => DateTimeMarshaller::new(kind).$method(v),
            PropertyValue::Recurrence(v) => RecurrenceRuleMarshaller::new(kind).$method(v),
            PropertyValue::Integer(v) => IntegerMarshaller::new(kind).$method(v),
            PropertyValue::UtcOffset(v) => UtcOffsetMarshaller::new(kind).$method(v),
            PropertyValue::Text(v) => TextMarshaller::new(kind).$method(v),
        }
    }};
}

macro_rules! dispatch_parse {
    ($kind:expr, $config:expr, $method:ident, $input:expr) => {{
        let kind = $kind.clone();
        match kind.value_class() {
            ValueClass::PeriodList => PeriodMarshaller::new(kind)
                .$method($input)
                .map(|p| p.map(PropertyValue::Periods)),
            ValueClass::Geo => GeoMarshaller::new(kind, $config)
                .$method($input)
                .map(|p| p.map(PropertyValue::Geo)),
            ValueClass::Duration => DurationMarshaller::new(kind)
                .$method($input)
                .map(|p| p.map(PropertyValue::Duration)),
            ValueClass::DateTime => DateTimeMarshaller::new(kind)
                .$method($input)
                .map(|p| p.map(PropertyValue::DateTime)),
            ValueClass::RecurrenceRule => RecurrenceRuleMarshaller::new(kind)
                .$method($input)
                .map(|p| p.map(PropertyValue::Recurrence)),
            ValueClass::Integer => IntegerMarshaller::new(kind)
                .$method($input)
                .map(|p| p.map(PropertyValue::Integer)),
            ValueClass::UtcOffset => UtcOffsetMarshaller::new(kind)
                .$method($input)
                .map(|p| p.map(PropertyValue::UtcOffset)),
            ValueClass::Text | ValueClass::Uri | ValueClass::CalAddress | ValueClass::Unknown => {
                TextMarshaller::new(kind)
                    .$method($input)
                    .map(|p| p.map(PropertyValue::Text))
            }
        }
    }};
}

/// Write a property value in the text format.
#[must_use]
pub fn write_text(property: &Property, config: &CodecConfig) -> String {
    dispatch_write!(property, config, write_text)
}

/// Read a text value for the given property kind.
///
/// # Errors
///
/// Returns [`CannotParse`] when nothing usable could be read.
pub fn parse_text(
    kind: &PropertyKind,
    src: &str,
    config: &CodecConfig,
) -> ParseResult<PropertyValue> {
    dispatch_parse!(kind, config, parse_text, src)
}

/// Write a property value as xCal elements.
#[must_use]
pub fn write_xml(property: &Property, config: &CodecConfig) -> XmlFragment {
    dispatch_write!(property, config, write_xml)
}

/// Read xCal elements for the given property kind.
///
/// # Errors
///
/// Returns [`CannotParse`] when nothing usable could be read.
pub fn parse_xml(
    kind: &PropertyKind,
    fragment: &XmlFragment,
    config: &CodecConfig,
) -> ParseResult<PropertyValue> {
    dispatch_parse!(kind, config, parse_xml, fragment)
}

/// Write a property value as a jCal value tail.
#[must_use]
pub fn write_json(property: &Property, config: &CodecConfig) -> JCalValue {
    dispatch_write!(property, config, write_json)
}

/// Read a jCal value tail for the given property kind.
///
/// # Errors
///
/// Returns [`CannotParse`] when nothing usable could be read.
pub fn parse_json(
    kind: &PropertyKind,
    value: &JCalValue,
    config: &CodecConfig,
) -> ParseResult<PropertyValue> {
    dispatch_parse!(kind, config, parse_json, value)
}
