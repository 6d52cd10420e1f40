// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by the codecs.

use crate::marshal::CannotParse;
use crate::property::PropertyKind;
use crate::tree::JCalValue;
use crate::warning::{Warning, WarningKind};
use crate::xml::XmlFragment;

/// Build the cannot-parse outcome, keeping the warnings gathered so far.
pub(crate) fn cannot_parse(
    kind: &PropertyKind,
    reason: impl Into<String>,
    warnings: Vec<Warning>,
) -> CannotParse {
    let reason = reason.into();
    tracing::debug!(property = %kind, %reason, "cannot parse property value");
    CannotParse {
        property: kind.name().to_owned(),
        reason,
        warnings,
    }
}

/// A warning about one dropped entry of a list-valued property.
pub(crate) fn dropped_entry(kind: &PropertyKind, warning: WarningKind) -> Warning {
    tracing::debug!(property = %kind, entry = %warning, "dropping malformed entry");
    Warning::new(warning, vec![kind.name().to_owned()])
}

/// The text of a single-scalar jCal value.
pub(crate) fn single_text(value: &JCalValue) -> Option<String> {
    match value {
        JCalValue::Single(scalar) => scalar.as_text(),
        JCalValue::Multi(_) | JCalValue::Structured(_) => None,
    }
}

/// The text of the first top-level element with the given name.
pub(crate) fn element_text<'a>(fragment: &'a XmlFragment, name: &str) -> Option<&'a str> {
    fragment.find(name).map(|e| e.text.as_str())
}

