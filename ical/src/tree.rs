// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Intermediate value tree for jCal (RFC 7265) property values.
//!
//! A jCal property is `[name, params, type, value...]`. The value tail is
//! either one scalar, several scalars, or one structured value (an array for
//! positional fields like GEO, an object for named fields like RECUR).

use serde_json::{Map, Number, Value};

/// A leaf of the value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JCalScalar {
    /// JSON `null`, an absent value
    #[default]
    Null,
    /// JSON boolean
    Boolean(bool),
    /// JSON integer
    Integer(i64),
    /// JSON non-integer number
    Float(f64),
    /// JSON string
    Text(String),
}

impl JCalScalar {
    /// The text view of the scalar; `Null` has none.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Boolean(b) => Some(b.to_string()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }

    /// Whether the scalar is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(n) => Value::Number((*n).into()),
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64()?),
            },
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => return None,
        })
    }
}

impl From<&str> for JCalScalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for JCalScalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for JCalScalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for JCalScalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for JCalScalar {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<JCalScalar>> From<Option<T>> for JCalScalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One field of a structured value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JCalField {
    /// Field name, `None` for positional fields
    pub name: Option<String>,

    /// Field values; more than one for list-valued fields
    pub values: Vec<JCalScalar>,
}

impl JCalField {
    /// A positional field with one value.
    #[must_use]
    pub fn positional(value: impl Into<JCalScalar>) -> Self {
        Self {
            name: None,
            values: vec![value.into()],
        }
    }

    /// A named field.
    #[must_use]
    pub fn named(name: impl Into<String>, values: Vec<JCalScalar>) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }
}

/// The value tail of a jCal property.
#[derive(Debug, Clone, PartialEq)]
pub enum JCalValue {
    /// One scalar
    Single(JCalScalar),
    /// Several scalars
    Multi(Vec<JCalScalar>),
    /// One structured value
    Structured(Vec<JCalField>),
}

impl Default for JCalValue {
    fn default() -> Self {
        Self::Multi(Vec::new())
    }
}

impl JCalValue {
    /// A single scalar value.
    #[must_use]
    pub fn single(value: impl Into<JCalScalar>) -> Self {
        Self::Single(value.into())
    }

    /// Whether the value carries nothing: no scalars, no fields, a `null` or
    /// an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(JCalScalar::Null) => true,
            Self::Single(JCalScalar::Text(s)) => s.is_empty(),
            Self::Single(_) => false,
            Self::Multi(values) => values.is_empty(),
            Self::Structured(fields) => fields.is_empty(),
        }
    }

    /// The scalars of a `Single` or `Multi` value.
    #[must_use]
    pub fn scalars(&self) -> &[JCalScalar] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
            Self::Structured(_) => &[],
        }
    }

    /// Produce the value tail of a jCal property array.
    #[must_use]
    pub fn to_json_values(&self) -> Vec<Value> {
        match self {
            Self::Single(value) => vec![value.to_json()],
            Self::Multi(values) => values.iter().map(JCalScalar::to_json).collect(),
            Self::Structured(fields) if fields.iter().all(|f| f.name.is_some()) => {
                let mut object = Map::new();
                for field in fields {
                    let name = field.name.clone().unwrap_or_default();
                    object.insert(name, field_to_json(&field.values));
                }
                vec![Value::Object(object)]
            }
            Self::Structured(fields) => {
                let array = fields.iter().map(|f| field_to_json(&f.values)).collect();
                vec![Value::Array(array)]
            }
        }
    }

    /// Read the value tail of a jCal property array.
    ///
    /// Returns `None` when the shape fits none of the tree variants, such as
    /// a nested structure mixed with scalars.
    #[must_use]
    pub fn from_json_values(values: &[Value]) -> Option<Self> {
        match values {
            [Value::Object(object)] => object
                .iter()
                .map(|(name, value)| {
                    Some(JCalField {
                        name: Some(name.clone()),
                        values: field_from_json(value)?,
                    })
                })
                .collect::<Option<Vec<_>>>()
                .map(Self::Structured),
            [Value::Array(array)] => array
                .iter()
                .map(|value| {
                    Some(JCalField {
                        name: None,
                        values: field_from_json(value)?,
                    })
                })
                .collect::<Option<Vec<_>>>()
                .map(Self::Structured),
            [value] => JCalScalar::from_json(value).map(Self::Single),
            values => values
                .iter()
                .map(JCalScalar::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::Multi),
        }
    }
}

fn field_to_json(values: &[JCalScalar]) -> Value {
    match values {
        [value] => value.to_json(),
        values => Value::Array(values.iter().map(JCalScalar::to_json).collect()),
    }
}

fn field_from_json(value: &Value) -> Option<Vec<JCalScalar>> {
    match value {
        Value::Array(items) => items.iter().map(JCalScalar::from_json).collect(),
        value => Some(vec![JCalScalar::from_json(value)?]),
    }
}
