// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.
#![allow(clippy::as_conversions)]

use crate::error::CoercionError;
use crate::schema::SemanticType;
use crate::Rc;

use core::cmp::Ordering;
use core::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

/// A record or literal value after coercion to its field's declared type.
///
/// Both sides of every comparison are coerced to the same declared type, so
/// operators only ever compare values of the same variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// byte, short, integer and long fields.
    Integer(i64),
    /// half_float, float and double fields.
    Float(f64),
    /// keyword, text, binary and ip fields.
    String(Rc<str>),
    Boolean(bool),
    Date(DateTime<Utc>),
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Values of different variants are unordered.
impl PartialOrd for TypedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::Integer(a), TypedValue::Integer(b)) => a.partial_cmp(b),
            (TypedValue::Float(a), TypedValue::Float(b)) => a.partial_cmp(b),
            (TypedValue::String(a), TypedValue::String(b)) => a.partial_cmp(b),
            (TypedValue::Boolean(a), TypedValue::Boolean(b)) => a.partial_cmp(b),
            (TypedValue::Date(a), TypedValue::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Integer(i) => write!(f, "{i}"),
            TypedValue::Float(n) => write!(f, "{n}"),
            TypedValue::String(s) => write!(f, "{s:?}"),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Date(d) => {
                write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        TypedValue::Integer(i)
    }
}

impl From<f64> for TypedValue {
    fn from(n: f64) -> Self {
        TypedValue::Float(n)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Boolean(b)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.into())
    }
}

impl From<DateTime<Utc>> for TypedValue {
    fn from(d: DateTime<Utc>) -> Self {
        TypedValue::Date(d)
    }
}

/// Coerce a raw leaf to `semantic_type`.
///
/// | declared type          | raw kind | result                                   |
/// |------------------------|----------|------------------------------------------|
/// | date                   | string   | RFC 3339 timestamp, nanosecond precision |
/// | keyword, text, binary, ip | string | unchanged                              |
/// | byte / short / integer | number   | wrapped through an 8/16/32-bit window    |
/// | long                   | number   | `i64`                                    |
/// | half_float, float      | number   | rounded through `f32`                    |
/// | double                 | number   | `f64`                                    |
/// | boolean                | bool     | unchanged                                |
///
/// Everything else, including geo types, is an [`CoercionError::InvalidValue`].
/// A null leaf is always [`CoercionError::Null`].
pub fn coerce(raw: &Value, semantic_type: SemanticType) -> Result<TypedValue, CoercionError> {
    use SemanticType::*;

    Ok(match (semantic_type, raw) {
        (_, Value::Null) => return Err(CoercionError::Null),
        (Date, Value::String(s)) => TypedValue::Date(
            parse_date(s).ok_or_else(|| invalid(semantic_type, raw))?,
        ),
        (Keyword | Text | Binary | Ip, Value::String(s)) => TypedValue::String(s.as_str().into()),
        (Byte, Value::Number(n)) => TypedValue::Integer(widen(n) as i8 as i64),
        (Short, Value::Number(n)) => TypedValue::Integer(widen(n) as i16 as i64),
        (Integer, Value::Number(n)) => TypedValue::Integer(widen(n) as i32 as i64),
        (Long, Value::Number(n)) => TypedValue::Integer(widen(n)),
        (HalfFloat | Float, Value::Number(n)) => TypedValue::Float(to_f64(n) as f32 as f64),
        (Double, Value::Number(n)) => TypedValue::Float(to_f64(n)),
        (Boolean, Value::Bool(b)) => TypedValue::Boolean(*b),
        _ => return Err(invalid(semantic_type, raw)),
    })
}

/// Like [`coerce`], but integer types only accept integral numbers that fit
/// the declared width. Used for literals, which must mean what they say.
pub(crate) fn coerce_exact(
    raw: &Value,
    semantic_type: SemanticType,
) -> Result<TypedValue, CoercionError> {
    use SemanticType::*;

    let Value::Number(n) = raw else {
        return coerce(raw, semantic_type);
    };
    if !semantic_type.is_integer() {
        return coerce(raw, semantic_type);
    }

    exact_i64(n)
        .filter(|i| match semantic_type {
            Byte => i8::try_from(*i).is_ok(),
            Short => i16::try_from(*i).is_ok(),
            Integer => i32::try_from(*i).is_ok(),
            _ => true,
        })
        .map(TypedValue::Integer)
        .ok_or_else(|| invalid(semantic_type, raw))
}

/// Parse an RFC 3339 timestamp with up to nanosecond precision.
pub(crate) fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

// Integral view of a json number. Fractions are truncated toward zero.
fn widen(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).unwrap_or(i64::MAX)
    } else {
        to_f64(n) as i64
    }
}

// Integral view of a json number, `None` for fractions and out of range values.
fn exact_i64(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        let f = n.as_f64()?;
        (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
    })
}

fn to_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or_default()
}

fn invalid(semantic_type: SemanticType, raw: &Value) -> CoercionError {
    CoercionError::InvalidValue {
        semantic_type,
        value: raw.to_string(),
    }
}
