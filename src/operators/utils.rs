// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::{ConditionConfig, VALUE_FROM_CONSTANT};
use crate::error::ConstructionError;
use crate::operators::Operator;
use crate::schema::{Field, SemanticType};
use crate::value::{coerce_exact, TypedValue};

use serde_json::Value;

pub fn ensure_field_type(
    op: Operator,
    field: &Field,
    accepted: fn(&SemanticType) -> bool,
) -> Result<(), ConstructionError> {
    if accepted(&field.semantic_type()) {
        Ok(())
    } else {
        Err(ConstructionError::FieldType {
            field: field.name().to_string(),
            operator: op,
            semantic_type: field.semantic_type(),
        })
    }
}

/// The literal of a leaf config. Only constant literals are supported.
pub fn ensure_literal<'c>(
    op: Operator,
    field: &Field,
    config: &'c ConditionConfig,
) -> Result<&'c Value, ConstructionError> {
    match config.value_from.as_deref() {
        Some(VALUE_FROM_CONSTANT) => (),
        other => {
            return Err(ConstructionError::UnsupportedValueSource {
                field: field.name().to_string(),
                value_from: other.unwrap_or("none").to_string(),
            })
        }
    }

    config
        .value
        .as_ref()
        .ok_or_else(|| shape_error(op, field, "a literal value"))
}

/// Coerce a literal that must not be an array.
pub fn ensure_single(
    op: Operator,
    field: &Field,
    value: &Value,
) -> Result<TypedValue, ConstructionError> {
    if value.is_array() {
        return Err(shape_error(op, field, "a single value"));
    }
    coerce_literal(op, field, value)
}

pub fn ensure_array<'v>(
    op: Operator,
    field: &Field,
    value: &'v Value,
    expected: &'static str,
) -> Result<&'v [Value], ConstructionError> {
    match value {
        Value::Array(items) => Ok(items.as_slice()),
        _ => Err(shape_error(op, field, expected)),
    }
}

/// All items must be of the same json kind.
pub fn ensure_homogeneous(
    op: Operator,
    field: &Field,
    items: &[Value],
) -> Result<(), ConstructionError> {
    fn kind(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match items.split_first() {
        Some((first, rest)) if rest.iter().any(|v| kind(v) != kind(first)) => {
            Err(ConstructionError::NonHomogeneous {
                field: field.name().to_string(),
                operator: op,
            })
        }
        _ => Ok(()),
    }
}

/// Coerce a literal to the field's declared type. Integer literals must be
/// integral and fit the field's width.
pub fn coerce_literal(
    op: Operator,
    field: &Field,
    value: &Value,
) -> Result<TypedValue, ConstructionError> {
    coerce_exact(value, field.semantic_type()).map_err(|_| ConstructionError::InvalidLiteral {
        field: field.name().to_string(),
        operator: op,
        semantic_type: field.semantic_type(),
        value: value.to_string(),
    })
}

pub fn coerce_literals(
    op: Operator,
    field: &Field,
    items: &[Value],
) -> Result<Vec<TypedValue>, ConstructionError> {
    items
        .iter()
        .map(|item| coerce_literal(op, field, item))
        .collect()
}

pub fn shape_error(op: Operator, field: &Field, expected: &'static str) -> ConstructionError {
    ConstructionError::LiteralShape {
        field: field.name().to_string(),
        operator: op,
        expected,
    }
}
