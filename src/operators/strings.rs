// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::ConditionConfig;
use crate::error::{ConstructionError, EvaluationError};
use crate::operators::utils::{ensure_field_type, ensure_literal, ensure_single, shape_error};
use crate::operators::{LeafBuilder, Operator};
use crate::predicate::ConditionKind;
use crate::schema::{Field, SemanticType};
use crate::value::TypedValue;
use crate::Rc;

use std::collections::HashMap;

#[cfg(feature = "regex")]
use regex::Regex;

pub fn register(m: &mut HashMap<Operator, LeafBuilder>) {
    m.insert(Operator::Like, build_like);
    m.insert(Operator::NotLike, build_like);
    m.insert(Operator::Empty, build_empty);
    m.insert(Operator::NotEmpty, build_empty);
    #[cfg(feature = "regex")]
    m.insert(Operator::Regex, build_regex);
}

fn string_literal(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<Rc<str>, ConstructionError> {
    ensure_field_type(op, field, SemanticType::is_string)?;
    let value = ensure_literal(op, field, config)?;
    match ensure_single(op, field, value)? {
        TypedValue::String(s) => Ok(s),
        _ => Err(shape_error(op, field, "a string")),
    }
}

// An empty pattern is accepted here and reported per record.
fn build_like(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    Ok(ConditionKind::Like {
        negated: op == Operator::NotLike,
        pattern: string_literal(op, field, config)?,
    })
}

fn build_empty(
    op: Operator,
    field: &Field,
    _config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    ensure_field_type(op, field, SemanticType::is_string)?;
    Ok(ConditionKind::Empty {
        negated: op == Operator::NotEmpty,
    })
}

#[cfg(feature = "regex")]
fn build_regex(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    let pattern = string_literal(op, field, config)?;
    let regex = Regex::new(&pattern).map_err(|e| ConstructionError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(ConditionKind::Regex(regex))
}

/// Case-sensitive substring test. An absent value passes neither `like` nor
/// `not_like`.
pub fn like(
    negated: bool,
    field: &Field,
    left: Option<&TypedValue>,
    pattern: &str,
) -> Result<bool, EvaluationError> {
    if pattern.is_empty() {
        return Err(EvaluationError::EmptyPattern {
            field: field.name().to_string(),
        });
    }

    Ok(match left.and_then(TypedValue::as_str) {
        Some(s) => s.contains(pattern) != negated,
        None => false,
    })
}

/// `empty` passes for a present, zero-length string; `not_empty` for a present,
/// non-empty one.
pub fn empty(negated: bool, left: Option<&TypedValue>) -> bool {
    match left.and_then(TypedValue::as_str) {
        Some(s) => s.is_empty() != negated,
        None => false,
    }
}

/// Only the first extracted value is matched.
#[cfg(feature = "regex")]
pub fn regex_match(regex: &Regex, values: &[TypedValue]) -> bool {
    values
        .first()
        .and_then(TypedValue::as_str)
        .is_some_and(|s| regex.is_match(s))
}
