// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::ConditionConfig;
use crate::error::ConstructionError;
use crate::operators::utils::{
    coerce_literals, ensure_array, ensure_field_type, ensure_homogeneous, ensure_literal,
    ensure_single, shape_error,
};
use crate::operators::{LeafBuilder, Operator};
use crate::predicate::ConditionKind;
use crate::schema::{Field, SemanticType};
use crate::value::TypedValue;

use core::fmt;
use std::collections::HashMap;

pub fn register(m: &mut HashMap<Operator, LeafBuilder>) {
    m.insert(Operator::Eq, build_compare);
    m.insert(Operator::NotEq, build_compare);
    m.insert(Operator::Gt, build_compare);
    m.insert(Operator::Gte, build_compare);
    m.insert(Operator::Lt, build_compare);
    m.insert(Operator::Lte, build_compare);
    m.insert(Operator::In, build_membership);
    m.insert(Operator::NotIn, build_membership);
    m.insert(Operator::Range, build_range);
    m.insert(Operator::OutRange, build_range);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoolOp::Eq => "==",
            BoolOp::Ne => "!=",
            BoolOp::Lt => "<",
            BoolOp::Le => "<=",
            BoolOp::Gt => ">",
            BoolOp::Ge => ">=",
        })
    }
}

fn build_compare(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    let bool_op = match op {
        Operator::Eq => BoolOp::Eq,
        Operator::NotEq => BoolOp::Ne,
        Operator::Gt => BoolOp::Gt,
        Operator::Gte => BoolOp::Ge,
        Operator::Lt => BoolOp::Lt,
        Operator::Lte => BoolOp::Le,
        _ => return Err(ConstructionError::UnsupportedOperator(op)),
    };
    let accepted: fn(&SemanticType) -> bool = if matches!(bool_op, BoolOp::Eq | BoolOp::Ne) {
        SemanticType::is_comparable
    } else {
        SemanticType::is_ordered
    };
    ensure_field_type(op, field, accepted)?;
    let value = ensure_literal(op, field, config)?;

    Ok(ConditionKind::Compare {
        op: bool_op,
        operand: ensure_single(op, field, value)?,
    })
}

fn build_membership(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    ensure_field_type(op, field, SemanticType::is_comparable)?;
    let value = ensure_literal(op, field, config)?;
    let items = ensure_array(op, field, value, "an array")?;
    ensure_homogeneous(op, field, items)?;

    Ok(ConditionKind::Membership {
        negated: op == Operator::NotIn,
        operands: coerce_literals(op, field, items)?,
    })
}

/// Bounds are coerced with the field's own declared type, so integer, float
/// and date fields all get ranges of their own kind.
fn build_range(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    const EXPECTED: &str = "a two-element array [low, high)";

    ensure_field_type(op, field, SemanticType::is_rangeable)?;
    let value = ensure_literal(op, field, config)?;
    let items = ensure_array(op, field, value, EXPECTED)?;
    let [low, high] = items else {
        return Err(shape_error(op, field, EXPECTED));
    };

    Ok(ConditionKind::Range {
        negated: op == Operator::OutRange,
        low: ensure_single(op, field, low)?,
        high: ensure_single(op, field, high)?,
    })
}

/// Compare a single extracted value with a literal.
///
/// An absent value never compares.
pub fn compare(op: BoolOp, left: Option<&TypedValue>, right: &TypedValue) -> bool {
    let Some(left) = left else {
        return false;
    };

    match op {
        BoolOp::Eq => left == right,
        BoolOp::Ne => left != right,
        BoolOp::Lt => left < right,
        BoolOp::Le => left <= right,
        BoolOp::Gt => left > right,
        BoolOp::Ge => left >= right,
    }
}

/// `in` / `not_in`. An empty operand list or an absent value never passes.
pub fn membership(negated: bool, left: Option<&TypedValue>, operands: &[TypedValue]) -> bool {
    match left {
        Some(left) if !operands.is_empty() => operands.contains(left) != negated,
        _ => false,
    }
}

/// Half-open interval test: `range` is `low <= v < high`, `out_range` is
/// `v < low || v >= high`. An absent value passes neither.
pub fn range(
    negated: bool,
    left: Option<&TypedValue>,
    low: &TypedValue,
    high: &TypedValue,
) -> bool {
    let Some(v) = left else {
        return false;
    };

    if negated {
        v < low || v >= high
    } else {
        low <= v && v < high
    }
}
