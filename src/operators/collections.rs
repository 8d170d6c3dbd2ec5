// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::ConditionConfig;
use crate::error::ConstructionError;
use crate::operators::utils::{
    coerce_literal, coerce_literals, ensure_field_type, ensure_literal, shape_error,
};
use crate::operators::{LeafBuilder, Operator};
use crate::predicate::ConditionKind;
use crate::schema::{Field, SemanticType};
use crate::value::TypedValue;

use std::collections::HashMap;

use serde_json::Value;

pub fn register(m: &mut HashMap<Operator, LeafBuilder>) {
    m.insert(Operator::Contain, build_contain);
    m.insert(Operator::NotContain, build_contain);
    m.insert(Operator::Exist, build_exist);
    m.insert(Operator::NotExist, build_exist);
}

fn build_contain(
    op: Operator,
    field: &Field,
    config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    ensure_field_type(op, field, SemanticType::is_comparable)?;
    let operands = match ensure_literal(op, field, config)? {
        Value::Array(items) if items.is_empty() => {
            return Err(shape_error(op, field, "a value or a non-empty array"))
        }
        Value::Array(items) => coerce_literals(op, field, items)?,
        value => vec![coerce_literal(op, field, value)?],
    };

    Ok(ConditionKind::Contain {
        negated: op == Operator::NotContain,
        operands,
    })
}

// Takes no literal and works on any declared type.
fn build_exist(
    op: Operator,
    _field: &Field,
    _config: &ConditionConfig,
) -> Result<ConditionKind, ConstructionError> {
    Ok(ConditionKind::Exist {
        negated: op == Operator::NotExist,
    })
}

/// `contain` passes when every operand occurs in `left`; `not_contain` when
/// none does. An empty `left` fails `contain` and passes `not_contain`.
pub fn contain(negated: bool, left: &[TypedValue], operands: &[TypedValue]) -> bool {
    if left.is_empty() {
        return negated;
    }

    if negated {
        !operands.iter().any(|v| left.contains(v))
    } else {
        operands.iter().all(|v| left.contains(v))
    }
}

/// `exist` passes when the field resolves to at least one value. Values are
/// not coerced, so any declared type can be tested.
pub fn exist(negated: bool, present: bool) -> bool {
    present != negated
}
