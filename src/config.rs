// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::ConstructionError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only supported value source: the literal stored in the config itself.
pub const VALUE_FROM_CONSTANT: &str = "constant";

/// Declarative description of a condition, usually deserialized from a
/// persisted filter definition.
///
/// ```json
/// {
///   "operation": "and",
///   "sub_conditions": [
///     {"field": "age", "operation": "gte", "value_from": "constant", "value": 18},
///     {"field": "items.tag", "operation": "contain", "value_from": "constant", "value": ["a"]}
///   ]
/// }
/// ```
///
/// `and`/`or` nodes only use `sub_conditions`; every other operator reads
/// `field`, and operators taking a literal read `value_from` and `value`.
/// Null entries in `sub_conditions` are ignored by the compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionConfig {
    #[serde(default)]
    pub field: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_conditions: Vec<Option<ConditionConfig>>,
}

impl ConditionConfig {
    /// A leaf condition comparing `field` against a constant literal.
    pub fn leaf(field: &str, operation: &str, value: Value) -> Self {
        Self {
            field: field.to_string(),
            operation: operation.to_string(),
            value_from: Some(VALUE_FROM_CONSTANT.to_string()),
            value: Some(value),
            sub_conditions: vec![],
        }
    }

    /// A leaf condition without a literal (`exist`, `not_exist`).
    pub fn unary(field: &str, operation: &str) -> Self {
        Self {
            field: field.to_string(),
            operation: operation.to_string(),
            ..Self::default()
        }
    }

    pub fn and(sub_conditions: Vec<ConditionConfig>) -> Self {
        Self::composite("and", sub_conditions)
    }

    pub fn or(sub_conditions: Vec<ConditionConfig>) -> Self {
        Self::composite("or", sub_conditions)
    }

    fn composite(operation: &str, sub_conditions: Vec<ConditionConfig>) -> Self {
        Self {
            operation: operation.to_string(),
            sub_conditions: sub_conditions.into_iter().map(Some).collect(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConstructionError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConstructionError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
