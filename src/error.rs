// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::operators::Operator;
use crate::schema::SemanticType;

use thiserror::Error;

/// Errors reported while compiling a [`ConditionConfig`](crate::ConditionConfig) into a predicate.
///
/// All of them are terminal: the whole predicate fails to build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Config or schema text could not be deserialized.
    #[error("parse error: {0}")]
    Parse(String),

    /// Operator token is not part of the catalog.
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    /// Operator token is recognized but has no executable implementation.
    #[error("unsupported operator `{0}`")]
    UnsupportedOperator(Operator),

    /// Non-wildcard field name is missing from the schema.
    #[error("field `{0}` not in schema")]
    FieldNotInSchema(String),

    /// Only literals from the config itself can be compared against.
    #[error("field `{field}`: unsupported value source `{value_from}`, only `constant` is supported")]
    UnsupportedValueSource { field: String, value_from: String },

    /// Literal has the wrong shape for the operator (single value vs. array).
    #[error("field `{field}`: `{operator}` expects {expected}")]
    LiteralShape {
        field: String,
        operator: Operator,
        expected: &'static str,
    },

    /// Array literal mixes values of different kinds.
    #[error("field `{field}`: `{operator}` expects a homogeneous array")]
    NonHomogeneous { field: String, operator: Operator },

    /// Literal cannot be coerced to the field's declared type.
    #[error("field `{field}`: `{operator}` literal {value} is not a valid {semantic_type}")]
    InvalidLiteral {
        field: String,
        operator: Operator,
        semantic_type: SemanticType,
        value: String,
    },

    /// Operator is not defined for the field's declared type.
    #[error("field `{field}`: `{operator}` is not supported on {semantic_type} fields")]
    FieldType {
        field: String,
        operator: Operator,
        semantic_type: SemanticType,
    },

    /// Composite node has no children or more than allowed.
    #[error("`{operator}` expects between 1 and {max} sub-conditions, got {count}")]
    SubConditionCount {
        operator: Operator,
        count: usize,
        max: usize,
    },

    #[error("invalid regex `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors reported while evaluating a predicate against one record.
///
/// A missing field is never an error; it resolves to no values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// A null was found where a value was expected (e.g. inside an array).
    #[error("field `{field}`: null value")]
    NullValue { field: String },

    /// Record value cannot be coerced to the field's declared type.
    #[error("field `{field}`: {value} is not a valid {semantic_type}")]
    InvalidValue {
        field: String,
        semantic_type: SemanticType,
        value: String,
    },

    /// More than one value resolved where exactly one was required.
    #[error("field `{field}`: expected a single value, found {count}")]
    Ambiguous { field: String, count: usize },

    #[error("field `{field}`: empty `like` pattern")]
    EmptyPattern { field: String },
}

/// Failure to coerce a raw leaf to a declared semantic type.
///
/// Callers attach the field name and turn it into a [`ConstructionError`] or
/// an [`EvaluationError`] depending on where the raw value came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("null value")]
    Null,

    #[error("{value} is not a valid {semantic_type}")]
    InvalidValue {
        semantic_type: SemanticType,
        value: String,
    },
}

impl CoercionError {
    pub(crate) fn at(self, field: &str) -> EvaluationError {
        match self {
            CoercionError::Null => EvaluationError::NullValue {
                field: field.to_string(),
            },
            CoercionError::InvalidValue {
                semantic_type,
                value,
            } => EvaluationError::InvalidValue {
                field: field.to_string(),
                semantic_type,
                value,
            },
        }
    }
}

impl From<serde_json::Error> for ConstructionError {
    fn from(error: serde_json::Error) -> Self {
        ConstructionError::Parse(format!("{error}"))
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for ConstructionError {
    fn from(error: serde_yaml::Error) -> Self {
        ConstructionError::Parse(format!("{error}"))
    }
}
