// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::EvaluationError;
use crate::operators::comparison::{self, BoolOp};
use crate::operators::{collections, strings, Operator};
use crate::record::Record;
use crate::schema::Field;
use crate::value::TypedValue;
use crate::Rc;

use core::fmt;

use serde_json::Value;

/// A compiled, immutable boolean test over records.
///
/// Build one with [`Compiler`](crate::Compiler) and evaluate it against any
/// number of records. With the `arc` feature (on by default) predicates are
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub enum Predicate {
    Leaf(Condition),
    /// Passes when every child passes. Stops at the first failing child.
    And(Vec<Predicate>),
    /// Passes when any child passes. Stops at the first passing child.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Does `record` pass?
    ///
    /// Children of `and`/`or` are evaluated left to right and the first
    /// error aborts the whole evaluation.
    pub fn passes(&self, record: &mut Record<'_>) -> Result<bool, EvaluationError> {
        match self {
            Predicate::Leaf(condition) => condition.passes(record),
            Predicate::And(children) => {
                for child in children {
                    if !child.passes(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(children) => {
                for child in children {
                    if child.passes(record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Evaluate against a document with a fresh value cache.
    pub fn passes_value(&self, document: &Value) -> Result<bool, EvaluationError> {
        self.passes(&mut Record::new(document))
    }
}

/// A single-operator test on one field.
#[derive(Debug, Clone)]
pub struct Condition {
    field: Rc<Field>,
    operator: Operator,
    kind: ConditionKind,
}

/// Executable form of each leaf operator, with literals already coerced to
/// the field's declared type.
#[derive(Debug, Clone)]
pub enum ConditionKind {
    Compare {
        op: BoolOp,
        operand: TypedValue,
    },
    Membership {
        negated: bool,
        operands: Vec<TypedValue>,
    },
    Range {
        negated: bool,
        low: TypedValue,
        high: TypedValue,
    },
    Like {
        negated: bool,
        pattern: Rc<str>,
    },
    Contain {
        negated: bool,
        operands: Vec<TypedValue>,
    },
    Exist {
        negated: bool,
    },
    Empty {
        negated: bool,
    },
    #[cfg(feature = "regex")]
    Regex(regex::Regex),
}

impl Condition {
    pub(crate) fn new(field: Rc<Field>, operator: Operator, kind: ConditionKind) -> Self {
        Self {
            field,
            operator,
            kind,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn passes(&self, record: &mut Record<'_>) -> Result<bool, EvaluationError> {
        let field = self.field.as_ref();
        Ok(match &self.kind {
            ConditionKind::Compare { op, operand } => {
                comparison::compare(*op, record.extract_single(field)?, operand)
            }
            ConditionKind::Membership { negated, operands } => {
                comparison::membership(*negated, record.extract_single(field)?, operands)
            }
            ConditionKind::Range { negated, low, high } => {
                comparison::range(*negated, record.extract_single(field)?, low, high)
            }
            ConditionKind::Like { negated, pattern } => {
                strings::like(*negated, field, record.extract_single(field)?, pattern)?
            }
            ConditionKind::Contain { negated, operands } => {
                collections::contain(*negated, record.extract(field)?, operands)
            }
            ConditionKind::Exist { negated } => collections::exist(*negated, record.is_present(field)),
            ConditionKind::Empty { negated } => {
                strings::empty(*negated, record.extract_single(field)?)
            }
            #[cfg(feature = "regex")]
            ConditionKind::Regex(regex) => strings::regex_match(regex, record.extract(field)?),
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |values: &[TypedValue]| {
            let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            format!("[{}]", items.join(", "))
        };

        write!(f, "{} {}", self.field, self.operator)?;
        match &self.kind {
            ConditionKind::Compare { operand, .. } => write!(f, " {operand}"),
            ConditionKind::Membership { operands, .. } | ConditionKind::Contain { operands, .. } => {
                write!(f, " {}", list(operands))
            }
            ConditionKind::Range { low, high, .. } => write!(f, " [{low}, {high})"),
            ConditionKind::Like { pattern, .. } => write!(f, " {pattern:?}"),
            ConditionKind::Exist { .. } | ConditionKind::Empty { .. } => Ok(()),
            #[cfg(feature = "regex")]
            ConditionKind::Regex(regex) => write!(f, " /{}/", regex.as_str()),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, sep) = match self {
            Predicate::Leaf(condition) => return write!(f, "{condition}"),
            Predicate::And(children) => (children, " AND "),
            Predicate::Or(children) => (children, " OR "),
        };

        write!(f, "(")?;
        for (idx, child) in children.iter().enumerate() {
            if idx > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}
