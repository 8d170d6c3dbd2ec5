// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The operator catalog.
//!
//! Leaf operators register a builder that validates the literal and the
//! field's declared type once, at build time. The pure evaluation functions
//! live next to their builders.

pub mod collections;
pub mod comparison;
pub mod strings;
pub mod utils;

use crate::config::ConditionConfig;
use crate::error::ConstructionError;
use crate::predicate::ConditionKind;
use crate::schema::Field;

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

use lazy_static::lazy_static;

/// Operator tokens accepted in [`ConditionConfig::operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    Contain,
    NotContain,
    Range,
    OutRange,
    Exist,
    NotExist,
    Empty,
    NotEmpty,
    Regex,
    /// Reserved for full-text search; not executable in memory.
    Match,
    /// Reserved for full-text search; not executable in memory.
    MatchPhrase,
    And,
    Or,
}

#[rustfmt::skip]
const TOKENS: [(&str, Operator); 23] = [
    ("eq", Operator::Eq),
    ("not_eq", Operator::NotEq),
    ("gt", Operator::Gt),
    ("gte", Operator::Gte),
    ("lt", Operator::Lt),
    ("lte", Operator::Lte),
    ("in", Operator::In),
    ("not_in", Operator::NotIn),
    ("like", Operator::Like),
    ("not_like", Operator::NotLike),
    ("contain", Operator::Contain),
    ("not_contain", Operator::NotContain),
    ("range", Operator::Range),
    ("out_range", Operator::OutRange),
    ("exist", Operator::Exist),
    ("not_exist", Operator::NotExist),
    ("empty", Operator::Empty),
    ("not_empty", Operator::NotEmpty),
    ("regex", Operator::Regex),
    ("match", Operator::Match),
    ("match_phrase", Operator::MatchPhrase),
    ("and", Operator::And),
    ("or", Operator::Or),
];

impl Operator {
    pub fn as_str(&self) -> &'static str {
        TOKENS
            .iter()
            .find(|(_, op)| op == self)
            .map(|(token, _)| *token)
            .unwrap_or("?")
    }

    /// `and` and `or` combine sub-conditions instead of testing a field.
    pub fn is_composite(&self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, op)| *op)
            .ok_or_else(|| ConstructionError::UnknownOperator(s.to_string()))
    }
}

/// Validates a leaf config for `field` and produces the executable test.
pub type LeafBuilder =
    fn(Operator, &Field, &ConditionConfig) -> Result<ConditionKind, ConstructionError>;

#[rustfmt::skip]
lazy_static! {
    pub static ref LEAF_BUILDERS: HashMap<Operator, LeafBuilder> = {
	let mut m: HashMap<Operator, LeafBuilder> = HashMap::new();

	comparison::register(&mut m);
	strings::register(&mut m);
	collections::register(&mut m);

	m
    };
}
