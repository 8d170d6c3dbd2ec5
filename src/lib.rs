// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod compiler;
mod config;
mod error;
mod filter;
mod operators;
mod predicate;
mod record;
mod schema;
mod search;
mod utils;
mod value;

#[cfg(feature = "arc")]
pub(crate) use std::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
pub(crate) use std::rc::Rc;

pub use compiler::{compile, Compiler, MAX_SUB_CONDITIONS, WILDCARD_FIELD};
pub use config::{ConditionConfig, VALUE_FROM_CONSTANT};
pub use error::{CoercionError, ConstructionError, EvaluationError};
pub use filter::Filter;
pub use operators::Operator;
pub use predicate::{Condition, Predicate};
pub use record::Record;
pub use schema::{Field, FieldSchema, Schema, SemanticType};
pub use search::search_field_name;
pub use value::TypedValue;

/// Items in `unstable` are likely to change.
pub mod unstable {
    pub use crate::utils::path::parse_access_path;
    pub use crate::value::coerce;
}
