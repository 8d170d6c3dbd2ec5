// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compiles condition configs into predicates.
//!
//! All validation happens here, once: operator tokens, schema lookups,
//! literal shapes and types, and the fan-out of `and`/`or` nodes. A
//! successfully built [`Predicate`] only fails at evaluation time on record
//! contents.

use crate::config::ConditionConfig;
use crate::error::ConstructionError;
use crate::operators::{Operator, LEAF_BUILDERS};
use crate::predicate::{Condition, Predicate};
use crate::schema::{Field, Schema, SemanticType};
use crate::Rc;

use log::debug;

/// Maximum number of sub-conditions of an `and`/`or` node.
pub const MAX_SUB_CONDITIONS: usize = 10;

/// Field name that bypasses the schema. Reserved for full-text operators.
pub const WILDCARD_FIELD: &str = "*";

/// Builds predicates against a schema.
#[derive(Debug, Clone)]
pub struct Compiler<'s> {
    schema: &'s Schema,
    max_sub_conditions: usize,
}

impl<'s> Compiler<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            max_sub_conditions: MAX_SUB_CONDITIONS,
        }
    }

    /// Override the `and`/`or` fan-out limit.
    pub fn with_max_sub_conditions(mut self, max_sub_conditions: usize) -> Self {
        self.max_sub_conditions = max_sub_conditions;
        self
    }

    /// Compile `config` into a predicate.
    ///
    /// # Arguments
    ///
    /// * `config` - The condition tree, `None` when no filter is configured.
    ///
    /// # Returns
    ///
    /// `None` for an absent config, which callers treat as "always passes".
    /// Otherwise the predicate, or the first [`ConstructionError`] found.
    pub fn compile(
        &self,
        config: Option<&ConditionConfig>,
    ) -> Result<Option<Predicate>, ConstructionError> {
        config.map(|config| self.compile_node(config)).transpose()
    }

    fn compile_node(&self, config: &ConditionConfig) -> Result<Predicate, ConstructionError> {
        let op: Operator = config.operation.parse()?;
        if op.is_composite() {
            return self.compile_composite(op, config);
        }

        let Some(builder) = LEAF_BUILDERS.get(&op) else {
            return Err(ConstructionError::UnsupportedOperator(op));
        };

        let field = self.resolve_field(&config.field)?;
        let kind = builder(op, &field, config)?;
        debug!("built `{op}` on `{}`", field.name());

        Ok(Predicate::Leaf(Condition::new(field, op, kind)))
    }

    fn compile_composite(
        &self,
        op: Operator,
        config: &ConditionConfig,
    ) -> Result<Predicate, ConstructionError> {
        let count = config.sub_conditions.len();
        if count == 0 || count > self.max_sub_conditions {
            return Err(ConstructionError::SubConditionCount {
                operator: op,
                count,
                max: self.max_sub_conditions,
            });
        }

        // Null entries are dropped.
        let children = config
            .sub_conditions
            .iter()
            .flatten()
            .map(|sub| self.compile_node(sub))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("built `{op}` with {} sub-conditions", children.len());

        Ok(match op {
            Operator::Or => Predicate::Or(children),
            _ => Predicate::And(children),
        })
    }

    fn resolve_field(&self, name: &str) -> Result<Rc<Field>, ConstructionError> {
        if name == WILDCARD_FIELD {
            return Ok(Rc::new(Field::new(WILDCARD_FIELD, SemanticType::Text)));
        }

        self.schema
            .field(name)
            .map(Rc::new)
            .ok_or_else(|| ConstructionError::FieldNotInSchema(name.to_string()))
    }
}

/// Compile `config` against `schema` with the default limits.
///
/// See [`Compiler::compile`].
pub fn compile(
    config: Option<&ConditionConfig>,
    schema: &Schema,
) -> Result<Option<Predicate>, ConstructionError> {
    Compiler::new(schema).compile(config)
}
