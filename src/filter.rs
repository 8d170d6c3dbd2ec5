// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::compiler::Compiler;
use crate::config::ConditionConfig;
use crate::error::{ConstructionError, EvaluationError};
use crate::predicate::Predicate;
use crate::record::Record;
use crate::schema::Schema;

use serde_json::Value;

/// An optional compiled predicate. An empty filter lets every record through.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    predicate: Option<Predicate>,
}

impl Filter {
    pub fn new(
        config: Option<&ConditionConfig>,
        schema: &Schema,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            predicate: Compiler::new(schema).compile(config)?,
        })
    }

    /// Parse a json condition tree and compile it. `null` yields an empty filter.
    pub fn from_json_str(json: &str, schema: &Schema) -> Result<Self, ConstructionError> {
        let config: Option<ConditionConfig> = serde_json::from_str(json)?;
        Self::new(config.as_ref(), schema)
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.predicate.is_none()
    }

    pub fn passes(&self, record: &mut Record<'_>) -> Result<bool, EvaluationError> {
        match &self.predicate {
            Some(predicate) => predicate.passes(record),
            None => Ok(true),
        }
    }

    pub fn passes_value(&self, document: &Value) -> Result<bool, EvaluationError> {
        self.passes(&mut Record::new(document))
    }
}

impl From<Predicate> for Filter {
    fn from(predicate: Predicate) -> Self {
        Self {
            predicate: Some(predicate),
        }
    }
}
