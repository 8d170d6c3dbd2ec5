// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::EvaluationError;
use crate::schema::Field;
use crate::value::{coerce, TypedValue};
use crate::Rc;

use std::collections::HashMap;

use log::trace;
use serde_json::Value;

/// One input document under evaluation, plus the values already extracted from it.
///
/// The cache is filled lazily and never invalidated. It belongs to this record
/// only: evaluate a record from one thread at a time. A compiled
/// [`Predicate`](crate::Predicate) on the other hand can be shared freely
/// across threads, each evaluating its own `Record`.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    origin: &'a Value,
    value_cache: HashMap<Rc<str>, Vec<TypedValue>>,
}

impl<'a> From<&'a Value> for Record<'a> {
    fn from(origin: &'a Value) -> Self {
        Self::new(origin)
    }
}

impl<'a> Record<'a> {
    pub fn new(origin: &'a Value) -> Self {
        Self {
            origin,
            value_cache: HashMap::new(),
        }
    }

    pub fn origin(&self) -> &'a Value {
        self.origin
    }

    /// All values of `field`, coerced to its declared type.
    ///
    /// Arrays met along the path are fanned out and arrays at the end of the
    /// path are flattened, so `items.tag` over
    /// `{"items": [{"tag": "a"}, {"tag": "b"}]}` yields `["a", "b"]`.
    /// A missing field yields an empty slice. A value that fails coercion is
    /// an error.
    pub fn extract(&mut self, field: &Field) -> Result<&[TypedValue], EvaluationError> {
        if !self.value_cache.contains_key(field.name()) {
            trace!("extracting `{}`", field.name());
            let mut leaves = vec![];
            resolve(self.origin, field.access_path(), &mut leaves);
            let values = leaves
                .into_iter()
                .map(|leaf| coerce(leaf, field.semantic_type()).map_err(|e| e.at(field.name())))
                .collect::<Result<Vec<_>, _>>()?;
            self.value_cache.insert(field.name_rc().clone(), values);
        }

        Ok(self
            .value_cache
            .get(field.name())
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// The single value of `field`, `None` if absent.
    ///
    /// Fails with [`EvaluationError::Ambiguous`] when the path resolves to
    /// more than one value.
    pub fn extract_single(
        &mut self,
        field: &Field,
    ) -> Result<Option<&TypedValue>, EvaluationError> {
        let values = self.extract(field)?;
        match values {
            [] => Ok(None),
            [value] => Ok(Some(value)),
            _ => Err(EvaluationError::Ambiguous {
                field: field.name().to_string(),
                count: values.len(),
            }),
        }
    }

    /// Does `field` resolve to at least one leaf? Leaves are not coerced.
    pub fn is_present(&self, field: &Field) -> bool {
        if let Some(values) = self.value_cache.get(field.name()) {
            return !values.is_empty();
        }

        let mut leaves = vec![];
        resolve(self.origin, field.access_path(), &mut leaves);
        !leaves.is_empty()
    }

    pub fn is_cached(&self, field: &Field) -> bool {
        self.value_cache.contains_key(field.name())
    }

    /// Number of fields extracted so far.
    pub fn cached_len(&self) -> usize {
        self.value_cache.len()
    }
}

// Walk `path` from `node`, fanning out over arrays.
fn resolve<'v>(node: &'v Value, path: &[Rc<str>], leaves: &mut Vec<&'v Value>) {
    let Some((segment, rest)) = path.split_first() else {
        flatten(node, leaves);
        return;
    };

    match node {
        Value::Object(fields) => match fields.get(&**segment) {
            None | Some(Value::Null) => (),
            Some(child) => resolve(child, rest, leaves),
        },
        // The segment is not consumed: every element offers the same path.
        Value::Array(items) => {
            for item in items {
                resolve(item, path, leaves);
            }
        }
        _ => (),
    }
}

fn flatten<'v>(node: &'v Value, leaves: &mut Vec<&'v Value>) {
    match node {
        Value::Array(items) => {
            for item in items {
                flatten(item, leaves);
            }
        }
        _ => leaves.push(node),
    }
}
