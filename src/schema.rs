// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Field schema supplied by the caller.
//!
//! A schema maps a field name to its declared [`SemanticType`]. The type names
//! follow the usual search-index mapping vocabulary:
//!
//! ```json
//! {
//!   "name":       { "type": "keyword", "comment": "display name" },
//!   "age":        { "type": "integer" },
//!   "items.tag":  { "type": "keyword" },
//!   "created_at": { "type": "date" }
//! }
//! ```
//!
//! Dotted names address nested objects. When a segment of the path lands on an
//! array, every element is visited (see [`Record::extract`](crate::Record::extract)).

use crate::error::ConstructionError;
use crate::utils::path::parse_access_path;
use crate::Rc;

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Declared type of a field.
///
/// At runtime the integer family canonicalizes to `i64`, the float family to
/// `f64` and `Date` to a UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Keyword,
    Text,
    Binary,
    Byte,
    Short,
    Integer,
    Long,
    HalfFloat,
    Float,
    Double,
    Boolean,
    Date,
    Ip,
    GeoPoint,
    GeoShape,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Keyword => "keyword",
            SemanticType::Text => "text",
            SemanticType::Binary => "binary",
            SemanticType::Byte => "byte",
            SemanticType::Short => "short",
            SemanticType::Integer => "integer",
            SemanticType::Long => "long",
            SemanticType::HalfFloat => "half_float",
            SemanticType::Float => "float",
            SemanticType::Double => "double",
            SemanticType::Boolean => "boolean",
            SemanticType::Date => "date",
            SemanticType::Ip => "ip",
            SemanticType::GeoPoint => "geo_point",
            SemanticType::GeoShape => "geo_shape",
        }
    }

    /// Keyword, Text and Binary values are plain strings.
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            SemanticType::Keyword | SemanticType::Text | SemanticType::Binary
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SemanticType::Byte | SemanticType::Short | SemanticType::Integer | SemanticType::Long
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self,
            SemanticType::HalfFloat | SemanticType::Float | SemanticType::Double
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Types with equality semantics. Ip and the geo types are declared but
    /// not comparable.
    pub fn is_comparable(&self) -> bool {
        self.is_ordered() || *self == SemanticType::Boolean
    }

    /// Types with a total ordering usable by `gt`/`gte`/`lt`/`lte`.
    pub fn is_ordered(&self) -> bool {
        self.is_string() || self.is_numeric() || *self == SemanticType::Date
    }

    /// Types accepted by `range`/`out_range`.
    pub fn is_rangeable(&self) -> bool {
        self.is_numeric() || *self == SemanticType::Date
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| ConstructionError::Parse(format!("unknown semantic type `{s}`")))
    }
}

/// Schema entry for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl FieldSchema {
    pub fn new(semantic_type: SemanticType) -> Self {
        Self {
            semantic_type,
            comment: String::new(),
        }
    }
}

/// Mapping from field name to declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConstructionError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConstructionError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Builder-style insertion, handy when the schema is assembled in code.
    pub fn with(mut self, name: &str, semantic_type: SemanticType) -> Self {
        self.insert(name, FieldSchema::new(semantic_type));
        self
    }

    pub fn insert(&mut self, name: &str, field: FieldSchema) -> Option<FieldSchema> {
        self.fields.insert(name.to_string(), field)
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field descriptor for a schema entry.
    pub fn field(&self, name: &str) -> Option<Field> {
        self.get(name)
            .map(|entry| Field::new(name, entry.semantic_type))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A resolved field: name, declared type and the dotted access path.
#[derive(Debug, Clone)]
pub struct Field {
    name: Rc<str>,
    semantic_type: SemanticType,
    // Derived from `name` on first use.
    access_path: OnceLock<Vec<Rc<str>>>,
}

impl Field {
    pub fn new(name: &str, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            access_path: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_rc(&self) -> &Rc<str> {
        &self.name
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn access_path(&self) -> &[Rc<str>] {
        self.access_path
            .get_or_init(|| parse_access_path(&self.name))
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.semantic_type == other.semantic_type
    }
}

impl Eq for Field {}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
