// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Field naming for an external search index.
//!
//! Text fields are usually indexed twice: analyzed under `name` for
//! full-text queries, and verbatim under the `name.keyword` sub-field for
//! exact matches. The in-memory evaluator does not use this; it is provided
//! for callers that translate the same conditions into index queries.

use crate::schema::{Field, Schema, SemanticType};
use crate::utils::path::{strip_last_segment, PATH_SEPARATOR};

const KEYWORD_SUFFIX: &str = "keyword";

/// Name of the index field to query for `field`.
///
/// * Exact match on a `text` field: `<name>.keyword`.
/// * Full-text match on a `<name>.keyword` field whose parent `<name>` is
///   declared as `text`: the parent.
/// * Otherwise the field's own name.
pub fn search_field_name(field: &Field, schema: &Schema, is_full_text: bool) -> String {
    let name = field.name();
    match (field.semantic_type(), is_full_text) {
        (SemanticType::Text, false) => format!("{name}{PATH_SEPARATOR}{KEYWORD_SUFFIX}"),
        (SemanticType::Keyword, true) => strip_last_segment(name, KEYWORD_SUFFIX)
            .filter(|parent| {
                schema
                    .get(parent)
                    .is_some_and(|entry| entry.semantic_type == SemanticType::Text)
            })
            .unwrap_or(name)
            .to_string(),
        _ => name.to_string(),
    }
}
