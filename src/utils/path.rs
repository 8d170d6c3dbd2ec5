// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dotted field path utilities shared by fields and search-field naming.

use crate::Rc;

/// Separator between segments of a field name.
pub const PATH_SEPARATOR: char = '.';

/// Split a dotted field name into its access path segments.
///
/// `items.tag` becomes `["items", "tag"]`. The name is not otherwise
/// interpreted, so empty segments are kept as-is.
pub fn parse_access_path(name: &str) -> Vec<Rc<str>> {
    name.split(PATH_SEPARATOR).map(Rc::from).collect()
}

/// Strip `suffix` (a whole trailing segment) from a dotted name.
/// e.g., `strip_last_segment("title.keyword", "keyword")` is `Some("title")`.
pub fn strip_last_segment<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let (parent, last) = name.rsplit_once(PATH_SEPARATOR)?;
    if last == suffix && !parent.is_empty() {
        Some(parent)
    } else {
        None
    }
}
