//! Usage Reference Scanner.
//!
//! Both scanners work on raw text with regex tables; no syntax tree is
//! built. A file that matches nothing yields an empty list.
//!
//! - `inclusion`: template inclusion calls (`${clientlib.css @ ...}`,
//!   `<ui:includeClientLib ...>`)
//! - `generic`: key/value and attribute shapes in markup, script and
//!   structured-data files

pub mod generic;
pub mod inclusion;

use regex::Captures;

pub use generic::{GENERIC_PATTERNS, scan_generic};
pub use inclusion::{INCLUSION_PATTERNS, scan_inclusions};

use crate::core::{
    UsageReference,
    collect::{
        config_file::quoted_items,
        values::{is_literal_category, normalize_multi_value},
    },
    utils::LineIndex,
};

/// Split a quoted scalar such as `'a, b'` into literal categories.
fn split_scalar_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| is_literal_category(item))
        .map(str::to_string)
        .collect()
}

/// Categories named by one match.
///
/// Pattern tables use fixed group names for each value shape:
/// `array` (array of string literals), `args` (call arguments), `attr`
/// (markup attribute list), `dq`/`sq` (double/single quoted scalar list).
pub(crate) fn categories_from(cap: &Captures<'_>) -> Vec<String> {
    if let Some(m) = cap.name("array").or_else(|| cap.name("args")) {
        return quoted_items(m.as_str());
    }
    if let Some(m) = cap.name("attr") {
        return normalize_multi_value(m.as_str())
            .into_iter()
            .filter(|item| is_literal_category(item))
            .collect();
    }
    cap.name("dq")
        .or_else(|| cap.name("sq"))
        .map(|m| split_scalar_list(m.as_str()))
        .unwrap_or_default()
}

/// Run both scanners over a file's text.
///
/// References are returned in text order; inclusion-call matches precede
/// generic matches that start at the same offset.
pub fn scan_references(content: &str, file: &str) -> Vec<UsageReference> {
    let index = LineIndex::new(content);

    let mut found: Vec<(usize, UsageReference)> = inclusion::scan(content, file, &index);
    found.extend(generic::scan(content, file, &index));
    found.sort_by_key(|(offset, _)| *offset);

    found.into_iter().map(|(_, reference)| reference).collect()
}
