//! Generic key/value and attribute references.
//!
//! Each table entry pairs one key name and value shape with the context
//! label reported for its matches:
//!
//! | Label | Example |
//! |---|---|
//! | `policy-array` | `"clientlibs": ["acme.a", "acme.b"]` |
//! | `policy-scalar` | `"clientlibs": "acme.a"` |
//! | `policy-js-head` | `"clientlibsJsHead": [...]`, `clientlibsJsHead="[...]"` |
//! | `policy-attribute` | `clientlibs="[acme.a,acme.b]"` |
//! | `component-config` | `"categories": [...]`, `'category': 'acme.a'` |
//! | `js-function-call` | `loadClientlib('acme.a')`, `includeClientlibs("a", "b")` |

use std::sync::LazyLock;

use regex::Regex;

use super::categories_from;
use crate::core::{ReferenceKind, UsageReference, utils::LineIndex};

#[derive(Debug)]
pub struct GenericPattern {
    pub kind: ReferenceKind,
    pub regex: Regex,
}

const SCALAR: &str = r#"(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#;
const ARRAY: &str = r#"\[(?P<array>[^\]]*)\]"#;

fn quoted_key(key: &str) -> String {
    format!(r#"["']{key}["']\s*:\s*"#)
}

fn markup_attribute(name: &str) -> String {
    format!(r#"(?:^|\s){name}\s*=\s*"(?P<attr>[^"]*)""#)
}

fn pattern(kind: ReferenceKind, regex: String) -> GenericPattern {
    GenericPattern {
        kind,
        regex: Regex::new(&regex).unwrap(),
    }
}

/// The fixed generic pattern table.
pub static GENERIC_PATTERNS: LazyLock<Vec<GenericPattern>> = LazyLock::new(|| {
    vec![
        pattern(
            ReferenceKind::PolicyArray,
            format!("{}{ARRAY}", quoted_key("clientlibs")),
        ),
        pattern(
            ReferenceKind::PolicyScalar,
            format!("{}{SCALAR}", quoted_key("clientlibs")),
        ),
        pattern(
            ReferenceKind::PolicyJsHead,
            format!("{}(?:{ARRAY}|{SCALAR})", quoted_key("clientlibsJsHead")),
        ),
        pattern(ReferenceKind::PolicyJsHead, markup_attribute("clientlibsJsHead")),
        pattern(ReferenceKind::PolicyAttribute, markup_attribute("clientlibs")),
        pattern(
            ReferenceKind::ComponentConfig,
            format!("{}(?:{ARRAY}|{SCALAR})", quoted_key("(?:categories|category)")),
        ),
        pattern(
            ReferenceKind::JsFunctionCall,
            r#"\b(?:loadClientlibs?|includeClientlibs?)\s*\((?P<args>[^)]*)\)"#.to_string(),
        ),
    ]
});

pub(super) fn scan(content: &str, file: &str, index: &LineIndex) -> Vec<(usize, UsageReference)> {
    let mut found = Vec::new();

    for pattern in GENERIC_PATTERNS.iter() {
        for cap in pattern.regex.captures_iter(content) {
            let Some(whole) = cap.get(0) else { continue };
            let line = index.line_of(whole.start());
            for category in categories_from(&cap) {
                found.push((
                    whole.start(),
                    UsageReference::new(category, file, line, pattern.kind),
                ));
            }
        }
    }

    found
}

/// Scan text for generic references only.
pub fn scan_generic(content: &str, file: &str) -> Vec<UsageReference> {
    let index = LineIndex::new(content);
    let mut found = scan(content, file, &index);
    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, reference)| reference).collect()
}
