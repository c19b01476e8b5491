//! Template inclusion calls.
//!
//! The pattern table is the cross product of two call styles, two helper
//! spellings per style and three resource kinds:
//!
//! | Style | Spellings | Shape |
//! |---|---|---|
//! | expression | `clientlib`, `clientLib` | `${clientlib.css @ categories='a,b'}` or `categories=['a','b']` |
//! | tag | `ui:`, `cq:` | `<ui:includeClientLib css="a,b"/>` |
//!
//! Expression members `css`/`js`/`all` and tag attributes
//! `css`/`js`/`categories` map to style, script and combined inclusion.
//! Category text is matched case-sensitively.

use std::sync::LazyLock;

use regex::Regex;

use super::categories_from;
use crate::core::{ReferenceKind, UsageReference, utils::LineIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// `${clientlib.css @ categories=...}`
    Expression,
    /// `<ui:includeClientLib css="..."/>`
    Tag,
}

#[derive(Debug)]
pub struct InclusionPattern {
    pub style: CallStyle,
    pub spelling: &'static str,
    pub kind: ReferenceKind,
    pub regex: Regex,
}

const EXPRESSION_SPELLINGS: [&str; 2] = ["clientlib", "clientLib"];
const TAG_SPELLINGS: [&str; 2] = ["ui", "cq"];

const KINDS: [(&str, &str, ReferenceKind); 3] = [
    ("css", "css", ReferenceKind::StyleInclusion),
    ("js", "js", ReferenceKind::ScriptInclusion),
    ("all", "categories", ReferenceKind::CombinedInclusion),
];

fn expression_regex(spelling: &str, member: &str) -> Regex {
    Regex::new(&format!(
        r#"\$\{{\s*{spelling}\.{member}\s*@[^}}]*?\bcategories\s*=\s*(?:'(?P<sq>[^']*)'|"(?P<dq>[^"]*)"|\[(?P<array>[^\]]*)\])"#
    ))
    .unwrap()
}

fn tag_regex(prefix: &str, attribute: &str) -> Regex {
    Regex::new(&format!(
        r#"<{prefix}:includeClientLib\b[^>]*?\s{attribute}\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#
    ))
    .unwrap()
}

/// The fixed inclusion pattern table (12 entries).
pub static INCLUSION_PATTERNS: LazyLock<Vec<InclusionPattern>> = LazyLock::new(|| {
    let mut patterns = Vec::with_capacity(12);
    for (member, attribute, kind) in KINDS {
        for spelling in EXPRESSION_SPELLINGS {
            patterns.push(InclusionPattern {
                style: CallStyle::Expression,
                spelling,
                kind,
                regex: expression_regex(spelling, member),
            });
        }
        for spelling in TAG_SPELLINGS {
            patterns.push(InclusionPattern {
                style: CallStyle::Tag,
                spelling,
                kind,
                regex: tag_regex(spelling, attribute),
            });
        }
    }
    patterns
});

pub(super) fn scan(content: &str, file: &str, index: &LineIndex) -> Vec<(usize, UsageReference)> {
    let mut found = Vec::new();

    for pattern in INCLUSION_PATTERNS.iter() {
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

/// Scan text for inclusion calls only.
pub fn scan_inclusions(content: &str, file: &str) -> Vec<UsageReference> {
    let index = LineIndex::new(content);
    let mut found = scan(content, file, &index);
    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, reference)| reference).collect()
}
