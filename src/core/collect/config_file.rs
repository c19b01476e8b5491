//! Build-tool configuration files (`clientlib.config.js` and friends).
//!
//! These files are scripts, but only their literal shape matters here:
//!
//! ```js
//! module.exports = {
//!   libs: [{
//!     name: "clientlib-site",
//!     allowProxy: true,
//!     categories: ["acme.site"],
//!     dependencies: ["acme.dependencies"],
//!     embed: ["acme.grid"],
//!   }],
//! };
//! ```
//!
//! Keys may be bare or quoted, values single or double quoted. Anything
//! that is not a string literal (identifiers, spreads, template literals,
//! concatenation) is left out of the extracted lists. The first match of
//! each key wins, so one file yields at most one declaration.

use std::sync::LazyLock;

use regex::Regex;

use super::values::is_literal_category;
use crate::core::{DeclarationKind, LibraryDeclaration};

fn key_array_regex(key: &str) -> Regex {
    Regex::new(&format!(
        r#"(?:^|[^\w$])["']?{key}["']?\s*:\s*\[([^\]]*)\]"#
    ))
    .unwrap()
}

fn key_scalar_regex(key: &str) -> Regex {
    Regex::new(&format!(
        r#"(?:^|[^\w$])["']?{key}["']?\s*:\s*(?:"([^"]*)"|'([^']*)')"#
    ))
    .unwrap()
}

static CATEGORIES_ARRAY: LazyLock<Regex> = LazyLock::new(|| key_array_regex("categories"));
static CATEGORIES_SCALAR: LazyLock<Regex> = LazyLock::new(|| key_scalar_regex("categories"));
static CATEGORY_SCALAR: LazyLock<Regex> = LazyLock::new(|| key_scalar_regex("category"));
static EMBED_ARRAY: LazyLock<Regex> = LazyLock::new(|| key_array_regex("embed"));
static EMBED_SCALAR: LazyLock<Regex> = LazyLock::new(|| key_scalar_regex("embed"));
static DEPENDENCIES_ARRAY: LazyLock<Regex> = LazyLock::new(|| key_array_regex("dependencies"));
static DEPENDENCIES_SCALAR: LazyLock<Regex> = LazyLock::new(|| key_scalar_regex("dependencies"));
static LONG_CACHE_KEY: LazyLock<Regex> = LazyLock::new(|| key_scalar_regex("longCacheKey"));

static ALLOW_PROXY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[^\w$])["']?allowProxy["']?\s*:\s*(true|false)\b"#).unwrap()
});

/// Blank out whole-line `//` comments so commented-out keys never match.
///
/// Line structure is kept intact. Trailing comments are left alone since
/// `//` also appears inside string literals such as URLs.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim_start().starts_with("//") {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inner text of a single `"..."` or `'...'` literal, if `element` is exactly one.
fn unquote(element: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        let inner = element.strip_prefix(quote)?.strip_suffix(quote)?;
        (!inner.contains(quote)).then(|| inner.trim())
    })
}

/// Literal string elements of an array body, in order.
///
/// An element counts only when it is a complete string literal, so
/// `prefix + ".x"` or `...shared` contribute nothing.
pub(crate) fn quoted_items(body: &str) -> Vec<String> {
    body.split(',')
        .filter_map(|element| unquote(element.trim()))
        .filter(|item| is_literal_category(item))
        .map(str::to_string)
        .collect()
}

fn scalar_value(regex: &Regex, content: &str) -> Option<String> {
    let cap = regex.captures(content)?;
    cap.get(1)
        .or_else(|| cap.get(2))
        .map(|m| m.as_str().trim().to_string())
}

/// First array-or-scalar value of a key.
///
/// The earlier match in the text wins when both shapes are present.
fn list_value(array: &Regex, scalar: &Regex, content: &str) -> Vec<String> {
    let array_match = array.captures(content);
    let scalar_match = scalar.captures(content);

    let use_array = match (&array_match, &scalar_match) {
        (Some(a), Some(s)) => a.get(0).map(|m| m.start()) <= s.get(0).map(|m| m.start()),
        (Some(_), None) => true,
        _ => false,
    };

    if use_array {
        return array_match
            .and_then(|cap| cap.get(1))
            .map(|m| quoted_items(m.as_str()))
            .unwrap_or_default();
    }

    scalar_value(scalar, content)
        .filter(|v| is_literal_category(v))
        .into_iter()
        .collect()
}

/// Extract a declaration from a configuration file's text.
///
/// Returns `None` when no literal category can be found.
pub fn parse_config_file(content: &str, rel_path: &str) -> Option<LibraryDeclaration> {
    let content = strip_line_comments(content);

    let mut categories = list_value(&CATEGORIES_ARRAY, &CATEGORIES_SCALAR, &content);
    if categories.is_empty() {
        categories = scalar_value(&CATEGORY_SCALAR, &content)
            .filter(|v| is_literal_category(v))
            .into_iter()
            .collect();
    }

    let mut categories = categories.into_iter();
    let category = categories.next()?;

    let mut declaration = LibraryDeclaration::new(category, rel_path, DeclarationKind::Config);
    declaration.aliases = categories.collect();
    declaration.embeds = list_value(&EMBED_ARRAY, &EMBED_SCALAR, &content);
    declaration.dependencies = list_value(&DEPENDENCIES_ARRAY, &DEPENDENCIES_SCALAR, &content);
    declaration.flags.allow_proxy = ALLOW_PROXY
        .captures(&content)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str() == "true");
    declaration.flags.long_cache_key =
        scalar_value(&LONG_CACHE_KEY, &content).filter(|v| !v.is_empty());

    Some(declaration)
}
