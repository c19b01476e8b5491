//! Normalization of multi-valued manifest attributes.
//!
//! Repository manifests store lists in several shapes:
//! `categories="[a,b]"`, `categories="{String[]}[a, b]"`, or a bare
//! `categories="a"`. All of them normalize to an ordered list of tokens.

/// Strip a leading `{Type}` hint such as `{Boolean}` or `{String[]}`.
pub fn strip_type_hint(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('{')
        && let Some(end) = trimmed.find('}')
    {
        return trimmed[end + 1..].trim_start();
    }
    trimmed
}

/// Split a scalar-or-list attribute on commas and whitespace.
///
/// Empty tokens are dropped and order is preserved. Duplicates are kept;
/// callers decide whether repetition matters.
pub fn normalize_multi_value(raw: &str) -> Vec<String> {
    let value = strip_type_hint(raw);
    let value = value.strip_prefix('[').unwrap_or(value);
    let value = value.strip_suffix(']').unwrap_or(value);

    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim_matches(|c| c == '"' || c == '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a typed boolean attribute (`{Boolean}true`, `true`).
pub fn parse_bool(raw: &str) -> Option<bool> {
    match strip_type_hint(raw) {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Whether `value` looks like a literal category name.
///
/// Rejects expressions (`${..}`, `@`, concatenation, calls) that appear
/// where a category would be, since those are not resolved.
pub fn is_literal_category(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ':' | '/'))
}
