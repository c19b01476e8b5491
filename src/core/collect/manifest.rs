//! Client library folder manifests (`.content.xml`).
//!
//! A manifest declares a library only when its root node's
//! `jcr:primaryType` is [`CLIENT_LIBRARY_FOLDER`]. Any other node type is a
//! structural mismatch and yields no declaration without a diagnostic.

use anyhow::{Context, Result};
use roxmltree::{Document, Node};

use super::values::{normalize_multi_value, parse_bool, strip_type_hint};
use crate::core::{DeclarationKind, LibraryDeclaration};

/// Node type marking a client library folder.
pub const CLIENT_LIBRARY_FOLDER: &str = "cq:ClientLibraryFolder";

/// Look up an attribute by local name, ignoring its namespace.
fn attr<'a>(node: &Node<'a, '_>, local_name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name() == local_name)
        .map(|a| a.value())
}

/// Containing directory of a root-relative path (`"."` for the root).
pub fn parent_dir(rel_path: &str) -> String {
    match rel_path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => ".".to_string(),
    }
}

/// Parse a manifest's text.
///
/// Returns `Err` for malformed markup, `Ok(None)` when the file is not a
/// client library folder or declares no category.
pub fn parse_manifest(content: &str, rel_path: &str) -> Result<Option<LibraryDeclaration>> {
    let doc = Document::parse(content)
        .with_context(|| format!("Failed to parse manifest: {}", rel_path))?;
    let root = doc.root_element();

    if attr(&root, "primaryType").map(strip_type_hint) != Some(CLIENT_LIBRARY_FOLDER) {
        return Ok(None);
    }

    let mut categories = attr(&root, "categories")
        .map(normalize_multi_value)
        .unwrap_or_default()
        .into_iter();
    let Some(category) = categories.next() else {
        return Ok(None);
    };

    let mut declaration =
        LibraryDeclaration::new(category, parent_dir(rel_path), DeclarationKind::Manifest);
    declaration.aliases = categories.collect();
    declaration.embeds = attr(&root, "embed")
        .map(normalize_multi_value)
        .unwrap_or_default();
    declaration.dependencies = attr(&root, "dependencies")
        .map(normalize_multi_value)
        .unwrap_or_default();
    declaration.flags.allow_proxy = attr(&root, "allowProxy").and_then(parse_bool);
    declaration.flags.long_cache_key = attr(&root, "longCacheKey")
        .map(|v| strip_type_hint(v).to_string())
        .filter(|v| !v.is_empty());

    Ok(Some(declaration))
}
