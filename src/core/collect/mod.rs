//! Declaration Collector.
//!
//! Turns candidate files into [`LibraryDeclaration`]s. Each file produces at
//! most one declaration:
//!
//! - `manifest`: structured client library folder manifests
//! - `config_file`: literal-pattern extraction from build-tool configs
//! - `assets`: style/script enumeration under an accepted declaration
//! - `values`: attribute normalization shared by both parsers

pub mod assets;
pub mod config_file;
pub mod manifest;
pub mod values;

use std::path::Path;

use anyhow::Result;

pub use assets::discover_assets;
pub use config_file::parse_config_file;
pub use manifest::{CLIENT_LIBRARY_FOLDER, parse_manifest};

use crate::core::{DeclarationKind, LibraryDeclaration, file_scanner::FileRoles};

/// Parse `content` according to the file's declaring role.
///
/// `Err` means the file was unparsable and should produce a diagnostic;
/// `Ok(None)` means the file simply declares nothing.
pub fn parse_declaration(
    content: &str,
    rel_path: &str,
    roles: FileRoles,
) -> Result<Option<LibraryDeclaration>> {
    if roles.manifest {
        parse_manifest(content, rel_path)
    } else if roles.config {
        Ok(parse_config_file(content, rel_path))
    } else {
        Ok(None)
    }
}

/// Attach discovered assets to an accepted declaration.
pub fn attach_assets(root: &Path, declaration: &mut LibraryDeclaration) {
    declaration.assets = match declaration.flags.kind {
        DeclarationKind::Manifest => {
            discover_assets(&root.join(&declaration.source_path), None)
        }
        DeclarationKind::Config => {
            let config_path = root.join(&declaration.source_path);
            let dir = config_path.parent().unwrap_or(root);
            discover_assets(dir, Some(&config_path))
        }
    };
}
