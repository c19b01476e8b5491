use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::core::{AssetLists, file_scanner::to_slash_path};

/// Directory names never searched for assets.
pub const VENDOR_DIRS: &[&str] = &["node_modules", "vendor", "bower_components", "jspm_packages"];

const STYLE_EXTENSIONS: &[&str] = &["css", "less", "scss", "sass"];
const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts"];

fn is_vendor_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| VENDOR_DIRS.contains(&name))
}

/// Enumerate style and script files under `dir`.
///
/// Paths are relative to `dir` and sorted. `exclude` names a file that must
/// not count as an asset (the declaring config file itself). Unreadable
/// entries are skipped.
pub fn discover_assets(dir: &Path, exclude: Option<&Path>) -> AssetLists {
    let mut assets = AssetLists::default();

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_vendor_dir(e));

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() || exclude.is_some_and(|p| entry.path() == p) {
            continue;
        }
        let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let Ok(rel) = entry.path().strip_prefix(dir) else {
            continue;
        };

        if STYLE_EXTENSIONS.contains(&ext) {
            assets.css.push(to_slash_path(rel));
        } else if SCRIPT_EXTENSIONS.contains(&ext) {
            assets.js.push(to_slash_path(rel));
        }
    }

    assets.css.sort();
    assets.js.sort();
    assets
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_assets_splits_by_kind() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "css/site.css");
        touch(root, "css/grid.less");
        touch(root, "js/site.js");
        touch(root, "css.txt");
        touch(root, ".content.xml");

        let assets = discover_assets(root, None);

        assert_eq!(assets.css, vec!["css/grid.less", "css/site.css"]);
        assert_eq!(assets.js, vec!["js/site.js"]);
    }

    #[test]
    fn test_discover_assets_skips_vendor_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/main.ts");
        touch(root, "node_modules/pkg/index.js");
        touch(root, "vendor/lib.css");

        let assets = discover_assets(root, None);

        assert_eq!(assets.js, vec!["src/main.ts"]);
        assert!(assets.css.is_empty());
    }

    #[test]
    fn test_discover_assets_excludes_declaring_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "clientlib.config.js");
        touch(root, "src/app.js");

        let assets = discover_assets(root, Some(&root.join("clientlib.config.js")));

        assert_eq!(assets.js, vec!["src/app.js"]);
    }

    #[test]
    fn test_discover_assets_missing_dir() {
        let dir = tempdir().unwrap();
        let assets = discover_assets(&dir.path().join("missing"), None);
        assert_eq!(assets, AssetLists::default());
    }
}
