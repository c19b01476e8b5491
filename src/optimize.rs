//! Reduced-manifest proposals.
//!
//! Starting from the base library's embeds, keep only what the analyzed
//! page needs and render the result as a client library folder. Nothing
//! here touches the scanned repository; [`write_proposal`] only writes into
//! a separate output directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use crate::{
    core::{AssetLists, DependencyGraph, LibraryDeclaration, collect::CLIENT_LIBRARY_FOLDER},
    correlate::Correlation,
};

/// Names used for the proposed library.
#[derive(Debug, Clone, Copy)]
pub struct ProposalOptions<'a> {
    /// Substring identifying the base library among declared categories.
    pub base_category: &'a str,
    /// Prefix of the proposed category and folder.
    pub project_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestProposal {
    /// Category of the proposed library.
    pub category: String,
    /// Folder name the library is written to.
    pub folder: String,
    /// The existing library the proposal was derived from.
    pub base_category: String,
    pub base_path: String,
    pub original_embeds: Vec<String>,
    pub kept_embeds: Vec<String>,
    pub removed_embeds: Vec<String>,
    pub dependencies: Vec<String>,
    /// Declared categories nothing uses; candidates for deletion.
    pub removable: Vec<String>,
    pub assets: AssetLists,
    pub reduction_percent: u32,
    pub site: SiteProposal,
}

/// Page-level library loaded on top of the reduced base library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProposal {
    pub category: String,
    pub folder: String,
    /// Always the proposed base category.
    pub dependencies: Vec<String>,
    /// Page categories the base library does not already embed.
    pub embeds: Vec<String>,
}

/// Derive a reduced manifest from the base library.
///
/// With a correlation, an embed is kept only when it serves a page
/// component, whether or not the embedded category is declared in the
/// scanned tree. Without one every embed is kept.
///
/// # Errors
///
/// Returns an error when no declared category contains
/// `options.base_category`.
pub fn propose(
    declarations: &[LibraryDeclaration],
    graph: &DependencyGraph,
    correlation: Option<&Correlation>,
    options: ProposalOptions<'_>,
) -> Result<ManifestProposal> {
    let base = declarations
        .iter()
        .find(|d| d.category.contains(options.base_category))
        .ok_or_else(|| {
            anyhow!(
                "Base client library not found: no category contains '{}'",
                options.base_category
            )
        })?;

    let (kept_embeds, removed_embeds): (Vec<String>, Vec<String>) = base
        .embeds
        .iter()
        .cloned()
        .partition(|embed| correlation.is_none_or(|c| c.is_used_by_page(embed)));

    let category = format!("{}-new.{}", options.project_name, options.base_category);
    let site = SiteProposal {
        category: format!("{}-home.site", options.project_name),
        folder: "clientlib-home-site".to_string(),
        dependencies: vec![category.clone()],
        embeds: correlation
            .map(|c| site_embeds(c, base))
            .unwrap_or_default(),
    };

    Ok(ManifestProposal {
        category,
        folder: format!("clientlib-new-{}", options.base_category),
        base_category: base.category.clone(),
        base_path: base.source_path.clone(),
        reduction_percent: reduction_percent(removed_embeds.len(), base.embeds.len()),
        original_embeds: base.embeds.clone(),
        kept_embeds,
        removed_embeds,
        dependencies: base.dependencies.clone(),
        removable: graph.unused.clone(),
        assets: base.assets.clone(),
        site,
    })
}

/// Candidate categories of the page that the base library neither is nor
/// embeds, ordered by component.
fn site_embeds(correlation: &Correlation, base: &LibraryDeclaration) -> Vec<String> {
    let mut embeds: Vec<String> = Vec::new();
    for category in correlation.component_to_categories.values().flatten() {
        let in_base = base.all_categories().any(|c| c == category.as_str())
            || base.embeds.contains(category);
        if !in_base && !embeds.contains(category) {
            embeds.push(category.clone());
        }
    }
    embeds
}

fn reduction_percent(removed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (removed as f64 / total as f64 * 100.0).round() as u32
}

/// Render the proposed base library as a `.content.xml` client library folder.
pub fn render_manifest(proposal: &ManifestProposal) -> String {
    library_xml(
        &proposal.category,
        &proposal.dependencies,
        &proposal.kept_embeds,
    )
}

/// Render the proposed site library as a `.content.xml` client library folder.
pub fn render_site_manifest(site: &SiteProposal) -> String {
    library_xml(&site.category, &site.dependencies, &site.embeds)
}

fn library_xml(category: &str, dependencies: &[String], embeds: &[String]) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<jcr:root xmlns:cq="http://www.day.com/jcr/cq/1.0" xmlns:jcr="http://www.jcp.org/jcr/1.0""#,
    );
    out.push_str(&format!("\n    jcr:primaryType=\"{CLIENT_LIBRARY_FOLDER}\""));
    out.push_str("\n    allowProxy=\"{Boolean}true\"");
    out.push_str(&format!("\n    categories=\"[{}]\"", category));
    if !dependencies.is_empty() {
        out.push_str(&format!("\n    dependencies=\"[{}]\"", dependencies.join(",")));
    }
    if !embeds.is_empty() {
        out.push_str(&format!("\n    embed=\"[{}]\"", embeds.join(",")));
    }
    out.push_str("/>\n");
    out
}

/// Render a `css.txt`/`js.txt` asset list.
pub fn render_asset_list(kind: &str, category: &str, assets: &[String]) -> String {
    let mut out = format!("# {} loading order for {}\n", kind.to_uppercase(), category);
    for asset in assets {
        out.push_str(asset);
        out.push('\n');
    }
    out
}

/// Write both proposed libraries into `<out_dir>/<folder>/`.
///
/// Returns the written paths in write order, base library first.
pub fn write_proposal(proposal: &ManifestProposal, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let site = &proposal.site;
    let libraries = [
        (
            &proposal.folder,
            [
                (".content.xml", render_manifest(proposal)),
                (
                    "css.txt",
                    render_asset_list("css", &proposal.category, &proposal.assets.css),
                ),
                (
                    "js.txt",
                    render_asset_list("js", &proposal.category, &proposal.assets.js),
                ),
            ],
        ),
        (
            &site.folder,
            [
                (".content.xml", render_site_manifest(site)),
                ("css.txt", render_asset_list("css", &site.category, &[])),
                ("js.txt", render_asset_list("js", &site.category, &[])),
            ],
        ),
    ];

    let mut written = Vec::new();
    for (folder, files) in libraries {
        let dir = out_dir.join(folder);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        for (name, content) in files {
            let path = dir.join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            written.push(path);
        }
    }
    Ok(written)
}
