use std::path::{Component, Path};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::Config;

/// Compiled file-matching rules, one glob list per file role.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub manifests: Vec<Pattern>,
    pub configs: Vec<Pattern>,
    pub templates: Vec<Pattern>,
    pub sources: Vec<Pattern>,
    pub ignores: Vec<Pattern>,
}

fn compile(field: &str, patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, p))
        })
        .collect()
}

impl FileRules {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            manifests: compile("manifests", &config.manifests)?,
            configs: compile("configs", &config.configs)?,
            templates: compile("templates", &config.templates)?,
            sources: compile("sources", &config.sources)?,
            ignores: compile("ignores", &config.ignores)?,
        })
    }

    /// Roles of a root-relative, `/`-separated path. `None` if ignored.
    pub fn classify(&self, rel_path: &str) -> Option<FileRoles> {
        if self.ignores.iter().any(|p| p.matches(rel_path)) {
            return None;
        }
        let any = |patterns: &[Pattern]| patterns.iter().any(|p| p.matches(rel_path));
        let roles = FileRoles {
            manifest: any(&self.manifests),
            config: any(&self.configs),
            template: any(&self.templates),
            source: any(&self.sources),
        };
        (!roles.is_empty()).then_some(roles)
    }
}

/// Every role a file matched. A file can be both a manifest and a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileRoles {
    pub manifest: bool,
    pub config: bool,
    pub template: bool,
    pub source: bool,
}

impl FileRoles {
    pub fn is_empty(&self) -> bool {
        !(self.manifest || self.config || self.template || self.source)
    }

    /// Declaration Collector input.
    pub fn declares(&self) -> bool {
        self.manifest || self.config
    }

    /// Usage Reference Scanner input.
    pub fn references(&self) -> bool {
        self.template || self.source
    }
}

/// A file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Root-relative, `/`-separated path. Used in every output.
    pub rel_path: String,
    pub roles: FileRoles,
}

/// Result of scanning files.
pub struct ScanResult {
    /// Sorted by `rel_path`.
    pub files: Vec<CandidateFile>,
    pub skipped_count: usize,
}

/// Join path components with `/` regardless of platform.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn scan_files(root: &Path, rules: &FileRules, verbose: bool) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel_path = to_slash_path(rel);

        if let Some(roles) = rules.classify(&rel_path) {
            files.push(CandidateFile { rel_path, roles });
        }
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    ScanResult {
        files,
        skipped_count,
    }
}
