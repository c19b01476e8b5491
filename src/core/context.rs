use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, bail};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::core::{
    DependencyGraph, LibraryDeclaration, ScanDiagnostic, UsageReference,
    collect::{attach_assets, parse_declaration},
    extract::scan_references,
    file_scanner::{CandidateFile, FileRules, scan_files},
    graph::build_graph,
};

/// Everything one analysis pass produces.
///
/// Built once by [`analyze_repository`] and read-only afterwards: reporting,
/// correlation and optimization all consume the same value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub root: PathBuf,
    pub files_scanned: usize,
    /// Declarations in discovery order (sorted file path order).
    pub declarations: Vec<LibraryDeclaration>,
    /// References in discovery order, then text order within a file.
    pub references: Vec<UsageReference>,
    pub graph: DependencyGraph,
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Directory entries that could not be accessed during the walk.
    pub skipped_count: usize,
}

/// What a single worker produced for one file.
#[derive(Debug, Default)]
struct FileOutcome {
    declaration: Option<LibraryDeclaration>,
    references: Vec<UsageReference>,
    diagnostic: Option<ScanDiagnostic>,
}

impl FileOutcome {
    fn failed(file: &str, error: &anyhow::Error) -> Self {
        Self {
            diagnostic: Some(ScanDiagnostic {
                file: file.to_string(),
                error: format!("{error:#}"),
            }),
            ..Self::default()
        }
    }
}

/// Analyze every candidate file under `root`.
///
/// Files are processed on the rayon pool; each worker returns its own
/// [`FileOutcome`] and the outcomes are concatenated in file order once all
/// workers finish. Per-file failures become diagnostics. Only a missing or
/// unreadable root is an error.
pub fn analyze_repository(root: &Path, rules: &FileRules, verbose: bool) -> Result<AnalysisResult> {
    if !root.exists() {
        bail!("Root directory does not exist: {}", root.display());
    }
    if !root.is_dir() {
        bail!("Root is not a directory: {}", root.display());
    }
    fs::read_dir(root)
        .with_context(|| format!("Failed to read root directory: {}", root.display()))?;

    let scan = scan_files(root, rules, verbose);
    if scan.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            scan.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    let outcomes: Vec<FileOutcome> = scan
        .files
        .par_iter()
        .map(|file| process_file(root, file))
        .collect();

    let mut declarations = Vec::new();
    let mut references = Vec::new();
    let mut diagnostics = Vec::new();

    for outcome in outcomes {
        declarations.extend(outcome.declaration);
        references.extend(outcome.references);
        if let Some(diagnostic) = outcome.diagnostic {
            if verbose {
                eprintln!(
                    "{} {}: {}",
                    "warning:".bold().yellow(),
                    diagnostic.file,
                    diagnostic.error
                );
            }
            diagnostics.push(diagnostic);
        }
    }

    let graph = build_graph(&declarations, &references);

    Ok(AnalysisResult {
        root: root.to_path_buf(),
        files_scanned: scan.files.len(),
        declarations,
        references,
        graph,
        diagnostics,
        skipped_count: scan.skipped_count,
    })
}

/// Collect a declaration from a declaring file, or scan it for references.
///
/// A declaring file that declares nothing is scanned when it also has a
/// referencing role. A malformed declaring file is reported and not scanned.
fn process_file(root: &Path, file: &CandidateFile) -> FileOutcome {
    let path = root.join(&file.rel_path);
    let content = match fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", file.rel_path))
    {
        Ok(content) => content,
        Err(e) => return FileOutcome::failed(&file.rel_path, &e),
    };

    if file.roles.declares() {
        match parse_declaration(&content, &file.rel_path, file.roles) {
            Ok(Some(mut declaration)) => {
                attach_assets(root, &mut declaration);
                return FileOutcome {
                    declaration: Some(declaration),
                    ..FileOutcome::default()
                };
            }
            Ok(None) => {}
            Err(e) => return FileOutcome::failed(&file.rel_path, &e),
        }
    }

    if !file.roles.references() {
        return FileOutcome::default();
    }

    FileOutcome {
        references: scan_references(&content, &file.rel_path),
        ..FileOutcome::default()
    }
}
