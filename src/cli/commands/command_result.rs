use std::path::PathBuf;

use super::super::args::OutputFormat;
use crate::{
    core::AnalysisResult, correlate::Correlation, issues::Issue, optimize::ManifestProposal,
};

#[derive(Debug)]
pub enum CommandSummary {
    Analyze(AnalyzeSummary),
    Optimize(OptimizeSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct AnalyzeSummary {
    pub format: OutputFormat,
    pub result: AnalysisResult,
    pub correlation: Option<Correlation>,
}

#[derive(Debug)]
pub struct OptimizeSummary {
    pub proposal: ManifestProposal,
    /// Rendered `.content.xml` of the proposed base library.
    pub manifest: String,
    /// Rendered `.content.xml` of the proposed site library.
    pub site_manifest: String,
    pub out_dir: PathBuf,
    /// Files written; empty on a dry run.
    pub written: Vec<PathBuf>,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running clibscan commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for dry-run commands that report work to do).
    pub exit_on_errors: bool,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Number of files that could not be read or parsed.
    pub parse_error_count: usize,
    /// Number of candidate files analyzed.
    pub files_scanned: usize,
}
