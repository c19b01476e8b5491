use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use super::super::args::CommonArgs;
use super::{CommandResult, CommandSummary};
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{AnalysisResult, FileRules, analyze_repository},
    issues::{Issue, Severity},
};

/// Loaded configuration plus the root it was resolved against.
pub struct Prepared {
    pub root: PathBuf,
    pub config: Config,
}

/// Resolve the root and load its configuration.
pub fn prepare(common: &CommonArgs) -> Result<Prepared> {
    let root = common.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let loaded = load_config(&root)?;

    if common.verbose && !loaded.from_file {
        eprintln!(
            "{} No {} found, using default configuration",
            "note:".bold(),
            CONFIG_FILE_NAME
        );
    }

    Ok(Prepared {
        root,
        config: loaded.config,
    })
}

/// Run the full analysis under `root` with the configured file rules.
pub fn analyze(root: &Path, config: &Config, verbose: bool) -> Result<AnalysisResult> {
    let rules = FileRules::from_config(config)?;
    analyze_repository(root, &rules, verbose)
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    files_scanned: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        parse_error_count,
        files_scanned,
    }
}
