use anyhow::Result;
use clap::ValueEnum;

use super::super::args::AnalyzeCommand;
use super::{
    AnalyzeSummary, CommandResult, CommandSummary,
    helper::{analyze, finish, prepare},
};
use crate::{
    correlate::{correlate, load_snapshot},
    issues::Issue,
    rules::{
        circular::check_circular_dependencies, duplicate::check_duplicate_categories,
        missing::check_missing_categories, parse_error::check_parse_errors,
        unused::check_unused_categories,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AnalyzeRule {
    Duplicate,
    Circular,
    Unused,
    /// Needs `--pages`; skipped otherwise.
    Missing,
}

impl AnalyzeRule {
    pub fn all() -> Vec<AnalyzeRule> {
        vec![
            AnalyzeRule::Duplicate,
            AnalyzeRule::Circular,
            AnalyzeRule::Unused,
            AnalyzeRule::Missing,
        ]
    }
}

pub fn analyze_command(cmd: AnalyzeCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let verbose = args.common.verbose;
    let prepared = prepare(&args.common)?;

    let result = analyze(&prepared.root, &prepared.config, verbose)?;

    let snapshot = args.pages.as_deref().map(load_snapshot).transpose()?;
    let correlation = snapshot
        .as_ref()
        .map(|snapshot| correlate(snapshot, &result.declarations));

    let checks = if cmd.checks.is_empty() {
        AnalyzeRule::all()
    } else {
        cmd.checks.clone()
    };

    let mut all_issues: Vec<Issue> = Vec::new();

    for check in checks {
        match check {
            AnalyzeRule::Duplicate => {
                let issues = check_duplicate_categories(&result.graph);
                all_issues.extend(issues.into_iter().map(Issue::DuplicateCategory));
            }
            AnalyzeRule::Circular => {
                let issues = check_circular_dependencies(&result.graph);
                all_issues.extend(issues.into_iter().map(Issue::CircularDependency));
            }
            AnalyzeRule::Unused => {
                let issues = check_unused_categories(&result.declarations, &result.graph);
                all_issues.extend(issues.into_iter().map(Issue::UnusedCategory));
            }
            AnalyzeRule::Missing => {
                if let (Some(snapshot), Some(correlation)) = (&snapshot, &correlation) {
                    let issues = check_missing_categories(snapshot, correlation);
                    all_issues.extend(issues.into_iter().map(Issue::MissingCategory));
                }
            }
        }
    }

    let parse_errors = check_parse_errors(&result.diagnostics);
    all_issues.extend(parse_errors.into_iter().map(Issue::ParseError));

    let files_scanned = result.files_scanned;
    Ok(finish(
        CommandSummary::Analyze(AnalyzeSummary {
            format: args.format,
            result,
            correlation,
        }),
        all_issues,
        files_scanned,
        true,
    ))
}
