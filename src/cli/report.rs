//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style. Every printer has a `*_to` variant
//! taking a writer so output can be tested without a terminal.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{AnalyzeSummary, CommandResult, CommandSummary, InitSummary, OptimizeSummary},
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::AnalysisResult,
    correlate::Correlation,
    issues::{Issue, Report, ReportLocation, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(result: &AnalysisResult, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} ({} {}, {} {}) - no issues found",
            result.files_scanned,
            plural(result.files_scanned, "file", "files"),
            result.declarations.len(),
            plural(result.declarations.len(), "declaration", "declarations"),
            result.references.len(),
            plural(result.references.len(), "reference", "references"),
        )
        .green()
    );
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Machine-readable analysis output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation: Option<&'a Correlation>,
    issues: Vec<JsonIssue>,
}

#[derive(Serialize)]
struct JsonIssue {
    severity: Severity,
    rule: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl From<&Issue> for JsonIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            severity: issue.severity(),
            rule: issue.rule().to_string(),
            message: issue.message(),
            location: issue.location().path().map(str::to_string),
            note: issue.details(),
        }
    }
}

/// Write the analysis as pretty-printed JSON.
pub fn print_json_to<W: Write>(
    summary: &AnalyzeSummary,
    issues: &[Issue],
    writer: &mut W,
) -> Result<()> {
    let report = JsonReport {
        result: &summary.result,
        correlation: summary.correlation.as_ref(),
        issues: issues.iter().map(JsonIssue::from).collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

/// Print an optimization proposal.
pub fn print_optimize_to<W: Write>(summary: &OptimizeSummary, writer: &mut W) {
    let proposal = &summary.proposal;

    let _ = writeln!(
        writer,
        "{} {} ({})",
        "Base library:".bold(),
        proposal.base_category,
        proposal.base_path
    );

    let width = proposal
        .original_embeds
        .iter()
        .map(|e| UnicodeWidthStr::width(e.as_str()))
        .max()
        .unwrap_or(0);
    for embed in &proposal.original_embeds {
        let status = if proposal.kept_embeds.contains(embed) {
            "keep".green()
        } else {
            "remove".red()
        };
        let padding = width - UnicodeWidthStr::width(embed.as_str());
        let _ = writeln!(writer, "  {}{:padding$}  {}", embed, "", status);
    }

    let _ = writeln!(
        writer,
        "{} {} of {} embed(s) ({}% reduction)",
        "Proposed:".bold(),
        proposal.kept_embeds.len(),
        proposal.original_embeds.len(),
        proposal.reduction_percent
    );

    if !proposal.removable.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            "Unused categories:".bold(),
            proposal.removable.join(", ")
        );
    }

    let _ = writeln!(
        writer,
        "{} {} (depends on {}, {} embed(s))",
        "Site library:".bold(),
        proposal.site.category,
        proposal.site.dependencies.join(", "),
        proposal.site.embeds.len()
    );

    if summary.is_apply {
        for path in &summary.written {
            let _ = writeln!(writer, "{} {}", "Wrote".green().bold(), path.display());
        }
    } else {
        let _ = writeln!(writer);
        let _ = write!(writer, "{}", summary.manifest);
        let _ = writeln!(writer);
        let _ = write!(writer, "{}", summary.site_manifest);
        let _ = writeln!(
            writer,
            "Run with {} to write {} and {} into {}.",
            "--apply".cyan(),
            proposal.category,
            proposal.site.category,
            summary.out_dir.display()
        );
    }
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if let Some(error) = &summary.error {
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), error);
    } else if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match &result.summary {
        CommandSummary::Analyze(summary) => match summary.format {
            OutputFormat::Json => print_json_to(summary, &result.issues, &mut stdout)?,
            OutputFormat::Text => {
                report_to(&result.issues, &mut stdout);
                if result.issues.is_empty() {
                    print_success_to(&summary.result, &mut stdout);
                }
            }
        },
        CommandSummary::Optimize(summary) => {
            report_to(&result.issues, &mut stdout);
            print_optimize_to(summary, &mut stdout);
        }
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }

    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
    Ok(())
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Page { path } => {
            let _ = writeln!(writer, "  {} page {}", "-->".blue(), path);
        }
        ReportLocation::Graph => {}
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem", "problems"),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}
