use std::path::PathBuf;

use anyhow::Result;

use super::super::args::OptimizeCommand;
use super::{
    CommandResult, CommandSummary, OptimizeSummary,
    helper::{analyze, finish, prepare},
};
use crate::{
    correlate::{correlate, load_snapshot},
    issues::Issue,
    optimize::{
        ProposalOptions, propose, render_manifest, render_site_manifest, write_proposal,
    },
    rules::parse_error::check_parse_errors,
};

pub fn optimize_command(cmd: OptimizeCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let verbose = args.common.verbose;
    let prepared = prepare(&args.common)?;
    let config = &prepared.config;

    let result = analyze(&prepared.root, config, verbose)?;

    let snapshot = args.pages.as_deref().map(load_snapshot).transpose()?;
    let correlation = snapshot
        .as_ref()
        .map(|snapshot| correlate(snapshot, &result.declarations));

    let options = ProposalOptions {
        base_category: args.base.as_deref().unwrap_or(&config.base_category),
        project_name: args.project.as_deref().unwrap_or(&config.project_name),
    };
    let proposal = propose(
        &result.declarations,
        &result.graph,
        correlation.as_ref(),
        options,
    )?;

    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    let written = if args.apply {
        write_proposal(&proposal, &out_dir)?
    } else {
        Vec::new()
    };

    let issues: Vec<Issue> = check_parse_errors(&result.diagnostics)
        .into_iter()
        .map(Issue::ParseError)
        .collect();

    Ok(finish(
        CommandSummary::Optimize(OptimizeSummary {
            manifest: render_manifest(&proposal),
            site_manifest: render_site_manifest(&proposal.site),
            proposal,
            out_dir,
            written,
            is_apply: args.apply,
        }),
        issues,
        result.files_scanned,
        false,
    ))
}
