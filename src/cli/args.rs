//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Collect declarations and references, report graph issues
//! - `optimize`: Propose a reduced base client library
//! - `init`: Initialize the clibscan configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use super::commands::analyze::AnalyzeRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Analyze(cmd)) => cmd.args.common.verbose,
            Some(Command::Optimize(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Repository root to analyze (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Declarations, references and graph as JSON
    Json,
}

#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Page usage snapshot (JSON) to correlate with declarations
    #[arg(long)]
    pub pages: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Checks to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<AnalyzeRule>,
    #[command(flatten)]
    pub args: AnalyzeArgs,
}

#[derive(Debug, Parser)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Page usage snapshot (JSON); without it every embed is kept
    #[arg(long)]
    pub pages: Option<PathBuf>,

    /// Substring identifying the base library (overrides config file)
    #[arg(long)]
    pub base: Option<String>,

    /// Project name used for the proposed category (overrides config file)
    #[arg(long)]
    pub project: Option<String>,

    /// Output directory for generated files (overrides config file)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Actually write the proposed library (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct OptimizeCommand {
    #[command(flatten)]
    pub args: OptimizeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze client library declarations, references and dependencies
    Analyze(AnalyzeCommand),
    /// Propose a reduced base client library for the analyzed page
    Optimize(OptimizeCommand),
    /// Initialize a new .clibscanrc.json configuration file
    Init,
}
