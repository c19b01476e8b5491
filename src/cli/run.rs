use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, analyze::analyze_command, init::init, optimize::optimize_command,
    },
};

/// Dispatch to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Analyze(cmd)) => analyze_command(cmd),
        Some(Command::Optimize(cmd)) => optimize_command(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
