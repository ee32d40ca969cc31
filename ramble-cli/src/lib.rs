//! Command-line interface for planning Ramble walking tours.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod plan;
mod report;
mod snapshot;

pub use error::CliError;

use plan::PlanArgs;

const ARG_SNAPSHOT: &str = "snapshot";
const ARG_START: &str = "start";
const ARG_END: &str = "end";
const ARG_BUDGET: &str = "budget-minutes";
const ENV_SNAPSHOT: &str = "RAMBLE_CMDS_PLAN_SNAPSHOT";
const ENV_START: &str = "RAMBLE_CMDS_PLAN_START";
const ENV_END: &str = "RAMBLE_CMDS_PLAN_END";
const ENV_BUDGET: &str = "RAMBLE_CMDS_PLAN_BUDGET_MINUTES";

/// Run the Ramble CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, the snapshot, or the
/// solve itself fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger()?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ramble",
    about = "Plan scenic walking tours between named attractions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a tour over a city snapshot.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
