//! Command-line interface for the sixdeg comparison.
//!
//! `run` loads an adjacency listing and compares sampled peers of the
//! reference actor against its baseline. `profile` reports one node's
//! component size and mean distance, which is how a baseline is obtained.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandOutcome, DEFAULT_BASELINE, DEFAULT_REFERENCE, ProfileCommand,
    ProfileSummary, RunCommand, RunSummary, StrategyArg, render_outcome, render_profile,
    render_report, run_cli, write_counters,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
