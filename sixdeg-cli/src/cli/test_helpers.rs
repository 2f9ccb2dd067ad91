//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use sixdeg_core::NodeId;
use tempfile::TempDir;

use super::{Cli, CliError, Command, RunCommand, StrategyArg, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_listing(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// A seeded sequential `run` with no output file.
pub(super) fn run_args(path: PathBuf, reference: NodeId, baseline: &str) -> RunCommand {
    RunCommand {
        path,
        reference,
        baseline: baseline.parse().expect("test baseline must parse"),
        seed: Some(17),
        strategy: StrategyArg::Sequential,
        output: None,
    }
}

pub(super) fn run_cli_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_cli(Cli { command }) {
        Ok(outcome) => panic!("{panic_msg}: {outcome:?}"),
        Err(err) => err,
    }
}
