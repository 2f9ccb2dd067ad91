//! Command implementations and argument parsing for the sixdeg CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use sixdeg_core::{
    AdjacencyGraph, Baseline, ComparisonBuilder, ComparisonReport, ExecutionStrategy,
    MeanDistance, NodeId, ResultCounters, Sampler, SixdegError, find_component, profile,
};
use sixdeg_providers_adjacency::{AdjacencyLoadError, load_adjacency};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Reference actor compared against when `--reference` is omitted.
pub const DEFAULT_REFERENCE: NodeId = 359_910;

/// Baseline mean distance of [`DEFAULT_REFERENCE`], as a hop-count ratio.
pub const DEFAULT_BASELINE: &str = "1319167/503944";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sixdeg",
    about = "Compare how well connected an actor is against sampled peers."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sample peers of the reference actor and compare them with its baseline.
    Run(RunCommand),
    /// Report the component size and mean distance of a single actor.
    Profile(ProfileCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Adjacency listing: actor count, then one `id neighbour...` line per actor.
    pub path: PathBuf,

    /// Actor the sampled peers are compared against.
    #[arg(long, default_value_t = DEFAULT_REFERENCE)]
    pub reference: NodeId,

    /// Mean distance of the reference actor, as a number or `total/count`.
    #[arg(long, default_value = DEFAULT_BASELINE)]
    pub baseline: Baseline,

    /// Seed for the peer shuffle; a fresh entropy seed is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How the sampled peers are profiled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Sequential)]
    pub strategy: StrategyArg,

    /// Write the three result counters to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options accepted by the `profile` command.
#[derive(Debug, Args, Clone)]
pub struct ProfileCommand {
    /// Adjacency listing to load.
    pub path: PathBuf,

    /// Actor to profile.
    #[arg(long)]
    pub node: NodeId,
}

/// Execution strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Profile peers one after another.
    Sequential,
    /// Profile peers on the rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The adjacency listing could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The adjacency listing could not be read or was malformed.
    #[error(transparent)]
    Load(#[from] AdjacencyLoadError),
    /// The comparison rejected its configuration or input.
    #[error(transparent)]
    Core(#[from] SixdegError),
    /// The result counters could not be written.
    #[error("failed to write results to `{path}`: {source}")]
    Output {
        /// Destination that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Stable machine-readable code of the underlying failure, if it has one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) => Some(core.code().as_str()),
            Self::Load(AdjacencyLoadError::Malformed(malformed)) => Some(malformed.code().as_str()),
            Self::Io { .. } | Self::Load(_) | Self::Output { .. } => None,
        }
    }
}

/// Result of a `run` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Counters and context produced by the comparison.
    pub report: ComparisonReport,
    /// File the counters were written to, when `--output` was given.
    pub output: Option<PathBuf>,
}

/// Result of a `profile` command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSummary {
    /// Profiled actor.
    pub node: NodeId,
    /// Size of the actor's component, including the actor.
    pub component_size: usize,
    /// Mean distance to every other reachable actor, if any.
    pub mean: Option<MeanDistance>,
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A comparison run finished.
    Run(RunSummary),
    /// A single actor was profiled.
    Profile(ProfileSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, comparing, or writing results fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sixdeg_cli::cli::{Cli, Command, CommandOutcome, RunCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "5\n0 2\n1 2\n2 0 1\n3 4\n4 3\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         reference: 2,
///         baseline: "1".parse()?,
///         seed: Some(7),
///         strategy: StrategyArg::Sequential,
///         output: None,
///     }),
/// };
/// let CommandOutcome::Run(summary) = run_cli(cli)? else {
///     unreachable!("run command yields a run summary");
/// };
/// assert_eq!(summary.report.counters().as_triple(), (0, 1, 2));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutcome, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run).map(CommandOutcome::Run)
        }
        Command::Profile(command) => {
            span.record("command", field::display("profile"));
            profile_command(command).map(CommandOutcome::Profile)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        reference = command.reference,
        baseline = command.baseline.get(),
        strategy = ?command.strategy,
        seed = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunSummary, CliError> {
    let engine = ComparisonBuilder::new(command.reference, command.baseline.get())
        .with_execution_strategy(command.strategy.into())
        .build()?;
    let graph = load_graph(&command.path)?;

    let mut sampler = match command.seed {
        Some(seed) => {
            Span::current().record("seed", seed);
            Sampler::seeded(seed)
        }
        None => Sampler::from_entropy(),
    };
    let report = engine.run(&graph, &mut sampler)?;

    if let Some(path) = &command.output {
        write_counters_to_path(path, report.counters())?;
    }

    let counters = report.counters();
    info!(
        better = counters.better_than_reference(),
        evaluated = counters.total_evaluated(),
        sample = counters.sample_component_size(),
        "command completed"
    );
    Ok(RunSummary {
        report,
        output: command.output,
    })
}

#[instrument(name = "cli.profile", err, skip(command), fields(node = command.node))]
pub(super) fn profile_command(command: ProfileCommand) -> Result<ProfileSummary, CliError> {
    let graph = load_graph(&command.path)?;
    let component = find_component(&graph, command.node)?;
    let mean = profile(&graph, command.node)?.into_mean();
    info!(
        component = component.len(),
        mean = mean.map(|mean| mean.value()),
        "profile completed"
    );
    Ok(ProfileSummary {
        node: command.node,
        component_size: component.len(),
        mean,
    })
}

#[instrument(name = "cli.load_graph", err, skip_all, fields(path = %path.display()))]
pub(super) fn load_graph(path: &Path) -> Result<AdjacencyGraph, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_adjacency(BufReader::new(file))?)
}

fn write_counters_to_path(path: &Path, counters: ResultCounters) -> Result<(), CliError> {
    let output_error = |source| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(output_error)?;
    let mut writer = BufWriter::new(file);
    write_counters(counters, &mut writer).map_err(output_error)?;
    writer.flush().map_err(output_error)
}

/// Writes the three result counters, one per line: peers at least as well
/// connected as the reference, peers evaluated, and the sample size.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use sixdeg_cli::cli::write_counters;
/// # use sixdeg_core::ResultCounters;
/// let mut buffer = Vec::new();
/// write_counters(ResultCounters::new(0, 1, 2), &mut buffer)?;
/// assert_eq!(buffer, b"0\n1\n2\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_counters(counters: ResultCounters, mut writer: impl Write) -> io::Result<()> {
    let (better, evaluated, sample) = counters.as_triple();
    writeln!(writer, "{better}")?;
    writeln!(writer, "{evaluated}")?;
    writeln!(writer, "{sample}")
}

/// Renders `report` to `writer` as labelled, human-readable lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_report(report: &ComparisonReport, mut writer: impl Write) -> io::Result<()> {
    let counters = report.counters();
    writeln!(writer, "reference: {}", report.reference())?;
    writeln!(writer, "baseline: {}", report.baseline())?;
    writeln!(writer, "component size: {}", report.component_size())?;
    writeln!(
        writer,
        "better connected: {}",
        counters.better_than_reference()
    )?;
    writeln!(writer, "evaluated: {}", counters.total_evaluated())?;
    writeln!(writer, "sample size: {}", counters.sample_component_size())
}

/// Renders a profiled actor. The mean is also printed as `total/count`, which
/// `run --baseline` accepts verbatim.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_profile(summary: &ProfileSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "node: {}", summary.node)?;
    writeln!(writer, "component size: {}", summary.component_size)?;
    match summary.mean {
        Some(mean) => writeln!(
            writer,
            "mean distance: {} ({}/{})",
            mean.value(),
            mean.total(),
            mean.reachable()
        ),
        None => writeln!(writer, "mean distance: none"),
    }
}

/// Renders any command outcome to stdout-style output.
///
/// A run without `--output` prints the three counters; with `--output` the
/// counters already went to the file, so the labelled report is printed.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_outcome(outcome: &CommandOutcome, writer: impl Write) -> io::Result<()> {
    match outcome {
        CommandOutcome::Run(RunSummary {
            report,
            output: None,
        }) => write_counters(report.counters(), writer),
        CommandOutcome::Run(RunSummary {
            report,
            output: Some(_),
        }) => render_report(report, writer),
        CommandOutcome::Profile(summary) => render_profile(summary, writer),
    }
}
