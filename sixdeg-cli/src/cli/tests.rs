//! Unit tests for the CLI commands and output rendering.

use super::commands::{load_graph, run_command};
use super::test_helpers::{create_listing, run_args, run_cli_expecting_error, temp_dir};
use super::{
    Cli, CliError, Command, CommandOutcome, DEFAULT_BASELINE, DEFAULT_REFERENCE, ProfileCommand,
    ProfileSummary, RunSummary, StrategyArg, render_outcome, render_profile, render_report,
    run_cli, write_counters,
};

use std::fs;

use clap::Parser;
use rstest::rstest;
use sixdeg_core::{
    Baseline, ComparisonReport, MalformedInputErrorCode, MeanDistance, ResultCounters,
    SixdegError,
};
use sixdeg_providers_adjacency::AdjacencyLoadError;
use sixdeg_test_support::{
    graphs::{ILLUSTRATIVE_TEXT, star_rows, to_adjacency_text},
    tracing::RecordingLayer,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn sample_report() -> ComparisonReport {
    ComparisonReport::new(
        2,
        Baseline::new(1.5).expect("baseline is valid"),
        3,
        ResultCounters::new(1, 1, 2),
    )
}

#[rstest]
fn run_reports_counters_for_illustrative_graph() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", ILLUSTRATIVE_TEXT)?;
    let summary = run_command(run_args(path, 2, "1"))?;
    assert_eq!(summary.report.component_size(), 3);
    assert_eq!(summary.report.counters().as_triple(), (0, 1, 2));
    assert_eq!(summary.output, None);
    Ok(())
}

#[rstest]
#[case::sequential(StrategyArg::Sequential)]
#[case::parallel(StrategyArg::Parallel)]
fn strategies_agree_on_star(#[case] strategy: StrategyArg) -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "star.txt", &to_adjacency_text(&star_rows(8)))?;
    let mut args = run_args(path, 0, "1");
    args.strategy = strategy;
    let summary = run_command(args)?;
    assert_eq!(summary.report.counters().as_triple(), (0, 4, 8));
    Ok(())
}

#[rstest]
fn run_writes_counters_to_output_file() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", ILLUSTRATIVE_TEXT)?;
    let output = dir.path().join("results.txt");
    let mut args = run_args(path, 2, "3/2");
    args.output = Some(output.clone());

    let outcome = run_cli(Cli {
        command: Command::Run(args),
    })?;
    assert_eq!(fs::read_to_string(&output)?, "1\n1\n2\n");

    let mut rendered = Vec::new();
    render_outcome(&outcome, &mut rendered)?;
    let text = String::from_utf8(rendered)?;
    assert!(text.contains("better connected: 1"));
    Ok(())
}

#[rstest]
fn run_rejects_unwritable_output() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", ILLUSTRATIVE_TEXT)?;
    let mut args = run_args(path, 2, "1");
    args.output = Some(dir.path().join("missing").join("results.txt"));
    let err = run_cli_expecting_error(Command::Run(args), "output into a missing directory");
    assert!(matches!(err, CliError::Output { .. }));
    assert_eq!(err.code(), None);
    Ok(())
}

#[rstest]
fn run_rejects_missing_listing() {
    let dir = temp_dir();
    let args = run_args(dir.path().join("absent.txt"), 0, "1");
    let err = run_cli_expecting_error(Command::Run(args), "missing listing must fail");
    assert!(matches!(err, CliError::Io { .. }));
}

#[rstest]
fn run_reports_malformed_listing_code() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", "2\n0 1\n1 0\n0 1\n")?;
    let err = run_cli_expecting_error(Command::Run(run_args(path, 0, "1")), "duplicate row");
    assert!(matches!(
        err,
        CliError::Load(AdjacencyLoadError::Malformed(_))
    ));
    assert_eq!(
        err.code(),
        Some(MalformedInputErrorCode::DuplicateRow.as_str())
    );
    Ok(())
}

#[rstest]
fn run_rejects_reference_outside_graph() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", ILLUSTRATIVE_TEXT)?;
    let err = run_cli_expecting_error(
        Command::Run(run_args(path, DEFAULT_REFERENCE, "1")),
        "default reference is outside the small graph",
    );
    assert!(matches!(
        err,
        CliError::Core(SixdegError::NodeOutOfRange { node: DEFAULT_REFERENCE, actors: 5 })
    ));
    assert_eq!(err.code(), Some("SIXDEG_NODE_OUT_OF_RANGE"));
    Ok(())
}

#[rstest]
fn profile_reports_component_and_mean() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", ILLUSTRATIVE_TEXT)?;
    let outcome = run_cli(Cli {
        command: Command::Profile(ProfileCommand { path, node: 0 }),
    })?;
    assert_eq!(
        outcome,
        CommandOutcome::Profile(ProfileSummary {
            node: 0,
            component_size: 3,
            mean: MeanDistance::new(3, 2),
        })
    );
    Ok(())
}

#[rstest]
fn execute_span_records_configuration() -> TestResult {
    let dir = temp_dir();
    let path = create_listing(&dir, "graph.txt", ILLUSTRATIVE_TEXT)?;
    let (layer, summary) = RecordingLayer::capture(|| run_command(run_args(path, 2, "1")));
    summary?;

    let execute = layer.span("cli.execute").expect("cli.execute span must exist");
    assert_eq!(execute.field("reference"), Some("2"));
    assert_eq!(execute.field("seed"), Some("17"));
    assert_eq!(execute.field("strategy"), Some("Sequential"));
    assert!(
        layer
            .span("cli.load_graph")
            .and_then(|span| span.field("path").map(|path| path.ends_with("graph.txt")))
            .unwrap_or(false)
    );
    assert!(layer.span("adjacency.load").is_some());
    assert!(layer.span("core.run").is_some());
    assert_eq!(layer.events_with_message("command completed").len(), 1);
    Ok(())
}

#[rstest]
fn load_graph_reports_path_on_open_failure() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.txt");
    match load_graph(&missing) {
        Err(CliError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[rstest]
fn write_counters_emits_three_lines() -> TestResult {
    let mut buffer = Vec::new();
    write_counters(ResultCounters::new(4, 10, 21), &mut buffer)?;
    assert_eq!(String::from_utf8(buffer)?, "4\n10\n21\n");
    Ok(())
}

#[rstest]
fn render_outcome_prints_counters_without_output_file() -> TestResult {
    let outcome = CommandOutcome::Run(RunSummary {
        report: sample_report(),
        output: None,
    });
    let mut buffer = Vec::new();
    render_outcome(&outcome, &mut buffer)?;
    assert_eq!(String::from_utf8(buffer)?, "1\n1\n2\n");
    Ok(())
}

#[rstest]
fn render_report_labels_every_value() -> TestResult {
    let mut buffer = Vec::new();
    render_report(&sample_report(), &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    for line in [
        "reference: 2",
        "baseline: 1.5",
        "component size: 3",
        "better connected: 1",
        "evaluated: 1",
        "sample size: 2",
    ] {
        assert!(text.contains(line), "missing `{line}` in {text:?}");
    }
    Ok(())
}

#[rstest]
#[case::reachable(MeanDistance::new(3, 2), "mean distance: 1.5 (3/2)")]
#[case::isolated(None, "mean distance: none")]
fn render_profile_prints_mean_as_ratio(
    #[case] mean: Option<MeanDistance>,
    #[case] expected: &str,
) -> TestResult {
    let summary = ProfileSummary {
        node: 4,
        component_size: 1,
        mean,
    };
    let mut buffer = Vec::new();
    render_profile(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("node: 4"));
    assert!(text.contains(expected));
    Ok(())
}

#[rstest]
fn clap_applies_documented_defaults() {
    let cli = Cli::try_parse_from(["sixdeg", "run", "graph.txt"]).expect("arguments must parse");
    let Command::Run(run) = cli.command else {
        panic!("expected the run command");
    };
    assert_eq!(run.reference, DEFAULT_REFERENCE);
    assert_eq!(
        run.baseline,
        DEFAULT_BASELINE.parse::<Baseline>().expect("default must parse")
    );
    assert_eq!(run.baseline, Baseline::from_ratio(1_319_167, 503_944).expect("valid"));
    assert_eq!(run.strategy, StrategyArg::Sequential);
    assert_eq!(run.seed, None);
    assert_eq!(run.output, None);
}

#[rstest]
fn clap_parses_every_run_option() {
    let cli = Cli::try_parse_from([
        "sixdeg",
        "run",
        "graph.txt",
        "--reference",
        "12",
        "--baseline",
        "2.5",
        "--seed",
        "99",
        "--strategy",
        "parallel",
        "--output",
        "out.txt",
    ])
    .expect("arguments must parse");
    let Command::Run(run) = cli.command else {
        panic!("expected the run command");
    };
    assert_eq!(run.reference, 12);
    assert_eq!(run.baseline.get(), 2.5);
    assert_eq!(run.seed, Some(99));
    assert_eq!(run.strategy, StrategyArg::Parallel);
    assert_eq!(run.output.as_deref(), Some(std::path::Path::new("out.txt")));
}

#[rstest]
#[case::unknown_strategy(&["sixdeg", "run", "g.txt", "--strategy", "gpu"])]
#[case::negative_baseline(&["sixdeg", "run", "g.txt", "--baseline", "-2"])]
#[case::ratio_garbage(&["sixdeg", "run", "g.txt", "--baseline", "a/b"])]
#[case::profile_without_node(&["sixdeg", "profile", "g.txt"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}
