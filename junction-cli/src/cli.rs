//! Command-line interface orchestration for junction.
//!
//! The `run` command reads one point per line from a file, builds the sorted
//! edge sequence once, and runs bounded mode, convergence mode, or both over
//! it.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use junction_core::{
    BoundedReport, ClusterSizes, ClusteringReport, ConvergenceReport, DEFAULT_TOP_M, EdgeStrategy,
    Junction, JunctionBuilder, JunctionError, MergeTarget, PointStore,
};
use thiserror::Error;
use tracing::{info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "junction",
    about = "Greedy nearest-pair clustering of 3-D points."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster the points in a file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// File with one `x,y,z` point per line.
    pub path: PathBuf,

    /// Perform this many successful merges and report the top-M product.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub merges: Option<usize>,

    /// Merge until two clusters remain and report the bridge between them.
    #[arg(long = "until-two")]
    pub until_two: bool,

    /// Number of largest clusters multiplied in bounded mode.
    #[arg(long = "top-m", default_value_t = DEFAULT_TOP_M)]
    pub top_m: usize,

    /// How edge distances are computed.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

/// Edge strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when available, otherwise sequential.
    Auto,
    /// Single-threaded.
    Sequential,
    /// Rayon worker pool.
    Parallel,
}

impl From<StrategyArg> for EdgeStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Neither `--merges` nor `--until-two` was given.
    #[error("select a mode with `--merges <K>`, `--until-two`, or both")]
    NoModeSelected,
    /// Clustering returned a report for a different mode than requested.
    #[error("clustering returned a report for the wrong mode; expected {expected}")]
    ModeMismatch {
        /// Mode that was requested.
        expected: &'static str,
    },
    /// Core validation or clustering failed.
    #[error(transparent)]
    Core(#[from] JunctionError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Input path as given.
    pub source: PathBuf,
    /// Number of points read.
    pub points: usize,
    /// Bounded-mode result, when `--merges` was given.
    pub bounded: Option<BoundedReport>,
    /// Convergence-mode result, when `--until-two` was given.
    pub convergence: Option<ConvergenceReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, validation, or clustering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use junction_cli::cli::{Cli, Command, RunCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0,0\n0,0,3\n10,10,10\n10,10,13\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         merges: Some(1),
///         until_two: false,
///         top_m: 3,
///         strategy: StrategyArg::Auto,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.bounded.map(|report| report.product), Some(2));
/// # Ok(())
/// # }
/// ```
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => run_command(run),
    }
}

#[instrument(
    name = "cli.run",
    err,
    skip(command),
    fields(path = %command.path.display(), merges = ?command.merges, until_two = command.until_two),
)]
fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    if command.merges.is_none() && !command.until_two {
        return Err(CliError::NoModeSelected);
    }

    let strategy = EdgeStrategy::from(command.strategy);
    let bounded = command
        .merges
        .map(|merges| configure(MergeTarget::Merges(merges), command.top_m, strategy))
        .transpose()?;
    let convergence = command
        .until_two
        .then(|| configure(MergeTarget::UntilTwo, command.top_m, strategy))
        .transpose()?;

    let points = read_points(&command.path)?;
    info!(points = points.len(), "points loaded");

    for junction in bounded.iter().chain(convergence.iter()) {
        junction.merge_target().required_merges(points.len())?;
    }
    let Some(edge_builder) = bounded.as_ref().or(convergence.as_ref()) else {
        return Err(CliError::NoModeSelected);
    };
    let edges = edge_builder.build_edges(&points)?;

    let bounded = bounded
        .map(|junction| bounded_report(junction.run_with_edges(&points, &edges)?))
        .transpose()?;
    let convergence = convergence
        .map(|junction| convergence_report(junction.run_with_edges(&points, &edges)?))
        .transpose()?;

    Ok(ExecutionSummary {
        source: command.path,
        points: points.len(),
        bounded,
        convergence,
    })
}

fn configure(
    target: MergeTarget,
    top_m: usize,
    strategy: EdgeStrategy,
) -> Result<Junction, JunctionError> {
    JunctionBuilder::new()
        .with_merge_target(target)
        .with_top_m(top_m)
        .with_edge_strategy(strategy)
        .build()
}

fn bounded_report(report: ClusteringReport) -> Result<BoundedReport, CliError> {
    match report {
        ClusteringReport::Bounded(report) => Ok(report),
        ClusteringReport::Convergence(_) => Err(CliError::ModeMismatch {
            expected: "bounded",
        }),
    }
}

fn convergence_report(report: ClusteringReport) -> Result<ConvergenceReport, CliError> {
    match report {
        ClusteringReport::Convergence(report) => Ok(report),
        ClusteringReport::Bounded(_) => Err(CliError::ModeMismatch {
            expected: "convergence",
        }),
    }
}

fn read_points(path: &Path) -> Result<PointStore, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PointStore::from_reader(BufReader::new(file))
        .map_err(JunctionError::from)
        .map_err(CliError::from)
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use junction_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     source: "points.txt".into(),
///     points: 0,
///     bounded: None,
///     convergence: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "source: points.txt\npoints: 0\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "source: {}", summary.source.display())?;
    writeln!(writer, "points: {}", summary.points)?;

    if let Some(report) = &summary.bounded {
        writeln!(writer, "mode: bounded")?;
        write_progress(&mut writer, report.merges, report.edges_consumed, &report.sizes)?;
        writeln!(writer, "top-{} product: {}", report.top_m, report.product)?;
    }

    if let Some(report) = &summary.convergence {
        let (a, b) = report.bridge.endpoints();
        writeln!(writer, "mode: convergence")?;
        write_progress(&mut writer, report.merges, report.edges_consumed, &report.sizes)?;
        writeln!(writer, "bridge: {a} {b}")?;
        writeln!(writer, "bridge distance: {}", report.bridge.distance())?;
        match report.x_product_integer {
            Some(exact) => writeln!(writer, "x product: {exact}")?,
            None => writeln!(writer, "x product: {}", report.x_product)?,
        }
    }
    Ok(())
}

fn write_progress(
    writer: &mut impl Write,
    merges: usize,
    edges_consumed: usize,
    sizes: &ClusterSizes,
) -> io::Result<()> {
    let rendered: Vec<String> = sizes.as_slice().iter().map(ToString::to_string).collect();
    writeln!(writer, "merges: {merges}")?;
    writeln!(writer, "edges consumed: {edges_consumed}")?;
    writeln!(writer, "clusters: {}", sizes.cluster_count())?;
    writeln!(writer, "sizes: {}", rendered.join(","))
}
