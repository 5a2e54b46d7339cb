//! stainnorm - Reinhard stain normalization CLI
//!
//! Normalizes histopathology tiles to the color statistics of a reference
//! image, and extracts those statistics for reuse.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "stainnorm")]
#[command(author, version, about = "Reinhard stain normalization for histopathology images")]
#[command(long_about = "
Matches the per-channel mean and standard deviation of each image, measured
in CIE Lab, to those of a reference image.

Examples:
  stainnorm normalize -r reference.png tile.png -o tile_norm.png
  stainnorm normalize -r reference.png 'tiles/*.png' -o normalized/
  stainnorm normalize -r reference.png tiles/*.tif -o out/ -f png
  stainnorm stats reference.png -o reference.yaml
  stainnorm normalize -s reference.yaml 'tiles/*.png' -o normalized/
  stainnorm stats reference.png --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write log records to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize images to a reference appearance
    #[command(visible_alias = "n")]
    Normalize(NormalizeArgs),

    /// Print or save the statistics of a reference image
    #[command(visible_alias = "s")]
    Stats(StatsArgs),
}

#[derive(Args)]
struct NormalizeArgs {
    /// Input image(s) or glob patterns
    #[arg(required = true)]
    input: Vec<String>,

    /// Reference image defining the target appearance
    #[arg(short, long, required_unless_present = "stats", conflicts_with = "stats")]
    reference: Option<PathBuf>,

    /// Reference statistics file (YAML or JSON) written by `stainnorm stats`
    #[arg(short, long)]
    stats: Option<PathBuf>,

    /// Output file (single input) or directory
    #[arg(short, long)]
    output: PathBuf,

    /// Output format extension for directory output (default: input's)
    #[arg(short, long)]
    format: Option<String>,
}

#[derive(Args)]
struct StatsArgs {
    /// Reference image
    reference: PathBuf,

    /// Emit JSON instead of YAML
    #[arg(long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. The returned guard
/// flushes the file sink when dropped.
fn init_logging(verbose: u8, log: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Normalize(args) => commands::normalize::run(args, cli.verbose),
        Commands::Stats(args) => commands::stats::run(args, cli.verbose),
    }
}
