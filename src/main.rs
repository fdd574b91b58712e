//! local-changes: find unpushed branches and uncommitted changes before wiping a machine
//! This tool scans a directory tree for git repositories and reports the ones holding
//! work that exists nowhere else.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use local_changes::commands::{handle_scan_command, ScanOptions};
use local_changes::core::GIT_OPERATION_TIMEOUT_SECS;

#[derive(Parser)]
#[command(name = "local-changes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan for git repositories
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Additional directory names to skip (node_modules is always skipped)
    #[arg(long = "skip", value_name = "NAME")]
    skip: Vec<String>,

    /// Number of repositories to query concurrently
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Query one repository at a time
    #[arg(long, conflicts_with = "jobs")]
    sequential: bool,

    /// Timeout in seconds for each git command
    #[arg(long, value_name = "SECS", default_value_t = GIT_OPERATION_TIMEOUT_SECS)]
    timeout: u64,

    /// Follow symbolic links while scanning
    #[arg(long)]
    follow_links: bool,

    /// List the unpushed branches of each repository
    #[arg(long)]
    show_branches: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only errors are logged, no progress)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so the report on stdout stays clean
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    handle_scan_command(ScanOptions {
        dir: cli.dir,
        extra_skips: cli.skip,
        jobs: cli.jobs,
        sequential: cli.sequential,
        timeout_secs: cli.timeout,
        follow_links: cli.follow_links,
        show_branches: cli.show_branches,
        json: cli.json,
        show_progress: !cli.quiet,
    })
    .await
}
