//! Command-line entry point for ccget.
//!
//! A shard includes tens of thousands of .warc.gz files holding the original
//! archives in WARC format. These commands move them in bulk: replicate the
//! per-shard path listings to an intermediary bucket, submit batch copy jobs
//! into archival storage, and submit batch restore jobs back to the standard
//! tier.
//!
//! Common Crawl is heavily throttled on S3, so bulk reads should always go
//! through an intermediary bucket in us-east-1 rather than the source bucket.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ccget",
    version,
    about = "Bulk copy and restore tooling for Common Crawl WARC shards"
)]
struct Cli {
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replicate shard path listings to an intermediary bucket and local cache
    Replicate(commands::replicate::ReplicateArgs),
    /// Submit a batch job copying a shard's WARC files to a destination bucket
    Copy(commands::copy::CopyArgs),
    /// Submit a batch job restoring archived WARC files to the standard tier
    Restore(commands::restore::RestoreArgs),
    /// Provision the batch-operations execution role
    CreateRole(commands::create_role::CreateRoleArgs),
    /// Report (and optionally watch) the status of a submitted job
    JobStatus(commands::job_status::JobStatusArgs),
}

fn init_logging(verbose: u8) {
    let level: log::LevelFilter = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Replicate(args) => commands::replicate::run(args).await,
        Commands::Copy(args) => commands::copy::run(args).await,
        Commands::Restore(args) => commands::restore::run(args).await,
        Commands::CreateRole(args) => commands::create_role::run(args).await,
        Commands::JobStatus(args) => commands::job_status::run(args).await,
    }
}
