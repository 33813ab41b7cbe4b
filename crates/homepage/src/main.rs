//! Homepage CLI - builds the personal site into a static output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use homepage_static::BuildReport;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "homepage")]
#[command(about = "Build the personal homepage from templates and JSON data")]
#[command(version)]
pub struct Cli {
    /// Site root containing data.json, templates/ and the static assets
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Path to homepage.toml config file, relative to the site root
    #[arg(short, long, default_value = "homepage.toml")]
    config: PathBuf,

    /// Output directory (defaults to config or ".output")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let result = commands::build::run(&cli.root, &cli.config, cli.output);
    if let Err(e) = &result {
        tracing::error!("Build failed: {:#}", e);
    }

    ExitCode::from(exit_status(&result))
}

/// Process exit status for a build.
///
/// `0` when every page was written, `1` when pages failed or the templates
/// were missing, `2` when the build could not run.
fn exit_status(result: &Result<BuildReport>) -> u8 {
    match result {
        Ok(report) if report.succeeded() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}
