//! CLI for parsing, deduplicating and renaming Chinese e-invoice PDFs.

mod export;
mod run;

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use fapiao_core::FapiaoConfig;

/// 普通发票 batch tool - extract fields, deduplicate, rename and export
#[derive(Parser)]
#[command(name = "fapiao")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the e-invoice PDF files
    dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match cli.config.as_deref() {
        Some(path) => FapiaoConfig::from_file(path)?,
        None => FapiaoConfig::default(),
    };

    run::run(&cli.dir, &config)
}
