//! `mintgen` command-line surface.
//!
//! Single command, no subcommands: point it at a trait csv, a metadata
//! template, and an asset directory, and it fills a target directory with
//! numbered `(<index>.png, <index>.json)` pairs.

pub mod prompt;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mintgen_core::{AssumeYes, Confirm, GenerateConfig, GenerateSummary, generate};

use crate::prompt::StdinConfirm;

/// Generate metadata and artworks based on the metadata csv given.
#[derive(Debug, Parser)]
#[command(name = "mintgen", version)]
pub struct Cli {
    /// Path to the metadata csv file.
    #[arg(value_name = "metadata", default_value = "metadata.csv")]
    pub metadata_csv: PathBuf,

    /// Path to the metadata template file.
    #[arg(long, default_value = "metadata-template.json")]
    pub metadata_template: PathBuf,

    /// Path to the artwork directory.
    #[arg(long, default_value = "./assets")]
    pub asset_dir: PathBuf,

    /// Path to the target artwork/metadata directory.
    #[arg(long, default_value = "./target")]
    pub target_dir: PathBuf,

    /// Number of artwork/metadata pairs to generate (0 = all rows).
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Reuse an existing target directory without asking.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Install the tracing subscriber (stderr, `RUST_LOG` override, `info`
/// default). Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run one generation pass with the parsed arguments.
pub fn run(cli: Cli) -> anyhow::Result<GenerateSummary> {
    let config = GenerateConfig {
        metadata_csv: cli.metadata_csv,
        metadata_template: cli.metadata_template,
        asset_dir: cli.asset_dir,
        target_dir: cli.target_dir,
        limit: cli.limit,
    };

    let mut stdin_confirm = StdinConfirm;
    let mut assume_yes = AssumeYes;
    let confirm: &mut dyn Confirm = if cli.yes {
        &mut assume_yes
    } else {
        &mut stdin_confirm
    };

    let mut rng = rand::rng();
    generate(&config, &mut rng, confirm).context("generating collection")
}
