//! `mintgen` entry point.

use clap::Parser;
use mintgen_cli::Cli;
use mintgen_core::GenerateError;

fn main() {
    let cli = Cli::parse();
    mintgen_cli::init_logging();

    let target_dir = cli.target_dir.clone();
    match mintgen_cli::run(cli) {
        Ok(summary) => {
            println!(
                "Generated {} item(s) into '{}'.",
                summary.generated,
                target_dir.display()
            );
            if !summary.missing_assets.is_empty() {
                eprintln!(
                    "{} asset file(s) could not be found; their metadata was still written.",
                    summary.missing_assets.len()
                );
            }
        }
        Err(err) => {
            match err.downcast_ref::<GenerateError>() {
                Some(GenerateError::Aborted) => eprintln!("Aborted."),
                _ => eprintln!("Error: {err:#}"),
            }
            std::process::exit(1);
        }
    }
}
