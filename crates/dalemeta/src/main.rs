// crates/dalemeta/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dalemeta_core::{pipeline, Catalog};
use dalemeta_parser::FsDataSource;

/// Where the merged raw dataset lives unless overridden.
const DEFAULT_DATA_DIR: &str = "/data/mine/vadeec/merged";
const DEFAULT_OUTPUT_DIR: &str = ".";

/// A CLI for the UK-DALE metadata converter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Builds the metadata document set from the raw data directory.
    Convert {
        /// Directory holding house_<n>/labels.dat and channel logs.
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Directory the YAML documents are written into.
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            data_dir,
            output_dir,
        } => {
            println!("Converting raw data from: {}", data_dir.display());

            let catalog = Catalog::load().context("failed to load the embedded catalog")?;
            let tz = catalog.timezone()?;
            let source = FsDataSource::new(&data_dir, tz);

            let summary = pipeline::run(&source, &catalog, &output_dir)
                .context("metadata conversion failed")?;

            println!("\n--- Conversion Summary ---");
            println!("  Households: {}", summary.buildings);
            println!("  Meters:     {}", summary.meters);
            println!("  Appliances: {}", summary.appliances);
            println!("  Documents:  {}", summary.documents);
            println!(
                "  Timeframe:  {} -> {}",
                summary.timeframe.start.to_rfc3339(),
                summary.timeframe.end.to_rfc3339()
            );
        }
    }

    println!("\n✅ CLI command finished successfully.");
    Ok(())
}
