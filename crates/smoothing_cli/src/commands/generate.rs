//! Generate command implementation
//!
//! Runs one synthesis and writes the series to stdout or a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use smoothing_walk::{synthesize, Series};

use crate::config::CliConfig;
use crate::output::{write_series, OutputFormat};
use crate::Result;

/// Command-line overrides for a single run
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Override of the configured width
    pub width: Option<f64>,
    /// Override of the configured sequence length
    pub steps: Option<usize>,
    /// Override of the configured seed
    pub seed: Option<u64>,
    /// Output format
    pub format: OutputFormat,
}

/// Apply overrides and synthesize
pub fn synthesize_series(config: &CliConfig, args: &GenerateArgs) -> Result<Vec<Series>> {
    let mut config = config.clone();
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(steps) = args.steps {
        config.total_steps = steps;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let walk = config.to_walk_config()?;
    info!("Synthesizing random walk...");
    info!("  Width: {}", walk.width());
    info!("  Steps: {}", walk.total_steps());
    info!("  Filters: {}", walk.filters().len());
    match walk.seed() {
        Some(seed) => info!("  Seed: {}", seed),
        None => info!("  Seed: entropy"),
    }

    Ok(synthesize(&walk)?)
}

/// Run the generate command
pub fn run(config: &CliConfig, args: &GenerateArgs, output: Option<&Path>) -> Result<()> {
    let series = synthesize_series(config, args)?;

    match output {
        Some(path) => {
            info!("Writing {} series to {}", series.len(), path.display());
            let mut file = BufWriter::new(File::create(path)?);
            write_series(&mut file, &series, args.format)?;
            file.flush()?;
        }
        None => {
            let stdout = io::stdout();
            write_series(stdout.lock(), &series, args.format)?;
        }
    }

    info!("Generation complete");
    Ok(())
}
