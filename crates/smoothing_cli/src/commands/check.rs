//! Check command implementation
//!
//! Validates the loaded configuration and prints the resolved settings.

use std::io::{self, Write};

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    let stdout = io::stdout();
    write_report(stdout.lock(), config)
}

/// Validate `config` and write the resolved settings to `writer`
pub fn write_report<W: Write>(mut writer: W, config: &CliConfig) -> Result<()> {
    let walk = config.to_walk_config()?;
    info!("Configuration is valid");

    writeln!(writer, "width          = {}", walk.width())?;
    writeln!(writer, "total_steps    = {}", walk.total_steps())?;
    writeln!(writer, "steps_per_unit = {}", walk.steps_per_unit())?;
    writeln!(writer, "ramp_steps     = {}", walk.ramp_steps())?;
    writeln!(writer, "jitter_divisor = {}", walk.jitter_divisor())?;
    writeln!(writer, "jitter_scale   = {}", walk.jitter_scale())?;
    writeln!(writer, "emit_stages    = {:?}", walk.emit_stages())?;
    match walk.seed() {
        Some(seed) => writeln!(writer, "seed           = {}", seed)?,
        None => writeln!(writer, "seed           = (entropy)")?,
    }
    writeln!(writer, "log_level      = {}", config.log_level)?;
    for (index, spec) in walk.filters().iter().enumerate() {
        writeln!(
            writer,
            "filter[{}]      = stddev {}, precision {}, radius {}",
            index,
            spec.stddev,
            spec.precision,
            spec.n_side_samples()?
        )?;
    }
    Ok(())
}
