//! Gausswalk CLI entry point.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smoothing_cli::commands::{self, generate::GenerateArgs};
use smoothing_cli::config::{CliConfig, ConfigSource, LogLevel};
use smoothing_cli::output::OutputFormat;
use smoothing_cli::Result;
use smoothing_core::math::gaussian::DEFAULT_PRECISION;

/// Gaussian random-walk synthesizer
#[derive(Parser)]
#[command(name = "gausswalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "gausswalk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a random walk and its smoothed stages
    Generate {
        /// Bound of the noisy axis
        #[arg(short, long)]
        width: Option<f64>,

        /// Number of samples
        #[arg(short = 'n', long)]
        steps: Option<usize>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print Gaussian kernel coefficients
    Kernel {
        /// Standard deviation in samples
        #[arg(short, long)]
        stddev: f64,

        /// Truncation in standard deviations
        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: f64,

        /// Samples available before the centre
        #[arg(long, requires = "post")]
        pre: Option<usize>,

        /// Samples available after the centre
        #[arg(long, requires = "pre")]
        post: Option<usize>,
    },

    /// Validate the configuration and print the resolved settings
    Check,
}

fn init_tracing(level: LogLevel, verbose: bool) {
    let fallback = if verbose {
        LogLevel::Debug.as_filter_str()
    } else {
        level.as_filter_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: &Path) -> Result<(CliConfig, ConfigSource)> {
    let (config, source) = CliConfig::load_with_source(path)?;
    Ok((config.with_env_override()?, source))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, source) = load_config(&cli.config)?;

    init_tracing(config.log_level, cli.verbose);
    info!("Configuration {}", source);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Generate {
            width,
            steps,
            seed,
            format,
            output,
        } => {
            let args = GenerateArgs {
                width,
                steps,
                seed,
                format,
            };
            commands::generate::run(&config, &args, output.as_deref())
        }
        Commands::Kernel {
            stddev,
            precision,
            pre,
            post,
        } => commands::kernel::run(stddev, precision, pre, post),
        Commands::Check => commands::check::run(&config),
    }
}
