//! Gausswalk CLI - Command Line Front End for Random-Walk Synthesis
//!
//! Library half of the `gausswalk` binary: configuration loading, output
//! encoders and subcommand implementations.
//!
//! # Commands
//!
//! - `gausswalk generate` - Synthesize a random walk and its smoothed stages
//! - `gausswalk kernel --stddev <s>` - Inspect Gaussian kernel coefficients
//! - `gausswalk check` - Validate the resolved configuration

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
