//! Kernel command implementation
//!
//! Prints the coefficients of a Gaussian kernel bank for inspection.

use std::io::{self, Write};

use tracing::info;

use smoothing_core::math::gaussian::GaussianKernelBank;

use crate::{CliError, Result};

/// Run the kernel command
///
/// With both `pre` and `post`, prints that single kernel; otherwise prints
/// every `(pre, post)` kernel of the bank.
pub fn run(stddev: f64, precision: f64, pre: Option<usize>, post: Option<usize>) -> Result<()> {
    let stdout = io::stdout();
    write_kernels(stdout.lock(), stddev, precision, pre, post)
}

/// Write kernel coefficients to `writer`
pub fn write_kernels<W: Write>(
    mut writer: W,
    stddev: f64,
    precision: f64,
    pre: Option<usize>,
    post: Option<usize>,
) -> Result<()> {
    let bank = GaussianKernelBank::new(stddev, precision)?;
    let n = bank.n_side_samples();
    info!(
        "Kernel bank: stddev={}, precision={}, n_side_samples={}",
        stddev, precision, n
    );

    writeln!(writer, "# stddev = {}", bank.stddev())?;
    writeln!(writer, "# precision = {}", bank.precision())?;
    writeln!(writer, "# exp_factor = {}", bank.exp_factor())?;
    writeln!(writer, "# n_side_samples = {}", n)?;

    let selection: Vec<(usize, usize)> = match (pre, post) {
        (Some(pre), Some(post)) => vec![(pre, post)],
        (None, None) => (0..=n)
            .flat_map(|pre| (0..=n).map(move |post| (pre, post)))
            .collect(),
        _ => {
            return Err(CliError::InvalidArgument(
                "--pre and --post must be given together".to_string(),
            ))
        }
    };

    for (pre, post) in selection {
        let kernel = bank.kernel(pre, post).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "kernel ({}, {}) is outside the bank radius {}",
                pre, post, n
            ))
        })?;
        let coefficients: Vec<String> = kernel.iter().map(|c| format!("{:.9}", c)).collect();
        writeln!(writer, "{} {}: {}", pre, post, coefficients.join(" "))?;
    }

    Ok(())
}
