//! Output encoders for synthesized series.
//!
//! - `json`: array of `{ "kind", "points": [{ "x", "y" }] }`
//! - `csv`: header `series,index,x,y`, one row per point
//! - `table`: one summary row per series

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use smoothing_walk::Series;

use crate::Result;

/// Output format for the generate command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// One CSV row per point
    Csv,
    /// Human-readable summary
    #[default]
    Table,
}

#[derive(Serialize)]
struct CsvRow {
    series: String,
    index: usize,
    x: f64,
    y: f64,
}

/// Encode `series` in the requested format
///
/// Every encoder flushes `writer` before returning, so buffered I/O errors
/// surface as `CliError::Io`.
pub fn write_series<W: Write>(writer: W, series: &[Series], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, series),
        OutputFormat::Csv => write_csv(writer, series),
        OutputFormat::Table => write_table(writer, series),
    }
}

/// Encode as pretty-printed JSON
pub fn write_json<W: Write>(mut writer: W, series: &[Series]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, series)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Encode as CSV with one row per point
pub fn write_csv<W: Write>(writer: W, series: &[Series]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for s in series {
        let label = s.kind.to_string();
        for (index, point) in s.points.iter().enumerate() {
            csv_writer.serialize(CsvRow {
                series: label.clone(),
                index,
                x: point.x,
                y: point.y,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Summarise each series: length, range, mean and mean step size
pub fn write_table<W: Write>(mut writer: W, series: &[Series]) -> Result<()> {
    writeln!(
        writer,
        "┌─────────────┬────────┬──────────┬──────────┬──────────┬──────────┐"
    )?;
    writeln!(
        writer,
        "│ {:<11} │ {:>6} │ {:>8} │ {:>8} │ {:>8} │ {:>8} │",
        "Series", "Points", "Min", "Max", "Mean", "Step"
    )?;
    writeln!(
        writer,
        "├─────────────┼────────┼──────────┼──────────┼──────────┼──────────┤"
    )?;
    for s in series {
        let stats = SeriesStats::of(s);
        writeln!(
            writer,
            "│ {:<11} │ {:>6} │ {:>8.3} │ {:>8.3} │ {:>8.3} │ {:>8.4} │",
            s.kind.to_string(),
            s.len(),
            stats.min,
            stats.max,
            stats.mean,
            stats.mean_step
        )?;
    }
    writeln!(
        writer,
        "└─────────────┴────────┴──────────┴──────────┴──────────┴──────────┘"
    )?;
    writer.flush()?;
    Ok(())
}

/// Summary statistics of a series' noisy-axis values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Mean absolute difference between consecutive values
    pub mean_step: f64,
}

impl SeriesStats {
    /// Compute statistics; an empty series yields all zeros
    pub fn of(series: &Series) -> Self {
        if series.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                mean_step: 0.0,
            };
        }

        let n = series.len() as f64;
        let min = series.xs().fold(f64::INFINITY, f64::min);
        let max = series.xs().fold(f64::NEG_INFINITY, f64::max);
        let mean = series.xs().sum::<f64>() / n;
        let mean_step = if series.len() > 1 {
            series
                .points
                .windows(2)
                .map(|w| (w[1].x - w[0].x).abs())
                .sum::<f64>()
                / (n - 1.0)
        } else {
            0.0
        };

        Self {
            min,
            max,
            mean,
            mean_step,
        }
    }
}
