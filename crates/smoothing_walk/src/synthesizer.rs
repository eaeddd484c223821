//! Layered random-walk synthesis.
//!
//! The pipeline builds a bounded seed sequence, then runs it through a chain
//! of Gaussian kernel banks. Before every stage, normal jitter scaled by
//! `width / jitter_divisor` is added and the result is clamped to
//! `[0, width]`. Early samples are damped by a linear ramp-in so the path
//! starts close to the axis midpoint.
//!
//! # Output Order
//!
//! 1. [`SeriesKind::Raw`]: the seed sequence
//! 2. [`SeriesKind::Stage`]: selected intermediate stages, in configuration order
//! 3. [`SeriesKind::Reference`]: the last filter applied directly to the seed
//!
//! All series share the time axis `t[ix] = ix / steps_per_unit`.

use std::sync::atomic::{AtomicBool, Ordering};

use smoothing_core::math::gaussian::GaussianKernelBank;
use smoothing_core::rng::NormalVariateGenerator;
use tracing::{debug, trace};

use crate::config::WalkConfig;
use crate::error::SynthesisError;
use crate::series::{Series, SeriesKind};

/// Ramp-in damping factor `min(1, ix / ramp_steps)`.
///
/// `ramp_steps` must be non-zero; [`WalkConfig`] validation guarantees it.
#[inline]
pub fn ramp_factor(ix: usize, ramp_steps: usize) -> f64 {
    (ix as f64 / ramp_steps as f64).min(1.0)
}

/// Builds the shared time axis `t[ix] = ix / steps_per_unit`.
pub fn time_axis(total_steps: usize, steps_per_unit: f64) -> Vec<f64> {
    let mut time = Vec::with_capacity(total_steps);
    for ix in 0..total_steps {
        time.push(ix as f64 / steps_per_unit);
    }
    time
}

/// Builds the seed sequence around the axis midpoint.
///
/// ```text
/// input[ix] = width/2 + (u·width − width/2) · ramp(ix),   u ~ U[0, 1)
/// ```
///
/// Every value lies in `[0, width]`.
pub fn seed_sequence(
    width: f64,
    total_steps: usize,
    ramp_steps: usize,
    normals: &mut NormalVariateGenerator,
) -> Vec<f64> {
    let half = width / 2.0;
    let mut input = Vec::with_capacity(total_steps);
    for ix in 0..total_steps {
        let deviation = normals.gen_uniform() * width - half;
        let value = half + deviation * ramp_factor(ix, ramp_steps);
        input.push(value.clamp(0.0, width));
    }
    input
}

/// Drives a chain of Gaussian kernel banks over a random seed sequence.
///
/// Construction validates the configuration and builds every kernel bank,
/// so [`RandomWalkSynthesizer::run`] can only fail through cancellation.
///
/// # Examples
///
/// ```rust
/// use smoothing_walk::{RandomWalkSynthesizer, SeriesKind, WalkConfig};
///
/// let config = WalkConfig::builder()
///     .width(52.0)
///     .total_steps(200)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let synthesizer = RandomWalkSynthesizer::new(config).unwrap();
/// let series = synthesizer.run().unwrap();
///
/// assert_eq!(series.len(), 4);
/// assert_eq!(series[0].kind, SeriesKind::Raw);
/// assert_eq!(series[3].kind, SeriesKind::Reference);
/// ```
#[derive(Clone, Debug)]
pub struct RandomWalkSynthesizer {
    config: WalkConfig,
    banks: Vec<GaussianKernelBank<f64>>,
}

impl RandomWalkSynthesizer {
    /// Validates the configuration and builds the kernel bank chain.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`WalkConfig::validate`].
    pub fn new(config: WalkConfig) -> Result<Self, SynthesisError> {
        config.validate()?;

        let mut banks = Vec::with_capacity(config.filters().len());
        for (index, spec) in config.filters().iter().enumerate() {
            let bank = spec
                .build::<f64>()
                .map_err(|source| SynthesisError::Kernel { index, source })?;
            debug!(
                index,
                stddev = spec.stddev,
                precision = spec.precision,
                n_side_samples = bank.n_side_samples(),
                "built kernel bank"
            );
            banks.push(bank);
        }

        Ok(Self { config, banks })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Returns the kernel banks in chain order.
    #[inline]
    pub fn banks(&self) -> &[GaussianKernelBank<f64>] {
        &self.banks
    }

    /// Runs one synthesis.
    ///
    /// Uses the configured seed, or operating-system entropy when none is set.
    pub fn run(&self) -> Result<Vec<Series>, SynthesisError> {
        let mut normals = self.generator();
        self.run_with_generator(&mut normals, None)
    }

    /// Runs one synthesis, checking `cancel` before every stage.
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError::Cancelled` once the flag is observed set.
    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> Result<Vec<Series>, SynthesisError> {
        let mut normals = self.generator();
        self.run_with_generator(&mut normals, Some(cancel))
    }

    /// Runs one synthesis drawing all randomness from `normals`.
    ///
    /// The seed sequence consumes `total_steps` uniforms, then each stage
    /// consumes `total_steps` normal variates.
    pub fn run_with_generator(
        &self,
        normals: &mut NormalVariateGenerator,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<Series>, SynthesisError> {
        let config = &self.config;
        let width = config.width();
        let total_steps = config.total_steps();
        let ramp_steps = config.ramp_steps();
        let jitter_scale = config.jitter_scale();

        let time = time_axis(total_steps, config.steps_per_unit());
        let input = seed_sequence(width, total_steps, ramp_steps, normals);

        let mut stages: Vec<Vec<f64>> = Vec::with_capacity(self.banks.len());
        for (index, bank) in self.banks.iter().enumerate() {
            check_cancel(cancel)?;

            let previous = stages.last().unwrap_or(&input);
            let mut jittered = Vec::with_capacity(total_steps);
            for (ix, &value) in previous.iter().enumerate() {
                let jitter = normals.next_variate() * jitter_scale * ramp_factor(ix, ramp_steps);
                jittered.push((value + jitter).clamp(0.0, width));
            }

            let mut output = bank.filter(&jittered);
            clamp_all(&mut output, width);
            trace!(index, stddev = bank.stddev(), "filter stage complete");
            stages.push(output);
        }

        check_cancel(cancel)?;
        let mut reference = self
            .banks
            .last()
            .map(|bank| bank.filter(&input))
            .unwrap_or_default();
        clamp_all(&mut reference, width);

        let mut series = Vec::with_capacity(config.emit_stages().len() + 2);
        series.push(Series::from_values(SeriesKind::Raw, &input, &time));
        for &stage in config.emit_stages() {
            series.push(Series::from_values(
                SeriesKind::Stage(stage),
                &stages[stage],
                &time,
            ));
        }
        series.push(Series::from_values(SeriesKind::Reference, &reference, &time));

        debug!(
            total_steps,
            stages = stages.len(),
            emitted = series.len(),
            "synthesis complete"
        );
        Ok(series)
    }

    fn generator(&self) -> NormalVariateGenerator {
        match self.config.seed() {
            Some(seed) => NormalVariateGenerator::from_seed(seed),
            None => NormalVariateGenerator::from_entropy(),
        }
    }
}

/// Synthesizes the configured family of series.
///
/// # Errors
///
/// Returns `SynthesisError::InvalidParameter` or `SynthesisError::Kernel`
/// for an invalid configuration; no partial output is produced.
pub fn synthesize(config: &WalkConfig) -> Result<Vec<Series>, SynthesisError> {
    RandomWalkSynthesizer::new(config.clone())?.run()
}

/// Synthesizes the configured family of series, checking `cancel` between stages.
///
/// # Errors
///
/// As [`synthesize`], plus `SynthesisError::Cancelled`.
pub fn synthesize_with_cancel(
    config: &WalkConfig,
    cancel: &AtomicBool,
) -> Result<Vec<Series>, SynthesisError> {
    RandomWalkSynthesizer::new(config.clone())?.run_with_cancel(cancel)
}

/// Collaborator-facing entry point: the ordered list of series to plot.
///
/// Equivalent to [`synthesize`].
pub fn build_series(config: &WalkConfig) -> Result<Vec<Series>, SynthesisError> {
    synthesize(config)
}

fn check_cancel(cancel: Option<&AtomicBool>) -> Result<(), SynthesisError> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(SynthesisError::Cancelled),
        _ => Ok(()),
    }
}

// Round-off can push a convex combination one ulp past the bounds.
fn clamp_all(values: &mut [f64], width: f64) {
    for value in values.iter_mut() {
        *value = value.clamp(0.0, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use smoothing_core::math::gaussian::FilterSpec;

    fn small_config(seed: u64) -> WalkConfig {
        WalkConfig::builder()
            .width(100.0)
            .total_steps(20)
            .filters(vec![FilterSpec::new(1.5, 4.0)])
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_ramp_factor() {
        assert_eq!(ramp_factor(0, 50), 0.0);
        assert_eq!(ramp_factor(25, 50), 0.5);
        assert_eq!(ramp_factor(50, 50), 1.0);
        assert_eq!(ramp_factor(500, 50), 1.0);
    }

    #[test]
    fn test_time_axis() {
        let time = time_axis(5, 2.0);
        assert_eq!(time, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert!(time_axis(0, 2.0).is_empty());
    }

    #[test]
    fn test_seed_sequence_starts_at_midpoint() {
        let mut normals = NormalVariateGenerator::from_seed(1);
        let input = seed_sequence(52.0, 200, 50, &mut normals);

        assert_eq!(input.len(), 200);
        assert_relative_eq!(input[0], 26.0);
        for (ix, &value) in input.iter().enumerate() {
            let bound = 26.0 * ramp_factor(ix, 50);
            assert!((value - 26.0).abs() <= bound + 1e-12);
        }
    }

    #[test]
    fn test_small_scenario() {
        let series = synthesize(&small_config(42)).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].kind, SeriesKind::Raw);
        assert_eq!(series[1].kind, SeriesKind::Reference);

        let raw = &series[0];
        assert_eq!(raw.len(), 20);
        for (ix, point) in raw.points.iter().enumerate() {
            assert!(point.x >= 0.0 && point.x <= 100.0);
            assert_relative_eq!(point.y, ix as f64 * 0.5);
        }
    }

    #[test]
    fn test_reference_is_last_filter_on_raw() {
        let config = WalkConfig::builder()
            .width(52.0)
            .total_steps(120)
            .seed(5)
            .build()
            .unwrap();
        let synthesizer = RandomWalkSynthesizer::new(config).unwrap();
        let series = synthesizer.run().unwrap();

        let raw: Vec<f64> = series[0].xs().collect();
        let expected = synthesizer.banks().last().unwrap().filter(&raw);
        let reference: Vec<f64> = series.last().unwrap().xs().collect();
        for (a, b) in reference.iter().zip(&expected) {
            assert_relative_eq!(*a, b.clamp(0.0, 52.0));
        }
    }

    #[test]
    fn test_emitted_stage_order() {
        let config = WalkConfig::builder()
            .width(52.0)
            .total_steps(64)
            .emit_stages(vec![6, 0, 3])
            .seed(11)
            .build()
            .unwrap();
        let series = synthesize(&config).unwrap();

        let kinds: Vec<SeriesKind> = series.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SeriesKind::Raw,
                SeriesKind::Stage(6),
                SeriesKind::Stage(0),
                SeriesKind::Stage(3),
                SeriesKind::Reference,
            ]
        );
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = synthesize(&small_config(77)).unwrap();
        let b = synthesize(&small_config(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_with_generator_matches_seeded_run() {
        let config = small_config(13);
        let synthesizer = RandomWalkSynthesizer::new(config).unwrap();
        let mut normals = NormalVariateGenerator::from_seed(13);

        let direct = synthesizer.run_with_generator(&mut normals, None).unwrap();
        assert_eq!(direct, synthesizer.run().unwrap());
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = AtomicBool::new(true);
        let result = synthesize_with_cancel(&small_config(1), &cancel);
        assert_eq!(result, Err(SynthesisError::Cancelled));
    }

    #[test]
    fn test_cancel_flag_clear() {
        let cancel = AtomicBool::new(false);
        let result = synthesize_with_cancel(&small_config(1), &cancel).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_reference_config_builds_full_chain() {
        let config = WalkConfig::reference().with_seed(Some(1));
        let synthesizer = RandomWalkSynthesizer::new(config).unwrap();

        let radii: Vec<usize> = synthesizer.banks().iter().map(|b| b.n_side_samples()).collect();
        assert_eq!(radii, vec![6, 6, 8, 8, 8, 12, 28]);
    }

    #[test]
    fn test_single_step_sequence() {
        let config = WalkConfig::builder()
            .width(10.0)
            .total_steps(1)
            .seed(3)
            .build()
            .unwrap();
        let series = build_series(&config).unwrap();
        for s in &series {
            assert_eq!(s.len(), 1);
            // ramp(0) = 0 damps both seed deviation and jitter
            assert_relative_eq!(s.points[0].x, 5.0);
        }
    }
}
