//! Random-walk synthesis configuration.
//!
//! This module provides [`WalkConfig`] and its builder. Every tunable of the
//! pipeline (filter chain, ramp-in window, jitter scale, emitted stages) is a
//! named parameter; the constants below are the canonical defaults.

use super::error::SynthesisError;
use smoothing_core::math::gaussian::FilterSpec;

/// Maximum sequence length accepted by the synthesizer.
pub const MAX_TOTAL_STEPS: usize = 1_000_000;

/// Default number of samples per unit of the time axis.
pub const DEFAULT_STEPS_PER_UNIT: f64 = 2.0;

/// Default ramp-in window, in samples.
pub const DEFAULT_RAMP_STEPS: usize = 50;

/// Default divisor applied to `width` to scale normal jitter.
///
/// `12 = 2 directions × 3 standard deviations × 2 shrink factor`.
pub const DEFAULT_JITTER_DIVISOR: f64 = 12.0;

/// Intermediate stages emitted when none are selected explicitly.
pub const DEFAULT_EMIT_STAGES: [usize; 2] = [3, 6];

/// Width of the reference plot.
pub const REFERENCE_WIDTH: f64 = 52.0;

/// Length of the reference plot.
pub const REFERENCE_TOTAL_STEPS: usize = 535;

/// Default filter chain as `(stddev, precision)` pairs.
pub const DEFAULT_CHAIN: [(f64, f64); 7] = [
    (1.5, 4.0),
    (1.5, 4.0),
    (2.0, 4.0),
    (2.0, 4.0),
    (2.0, 4.0),
    (3.0, 4.0),
    (7.0, 4.0),
];

/// Returns [`DEFAULT_CHAIN`] as filter specifications.
pub fn default_chain() -> Vec<FilterSpec> {
    DEFAULT_CHAIN
        .iter()
        .map(|&(stddev, precision)| FilterSpec::new(stddev, precision))
        .collect()
}

/// Random-walk synthesis configuration.
///
/// Immutable once built. Use [`WalkConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use smoothing_walk::WalkConfig;
/// use smoothing_core::math::FilterSpec;
///
/// let config = WalkConfig::builder()
///     .width(100.0)
///     .total_steps(20)
///     .filters(vec![FilterSpec::new(1.5, 4.0)])
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.total_steps(), 20);
/// assert!(config.emit_stages().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WalkConfig {
    width: f64,
    total_steps: usize,
    steps_per_unit: f64,
    filters: Vec<FilterSpec>,
    ramp_steps: usize,
    jitter_divisor: f64,
    emit_stages: Vec<usize>,
    seed: Option<u64>,
}

impl WalkConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Configuration of the reference plot: width 52, 535 samples, default chain.
    pub fn reference() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            total_steps: REFERENCE_TOTAL_STEPS,
            steps_per_unit: DEFAULT_STEPS_PER_UNIT,
            filters: default_chain(),
            ramp_steps: DEFAULT_RAMP_STEPS,
            jitter_divisor: DEFAULT_JITTER_DIVISOR,
            emit_stages: DEFAULT_EMIT_STAGES.to_vec(),
            seed: None,
        }
    }

    /// Returns the bound of the noisy axis; values lie in `[0, width]`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the sequence length.
    #[inline]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns the number of samples per time unit.
    #[inline]
    pub fn steps_per_unit(&self) -> f64 {
        self.steps_per_unit
    }

    /// Returns the filter chain, applied in order.
    #[inline]
    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    /// Returns the ramp-in window in samples.
    #[inline]
    pub fn ramp_steps(&self) -> usize {
        self.ramp_steps
    }

    /// Returns the jitter divisor.
    #[inline]
    pub fn jitter_divisor(&self) -> f64 {
        self.jitter_divisor
    }

    /// Returns the standard deviation of the inter-stage jitter, `width / jitter_divisor`.
    #[inline]
    pub fn jitter_scale(&self) -> f64 {
        self.width / self.jitter_divisor
    }

    /// Returns the chain indices of the intermediate stages to emit.
    #[inline]
    pub fn emit_stages(&self) -> &[usize] {
        &self.emit_stages
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a copy of this configuration with a different seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError::InvalidParameter` if:
    /// - `width` or `steps_per_unit` is not positive and finite
    /// - `total_steps` is 0 or greater than [`MAX_TOTAL_STEPS`]
    /// - `ramp_steps` is 0
    /// - `jitter_divisor` is not positive and finite
    /// - the filter chain is empty
    /// - an emitted stage index is outside the chain
    ///
    /// Returns `SynthesisError::Kernel` if a filter has an invalid
    /// standard deviation or precision, or a radius above the kernel limit.
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(SynthesisError::invalid_parameter(
                "width",
                format!("must be positive and finite, got {}", self.width),
            ));
        }
        if self.total_steps == 0 || self.total_steps > MAX_TOTAL_STEPS {
            return Err(SynthesisError::invalid_parameter(
                "total_steps",
                format!(
                    "{} is outside the valid range [1, {}]",
                    self.total_steps, MAX_TOTAL_STEPS
                ),
            ));
        }
        if !(self.steps_per_unit > 0.0 && self.steps_per_unit.is_finite()) {
            return Err(SynthesisError::invalid_parameter(
                "steps_per_unit",
                format!("must be positive and finite, got {}", self.steps_per_unit),
            ));
        }
        if self.ramp_steps == 0 {
            return Err(SynthesisError::invalid_parameter(
                "ramp_steps",
                "must be at least 1",
            ));
        }
        if !(self.jitter_divisor > 0.0 && self.jitter_divisor.is_finite()) {
            return Err(SynthesisError::invalid_parameter(
                "jitter_divisor",
                format!("must be positive and finite, got {}", self.jitter_divisor),
            ));
        }
        if self.filters.is_empty() {
            return Err(SynthesisError::invalid_parameter(
                "filters",
                "chain must contain at least one filter",
            ));
        }
        for (index, spec) in self.filters.iter().enumerate() {
            spec.n_side_samples()
                .map_err(|source| SynthesisError::Kernel { index, source })?;
        }
        if let Some(&stage) = self.emit_stages.iter().find(|&&s| s >= self.filters.len()) {
            return Err(SynthesisError::invalid_parameter(
                "emit_stages",
                format!(
                    "stage {} is outside a chain of {} filters",
                    stage,
                    self.filters.len()
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for [`WalkConfig`].
///
/// `width` and `total_steps` are required. Unset parameters take the
/// canonical defaults; when no stages are selected, the members of
/// [`DEFAULT_EMIT_STAGES`] that exist in the chain are emitted.
#[derive(Clone, Debug, Default)]
pub struct WalkConfigBuilder {
    width: Option<f64>,
    total_steps: Option<usize>,
    steps_per_unit: Option<f64>,
    filters: Option<Vec<FilterSpec>>,
    ramp_steps: Option<usize>,
    jitter_divisor: Option<f64>,
    emit_stages: Option<Vec<usize>>,
    seed: Option<u64>,
}

impl WalkConfigBuilder {
    /// Sets the bound of the noisy axis.
    #[inline]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the sequence length.
    #[inline]
    pub fn total_steps(mut self, total_steps: usize) -> Self {
        self.total_steps = Some(total_steps);
        self
    }

    /// Sets the number of samples per time unit.
    #[inline]
    pub fn steps_per_unit(mut self, steps_per_unit: f64) -> Self {
        self.steps_per_unit = Some(steps_per_unit);
        self
    }

    /// Replaces the filter chain.
    #[inline]
    pub fn filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Appends one filter to the chain.
    #[inline]
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.get_or_insert_with(Vec::new).push(spec);
        self
    }

    /// Sets the ramp-in window in samples.
    #[inline]
    pub fn ramp_steps(mut self, ramp_steps: usize) -> Self {
        self.ramp_steps = Some(ramp_steps);
        self
    }

    /// Sets the jitter divisor.
    #[inline]
    pub fn jitter_divisor(mut self, jitter_divisor: f64) -> Self {
        self.jitter_divisor = Some(jitter_divisor);
        self
    }

    /// Selects the intermediate stages to emit, by chain index.
    #[inline]
    pub fn emit_stages(mut self, emit_stages: Vec<usize>) -> Self {
        self.emit_stages = Some(emit_stages);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError::InvalidParameter` if `width` or
    /// `total_steps` is not set, or any condition of [`WalkConfig::validate`].
    pub fn build(self) -> Result<WalkConfig, SynthesisError> {
        let width = self
            .width
            .ok_or_else(|| SynthesisError::invalid_parameter("width", "must be specified"))?;
        let total_steps = self
            .total_steps
            .ok_or_else(|| SynthesisError::invalid_parameter("total_steps", "must be specified"))?;

        let filters = self.filters.unwrap_or_else(default_chain);
        let emit_stages = self.emit_stages.unwrap_or_else(|| {
            DEFAULT_EMIT_STAGES
                .iter()
                .copied()
                .filter(|&stage| stage < filters.len())
                .collect()
        });

        let config = WalkConfig {
            width,
            total_steps,
            steps_per_unit: self.steps_per_unit.unwrap_or(DEFAULT_STEPS_PER_UNIT),
            filters,
            ramp_steps: self.ramp_steps.unwrap_or(DEFAULT_RAMP_STEPS),
            jitter_divisor: self.jitter_divisor.unwrap_or(DEFAULT_JITTER_DIVISOR),
            emit_stages,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
