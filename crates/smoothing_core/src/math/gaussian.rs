//! Edge-aware discrete Gaussian filtering.
//!
//! This module provides [`GaussianKernelBank`], which precomputes every
//! truncated and renormalised Gaussian kernel needed to filter a finite
//! sequence, including the shrunken kernels used near either boundary.
//!
//! # Edge Policy
//!
//! Near the ends of a sequence fewer neighbours are available. Instead of
//! zero-padding (which darkens the ends), the kernel is truncated to the
//! available neighbours and renormalised so that its coefficients still sum
//! to one. The output keeps unit gain everywhere; smoothing is weaker within
//! `n_side_samples` of either end.
//!
//! All types use generic type parameter `T: num_traits::Float` for f32/f64 support.

use crate::types::SmoothingError;
use num_traits::Float;

/// Recommended number of standard deviations covered by a kernel.
///
/// `precision` is a required argument of [`GaussianKernelBank::new`]; this
/// value is what [`GaussianKernelBank::with_default_precision`] and
/// [`FilterSpec::with_default_precision`] use.
pub const DEFAULT_PRECISION: f64 = 5.0;

/// Maximum kernel radius (samples per side).
///
/// The kernel table holds `(n + 1)²` kernels of up to `2n + 1` coefficients,
/// so memory grows with the cube of the radius.
pub const MAX_SIDE_SAMPLES: usize = 128;

/// Standard deviation and precision of one Gaussian filter.
///
/// A plain value type used to describe filter chains in configuration;
/// call [`FilterSpec::build`] to obtain the kernel bank.
///
/// # Examples
///
/// ```rust
/// use smoothing_core::math::gaussian::FilterSpec;
///
/// let spec = FilterSpec::new(1.5, 4.0);
/// let bank = spec.build::<f64>().unwrap();
/// assert_eq!(bank.n_side_samples(), 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterSpec {
    /// Standard deviation in samples.
    pub stddev: f64,
    /// Number of standard deviations before truncation.
    pub precision: f64,
}

impl FilterSpec {
    /// Creates a filter specification.
    #[inline]
    pub fn new(stddev: f64, precision: f64) -> Self {
        Self { stddev, precision }
    }

    /// Creates a filter specification using [`DEFAULT_PRECISION`].
    #[inline]
    pub fn with_default_precision(stddev: f64) -> Self {
        Self::new(stddev, DEFAULT_PRECISION)
    }

    /// Number of samples per side the resulting kernel bank will use.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GaussianKernelBank::new`].
    pub fn n_side_samples(&self) -> Result<usize, SmoothingError> {
        validate(self.stddev, self.precision)?;
        side_samples(self.stddev, self.precision)
    }

    /// Builds the kernel bank described by this specification.
    ///
    /// # Errors
    ///
    /// Returns `SmoothingError::InvalidParameter` if `stddev` or `precision`
    /// is not positive and finite, and `SmoothingError::KernelTooLarge` if the
    /// radius exceeds [`MAX_SIDE_SAMPLES`].
    pub fn build<T: Float>(&self) -> Result<GaussianKernelBank<T>, SmoothingError> {
        let stddev = T::from(self.stddev).ok_or_else(|| {
            SmoothingError::invalid_parameter("stddev", "not representable in target type")
        })?;
        let precision = T::from(self.precision).ok_or_else(|| {
            SmoothingError::invalid_parameter("precision", "not representable in target type")
        })?;
        GaussianKernelBank::new(stddev, precision)
    }
}

/// Bank of precomputed, edge-renormalised Gaussian kernels.
///
/// # Mathematical Definition
/// ```text
/// exp_factor     = -1 / (2 σ²)
/// n              = max(1, round(σ · precision))
/// half_exp[i]    = exp(exp_factor · (i + 1)²),   i ∈ [0, n)
/// kernel(a, b)   = [half_exp[a-1], …, half_exp[0], 1, half_exp[0], …, half_exp[b-1]] / coeff_sum
/// coeff_sum(a,b) = Σ half_exp[0..a] + 1 + Σ half_exp[0..b]
/// ```
///
/// where `a` and `b` are the numbers of neighbours available before and
/// after the filtered position.
///
/// # Invariants
///
/// - Every kernel sums to one (unit DC gain)
/// - The centre coefficient of `kernel(a, b)` equals `1 / coeff_sum(a, b)`
/// - The bank is immutable after construction
///
/// # Examples
///
/// ```rust
/// use smoothing_core::math::gaussian::GaussianKernelBank;
///
/// let bank = GaussianKernelBank::new(1.5_f64, 4.0).unwrap();
/// let output = bank.filter(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
///
/// assert_eq!(output.len(), 7);
/// assert!((output[2] - output[4]).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct GaussianKernelBank<T: Float> {
    /// Standard deviation in samples.
    stddev: T,
    /// Truncation multiplier.
    precision: T,
    /// Gaussian exponent factor `-1 / (2 σ²)`.
    exp_factor: T,
    /// Samples on each side of the centre.
    n_side_samples: usize,
    /// Row-major table: `kernels[pre * (n_side_samples + 1) + post]`.
    kernels: Vec<Vec<T>>,
}

impl<T: Float> GaussianKernelBank<T> {
    /// Builds the kernel bank for the given standard deviation and precision.
    ///
    /// # Arguments
    ///
    /// * `stddev` - Standard deviation in samples (must be positive and finite)
    /// * `precision` - Standard deviations covered on each side
    ///   (must be positive and finite; [`DEFAULT_PRECISION`] is recommended)
    ///
    /// # Returns
    ///
    /// * `Ok(GaussianKernelBank)` - Fully tabulated bank
    /// * `Err(SmoothingError::InvalidParameter)` - Invalid `stddev`/`precision`
    /// * `Err(SmoothingError::KernelTooLarge)` - Radius above [`MAX_SIDE_SAMPLES`]
    pub fn new(stddev: T, precision: T) -> Result<Self, SmoothingError> {
        validate(stddev, precision)?;
        let n = side_samples(stddev, precision)?;

        let two = T::one() + T::one();
        let exp_factor = -T::one() / (two * stddev * stddev);

        // One-sided weights, centre excluded.
        let mut half_exp = Vec::with_capacity(n);
        let mut offset = T::zero();
        for _ in 0..n {
            offset = offset + T::one();
            half_exp.push((exp_factor * offset * offset).exp());
        }

        // Running totals for renormalisation.
        let mut half_sum = Vec::with_capacity(n);
        let mut running = T::zero();
        for &weight in &half_exp {
            running = running + weight;
            half_sum.push(running);
        }
        let partial = |count: usize| {
            if count == 0 {
                T::zero()
            } else {
                half_sum[count - 1]
            }
        };

        let mut kernels = Vec::with_capacity((n + 1) * (n + 1));
        for pre in 0..=n {
            for post in 0..=n {
                let coeff_sum = partial(pre) + T::one() + partial(post);
                let mut kernel = Vec::with_capacity(pre + post + 1);
                kernel.extend(half_exp[..pre].iter().rev().map(|&w| w / coeff_sum));
                kernel.push(T::one() / coeff_sum);
                kernel.extend(half_exp[..post].iter().map(|&w| w / coeff_sum));
                kernels.push(kernel);
            }
        }

        Ok(Self {
            stddev,
            precision,
            exp_factor,
            n_side_samples: n,
            kernels,
        })
    }

    /// Builds the kernel bank using [`DEFAULT_PRECISION`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`GaussianKernelBank::new`].
    pub fn with_default_precision(stddev: T) -> Result<Self, SmoothingError> {
        let precision = T::from(DEFAULT_PRECISION).ok_or_else(|| {
            SmoothingError::invalid_parameter("precision", "not representable in target type")
        })?;
        Self::new(stddev, precision)
    }

    /// Returns the standard deviation in samples.
    #[inline]
    pub fn stddev(&self) -> T {
        self.stddev
    }

    /// Returns the truncation multiplier.
    #[inline]
    pub fn precision(&self) -> T {
        self.precision
    }

    /// Returns the Gaussian exponent factor `-1 / (2 σ²)`.
    #[inline]
    pub fn exp_factor(&self) -> T {
        self.exp_factor
    }

    /// Returns the number of samples on each side of the centre.
    #[inline]
    pub fn n_side_samples(&self) -> usize {
        self.n_side_samples
    }

    /// Returns the kernel for the given numbers of available neighbours.
    ///
    /// The returned slice has `available_pre + 1 + available_post`
    /// coefficients, ordered from the earliest sample to the latest.
    /// Returns `None` if either count exceeds [`Self::n_side_samples`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use smoothing_core::math::gaussian::GaussianKernelBank;
    ///
    /// let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
    /// let kernel = bank.kernel(0, 8).unwrap();
    /// assert_eq!(kernel.len(), 9);
    /// assert!(bank.kernel(9, 0).is_none());
    /// ```
    #[inline]
    pub fn kernel(&self, available_pre: usize, available_post: usize) -> Option<&[T]> {
        if available_pre > self.n_side_samples || available_post > self.n_side_samples {
            return None;
        }
        let row = self.n_side_samples + 1;
        Some(&self.kernels[available_pre * row + available_post])
    }

    /// Filters a sequence, returning a new sequence of the same length.
    ///
    /// Empty input yields empty output; a single sample is returned unchanged.
    pub fn filter(&self, input: &[T]) -> Vec<T> {
        let mut output = vec![T::zero(); input.len()];
        self.apply(input, &mut output);
        output
    }

    /// Filters `input` into a pre-allocated `output` buffer.
    ///
    /// # Errors
    ///
    /// Returns `SmoothingError::InvalidParameter` if the buffers differ in length.
    pub fn filter_into(&self, input: &[T], output: &mut [T]) -> Result<(), SmoothingError> {
        if input.len() != output.len() {
            return Err(SmoothingError::invalid_parameter(
                "output",
                format!(
                    "length {} does not match input length {}",
                    output.len(),
                    input.len()
                ),
            ));
        }
        self.apply(input, output);
        Ok(())
    }

    fn apply(&self, input: &[T], output: &mut [T]) {
        let len = input.len();
        let n = self.n_side_samples;
        let row = n + 1;

        for (ix, out) in output.iter_mut().enumerate() {
            let available_pre = ix.min(n);
            let available_post = (len - ix - 1).min(n);
            let coeffs = &self.kernels[available_pre * row + available_post];
            let window = &input[ix - available_pre..=ix + available_post];

            *out = window
                .iter()
                .zip(coeffs)
                .fold(T::zero(), |acc, (&sample, &coeff)| acc + sample * coeff);
        }
    }
}

fn validate<T: Float>(stddev: T, precision: T) -> Result<(), SmoothingError> {
    if !(stddev > T::zero() && stddev.is_finite()) {
        return Err(SmoothingError::invalid_parameter(
            "stddev",
            format!("must be positive and finite, got {}", describe(stddev)),
        ));
    }
    if !(precision > T::zero() && precision.is_finite()) {
        return Err(SmoothingError::invalid_parameter(
            "precision",
            format!("must be positive and finite, got {}", describe(precision)),
        ));
    }
    Ok(())
}

fn side_samples<T: Float>(stddev: T, precision: T) -> Result<usize, SmoothingError> {
    let radius = (stddev * precision).round().to_u64().unwrap_or(u64::MAX);
    match usize::try_from(radius) {
        Ok(n) if n <= MAX_SIDE_SAMPLES => Ok(n.max(1)),
        _ => Err(SmoothingError::KernelTooLarge {
            radius,
            max: MAX_SIDE_SAMPLES,
        }),
    }
}

fn describe<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_side_samples_from_stddev_and_precision() {
        assert_eq!(GaussianKernelBank::new(2.0_f64, 4.0).unwrap().n_side_samples(), 8);
        assert_eq!(GaussianKernelBank::new(1.5_f64, 4.0).unwrap().n_side_samples(), 6);
        assert_eq!(GaussianKernelBank::new(7.0_f64, 4.0).unwrap().n_side_samples(), 28);
    }

    #[test]
    fn test_side_samples_at_least_one() {
        let bank = GaussianKernelBank::new(0.1_f64, 1.0).unwrap();
        assert_eq!(bank.n_side_samples(), 1);
    }

    #[test]
    fn test_exp_factor() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        assert_relative_eq!(bank.exp_factor(), -0.125, epsilon = 1e-15);
        assert_relative_eq!(bank.stddev(), 2.0);
        assert_relative_eq!(bank.precision(), 4.0);
    }

    #[test]
    fn test_default_precision() {
        let bank = GaussianKernelBank::with_default_precision(2.0_f64).unwrap();
        assert_eq!(bank.n_side_samples(), 10);
        assert_relative_eq!(bank.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_invalid_stddev() {
        for stddev in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = GaussianKernelBank::new(stddev, 4.0);
            assert!(matches!(
                result,
                Err(SmoothingError::InvalidParameter { name: "stddev", .. })
            ));
        }
    }

    #[test]
    fn test_invalid_precision() {
        for precision in [0.0, -2.0, f64::NAN] {
            let result = GaussianKernelBank::new(1.0_f64, precision);
            assert!(matches!(
                result,
                Err(SmoothingError::InvalidParameter { name: "precision", .. })
            ));
        }
    }

    #[test]
    fn test_radius_limit() {
        assert!(GaussianKernelBank::new(32.0_f64, 4.0).is_ok());
        assert_eq!(
            GaussianKernelBank::new(33.0_f64, 4.0).unwrap_err(),
            SmoothingError::KernelTooLarge {
                radius: 132,
                max: MAX_SIDE_SAMPLES
            }
        );
    }

    #[test]
    fn test_radius_overflow_saturates() {
        assert!(matches!(
            GaussianKernelBank::new(1e300_f64, 1e300),
            Err(SmoothingError::KernelTooLarge {
                radius: u64::MAX,
                ..
            })
        ));
        assert!(matches!(
            FilterSpec::new(40.0, 5.0).n_side_samples(),
            Err(SmoothingError::KernelTooLarge { radius: 200, .. })
        ));
    }

    // ========================================================================
    // Kernel table
    // ========================================================================

    #[test]
    fn test_all_kernels_sum_to_one() {
        let bank = GaussianKernelBank::new(3.0_f64, 4.0).unwrap();
        let n = bank.n_side_samples();
        for pre in 0..=n {
            for post in 0..=n {
                let kernel = bank.kernel(pre, post).unwrap();
                assert_eq!(kernel.len(), pre + post + 1);
                let sum: f64 = kernel.iter().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_centre_coefficient_is_inverse_coeff_sum() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        let kernel = bank.kernel(2, 3).unwrap();

        let w1 = (-0.125_f64).exp();
        let w2 = (-0.5_f64).exp();
        let w3 = (-1.125_f64).exp();
        let coeff_sum = (w1 + w2) + 1.0 + (w1 + w2 + w3);

        assert_relative_eq!(kernel[2], 1.0 / coeff_sum, epsilon = 1e-15);
        assert_relative_eq!(kernel[0], w2 / coeff_sum, epsilon = 1e-15);
        assert_relative_eq!(kernel[5], w3 / coeff_sum, epsilon = 1e-15);
    }

    #[test]
    fn test_full_kernel_is_symmetric() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        let n = bank.n_side_samples();
        let kernel = bank.kernel(n, n).unwrap();
        for i in 0..n {
            assert_relative_eq!(kernel[i], kernel[2 * n - i], epsilon = 1e-15);
        }
    }

    #[test]
    fn test_trivial_kernel() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        assert_eq!(bank.kernel(0, 0).unwrap(), &[1.0]);
    }

    #[test]
    fn test_kernel_out_of_range() {
        let bank = GaussianKernelBank::new(1.0_f64, 2.0).unwrap();
        assert!(bank.kernel(3, 0).is_none());
        assert!(bank.kernel(0, 3).is_none());
        assert!(bank.kernel(2, 2).is_some());
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    #[test]
    fn test_filter_empty() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        assert!(bank.filter(&[]).is_empty());
    }

    #[test]
    fn test_filter_single_sample() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        assert_eq!(bank.filter(&[3.25]), vec![3.25]);
    }

    #[test]
    fn test_filter_constant_sequence() {
        let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
        let output = bank.filter(&[5.0; 10]);
        assert_eq!(output.len(), 10);
        for value in output {
            assert_relative_eq!(value, 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_filter_impulse_shape() {
        let bank = GaussianKernelBank::new(1.5_f64, 4.0).unwrap();
        let output = bank.filter(&[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);

        for i in 0..3 {
            assert_relative_eq!(output[i], output[6 - i], epsilon = 1e-12);
        }
        assert!(output[3] > output[2]);
        assert!(output[2] > output[1]);
        assert!(output[1] > output[0]);
        assert!(output[0] > 0.0);

        let centre = bank.kernel(3, 3).unwrap()[3];
        assert_relative_eq!(output[3], 10.0 * centre, epsilon = 1e-12);
    }

    #[test]
    fn test_filter_interior_impulse_conserves_energy() {
        let bank = GaussianKernelBank::new(1.5_f64, 4.0).unwrap();
        let n = bank.n_side_samples();
        let mut input = vec![0.0; 4 * n + 1];
        input[2 * n] = 10.0;

        let total: f64 = bank.filter(&input).iter().sum();
        assert_relative_eq!(total, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_filter_linear_ramp_interior_unchanged() {
        // A symmetric kernel reproduces a straight line away from the edges
        let bank = GaussianKernelBank::new(1.0_f64, 3.0).unwrap();
        let n = bank.n_side_samples();
        let input: Vec<f64> = (0..30).map(|i| 2.0 * i as f64 + 1.0).collect();
        let output = bank.filter(&input);
        for ix in n..(30 - n) {
            assert_relative_eq!(output[ix], input[ix], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_filter_into() {
        let bank = GaussianKernelBank::new(1.0_f64, 3.0).unwrap();
        let input = [1.0, 4.0, 2.0, 8.0, 5.0];
        let mut output = [0.0; 5];
        bank.filter_into(&input, &mut output).unwrap();
        assert_eq!(output.to_vec(), bank.filter(&input));
    }

    #[test]
    fn test_filter_into_length_mismatch() {
        let bank = GaussianKernelBank::new(1.0_f64, 3.0).unwrap();
        let mut output = [0.0; 4];
        let result = bank.filter_into(&[1.0, 2.0, 3.0], &mut output);
        assert!(matches!(
            result,
            Err(SmoothingError::InvalidParameter { name: "output", .. })
        ));
    }

    #[test]
    fn test_filter_f32() {
        let bank = GaussianKernelBank::new(2.0_f32, 4.0).unwrap();
        let output = bank.filter(&[1.5_f32; 12]);
        for value in output {
            assert_relative_eq!(value, 1.5_f32, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_filter_spec_build() {
        let spec = FilterSpec::new(2.0, 4.0);
        assert_eq!(spec.n_side_samples().unwrap(), 8);
        let bank: GaussianKernelBank<f64> = spec.build().unwrap();
        assert_eq!(bank.n_side_samples(), 8);

        assert!(FilterSpec::new(-1.0, 4.0).build::<f64>().is_err());
        assert_eq!(FilterSpec::with_default_precision(1.0).precision, DEFAULT_PRECISION);
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_filter_preserves_length(
                stddev in 0.1_f64..8.0,
                precision in 0.5_f64..5.0,
                input in prop::collection::vec(-1e3_f64..1e3, 0..120)
            ) {
                let bank = GaussianKernelBank::new(stddev, precision).unwrap();
                prop_assert_eq!(bank.filter(&input).len(), input.len());
            }

            #[test]
            fn test_filter_preserves_constant(
                stddev in 0.1_f64..8.0,
                precision in 0.5_f64..5.0,
                value in -1e3_f64..1e3,
                len in 0_usize..120
            ) {
                let bank = GaussianKernelBank::new(stddev, precision).unwrap();
                let output = bank.filter(&vec![value; len]);
                for out in output {
                    prop_assert!((out - value).abs() <= 1e-9 * value.abs().max(1.0));
                }
            }

            #[test]
            fn test_kernels_have_unit_gain(
                stddev in 0.1_f64..6.0,
                precision in 0.5_f64..4.0
            ) {
                let bank = GaussianKernelBank::new(stddev, precision).unwrap();
                let n = bank.n_side_samples();
                for pre in 0..=n {
                    for post in 0..=n {
                        let sum: f64 = bank.kernel(pre, post).unwrap().iter().sum();
                        prop_assert!((sum - 1.0).abs() < 1e-12);
                    }
                }
            }

            #[test]
            fn test_filter_stays_within_input_range(
                stddev in 0.1_f64..8.0,
                input in prop::collection::vec(0.0_f64..100.0, 1..80)
            ) {
                let bank = GaussianKernelBank::new(stddev, 4.0).unwrap();
                let lo = input.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = input.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                for out in bank.filter(&input) {
                    prop_assert!(out >= lo - 1e-9 && out <= hi + 1e-9);
                }
            }
        }
    }
}
