//! Error types for structured error handling.
//!
//! This module provides:
//! - `SmoothingError`: Errors from kernel bank construction and filtering

use thiserror::Error;

/// Smoothing errors.
///
/// Raised at construction or entry time only; a kernel bank that was built
/// successfully never fails while filtering correctly sized buffers.
///
/// # Variants
/// - `InvalidParameter`: A parameter is outside its valid domain
/// - `KernelTooLarge`: Valid parameters whose kernel table would exceed the
///   supported radius
///
/// # Examples
/// ```
/// use smoothing_core::types::SmoothingError;
///
/// let err = SmoothingError::InvalidParameter {
///     name: "stddev",
///     value: "must be positive and finite, got -1".to_string(),
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'stddev': must be positive and finite, got -1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmoothingError {
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Kernel radius above the supported table size.
    #[error("Kernel radius {radius} exceeds the supported maximum of {max} samples per side")]
    KernelTooLarge {
        /// Requested samples per side, saturated at `u64::MAX`.
        radius: u64,
        /// Largest supported samples per side.
        max: usize,
    },
}

impl SmoothingError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}
