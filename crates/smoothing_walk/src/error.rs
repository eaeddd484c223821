//! Error types for random-walk synthesis.
//!
//! Every error is raised before any sample is computed, except
//! [`SynthesisError::Cancelled`], which is raised between filter stages.

use smoothing_core::types::SmoothingError;
use thiserror::Error;

/// Synthesis error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// A filter in the chain was rejected by the kernel bank.
    #[error("Invalid filter at chain index {index}: {source}")]
    Kernel {
        /// Position of the filter in the chain.
        index: usize,
        /// Underlying kernel error.
        #[source]
        source: SmoothingError,
    },

    /// The cancellation flag was set between stages.
    #[error("Synthesis cancelled")]
    Cancelled,
}

impl SynthesisError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }

    /// Returns `true` for configuration errors (everything except cancellation).
    pub fn is_invalid_parameter(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}
