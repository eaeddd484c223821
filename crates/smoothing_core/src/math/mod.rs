//! Mathematical utilities for sequence smoothing.
//!
//! This module provides:
//! - `gaussian`: Edge-aware discrete Gaussian kernel bank

pub mod gaussian;

pub use gaussian::{FilterSpec, GaussianKernelBank, DEFAULT_PRECISION, MAX_SIDE_SAMPLES};
