//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for kernel construction and filtering
//!
//! # Re-exports
//!
//! [`SmoothingError`] is re-exported at this module level for convenience.

pub mod error;

pub use error::SmoothingError;
