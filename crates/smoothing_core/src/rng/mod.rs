//! # Random Number Generation
//!
//! This module provides the standard normal source used to jitter sample
//! sequences between smoothing stages.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Generators accept a 64-bit seed for deterministic sequences
//! - **Explicit state**: The pending second Box-Muller variate is a field of the
//!   generator, never module-level state
//! - **One source per run**: Uniform and normal draws share one `StdRng`
//!
//! ## Module Structure
//!
//! - [`box_muller`]: Box-Muller transform over a seeded uniform source
//!
//! ## Usage Example
//!
//! ```rust
//! use smoothing_core::rng::NormalVariateGenerator;
//!
//! let mut normals = NormalVariateGenerator::from_seed(12345);
//!
//! // Single variates
//! let z = normals.next_variate();
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! normals.fill(&mut buffer);
//! # assert!(z.is_finite());
//! ```

pub mod box_muller;

pub use box_muller::NormalVariateGenerator;
