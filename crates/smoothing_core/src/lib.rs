//! # smoothing_core: Numerical Foundation for Gaussian Random-Walk Smoothing
//!
//! ## Layer 1 (Foundation) Role
//!
//! smoothing_core is the bottom layer of the workspace, providing:
//! - Edge-aware discrete Gaussian kernels (`math::gaussian`)
//! - Box-Muller standard normal variates (`rng`)
//! - Error types: `SmoothingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - rand / rand_distr: Seeded uniform source behind the normal generator
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use smoothing_core::math::gaussian::GaussianKernelBank;
//! use smoothing_core::rng::NormalVariateGenerator;
//!
//! // Kernel bank with a radius of round(2 * 4) = 8 samples per side
//! let bank = GaussianKernelBank::new(2.0_f64, 4.0).unwrap();
//! assert_eq!(bank.n_side_samples(), 8);
//!
//! // Constant input is preserved exactly, including at the boundaries
//! let smoothed = bank.filter(&[5.0; 10]);
//! # assert!(smoothed.iter().all(|v| (v - 5.0).abs() < 1e-12));
//!
//! // Reproducible normal variates
//! let mut normals = NormalVariateGenerator::from_seed(42);
//! let z = normals.next_variate();
//! # assert!(z.is_finite());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`math::gaussian::FilterSpec`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
