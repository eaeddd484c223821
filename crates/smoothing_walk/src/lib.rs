//! # smoothing_walk: Layered Random-Walk Synthesis
//!
//! ## Layer 2 Role
//!
//! smoothing_walk chains the Layer 1 kernel banks into a synthesis pipeline
//! that produces a small family of related series: a noisy seed path,
//! selected intermediate smoothing stages, and a heavily smoothed reference.
//!
//! - [`WalkConfig`]: validated configuration with canonical defaults
//! - [`RandomWalkSynthesizer`]: the pipeline
//! - [`Series`]: output handed to rendering collaborators
//! - [`SynthesisError`]: configuration and cancellation errors
//!
//! ## Usage Example
//!
//! ```rust
//! use smoothing_core::math::FilterSpec;
//! use smoothing_walk::{build_series, WalkConfig};
//!
//! let config = WalkConfig::builder()
//!     .width(100.0)
//!     .total_steps(20)
//!     .filters(vec![FilterSpec::new(1.5, 4.0)])
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let series = build_series(&config).unwrap();
//! assert_eq!(series[0].len(), 20);
//! assert!(series.iter().flat_map(|s| s.xs()).all(|x| (0.0..=100.0).contains(&x)));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod series;
pub mod synthesizer;

pub use config::{WalkConfig, WalkConfigBuilder};
pub use error::SynthesisError;
pub use series::{Point, Series, SeriesKind};
pub use synthesizer::{build_series, synthesize, synthesize_with_cancel, RandomWalkSynthesizer};
