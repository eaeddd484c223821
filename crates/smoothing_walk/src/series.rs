//! Output series handed to rendering collaborators.
//!
//! A [`Series`] is an ordered list of [`Point`]s. The noisy value is the
//! `x` coordinate and the time axis is `y`, so paths read top to bottom.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single plotted coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Noisy-axis value in `[0, width]`.
    pub x: f64,
    /// Time-axis value.
    pub y: f64,
}

/// Which part of the pipeline a series comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// The unfiltered seed sequence.
    Raw,
    /// Output of the filter stage at this chain index.
    Stage(usize),
    /// The final filter applied directly to the seed sequence.
    Reference,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Raw => write!(f, "raw"),
            SeriesKind::Stage(index) => write!(f, "stage-{}", index),
            SeriesKind::Reference => write!(f, "reference"),
        }
    }
}

/// One plotted path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Origin of the series.
    pub kind: SeriesKind,
    /// Points in time order.
    pub points: Vec<Point>,
}

impl Series {
    /// Pairs noisy-axis values with the shared time axis.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the slices differ in length.
    pub fn from_values(kind: SeriesKind, values: &[f64], time: &[f64]) -> Self {
        debug_assert_eq!(values.len(), time.len());
        let points = values
            .iter()
            .zip(time)
            .map(|(&x, &y)| Point { x, y })
            .collect();
        Self { kind, points }
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the noisy-axis values.
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.x)
    }

    /// Iterates over the time-axis values.
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.y)
    }
}
