//! Error types for region and coordinate validation.

use std::error::Error;
use std::fmt;

/// A dimension whose lower bound exceeds its upper bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvertedBound {
    /// Index of the offending dimension.
    pub dimension: usize,
    /// The lower bound that was given.
    pub lower: f64,
    /// The upper bound that was given.
    pub upper: f64,
}

impl fmt::Display for InvertedBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} > {})", self.dimension, self.lower, self.upper)
    }
}

/// Errors from region construction, padding, and point-set validation.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionError {
    /// The region has no bounds or an odd number of them.
    InvalidRegion {
        /// Number of bound values that were given.
        len: usize,
    },
    /// One or more dimensions have a lower bound larger than the upper bound.
    ///
    /// Every offending dimension is reported, not just the first.
    InvertedBounds {
        /// All dimensions where `lower > upper`.
        offenders: Vec<InvertedBound>,
    },
    /// A per-dimension padding sequence has the wrong length for the region.
    InvalidPadding {
        /// Region dimensionality.
        expected: usize,
        /// Number of padding values that were given.
        got: usize,
    },
    /// The number of coordinate arrays does not match the region dimensionality.
    CoordinateCount {
        /// Region dimensionality.
        expected: usize,
        /// Number of coordinate arrays that were given.
        got: usize,
    },
    /// Coordinate arrays in a point set do not all share one shape.
    ShapeMismatch {
        /// Shape of the first array.
        expected: Vec<usize>,
        /// Shape of the first array that differs.
        got: Vec<usize>,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion { len } => write!(
                f,
                "invalid region: must have an even, non-zero number of bounds \
                 (a lower and an upper per dimension), got {len}"
            ),
            Self::InvertedBounds { offenders } => {
                let listed: Vec<String> = offenders.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "invalid region: lower boundary larger than upper boundary \
                     in dimension(s): {}",
                    listed.join("; ")
                )
            }
            Self::InvalidPadding { expected, got } => write!(
                f,
                "invalid padding: expected {expected} values (one per region dimension), got {got}"
            ),
            Self::CoordinateCount { expected, got } => write!(
                f,
                "invalid coordinates: expected {expected} arrays for the region, got {got}"
            ),
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "invalid coordinates: arrays must share one shape, got {expected:?} and {got:?}"
            ),
        }
    }
}

impl Error for RegionError {}
