//! Error types for spatial partitioning.

use quadra_core::RegionError;
use quadra_grid::GridError;
use std::error::Error;
use std::fmt;

/// Errors from block splitting, rolling windows, and neighbor distances.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitError {
    /// The window size exceeds the smaller of the region's first two extents.
    WindowTooLarge {
        /// The requested window size.
        window_size: f64,
        /// The largest window the region can hold.
        limit: f64,
    },
    /// The overlap fraction is outside `[0, 1)`.
    InvalidOverlap {
        /// The overlap that was given.
        overlap: f64,
    },
    /// Fewer than one nearest neighbor was requested.
    InvalidNeighborCount {
        /// The neighbor count that was given.
        k_nearest: usize,
    },
    /// Building the block or window center grid failed.
    Grid(GridError),
    /// The region or the coordinate point set was invalid.
    Region(RegionError),
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowTooLarge { window_size, limit } => write!(
                f,
                "invalid window size {window_size}: must not exceed the smaller \
                 of the first two region extents ({limit})"
            ),
            Self::InvalidOverlap { overlap } => write!(
                f,
                "invalid overlap {overlap}: must be at least 0 and less than 1"
            ),
            Self::InvalidNeighborCount { k_nearest } => write!(
                f,
                "invalid number of neighbors {k_nearest}: must be at least 1"
            ),
            Self::Grid(source) => source.fmt(f),
            Self::Region(source) => source.fmt(f),
        }
    }
}

impl Error for SplitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(source) => Some(source),
            Self::Region(source) => Some(source),
            _ => None,
        }
    }
}

impl From<GridError> for SplitError {
    fn from(source: GridError) -> Self {
        Self::Grid(source)
    }
}

impl From<RegionError> for SplitError {
    fn from(source: RegionError) -> Self {
        Self::Region(source)
    }
}
