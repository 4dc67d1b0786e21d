//! Error types for line and grid generation.

use quadra_core::RegionError;
use std::error::Error;
use std::fmt;

/// Errors from line and grid coordinate generation.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Both a size/shape and a spacing were given; they are mutually exclusive.
    ConflictingArguments,
    /// Neither a size/shape nor a spacing was given.
    MissingArgument,
    /// A per-dimension spacing sequence does not match the region dimensionality.
    InvalidSpacing {
        /// Region dimensionality.
        expected: usize,
        /// Number of spacing values that were given.
        got: usize,
    },
    /// A per-dimension shape sequence does not match the region dimensionality.
    InvalidShape {
        /// Region dimensionality.
        expected: usize,
        /// Number of shape values that were given.
        got: usize,
    },
    /// The underlying region was invalid.
    Region(RegionError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingArguments => {
                write!(f, "both a size/shape and a spacing were given; only one is allowed")
            }
            Self::MissingArgument => {
                write!(f, "either a size/shape or a spacing must be given")
            }
            Self::InvalidSpacing { expected, got } => write!(
                f,
                "invalid spacing: expected {expected} values (one per region dimension), got {got}"
            ),
            Self::InvalidShape { expected, got } => write!(
                f,
                "invalid shape: expected {expected} values (one per region dimension), got {got}"
            ),
            Self::Region(source) => source.fmt(f),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Region(source) => Some(source),
            _ => None,
        }
    }
}

impl From<RegionError> for GridError {
    fn from(source: RegionError) -> Self {
        Self::Region(source)
    }
}
