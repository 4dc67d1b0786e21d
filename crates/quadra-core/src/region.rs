//! Bounding regions: validation, padding, derivation, and membership.

use crate::array::{check_coordinates, CoordArray, NdArray};
use crate::axis::PerAxis;
use crate::error::{InvertedBound, RegionError};
use smallvec::SmallVec;

/// A validated n-dimensional bounding box.
///
/// Stored as one `(lower, upper)` pair per dimension, in the caller's
/// dimension order (easting, northing, vertical, ...). Construction is
/// validation: a `Region` always has at least one dimension and
/// `lower <= upper` everywhere, so samplers can consume it without
/// re-checking.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    bounds: SmallVec<[(f64, f64); 4]>,
}

impl Region {
    /// Build a region from a flat `[lower_0, upper_0, lower_1, upper_1, ...]`
    /// sequence.
    ///
    /// Fails if the sequence is empty or has an odd length, or if any
    /// dimension's lower bound exceeds its upper bound. All inverted
    /// dimensions are reported, not just the first.
    pub fn from_bounds(bounds: &[f64]) -> Result<Self, RegionError> {
        if bounds.is_empty() || bounds.len() % 2 != 0 {
            return Err(RegionError::InvalidRegion { len: bounds.len() });
        }
        let pairs: SmallVec<[(f64, f64); 4]> =
            bounds.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
        Self::from_pairs(pairs)
    }

    fn from_pairs(pairs: SmallVec<[(f64, f64); 4]>) -> Result<Self, RegionError> {
        let offenders: Vec<InvertedBound> = pairs
            .iter()
            .enumerate()
            .filter(|(_, (lower, upper))| lower > upper)
            .map(|(dimension, &(lower, upper))| InvertedBound {
                dimension,
                lower,
                upper,
            })
            .collect();
        if !offenders.is_empty() {
            return Err(RegionError::InvertedBounds { offenders });
        }
        Ok(Self { bounds: pairs })
    }

    /// The bounding region of a point set: per-array `(min, max)` in input
    /// order.
    ///
    /// Fails if no arrays are given, if the arrays do not share one shape,
    /// or if any array is empty (an empty array has no bounds).
    pub fn bounding(coordinates: &[CoordArray]) -> Result<Self, RegionError> {
        if coordinates.is_empty() {
            return Err(RegionError::InvalidRegion { len: 0 });
        }
        check_coordinates(coordinates)?;
        let pairs: SmallVec<[(f64, f64); 4]> = coordinates
            .iter()
            .map(|array| {
                array.values().iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(min, max), &v| (min.min(v), max.max(v)),
                )
            })
            .collect();
        Self::from_pairs(pairs)
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.bounds.len()
    }

    /// The `(lower, upper)` pairs, one per dimension.
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// Lower bound of one dimension.
    pub fn lower(&self, dim: usize) -> f64 {
        self.bounds[dim].0
    }

    /// Upper bound of one dimension.
    pub fn upper(&self, dim: usize) -> f64 {
        self.bounds[dim].1
    }

    /// Width of one dimension (`upper - lower`).
    pub fn extent(&self, dim: usize) -> f64 {
        self.bounds[dim].1 - self.bounds[dim].0
    }

    /// Flatten back to `[lower_0, upper_0, lower_1, upper_1, ...]`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.bounds
            .iter()
            .flat_map(|&(lower, upper)| [lower, upper])
            .collect()
    }

    /// Grow (or shrink, for negative amounts) the region on every side.
    ///
    /// Each lower bound is decreased and each upper bound increased by the
    /// per-dimension amount. Fails with [`RegionError::InvalidPadding`] if a
    /// per-dimension sequence does not match the region's dimensionality,
    /// or with [`RegionError::InvertedBounds`] if a negative amount shrinks
    /// a dimension past its own width.
    pub fn pad(&self, amount: &PerAxis<f64>) -> Result<Self, RegionError> {
        let ndim = self.ndim();
        let amounts = amount
            .resolve(ndim)
            .ok_or_else(|| RegionError::InvalidPadding {
                expected: ndim,
                got: amount.explicit_len().unwrap_or(0),
            })?;
        let pairs: SmallVec<[(f64, f64); 4]> = self
            .bounds
            .iter()
            .zip(amounts.iter())
            .map(|(&(lower, upper), &pad)| (lower - pad, upper + pad))
            .collect();
        Self::from_pairs(pairs)
    }

    /// Whether a single point lies inside the region (closed intervals,
    /// boundary points count as inside).
    ///
    /// # Panics
    ///
    /// Panics if `point` does not have one value per dimension.
    pub fn contains(&self, point: &[f64]) -> bool {
        assert_eq!(
            point.len(),
            self.ndim(),
            "point has {} values for a {}-dimensional region",
            point.len(),
            self.ndim()
        );
        self.bounds
            .iter()
            .zip(point.iter())
            .all(|(&(lower, upper), &v)| v >= lower && v <= upper)
    }
}

/// Membership mask for a point set: true where every dimension's value lies
/// within the region's closed bounds.
///
/// Fails with [`RegionError::CoordinateCount`] if the number of coordinate
/// arrays differs from the region's dimensionality. The mask has the same
/// shape as the coordinate arrays. Runs in one pass over the points with no
/// per-dimension temporaries.
pub fn inside(coordinates: &[CoordArray], region: &Region) -> Result<NdArray<bool>, RegionError> {
    check_coordinates(coordinates)?;
    if coordinates.len() != region.ndim() {
        return Err(RegionError::CoordinateCount {
            expected: region.ndim(),
            got: coordinates.len(),
        });
    }
    let first = &coordinates[0];
    let mut mask = vec![true; first.len()];
    for (dim, array) in coordinates.iter().enumerate() {
        let (lower, upper) = region.bounds()[dim];
        for (inside, &v) in mask.iter_mut().zip(array.values()) {
            *inside = *inside && v >= lower && v <= upper;
        }
    }
    Ok(NdArray::from_vec(mask, first.shape().iter().copied().collect()))
}
