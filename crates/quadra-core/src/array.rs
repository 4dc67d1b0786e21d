//! Flat n-dimensional arrays and the [`Shape`] type alias.
//!
//! Coordinate data is stored as a flat row-major buffer plus a shape, which
//! keeps reshaping and flat/multi index conversion cheap. Samplers produce
//! [`CoordArray`]s; labels and masks reuse the same container with other
//! element types.

use crate::error::RegionError;
use smallvec::SmallVec;

/// Dimensions of an n-dimensional array.
///
/// Inline capacity of 4 covers the common geoscience cases (profiles, maps,
/// volumes, grids of those) without heap allocation.
pub type Shape = SmallVec<[usize; 4]>;

/// An n-dimensional array stored as a flat row-major buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray<T> {
    values: Vec<T>,
    shape: Shape,
}

/// An n-dimensional array of coordinate values.
pub type CoordArray = NdArray<f64>;

impl<T> NdArray<T> {
    /// Wrap a flat buffer with an explicit shape.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the product of `shape`.
    pub fn from_vec(values: Vec<T>, shape: Shape) -> Self {
        let expected: usize = shape.iter().product();
        assert_eq!(
            values.len(),
            expected,
            "buffer of {} values cannot have shape {:?}",
            values.len(),
            shape
        );
        Self { values, shape }
    }

    /// Wrap a flat buffer as a rank-1 array.
    pub fn from_flat(values: Vec<T>) -> Self {
        let shape = smallvec::smallvec![values.len()];
        Self { values, shape }
    }

    /// The array's dimensions.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions (array rank).
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The flat row-major element buffer.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Consume the array, returning the flat buffer.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Same buffer under a new shape.
    ///
    /// # Panics
    ///
    /// Panics if the new shape's element count differs from the current one.
    pub fn reshaped(self, shape: Shape) -> Self {
        Self::from_vec(self.values, shape)
    }
}

impl<T: Clone> NdArray<T> {
    /// An array of the given shape with every element set to `value`.
    pub fn full(shape: Shape, value: T) -> Self {
        let len = shape.iter().product();
        Self {
            values: vec![value; len],
            shape,
        }
    }
}

/// Convert a flat row-major index into a multi-dimensional index.
///
/// The inverse of [`ravel_index`]. `flat` must be less than the product
/// of `shape`.
pub fn unravel_index(flat: usize, shape: &[usize]) -> SmallVec<[usize; 4]> {
    let mut index: SmallVec<[usize; 4]> = SmallVec::with_capacity(shape.len());
    let mut rest = flat;
    for dim in (0..shape.len()).rev() {
        index.push(rest % shape[dim]);
        rest /= shape[dim];
    }
    index.reverse();
    index
}

/// Convert a multi-dimensional index into a flat row-major index.
pub fn ravel_index(index: &[usize], shape: &[usize]) -> usize {
    index
        .iter()
        .zip(shape.iter())
        .fold(0, |flat, (&i, &dim)| flat * dim + i)
}

/// Check that every coordinate array in a point set shares one shape.
///
/// Point-set operations index all arrays in lockstep, so a shape mismatch
/// anywhere would silently pair up unrelated values.
pub fn check_coordinates(coordinates: &[CoordArray]) -> Result<(), RegionError> {
    let Some(first) = coordinates.first() else {
        return Ok(());
    };
    for array in &coordinates[1..] {
        if array.shape() != first.shape() {
            return Err(RegionError::ShapeMismatch {
                expected: first.shape().to_vec(),
                got: array.shape().to_vec(),
            });
        }
    }
    Ok(())
}
