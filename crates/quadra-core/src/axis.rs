//! Scalar-or-per-dimension argument values.

use smallvec::SmallVec;

/// A value given either once for all dimensions or once per dimension.
///
/// Padding amounts, grid spacings, and block shapes all accept a single
/// scalar that applies everywhere or an explicit per-dimension sequence.
/// Callers resolve a `PerAxis` against the region's dimensionality exactly
/// once at the API boundary, so downstream code only ever sees a
/// fixed-length per-dimension list.
#[derive(Clone, Debug, PartialEq)]
pub enum PerAxis<T> {
    /// One value applied to every dimension.
    Uniform(T),
    /// One value per dimension, in region order.
    Each(SmallVec<[T; 4]>),
}

impl<T: Copy> PerAxis<T> {
    /// Expand to one value per dimension.
    ///
    /// Returns `None` if an explicit sequence does not have exactly `ndim`
    /// entries; callers map that to their own dimensionality-mismatch error.
    pub fn resolve(&self, ndim: usize) -> Option<SmallVec<[T; 4]>> {
        match self {
            Self::Uniform(value) => Some(std::iter::repeat(*value).take(ndim).collect()),
            Self::Each(values) => {
                if values.len() == ndim {
                    Some(values.clone())
                } else {
                    None
                }
            }
        }
    }

    /// Number of explicit entries, if this is a per-dimension sequence.
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::Each(values) => Some(values.len()),
        }
    }
}

impl<T> From<T> for PerAxis<T> {
    fn from(value: T) -> Self {
        Self::Uniform(value)
    }
}

impl<T: Clone> From<&[T]> for PerAxis<T> {
    fn from(values: &[T]) -> Self {
        Self::Each(values.iter().cloned().collect())
    }
}

impl<T, const N: usize> From<[T; N]> for PerAxis<T> {
    fn from(values: [T; N]) -> Self {
        Self::Each(values.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_broadcasts_to_every_dimension() {
        let p: PerAxis<f64> = 2.5.into();
        assert_eq!(p.resolve(3).unwrap().as_slice(), &[2.5, 2.5, 2.5]);
    }

    #[test]
    fn each_requires_exact_length() {
        let p: PerAxis<f64> = [1.0, 2.0].into();
        assert_eq!(p.resolve(2).unwrap().as_slice(), &[1.0, 2.0]);
        assert!(p.resolve(3).is_none());
        assert_eq!(p.explicit_len(), Some(2));
    }
}
