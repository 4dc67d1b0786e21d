//! Evenly spaced points on n-dimensional grids.

use crate::error::GridError;
use crate::line::{line_coordinates, Adjust, LineSpec};
use quadra_core::{CoordArray, PerAxis, Region, Shape};
use smallvec::SmallVec;

/// How to generate a grid: per-dimension point counts or spacings, plus
/// registration and constant extra channels.
///
/// Per-dimension values are given in reverse region order: the first
/// shape/spacing entry pairs with the last region dimension. This matches
/// row-major array indexing, where the fastest-varying axis is listed last.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// Number of points per dimension. Mutually exclusive with `spacing`.
    pub shape: Option<PerAxis<usize>>,
    /// Spacing per dimension. Mutually exclusive with `shape`.
    pub spacing: Option<PerAxis<f64>>,
    /// Reconciliation policy when a dimension is not divisible by its
    /// spacing. Ignored when `shape` is given.
    pub adjust: Adjust,
    /// Place points at pixel centers instead of grid lines.
    pub pixel_register: bool,
    /// One constant-valued extra array is appended per entry, shaped like
    /// the coordinate arrays (constant heights, times, and the like).
    pub constants: Vec<f64>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            shape: None,
            spacing: None,
            adjust: Adjust::Spacing,
            pixel_register: false,
            constants: Vec::new(),
        }
    }
}

impl GridSpec {
    /// A grid with a fixed number of points per dimension.
    pub fn with_shape(shape: impl Into<PerAxis<usize>>) -> Self {
        Self {
            shape: Some(shape.into()),
            ..Self::default()
        }
    }

    /// A grid with a fixed spacing per dimension.
    pub fn with_spacing(spacing: impl Into<PerAxis<f64>>) -> Self {
        Self {
            spacing: Some(spacing.into()),
            ..Self::default()
        }
    }

    /// Set the reconciliation policy.
    pub fn adjust(mut self, adjust: Adjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Enable pixel-center registration.
    pub fn pixel_register(mut self, pixel_register: bool) -> Self {
        self.pixel_register = pixel_register;
        self
    }

    /// Append constant-valued extra channels.
    pub fn constants(mut self, constants: &[f64]) -> Self {
        self.constants = constants.to_vec();
        self
    }
}

/// Generate evenly spaced points on an n-dimensional grid over `region`.
///
/// Returns one coordinate array per region dimension, in region order
/// (easting, northing, ...), followed by one constant array per entry in
/// `spec.constants`. Every output array has rank D; its axes follow
/// reversed region order, so a 2D grid comes out as `(n_north, n_east)`.
pub fn grid_coordinates(region: &Region, spec: &GridSpec) -> Result<Vec<CoordArray>, GridError> {
    let ndim = region.ndim();
    let (shapes, spacings) = resolve_spec(spec, ndim)?;

    let mut lines: Vec<Vec<f64>> = Vec::with_capacity(ndim);
    for dim in 0..ndim {
        // Shape/spacing entries are reversed relative to region order.
        let entry = ndim - 1 - dim;
        let line_spec = LineSpec {
            size: shapes.as_ref().map(|s| s[entry]),
            spacing: spacings.as_ref().map(|s| s[entry]),
            adjust: spec.adjust,
            pixel_register: spec.pixel_register,
        };
        lines.push(line_coordinates(
            region.lower(dim),
            region.upper(dim),
            &line_spec,
        )?);
    }

    let out_shape: Shape = lines.iter().rev().map(Vec::len).collect();
    let total: usize = out_shape.iter().product();
    let mut strides = vec![1usize; ndim];
    for axis in (0..ndim.saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * out_shape[axis + 1];
    }

    let mut coordinates = Vec::with_capacity(ndim + spec.constants.len());
    for (dim, line) in lines.iter().enumerate() {
        let axis = ndim - 1 - dim;
        let values: Vec<f64> = (0..total)
            .map(|flat| line[(flat / strides[axis]) % line.len()])
            .collect();
        coordinates.push(CoordArray::from_vec(values, out_shape.clone()));
    }
    for &constant in &spec.constants {
        coordinates.push(CoordArray::full(out_shape.clone(), constant));
    }
    Ok(coordinates)
}

type Resolved = (
    Option<SmallVec<[usize; 4]>>,
    Option<SmallVec<[f64; 4]>>,
);

fn resolve_spec(spec: &GridSpec, ndim: usize) -> Result<Resolved, GridError> {
    match (&spec.shape, &spec.spacing) {
        (Some(_), Some(_)) => Err(GridError::ConflictingArguments),
        (None, None) => Err(GridError::MissingArgument),
        (Some(shape), None) => {
            let resolved = shape.resolve(ndim).ok_or(GridError::InvalidShape {
                expected: ndim,
                got: shape.explicit_len().unwrap_or(0),
            })?;
            Ok((Some(resolved), None))
        }
        (None, Some(spacing)) => {
            let resolved = spacing.resolve(ndim).ok_or(GridError::InvalidSpacing {
                expected: ndim,
                got: spacing.explicit_len().unwrap_or(0),
            })?;
            Ok((None, Some(resolved)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(bounds: &[f64]) -> Region {
        Region::from_bounds(bounds).unwrap()
    }

    fn assert_allclose(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "got {got:?}, want {want:?}");
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-12, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn shape_driven_grid() {
        let coords =
            grid_coordinates(&region(&[0.0, 5.0, 0.0, 10.0]), &GridSpec::with_shape([5, 3]))
                .unwrap();
        assert_eq!(coords.len(), 2);
        let (east, north) = (&coords[0], &coords[1]);
        assert_eq!(east.shape(), &[5, 3]);
        assert_eq!(north.shape(), &[5, 3]);
        assert_allclose(
            east.values(),
            &[
                0.0, 2.5, 5.0, 0.0, 2.5, 5.0, 0.0, 2.5, 5.0, 0.0, 2.5, 5.0, 0.0, 2.5, 5.0,
            ],
        );
        assert_allclose(
            north.values(),
            &[
                0.0, 0.0, 0.0, 2.5, 2.5, 2.5, 5.0, 5.0, 5.0, 7.5, 7.5, 7.5, 10.0, 10.0, 10.0,
            ],
        );
    }

    #[test]
    fn spacing_driven_grid_matches_shape_driven() {
        let r = region(&[0.0, 5.0, 0.0, 10.0]);
        let by_spacing = grid_coordinates(&r, &GridSpec::with_spacing(2.5)).unwrap();
        let by_shape = grid_coordinates(&r, &GridSpec::with_shape([5, 3])).unwrap();
        assert_eq!(by_spacing, by_shape);
    }

    #[test]
    fn spacing_can_differ_per_dimension() {
        let coords = grid_coordinates(
            &region(&[-5.0, 1.0, 0.0, 10.0]),
            &GridSpec::with_spacing([2.5, 1.0]),
        )
        .unwrap();
        let (east, north) = (&coords[0], &coords[1]);
        assert_eq!(east.shape(), &[5, 7]);
        assert_allclose(
            &east.values()[..7],
            &[-5.0, -4.0, -3.0, -2.0, -1.0, 0.0, 1.0],
        );
        assert_allclose(&north.values()[..7], &[0.0; 7]);
        assert_allclose(&north.values()[28..], &[10.0; 7]);
    }

    #[test]
    fn inexact_spacing_adjusts_region_when_asked() {
        let coords = grid_coordinates(
            &region(&[-5.0, 0.0, 0.0, 5.0]),
            &GridSpec::with_spacing(2.6).adjust(Adjust::Region),
        )
        .unwrap();
        let (east, north) = (&coords[0], &coords[1]);
        assert_eq!(east.shape(), &[3, 3]);
        // Each dimension pads symmetrically: 5 units at a 2.6 spacing needs
        // 5.2, so 0.1 goes on each side.
        assert_allclose(&east.values()[..3], &[-5.1, -2.5, 0.1]);
        assert_allclose(
            north.values(),
            &[-0.1, -0.1, -0.1, 2.5, 2.5, 2.5, 5.1, 5.1, 5.1],
        );
    }

    #[test]
    fn pixel_registration_drops_one_point_per_dimension() {
        let coords = grid_coordinates(
            &region(&[0.0, 5.0, 0.0, 10.0]),
            &GridSpec::with_spacing(2.5).pixel_register(true),
        )
        .unwrap();
        let (east, north) = (&coords[0], &coords[1]);
        assert_eq!(east.shape(), &[4, 2]);
        assert_allclose(east.values(), &[1.25, 3.75, 1.25, 3.75, 1.25, 3.75, 1.25, 3.75]);
        assert_allclose(north.values(), &[1.25, 1.25, 3.75, 3.75, 6.25, 6.25, 8.75, 8.75]);
    }

    #[test]
    fn pixel_registration_with_shape_keeps_the_count() {
        let coords = grid_coordinates(
            &region(&[0.0, 5.0, 0.0, 10.0]),
            &GridSpec::with_shape([4, 2]).pixel_register(true),
        )
        .unwrap();
        let by_spacing = grid_coordinates(
            &region(&[0.0, 5.0, 0.0, 10.0]),
            &GridSpec::with_spacing(2.5).pixel_register(true),
        )
        .unwrap();
        assert_eq!(coords, by_spacing);
    }

    #[test]
    fn constant_channels_share_the_grid_shape() {
        let coords = grid_coordinates(
            &region(&[0.0, 5.0, 0.0, 10.0]),
            &GridSpec::with_spacing(2.5).constants(&[57.0, 0.1]),
        )
        .unwrap();
        assert_eq!(coords.len(), 4);
        let (height, time) = (&coords[2], &coords[3]);
        assert_eq!(height.shape(), &[5, 3]);
        assert!(height.values().iter().all(|&v| v == 57.0));
        assert!(time.values().iter().all(|&v| v == 0.1));
    }

    #[test]
    fn three_dimensional_grid_orders_axes_reversed() {
        let coords = grid_coordinates(
            &region(&[0.0, 1.0, 0.0, 2.0, 0.0, 3.0]),
            &GridSpec::with_shape([4, 3, 2]),
        )
        .unwrap();
        // shape entries reversed: vertical 4, northing 3, easting 2
        assert_eq!(coords[0].shape(), &[4, 3, 2]);
        let east = &coords[0];
        let up = &coords[2];
        // easting varies fastest, vertical slowest
        assert_allclose(&east.values()[..2], &[0.0, 1.0]);
        assert_allclose(&up.values()[..2], &[0.0, 0.0]);
        assert!((up.values()[23] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn per_dimension_lengths_must_match_region() {
        let r = region(&[0.0, 5.0, 0.0, 10.0]);
        assert_eq!(
            grid_coordinates(&r, &GridSpec::with_spacing([1.0, 2.0, 3.0].as_slice()))
                .unwrap_err(),
            GridError::InvalidSpacing { expected: 2, got: 3 }
        );
        assert_eq!(
            grid_coordinates(&r, &GridSpec::with_shape([4].as_slice())).unwrap_err(),
            GridError::InvalidShape { expected: 2, got: 1 }
        );
    }

    #[test]
    fn shape_and_spacing_are_mutually_exclusive() {
        let r = region(&[0.0, 5.0, 0.0, 10.0]);
        let mut spec = GridSpec::with_shape([5, 3]);
        spec.spacing = Some(2.5.into());
        assert_eq!(
            grid_coordinates(&r, &spec).unwrap_err(),
            GridError::ConflictingArguments
        );
        assert_eq!(
            grid_coordinates(&r, &GridSpec::default()).unwrap_err(),
            GridError::MissingArgument
        );
    }
}
