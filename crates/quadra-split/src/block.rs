//! Splitting a region into blocks and labeling points by block.

use crate::error::SplitError;
use crate::kdtree::{KdTree, PointIndex};
use quadra_core::{check_coordinates, CoordArray, NdArray, PerAxis, Region, RegionError, Shape};
use quadra_grid::{grid_coordinates, Adjust, GridSpec};

/// Which side gives when a region is not divisible by the block size.
///
/// The spelling differs from [`Adjust`] because block callers think in
/// block sizes, not grid spacings; the two translate one-to-one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockAdjust {
    /// Keep the region fixed and round the block size.
    BlockSize,
    /// Keep the block size exact and pad the region.
    Region,
}

impl BlockAdjust {
    fn translated(self) -> Adjust {
        match self {
            Self::BlockSize => Adjust::Spacing,
            Self::Region => Adjust::Region,
        }
    }
}

/// How to split a region into blocks: per-dimension block counts or sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockSpec {
    /// Number of blocks per dimension, in reverse region order. Mutually
    /// exclusive with `size`.
    pub shape: Option<PerAxis<usize>>,
    /// Block size per dimension, in reverse region order. Mutually
    /// exclusive with `shape`.
    pub size: Option<PerAxis<f64>>,
    /// Reconciliation policy when the region is not divisible by `size`.
    pub adjust: BlockAdjust,
    /// Region to split. Defaults to the bounding region of the points.
    pub region: Option<Region>,
}

impl Default for BlockSpec {
    fn default() -> Self {
        Self {
            shape: None,
            size: None,
            adjust: BlockAdjust::BlockSize,
            region: None,
        }
    }
}

impl BlockSpec {
    /// Split into a fixed number of blocks per dimension.
    pub fn with_shape(shape: impl Into<PerAxis<usize>>) -> Self {
        Self {
            shape: Some(shape.into()),
            ..Self::default()
        }
    }

    /// Split into blocks of a fixed size per dimension.
    pub fn with_size(size: impl Into<PerAxis<f64>>) -> Self {
        Self {
            size: Some(size.into()),
            ..Self::default()
        }
    }

    /// Set the reconciliation policy.
    pub fn adjust(mut self, adjust: BlockAdjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Split an explicit region instead of the points' bounding region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }
}

/// Split a region into blocks and label each point with its block index.
///
/// Returns the block center coordinates (pixel-registered, since centers
/// rather than edges are the label targets) and one integer label per input
/// point. Labels are flat row-major indices into the block grid and the
/// label array has the same shape as the input coordinate arrays. Points
/// equidistant to two centers take whichever the index returns first, which
/// is deterministic for a fixed input.
pub fn block_split(
    coordinates: &[CoordArray],
    spec: &BlockSpec,
) -> Result<(Vec<CoordArray>, NdArray<usize>), SplitError> {
    check_coordinates(coordinates)?;
    let Some(first) = coordinates.first() else {
        return Err(RegionError::InvalidRegion { len: 0 }.into());
    };
    let region = match &spec.region {
        Some(region) => region.clone(),
        None => Region::bounding(coordinates)?,
    };
    if region.ndim() != coordinates.len() {
        return Err(RegionError::CoordinateCount {
            expected: region.ndim(),
            got: coordinates.len(),
        }
        .into());
    }

    let grid_spec = GridSpec {
        shape: spec.shape.clone(),
        spacing: spec.size.clone(),
        adjust: spec.adjust.translated(),
        pixel_register: true,
        constants: Vec::new(),
    };
    let centers = grid_coordinates(&region, &grid_spec)?;
    // A zero-count block shape would leave every label dangling; surface it
    // as the shape error the grid layer reports for bad counts.
    if centers.first().is_none_or(|c| c.is_empty()) {
        return Err(quadra_grid::GridError::InvalidShape {
            expected: region.ndim(),
            got: 0,
        }
        .into());
    }

    let tree = KdTree::build(&centers)?;
    let input_shape: Shape = first.shape().iter().copied().collect();
    let mut point = vec![0.0; coordinates.len()];
    let mut labels = Vec::with_capacity(first.len());
    for i in 0..first.len() {
        for (d, array) in coordinates.iter().enumerate() {
            point[d] = array.values()[i];
        }
        let label = tree.nearest(&point).expect("center grid is non-empty");
        labels.push(label);
    }
    Ok((centers, NdArray::from_vec(labels, input_shape)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_core::RegionError;

    fn unit_grid() -> Vec<CoordArray> {
        let region = Region::from_bounds(&[-5.0, 0.0, 5.0, 10.0]).unwrap();
        grid_coordinates(&region, &GridSpec::with_spacing(1.0)).unwrap()
    }

    #[test]
    fn size_driven_split_labels_quadrants() {
        let coords = unit_grid();
        let (centers, labels) = block_split(&coords, &BlockSpec::with_size(2.5)).unwrap();
        assert_eq!(centers[0].values(), &[-3.75, -1.25, -3.75, -1.25]);
        assert_eq!(centers[1].values(), &[6.25, 6.25, 8.75, 8.75]);
        assert_eq!(labels.shape(), coords[0].shape());
        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 1, 1, 1,
            0, 0, 0, 1, 1, 1,
            0, 0, 0, 1, 1, 1,
            2, 2, 2, 3, 3, 3,
            2, 2, 2, 3, 3, 3,
            2, 2, 2, 3, 3, 3,
        ];
        assert_eq!(labels.values(), expected.as_slice());
    }

    #[test]
    fn shape_driven_split_labels_strips() {
        let coords = unit_grid();
        let (centers, labels) =
            block_split(&coords, &BlockSpec::with_shape([4, 2])).unwrap();
        assert_eq!(
            centers[0].values(),
            &[-3.75, -1.25, -3.75, -1.25, -3.75, -1.25, -3.75, -1.25]
        );
        assert_eq!(
            centers[1].values(),
            &[5.625, 5.625, 6.875, 6.875, 8.125, 8.125, 9.375, 9.375]
        );
        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 1, 1, 1,
            0, 0, 0, 1, 1, 1,
            2, 2, 2, 3, 3, 3,
            4, 4, 4, 5, 5, 5,
            6, 6, 6, 7, 7, 7,
            6, 6, 6, 7, 7, 7,
        ];
        assert_eq!(labels.values(), expected.as_slice());
    }

    #[test]
    fn explicit_region_overrides_bounding() {
        let east = CoordArray::from_flat(vec![0.1, 0.9]);
        let north = CoordArray::from_flat(vec![0.1, 0.9]);
        let region = Region::from_bounds(&[0.0, 2.0, 0.0, 2.0]).unwrap();
        let (centers, labels) = block_split(
            &[east, north],
            &BlockSpec::with_size(1.0).region(region),
        )
        .unwrap();
        assert_eq!(centers[0].len(), 4);
        assert_eq!(labels.values(), &[0, 0]);
    }

    #[test]
    fn labels_keep_the_input_shape() {
        let coords = unit_grid();
        let (_, labels) = block_split(&coords, &BlockSpec::with_size(2.5)).unwrap();
        assert_eq!(labels.shape(), &[6, 6]);
    }

    #[test]
    fn explicit_region_must_match_the_coordinate_count() {
        let east = CoordArray::from_flat(vec![0.1, 0.9]);
        let north = CoordArray::from_flat(vec![0.1, 0.9]);
        let region = Region::from_bounds(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0]).unwrap();
        let err = block_split(
            &[east, north],
            &BlockSpec::with_size(1.0).region(region),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SplitError::Region(RegionError::CoordinateCount { expected: 3, got: 2 })
        );
    }

    #[test]
    fn mismatched_coordinate_shapes_are_rejected() {
        let east = CoordArray::from_flat(vec![0.0, 1.0]);
        let north = CoordArray::from_flat(vec![0.0, 1.0, 2.0]);
        let err = block_split(&[east, north], &BlockSpec::with_size(1.0)).unwrap_err();
        assert!(matches!(
            err,
            SplitError::Region(RegionError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn empty_point_set_is_rejected() {
        let err = block_split(&[], &BlockSpec::with_size(1.0)).unwrap_err();
        assert!(matches!(err, SplitError::Region(_)));
    }

    #[test]
    fn shape_and_size_are_mutually_exclusive() {
        let coords = unit_grid();
        let mut spec = BlockSpec::with_size(2.5);
        spec.shape = Some([2, 2].into());
        assert!(matches!(
            block_split(&coords, &spec).unwrap_err(),
            SplitError::Grid(quadra_grid::GridError::ConflictingArguments)
        ));
    }
}
