//! Rolling windows: overlapping square windows over a point set.

use crate::error::SplitError;
use crate::kdtree::{KdTree, PointIndex};
use quadra_core::{
    check_coordinates, unravel_index, CoordArray, PerAxis, Region, RegionError, Shape,
};
use quadra_grid::{grid_coordinates, Adjust, GridSpec};

/// Which side gives when the window step does not divide the region.
///
/// Window callers think in overlap fractions, not grid spacings; the two
/// translate one-to-one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowAdjust {
    /// Keep the region fixed and round the realized step (overlap).
    Overlap,
    /// Keep the step exact and pad the region.
    Region,
}

impl WindowAdjust {
    fn translated(self) -> Adjust {
        match self {
            Self::Overlap => Adjust::Spacing,
            Self::Region => Adjust::Region,
        }
    }
}

/// How to roll a window over a region.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSpec {
    /// Side length of the square window, in coordinate units.
    pub window_size: f64,
    /// Fraction of the window shared between neighboring positions; must be
    /// in `[0, 1)`. The step between window centers is
    /// `(1 - overlap) * window_size`.
    pub overlap: f64,
    /// Reconciliation policy for the center lattice.
    pub adjust: WindowAdjust,
    /// Region to roll over. Defaults to the bounding region of the points.
    pub region: Option<Region>,
}

impl WindowSpec {
    /// A window of the given size and overlap fraction.
    pub fn new(window_size: f64, overlap: f64) -> Self {
        Self {
            window_size,
            overlap,
            adjust: WindowAdjust::Overlap,
            region: None,
        }
    }

    /// Set the reconciliation policy.
    pub fn adjust(mut self, adjust: WindowAdjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Roll over an explicit region instead of the points' bounding region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }
}

/// The points captured by one window position.
///
/// One index vector per input-array axis, all of equal length, together
/// forming a multi-dimensional index into the original coordinate arrays.
/// A window that captures nothing holds empty vectors, never a missing
/// entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowMembers {
    /// Per-axis index vectors, in input-array axis order.
    pub indices: Vec<Vec<usize>>,
}

impl WindowMembers {
    /// Number of captured points.
    pub fn len(&self) -> usize {
        self.indices.first().map_or(0, Vec::len)
    }

    /// Whether the window captured no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Point membership for every window position, shaped like the window-center
/// grid.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowIndices {
    shape: Shape,
    windows: Vec<WindowMembers>,
}

impl WindowIndices {
    /// Shape of the window-center grid.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of window positions.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether there are no window positions.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Membership of the window at a flat row-major grid position.
    pub fn get(&self, flat: usize) -> &WindowMembers {
        &self.windows[flat]
    }

    /// Iterate over window memberships in flat row-major grid order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowMembers> {
        self.windows.iter()
    }
}

/// Roll a fixed-size square window over a region and report which points
/// fall inside each window position.
///
/// Window centers range over the region inset by half a window, so no
/// window extends past the region's outer edge. A point belongs to a window
/// when its Chebyshev (infinity-norm) distance to the center is at most
/// half the window size, boundary inclusive; with nonzero overlap a point
/// can belong to several windows.
///
/// The size check intentionally considers only the first two dimensions'
/// extents, whatever the total dimensionality.
pub fn rolling_window(
    coordinates: &[CoordArray],
    spec: &WindowSpec,
) -> Result<(Vec<CoordArray>, WindowIndices), SplitError> {
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

    let limit = region
        .bounds()
        .iter()
        .take(2)
        .map(|&(lower, upper)| upper - lower)
        .fold(f64::INFINITY, f64::min);
    if spec.window_size > limit {
        return Err(SplitError::WindowTooLarge {
            window_size: spec.window_size,
            limit,
        });
    }
    if !(0.0..1.0).contains(&spec.overlap) {
        return Err(SplitError::InvalidOverlap {
            overlap: spec.overlap,
        });
    }

    let center_region = region.pad(&PerAxis::Uniform(-spec.window_size / 2.0))?;
    let step = (1.0 - spec.overlap) * spec.window_size;
    let centers = grid_coordinates(
        &center_region,
        &GridSpec::with_spacing(step).adjust(spec.adjust.translated()),
    )?;

    let tree = KdTree::build(coordinates)?;
    let input_shape: Shape = first.shape().iter().copied().collect();
    let rank = input_shape.len();
    let radius = spec.window_size / 2.0;
    let center_shape: Shape = centers[0].shape().iter().copied().collect();
    let mut point = vec![0.0; region.ndim()];
    let mut windows = Vec::with_capacity(centers[0].len());
    for i in 0..centers[0].len() {
        for (d, array) in centers.iter().enumerate() {
            point[d] = array.values()[i];
        }
        let hits = tree.within_chebyshev(&point, radius);
        let mut indices = vec![Vec::with_capacity(hits.len()); rank];
        for flat in hits {
            for (axis, &v) in unravel_index(flat, &input_shape).iter().enumerate() {
                indices[axis].push(v);
            }
        }
        windows.push(WindowMembers { indices });
    }
    Ok((
        centers,
        WindowIndices {
            shape: center_shape,
            windows,
        },
    ))
}
