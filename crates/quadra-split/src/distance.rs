//! Nearest-neighbor distance statistics.

use crate::error::SplitError;
use crate::kdtree::KdTree;
use quadra_core::{check_coordinates, CoordArray, RegionError};

/// Median distance from each point to its `k_nearest` neighbors.
///
/// For sparse, roughly uniform datasets a `k_nearest` of 1 estimates the
/// average point spacing. Clustered data (points dense along survey lines,
/// say) makes the closest neighbors unrepresentative; a median over the
/// 10-20 nearest is more robust there.
///
/// The result has the same shape as the input coordinate arrays. Points
/// with fewer than `k_nearest` other points in the dataset pad the missing
/// distances with infinity, which dominates the median once half the
/// neighbors are missing.
pub fn median_distance(
    coordinates: &[CoordArray],
    k_nearest: usize,
) -> Result<CoordArray, SplitError> {
    check_coordinates(coordinates)?;
    if k_nearest < 1 {
        return Err(SplitError::InvalidNeighborCount { k_nearest });
    }
    let Some(first) = coordinates.first() else {
        return Err(RegionError::InvalidRegion { len: 0 }.into());
    };

    let tree = KdTree::build(coordinates)?;
    let mut point = vec![0.0; coordinates.len()];
    let mut distances = Vec::with_capacity(first.len());
    let mut neighbor_distances = Vec::with_capacity(k_nearest);
    for i in 0..first.len() {
        for (d, array) in coordinates.iter().enumerate() {
            point[d] = array.values()[i];
        }
        // The closest match is the point itself at distance zero; query one
        // extra neighbor and drop it.
        let neighbors = tree.k_nearest(&point, k_nearest + 1);
        neighbor_distances.clear();
        neighbor_distances.extend(neighbors.iter().skip(1).map(|&(distance, _)| distance));
        neighbor_distances.resize(k_nearest, f64::INFINITY);
        distances.push(median(&mut neighbor_distances));
    }
    Ok(CoordArray::from_vec(
        distances,
        first.shape().iter().copied().collect(),
    ))
}

/// Median of a non-empty slice; sorts in place.
fn median(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
