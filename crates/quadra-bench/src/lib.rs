//! Benchmark fixtures for the Quadra coordinate toolkit.
//!
//! Provides deterministic point clouds and regions shared by the criterion
//! benches, so build and query timings are comparable across runs.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use quadra_core::{CoordArray, Region};
use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The region all benchmark scatters fall in.
pub fn reference_region() -> Region {
    Region::from_bounds(&[0.0, 1000.0, -500.0, 500.0]).expect("static bounds are valid")
}

/// A deterministic 2D point cloud of `n` points inside [`reference_region`].
pub fn reference_scatter(n: usize, seed: u64) -> Vec<CoordArray> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let east: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..1000.0)).collect();
    let north: Vec<f64> = (0..n).map(|_| rng.random_range(-500.0..500.0)).collect();
    vec![CoordArray::from_flat(east), CoordArray::from_flat(north)]
}
