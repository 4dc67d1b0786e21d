//! Quadra: coordinate array generation and spatial partitioning for
//! geoscience data.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Quadra sub-crates. For most users, adding `quadra` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quadra::prelude::*;
//!
//! // A 1-unit grid over a 5 x 5 region.
//! let region = Region::from_bounds(&[-5.0, 0.0, 5.0, 10.0]).unwrap();
//! let coords = grid_coordinates(&region, &GridSpec::with_spacing(1.0)).unwrap();
//! assert_eq!(coords[0].shape(), &[6, 6]);
//!
//! // Split the points into 2.5-unit blocks and label each point.
//! let (centers, labels) = block_split(&coords, &BlockSpec::with_size(2.5)).unwrap();
//! assert_eq!(centers[0].len(), 4);
//! assert_eq!(labels.shape(), &[6, 6]);
//! assert!(labels.values().iter().all(|&label| label < 4));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quadra-core` | Arrays, regions, validation, shared errors |
//! | [`grid`] | `quadra-grid` | Line and grid coordinate generation |
//! | [`split`] | `quadra-split` | kd-tree, block split, rolling windows |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arrays, regions, validation, and shared errors (`quadra-core`).
pub mod types {
    pub use quadra_core::*;
}

/// Line and grid coordinate generation (`quadra-grid`).
pub mod grid {
    pub use quadra_grid::*;
}

/// Spatial partitioning and nearest-neighbor queries (`quadra-split`).
pub mod split {
    pub use quadra_split::*;
}

/// The most commonly used types and functions in one import.
pub mod prelude {
    pub use quadra_core::{
        check_coordinates, inside, CoordArray, NdArray, PerAxis, Region, RegionError,
    };
    pub use quadra_grid::{
        grid_coordinates, line_coordinates, Adjust, GridError, GridSpec, LineSpec,
    };
    pub use quadra_split::{
        block_split, median_distance, rolling_window, BlockAdjust, BlockSpec, KdTree,
        PointIndex, SplitError, WindowAdjust, WindowIndices, WindowSpec,
    };
}
