//! Spatial partitioning of point sets.
//!
//! Splits scattered or gridded points into rectangular blocks
//! ([`block_split`]) or overlapping rolling windows ([`rolling_window`]),
//! and estimates point spacing from nearest-neighbor distances
//! ([`median_distance`]). All three build a throwaway [`KdTree`] over the
//! relevant point set; nothing is cached between calls.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod distance;
pub mod error;
pub mod kdtree;
pub mod window;

pub use block::{block_split, BlockAdjust, BlockSpec};
pub use distance::median_distance;
pub use error::SplitError;
pub use kdtree::{KdTree, PointIndex};
pub use window::{rolling_window, WindowAdjust, WindowIndices, WindowMembers, WindowSpec};
