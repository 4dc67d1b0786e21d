//! Core types for the Quadra coordinate toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! array container used by every sampler ([`NdArray`] and the
//! [`CoordArray`] alias), validated bounding [`Region`]s, the
//! scalar-or-per-dimension [`PerAxis`] argument type, and the shared
//! validation errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod axis;
pub mod error;
pub mod region;

pub use array::{check_coordinates, ravel_index, unravel_index, CoordArray, NdArray, Shape};
pub use axis::PerAxis;
pub use error::{InvertedBound, RegionError};
pub use region::{inside, Region};
