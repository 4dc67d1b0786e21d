//! Evenly spaced line and grid coordinate generation.
//!
//! Lines are 1D sequences between two values, driven by either a point
//! count or a spacing; [`Adjust`] decides which of the two gives way when
//! they disagree. Grids compose one line per region dimension into a full
//! n-dimensional mesh, optionally pixel-registered and with constant-valued
//! extra channels appended.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod line;

pub use error::GridError;
pub use grid::{grid_coordinates, GridSpec};
pub use line::{line_coordinates, Adjust, LineSpec};
