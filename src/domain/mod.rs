//! Pure domain types with minimal dependencies
//!
//! Geometry, preview/source scaling and the region tracker. Nothing here
//! touches the file system or the image codecs.

pub mod geometry;
pub mod region;
pub mod scale;

pub use geometry::*;
pub use region::*;
pub use scale::*;
