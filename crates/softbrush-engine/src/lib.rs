//! Softbrush engine crate.
//!
//! CPU rasterization for soft, feather-edged brush strokes: a gesture-long
//! coverage mask built from overlapping radial stamps, recomposited in the
//! stroke color onto a transient preview surface after every pointer move.

pub mod coords;
pub mod paint;
pub mod raster;
pub mod brush;

pub mod logging;
