// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! INP-Lite Geometry Processing
//!
//! Floor polygon decoding and area computation using nalgebra points.

pub mod error;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::Point2;

pub use error::{Error, Result};
pub use polygon::{
    compute_signed_area, parse_vertex, polygon_area, FloorPolygon, FLOOR_POLYGON_MARKER,
};
