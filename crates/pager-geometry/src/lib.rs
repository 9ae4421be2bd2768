//! Geometry primitives shared by the pager crates.
//!
//! Only what page placement needs: points, sizes, rectangles, and the
//! slot rectangle of a page inside a horizontally paged strip.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
