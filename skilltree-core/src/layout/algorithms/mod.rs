//! Layout algorithms for skill trees.
//!
//! - `quadrant`: default. Direction quadrants near the root, chains below
//! - `spoke`: equal full-circle spokes around each parent, ignores directions

mod quadrant;
mod spoke;

pub use quadrant::{QuadrantLayout, layout_quadrant, quadrant_angles};
pub use spoke::{SpokeLayout, layout_spoke};
