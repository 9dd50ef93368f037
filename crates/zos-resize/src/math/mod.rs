//! Geometry primitives shared by the resize engine
//!
//! All values are CSS pixels in viewport (client) coordinates.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
