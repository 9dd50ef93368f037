//! 2D vector type for pointer positions and offsets

use serde::{Deserialize, Serialize};

/// 2D vector for pointer positions and drag offsets
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp each axis into `[inset, extent - inset]` of the given area.
    ///
    /// The lower bound is applied first, so when the area is narrower than
    /// `2 * inset` the upper bound wins.
    #[inline]
    pub fn clamp_inset(self, extent: super::Size, inset: f32) -> Self {
        Self::new(
            self.x.max(inset).min(extent.width - inset),
            self.y.max(inset).min(extent.height - inset),
        )
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;

    #[test]
    fn test_vec2_sub_gives_offset() {
        let anchor = Vec2::new(100.0, 40.0);
        let pointer = Vec2::new(130.0, 25.0);
        let offset = pointer - anchor;
        assert!((offset.x - 30.0).abs() < 0.001);
        assert!((offset.y - (-15.0)).abs() < 0.001);
    }

    #[test]
    fn test_clamp_inset_outside_viewport() {
        let clamped = Vec2::new(-50.0, 700.0).clamp_inset(Size::new(800.0, 600.0), 5.0);
        assert!((clamped.x - 5.0).abs() < 0.001);
        assert!((clamped.y - 595.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_inset_inside_is_untouched() {
        let p = Vec2::new(320.0, 240.0);
        assert_eq!(p.clamp_inset(Size::new(800.0, 600.0), 5.0), p);
    }

    #[test]
    fn test_clamp_inset_narrow_area_prefers_upper_bound() {
        let clamped = Vec2::new(0.0, 0.0).clamp_inset(Size::new(6.0, 6.0), 5.0);
        assert!((clamped.x - 1.0).abs() < 0.001);
        assert!((clamped.y - 1.0).abs() < 0.001);
    }
}
