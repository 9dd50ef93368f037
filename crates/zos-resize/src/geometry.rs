//! Directional rectangle deltas
//!
//! Maps a pointer displacement on one handle into the adjustment the
//! consumer applies to the target's box. Edges move by the offset on their
//! own axis; the opposite edge stays put, so a left/top move is paired with
//! an opposite width/height change.

use serde::Serialize;
use crate::direction::Direction;
use crate::math::Vec2;

/// Rectangle adjustment produced by a drag, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Delta {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Delta {
    /// All-zero delta
    pub const ZERO: Delta = Delta {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Delta for a drag of `offset` (pointer minus anchor) on a handle
    pub fn from_offset(direction: Direction, offset: Vec2) -> Self {
        let Vec2 { x, y } = offset;
        match direction {
            Direction::N => Delta {
                top: y,
                height: -y,
                ..Self::ZERO
            },
            Direction::NE => Delta {
                top: y,
                right: -x,
                width: x,
                height: -y,
                ..Self::ZERO
            },
            Direction::E => Delta {
                right: -x,
                width: x,
                ..Self::ZERO
            },
            Direction::SE => Delta {
                right: -x,
                bottom: -y,
                width: x,
                height: y,
                ..Self::ZERO
            },
            Direction::S => Delta {
                bottom: -y,
                height: y,
                ..Self::ZERO
            },
            Direction::SW => Delta {
                bottom: -y,
                left: x,
                width: -x,
                height: y,
                ..Self::ZERO
            },
            Direction::W => Delta {
                left: x,
                width: -x,
                ..Self::ZERO
            },
            Direction::NW => Delta {
                top: y,
                left: x,
                width: -x,
                height: -y,
                ..Self::ZERO
            },
        }
    }

    /// Check if every field is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: f32 = 17.0;
    const Y: f32 = -9.0;

    fn delta(direction: Direction) -> Delta {
        Delta::from_offset(direction, Vec2::new(X, Y))
    }

    fn nonzero_fields(d: &Delta) -> Vec<&'static str> {
        [
            ("top", d.top),
            ("right", d.right),
            ("bottom", d.bottom),
            ("left", d.left),
            ("width", d.width),
            ("height", d.height),
        ]
        .into_iter()
        .filter(|(_, v)| *v != 0.0)
        .map(|(k, _)| k)
        .collect()
    }

    #[test]
    fn test_edge_directions() {
        assert_eq!(delta(Direction::N), Delta { top: Y, height: -Y, ..Delta::ZERO });
        assert_eq!(delta(Direction::E), Delta { right: -X, width: X, ..Delta::ZERO });
        assert_eq!(delta(Direction::S), Delta { bottom: -Y, height: Y, ..Delta::ZERO });
        assert_eq!(delta(Direction::W), Delta { left: X, width: -X, ..Delta::ZERO });
    }

    #[test]
    fn test_corner_directions() {
        assert_eq!(
            delta(Direction::NE),
            Delta { top: Y, right: -X, width: X, height: -Y, ..Delta::ZERO }
        );
        assert_eq!(
            delta(Direction::SE),
            Delta { right: -X, bottom: -Y, width: X, height: Y, ..Delta::ZERO }
        );
        assert_eq!(
            delta(Direction::SW),
            Delta { bottom: -Y, left: X, width: -X, height: Y, ..Delta::ZERO }
        );
        assert_eq!(
            delta(Direction::NW),
            Delta { top: Y, left: X, width: -X, height: -Y, ..Delta::ZERO }
        );
    }

    #[test]
    fn test_only_documented_fields_are_set() {
        let expected: [(Direction, &[&str]); 8] = [
            (Direction::N, &["top", "height"]),
            (Direction::NE, &["top", "right", "width", "height"]),
            (Direction::E, &["right", "width"]),
            (Direction::SE, &["right", "bottom", "width", "height"]),
            (Direction::S, &["bottom", "height"]),
            (Direction::SW, &["bottom", "left", "width", "height"]),
            (Direction::W, &["left", "width"]),
            (Direction::NW, &["top", "left", "width", "height"]),
        ];
        for (dir, fields) in expected {
            assert_eq!(nonzero_fields(&delta(dir)), fields.to_vec(), "{dir}");
        }
    }

    #[test]
    fn test_zero_offset_is_zero_delta() {
        for dir in Direction::ALL {
            assert!(Delta::from_offset(dir, Vec2::ZERO).is_zero(), "{dir}");
        }
    }

    #[test]
    fn test_east_drag_example() {
        let d = Delta::from_offset(Direction::E, Vec2::new(30.0, 0.0));
        assert_eq!(d, Delta { right: -30.0, width: 30.0, ..Delta::ZERO });
    }

    #[test]
    fn test_serializes_all_fields() {
        let json = serde_json::to_value(Delta::from_offset(Direction::S, Vec2::new(0.0, 12.0))).unwrap();
        assert_eq!(json["bottom"], -12.0);
        assert_eq!(json["height"], 12.0);
        assert_eq!(json["top"], 0.0);
    }
}
