//! Handle placement around the target's border
//!
//! Every handle straddles the border: it sits `half` outside the target and
//! reaches `half` inside. Edge handles stop `half` short of each adjacent
//! corner, and corner handles are `2 * half` squares, so the eight handles
//! tile the border without gaps or overlap. A corner `half` wide would leave
//! a gap next to each edge, so corners are twice that.

use super::Direction;
use crate::cursor::Cursor;

/// Absolute placement of one handle inside its target
///
/// `None` offsets are left unset (CSS `auto`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandlePlacement {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub cursor: Cursor,
}

impl HandlePlacement {
    const EMPTY: HandlePlacement = HandlePlacement {
        top: None,
        right: None,
        bottom: None,
        left: None,
        width: None,
        height: None,
        cursor: Cursor::Auto,
    };

    /// Compute the placement of `direction` for a given `half` thickness
    pub fn new(direction: Direction, half: f32) -> Self {
        let thickness = half * 2.0;
        let outside = -half;
        let base = HandlePlacement {
            cursor: direction.cursor(),
            ..Self::EMPTY
        };

        match direction {
            Direction::N => HandlePlacement {
                top: Some(outside),
                left: Some(half),
                right: Some(half),
                height: Some(thickness),
                ..base
            },
            Direction::E => HandlePlacement {
                right: Some(outside),
                top: Some(half),
                bottom: Some(half),
                width: Some(thickness),
                ..base
            },
            Direction::S => HandlePlacement {
                bottom: Some(outside),
                left: Some(half),
                right: Some(half),
                height: Some(thickness),
                ..base
            },
            Direction::W => HandlePlacement {
                left: Some(outside),
                top: Some(half),
                bottom: Some(half),
                width: Some(thickness),
                ..base
            },
            Direction::NE => HandlePlacement {
                top: Some(outside),
                right: Some(outside),
                width: Some(thickness),
                height: Some(thickness),
                ..base
            },
            Direction::SE => HandlePlacement {
                bottom: Some(outside),
                right: Some(outside),
                width: Some(thickness),
                height: Some(thickness),
                ..base
            },
            Direction::SW => HandlePlacement {
                bottom: Some(outside),
                left: Some(outside),
                width: Some(thickness),
                height: Some(thickness),
                ..base
            },
            Direction::NW => HandlePlacement {
                top: Some(outside),
                left: Some(outside),
                width: Some(thickness),
                height: Some(thickness),
                ..base
            },
        }
    }

    /// CSS declarations for this placement, unset offsets omitted
    pub fn style(&self) -> Vec<(&'static str, String)> {
        let lengths = [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
            ("width", self.width),
            ("height", self.height),
        ];

        let mut style: Vec<(&'static str, String)> = lengths
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, format!("{}px", v))))
            .collect();
        style.push(("cursor", self.cursor.as_str().to_string()));
        style
    }
}

/// Placement for every direction, indexed by [`Direction::index`]
pub fn placement_table(half: f32) -> [HandlePlacement; 8] {
    Direction::ALL.map(|dir| HandlePlacement::new(dir, half))
}
