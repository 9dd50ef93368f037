//! Compass directions a resize handle can occupy
//!
//! The canonical order is N, NE, E, SE, S, SW, W, NW. Every configured handle
//! set is a subset of this order.

mod placement;

pub use placement::{placement_table, HandlePlacement};

use serde::{Deserialize, Serialize};
use crate::cursor::Cursor;

/// Compass direction of a resize handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North (top) edge
    N,
    /// Northeast corner
    NE,
    /// East (right) edge
    E,
    /// Southeast corner
    SE,
    /// South (bottom) edge
    S,
    /// Southwest corner
    SW,
    /// West (left) edge
    W,
    /// Northwest corner
    NW,
}

impl Direction {
    /// All directions in canonical order
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Parse a lowercase direction token (`"n"`, `"ne"`, ...)
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "n" => Some(Direction::N),
            "ne" => Some(Direction::NE),
            "e" => Some(Direction::E),
            "se" => Some(Direction::SE),
            "s" => Some(Direction::S),
            "sw" => Some(Direction::SW),
            "w" => Some(Direction::W),
            "nw" => Some(Direction::NW),
            _ => None,
        }
    }

    /// Lowercase token for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "n",
            Direction::NE => "ne",
            Direction::E => "e",
            Direction::SE => "se",
            Direction::S => "s",
            Direction::SW => "sw",
            Direction::W => "w",
            Direction::NW => "nw",
        }
    }

    /// Position of this direction in the canonical order
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Check if this is a corner handle
    #[inline]
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Direction::NE | Direction::SE | Direction::SW | Direction::NW
        )
    }

    /// Static cursor shown over the handle while idle
    pub fn cursor(&self) -> Cursor {
        match self {
            Direction::N | Direction::S => Cursor::NsResize,
            Direction::E | Direction::W => Cursor::EwResize,
            Direction::NE | Direction::SW => Cursor::NeswResize,
            Direction::NW | Direction::SE => Cursor::NwseResize,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_has_eight_directions() {
        assert_eq!(Direction::ALL.len(), 8);
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_token_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_token(dir.as_str()), Some(dir));
        }
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        assert_eq!(Direction::from_token("north"), None);
        assert_eq!(Direction::from_token("N"), None);
        assert_eq!(Direction::from_token(""), None);
    }

    #[test]
    fn test_corners() {
        let corners: Vec<_> = Direction::ALL.iter().filter(|d| d.is_corner()).collect();
        assert_eq!(corners, vec![&Direction::NE, &Direction::SE, &Direction::SW, &Direction::NW]);
    }

    #[test]
    fn test_default_cursors() {
        assert_eq!(Direction::N.cursor(), Cursor::NsResize);
        assert_eq!(Direction::W.cursor(), Cursor::EwResize);
        assert_eq!(Direction::SW.cursor(), Cursor::NeswResize);
        assert_eq!(Direction::SE.cursor(), Cursor::NwseResize);
    }
}
