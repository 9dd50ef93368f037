//! Cursor feedback for resize handles
//!
//! While idle a handle shows its axis or diagonal cursor. While dragging,
//! the cursor follows the edge or corner the pointer has effectively become
//! once the drag crosses the point where the rectangle would invert.

use serde::Serialize;
use crate::direction::Direction;
use crate::math::Vec2;

/// CSS cursor token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    Auto,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
    NResize,
    EResize,
    SResize,
    WResize,
    NeResize,
    NwResize,
    SeResize,
    SwResize,
}

impl Cursor {
    /// CSS value for this cursor
    pub fn as_str(&self) -> &'static str {
        match self {
            Cursor::Auto => "auto",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NResize => "n-resize",
            Cursor::EResize => "e-resize",
            Cursor::SResize => "s-resize",
            Cursor::WResize => "w-resize",
            Cursor::NeResize => "ne-resize",
            Cursor::NwResize => "nw-resize",
            Cursor::SeResize => "se-resize",
            Cursor::SwResize => "sw-resize",
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the cursor for a handle given the current drag offset
pub fn resolve_cursor(direction: Direction, offset: Vec2, dragging: bool) -> Cursor {
    let idle = direction.cursor();
    if !dragging {
        return idle;
    }

    let Vec2 { x, y } = offset;
    match direction {
        Direction::E | Direction::W => {
            if x > 0.0 {
                Cursor::WResize
            } else {
                Cursor::EResize
            }
        }
        Direction::N | Direction::S => {
            if y > 0.0 {
                Cursor::NResize
            } else {
                Cursor::SResize
            }
        }
        Direction::NE | Direction::SW => {
            if x > 0.0 && y < 0.0 {
                Cursor::SwResize
            } else if x < 0.0 && y > 0.0 {
                Cursor::NeResize
            } else {
                idle
            }
        }
        Direction::NW | Direction::SE => {
            if x > 0.0 && y > 0.0 {
                Cursor::NwResize
            } else if x < 0.0 && y < 0.0 {
                Cursor::SeResize
            } else {
                idle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(direction: Direction, x: f32, y: f32) -> Cursor {
        resolve_cursor(direction, Vec2::new(x, y), true)
    }

    #[test]
    fn test_idle_uses_static_cursor() {
        for dir in Direction::ALL {
            assert_eq!(resolve_cursor(dir, Vec2::new(-40.0, 25.0), false), dir.cursor());
        }
    }

    #[test]
    fn test_west_edge_flips_with_horizontal_offset() {
        assert_eq!(drag(Direction::W, -20.0, 0.0), Cursor::EResize);
        assert_eq!(drag(Direction::W, 5.0, 0.0), Cursor::WResize);
    }

    #[test]
    fn test_straight_edges_at_zero_offset() {
        assert_eq!(drag(Direction::E, 0.0, 30.0), Cursor::EResize);
        assert_eq!(drag(Direction::S, 30.0, 0.0), Cursor::SResize);
        assert_eq!(drag(Direction::N, 0.0, 1.0), Cursor::NResize);
    }

    #[test]
    fn test_ne_sw_diagonal_swap() {
        assert_eq!(drag(Direction::NE, 10.0, -10.0), Cursor::SwResize);
        assert_eq!(drag(Direction::SW, -10.0, 10.0), Cursor::NeResize);
        assert_eq!(drag(Direction::NE, 10.0, 10.0), Cursor::NeswResize);
        assert_eq!(drag(Direction::SW, 0.0, -10.0), Cursor::NeswResize);
    }

    #[test]
    fn test_nw_se_diagonal_swap() {
        assert_eq!(drag(Direction::SE, 10.0, 10.0), Cursor::NwResize);
        assert_eq!(drag(Direction::NW, -10.0, -10.0), Cursor::SeResize);
        assert_eq!(drag(Direction::NW, 10.0, -10.0), Cursor::NwseResize);
        assert_eq!(drag(Direction::SE, 10.0, 0.0), Cursor::NwseResize);
    }

    #[test]
    fn test_css_values() {
        assert_eq!(Cursor::NeswResize.to_string(), "nesw-resize");
        assert_eq!(Cursor::EResize.as_str(), "e-resize");
    }
}
