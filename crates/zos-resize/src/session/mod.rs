//! Drag session state machine
//!
//! One [`DragSession`] per handle runs the IDLE → START → MOVE* → END cycle.
//! The session itself is pure: it turns pointer positions into
//! [`Transition`]s. [`binding`] wires it to a [`crate::platform::Platform`].

pub(crate) mod binding;
mod feedback;
mod throttle;

pub use feedback::Feedback;
pub use throttle::{Throttle, MOVE_THROTTLE_MS};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cursor::{resolve_cursor, Cursor};
use crate::direction::Direction;
use crate::geometry::Delta;
use crate::math::{Rect, Size, Vec2};

/// Phase of a drag session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    /// No drag in progress
    #[default]
    Idle,
    /// Pointer went down on the handle
    Start,
    /// Pointer moved during the drag
    Move,
    /// Pointer released
    End,
}

impl Phase {
    /// Tag passed to callbacks (`"START"`, `"MOVE"`, `"END"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Start => "START",
            Phase::Move => "MOVE",
            Phase::End => "END",
        }
    }

    /// Check if a drag is in progress
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Start | Phase::Move)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the zero reference of a drag is captured at START
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStrategy {
    /// The raw pointer position
    #[default]
    Pointer,
    /// The handle's measured origin offset by `half`
    #[serde(rename = "handle")]
    HandleRect,
}

/// Output of one phase change
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Phase entered
    pub phase: Phase,
    /// Pointer position minus anchor
    pub offset: Vec2,
    /// Rectangle adjustment for the consumer
    pub delta: Delta,
    /// Cursor to show on the handle, if it changes
    pub cursor: Option<Cursor>,
    /// Highlight to apply to the handle, if it changes
    pub feedback: Option<Feedback>,
}

/// Per-handle drag state
#[derive(Clone, Debug)]
pub struct DragSession {
    direction: Direction,
    half: f32,
    bound: bool,
    anchor_strategy: AnchorStrategy,
    phase: Phase,
    /// Zero reference captured at START
    anchor: Vec2,
    /// Viewport snapshot taken at START
    viewport: Size,
    /// Last raw pointer position seen
    last_pointer: Vec2,
    throttle: Throttle,
}

impl DragSession {
    /// Create an idle session for a handle
    pub fn new(direction: Direction, half: f32, bound: bool, anchor_strategy: AnchorStrategy) -> Self {
        Self {
            direction,
            half,
            bound,
            anchor_strategy,
            phase: Phase::Idle,
            anchor: Vec2::ZERO,
            viewport: Size::ZERO,
            last_pointer: Vec2::ZERO,
            throttle: Throttle::default(),
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    pub fn anchor_strategy(&self) -> AnchorStrategy {
        self.anchor_strategy
    }

    /// Begin a drag.
    ///
    /// `handle_rect` is only consulted with [`AnchorStrategy::HandleRect`];
    /// without a measurement the pointer position is used.
    pub fn start(&mut self, pointer: Vec2, handle_rect: Option<Rect>, viewport: Size, now_ms: f64) -> Transition {
        self.anchor = match (self.anchor_strategy, handle_rect) {
            (AnchorStrategy::HandleRect, Some(rect)) => rect.position() + Vec2::new(self.half, self.half),
            _ => pointer,
        };
        self.viewport = viewport;
        self.last_pointer = pointer;
        self.phase = Phase::Start;
        self.throttle.reset();
        trace!(direction = %self.direction, now_ms, "drag session opened");

        Transition {
            phase: Phase::Start,
            offset: Vec2::ZERO,
            delta: Delta::ZERO,
            cursor: None,
            feedback: Some(Feedback::Active),
        }
    }

    /// Process a pointer move.
    ///
    /// Returns `None` when no drag is in progress (including a stale move
    /// delivered after END) or when the throttle drops the sample.
    pub fn moved(&mut self, pointer: Vec2, now_ms: f64) -> Option<Transition> {
        if !self.phase.is_active() {
            trace!(direction = %self.direction, phase = %self.phase, "ignoring move outside a drag");
            return None;
        }
        if !self.throttle.admit(now_ms) {
            trace!(direction = %self.direction, now_ms, "move dropped by throttle");
            return None;
        }

        self.phase = Phase::Move;
        self.last_pointer = pointer;
        let effective = if self.bound {
            pointer.clamp_inset(self.viewport, self.half)
        } else {
            pointer
        };
        let offset = effective - self.anchor;

        Some(Transition {
            phase: Phase::Move,
            offset,
            delta: Delta::from_offset(self.direction, offset),
            cursor: Some(resolve_cursor(self.direction, offset, true)),
            feedback: None,
        })
    }

    /// Finish the drag at the release point.
    ///
    /// The release point is not clamped. When the event carries no position
    /// the last seen pointer is used.
    pub fn end(&mut self, pointer: Option<Vec2>) -> Option<Transition> {
        if !self.phase.is_active() {
            return None;
        }

        self.phase = Phase::End;
        let release = pointer.unwrap_or(self.last_pointer);
        let offset = release - self.anchor;

        Some(Transition {
            phase: Phase::End,
            offset,
            delta: Delta::from_offset(self.direction, offset),
            cursor: Some(resolve_cursor(self.direction, offset, false)),
            feedback: Some(Feedback::Inactive),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    fn session(direction: Direction, bound: bool) -> DragSession {
        DragSession::new(direction, 5.0, bound, AnchorStrategy::Pointer)
    }

    #[test]
    fn test_start_emits_zero_delta_and_highlight() {
        let mut s = session(Direction::E, false);
        let t = s.start(Vec2::new(100.0, 100.0), None, VIEWPORT, 0.0);
        assert_eq!(t.phase, Phase::Start);
        assert!(t.delta.is_zero());
        assert_eq!(t.feedback, Some(Feedback::Active));
        assert_eq!(t.cursor, None);
        assert_eq!(s.phase(), Phase::Start);
        assert_eq!(s.viewport(), VIEWPORT);
    }

    #[test]
    fn test_full_east_cycle() {
        let mut s = session(Direction::E, false);
        s.start(Vec2::new(0.0, 0.0), None, VIEWPORT, 0.0);

        let m = s.moved(Vec2::new(30.0, 0.0), 20.0).unwrap();
        assert_eq!(m.phase, Phase::Move);
        assert_eq!(m.delta, Delta { right: -30.0, width: 30.0, ..Delta::ZERO });
        assert_eq!(m.cursor, Some(Cursor::WResize));

        let e = s.end(Some(Vec2::new(30.0, 0.0))).unwrap();
        assert_eq!(e.phase, Phase::End);
        assert_eq!(e.delta, Delta { right: -30.0, width: 30.0, ..Delta::ZERO });
        assert_eq!(e.cursor, Some(Cursor::EwResize));
        assert_eq!(e.feedback, Some(Feedback::Inactive));
    }

    #[test]
    fn test_move_before_start_is_ignored() {
        let mut s = session(Direction::S, false);
        assert!(s.moved(Vec2::new(10.0, 10.0), 0.0).is_none());
        assert!(s.end(Some(Vec2::new(10.0, 10.0))).is_none());
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_stale_move_after_end_is_ignored() {
        let mut s = session(Direction::S, false);
        s.start(Vec2::ZERO, None, VIEWPORT, 0.0);
        s.end(Some(Vec2::new(0.0, 40.0)));
        assert!(s.moved(Vec2::new(0.0, 80.0), 500.0).is_none());
        assert_eq!(s.phase(), Phase::End);
    }

    #[test]
    fn test_throttle_drops_fast_moves() {
        let mut s = session(Direction::E, false);
        s.start(Vec2::ZERO, None, VIEWPORT, 0.0);
        let processed = (1..=100)
            .filter_map(|t| s.moved(Vec2::new(t as f32, 0.0), t as f64))
            .count();
        assert!(processed <= 9);
        assert!(processed > 0);
    }

    #[test]
    fn test_bound_clamps_move_into_viewport() {
        let mut s = session(Direction::SE, true);
        s.start(Vec2::ZERO, None, VIEWPORT, 0.0);
        let t = s.moved(Vec2::new(-50.0, 700.0), 0.0).unwrap();
        // Anchor is the origin, so the offset is the clamped position.
        assert!((t.offset.x - 5.0).abs() < 0.001);
        assert!((t.offset.y - 595.0).abs() < 0.001);
    }

    #[test]
    fn test_unbound_move_is_not_clamped() {
        let mut s = session(Direction::SE, false);
        s.start(Vec2::ZERO, None, VIEWPORT, 0.0);
        let t = s.moved(Vec2::new(-50.0, 700.0), 0.0).unwrap();
        assert!((t.offset.x - (-50.0)).abs() < 0.001);
        assert!((t.offset.y - 700.0).abs() < 0.001);
    }

    #[test]
    fn test_end_is_never_clamped() {
        let mut s = session(Direction::SE, true);
        s.start(Vec2::ZERO, None, VIEWPORT, 0.0);
        let t = s.end(Some(Vec2::new(-50.0, 700.0))).unwrap();
        assert!((t.offset.x - (-50.0)).abs() < 0.001);
        assert!((t.offset.y - 700.0).abs() < 0.001);
    }

    #[test]
    fn test_end_without_position_uses_last_pointer() {
        let mut s = session(Direction::W, false);
        s.start(Vec2::new(100.0, 50.0), None, VIEWPORT, 0.0);
        s.moved(Vec2::new(80.0, 50.0), 1.0);
        let t = s.end(None).unwrap();
        assert_eq!(t.delta, Delta { left: -20.0, width: 20.0, ..Delta::ZERO });
    }

    #[test]
    fn test_handle_rect_anchor() {
        let mut s = DragSession::new(Direction::E, 5.0, false, AnchorStrategy::HandleRect);
        let rect = Rect::new(195.0, 20.0, 10.0, 100.0);
        s.start(Vec2::new(203.0, 60.0), Some(rect), VIEWPORT, 0.0);
        assert_eq!(s.anchor(), Vec2::new(200.0, 25.0));

        let t = s.moved(Vec2::new(230.0, 60.0), 0.0).unwrap();
        assert_eq!(t.delta.width, 30.0);
    }

    #[test]
    fn test_handle_rect_anchor_without_measurement_falls_back() {
        let mut s = DragSession::new(Direction::E, 5.0, false, AnchorStrategy::HandleRect);
        s.start(Vec2::new(203.0, 60.0), None, VIEWPORT, 0.0);
        assert_eq!(s.anchor(), Vec2::new(203.0, 60.0));
    }

    #[test]
    fn test_restart_after_end() {
        let mut s = session(Direction::N, false);
        s.start(Vec2::ZERO, None, VIEWPORT, 0.0);
        s.moved(Vec2::new(0.0, -10.0), 0.0);
        s.end(Some(Vec2::new(0.0, -10.0)));

        s.start(Vec2::new(0.0, 100.0), None, VIEWPORT, 5.0);
        // Throttle window reopens with each session.
        let t = s.moved(Vec2::new(0.0, 90.0), 6.0).unwrap();
        assert_eq!(t.delta, Delta { top: -10.0, height: 10.0, ..Delta::ZERO });
    }

    #[test]
    fn test_start_while_active_reanchors() {
        let mut s = session(Direction::E, false);
        s.start(Vec2::new(100.0, 100.0), None, VIEWPORT, 0.0);
        s.moved(Vec2::new(150.0, 100.0), 0.0);

        let t = s.start(Vec2::new(300.0, 100.0), None, Size::new(1024.0, 768.0), 50.0);
        assert_eq!(t.phase, Phase::Start);
        assert!(t.delta.is_zero());
        assert_eq!(s.anchor(), Vec2::new(300.0, 100.0));
        assert_eq!(s.viewport(), Size::new(1024.0, 768.0));

        let t = s.moved(Vec2::new(310.0, 100.0), 51.0).unwrap();
        assert!((t.delta.width - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_phase_tags() {
        assert_eq!(Phase::Start.as_str(), "START");
        assert_eq!(Phase::Move.to_string(), "MOVE");
        assert_eq!(serde_json::to_string(&Phase::End).unwrap(), "\"END\"");
        assert!(!Phase::End.is_active());
    }
}
