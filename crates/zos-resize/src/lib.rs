//! Resize handles for Zero OS surfaces
//!
//! This crate attaches draggable resize handles around an element's border
//! and turns pointer or touch drags on them into rectangle adjustments:
//! - Handle placement for the eight compass directions
//! - Directional deltas (`top`, `right`, `bottom`, `left`, `width`, `height`)
//! - Cursor feedback that follows inverted drags
//! - A per-handle START → MOVE → END state machine with throttled moves
//!   and optional viewport clamping
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`)
//! - [`direction`]: Directions and handle placement
//! - [`geometry`]: Delta computation
//! - [`cursor`]: Cursor resolution
//! - [`session`]: Drag state machine and throttle
//! - [`options`]: Configuration and normalization
//! - [`controller`]: The `Resizable` controller
//! - [`platform`]: Platform surface trait and the in-memory platform
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use zos_resize::platform::memory::{MemoryEvent, MemoryPlatform};
//! use zos_resize::platform::PointerEventKind;
//! use zos_resize::{Direction, Resizable, ResizeOptions, Target};
//!
//! let platform = Rc::new(MemoryPlatform::default());
//! let panel = platform.add_element("panel");
//!
//! let resizable = Resizable::new(
//!     platform.clone(),
//!     Target::Element(panel),
//!     ResizeOptions::new()
//!         .handles("e s")
//!         .on_move(|delta, _event| println!("width {:+}", delta.width)),
//! )
//! .unwrap();
//!
//! let east = *resizable.handle(Direction::E).unwrap().element();
//! platform.dispatch(east, PointerEventKind::Down, &MemoryEvent::pointer(200.0, 50.0));
//! platform.dispatch_document(PointerEventKind::Move, &MemoryEvent::pointer(240.0, 50.0));
//! platform.dispatch_document(PointerEventKind::Up, &MemoryEvent::pointer(240.0, 50.0));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: Geometry, cursor and session logic run without a browser
//! 2. **Time Abstraction**: The move throttle reads time from the platform
//! 3. **Explicit Ownership**: A controller owns exactly the handles it created

pub mod controller;
pub mod cursor;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod handler;
pub mod math;
pub mod options;
pub mod platform;
pub mod session;

// Browser platform and exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod wasm;

pub use controller::{Handle, Resizable, Target, HANDLE_ATTRIBUTE};
pub use cursor::{resolve_cursor, Cursor};
pub use direction::{placement_table, Direction, HandlePlacement};
pub use error::ResizeError;
pub use geometry::Delta;
pub use handler::{Callbacks, Handler};
pub use math::{Rect, Size, Vec2};
pub use options::{HandleSelection, NormalizedOptions, ResizeConfig, ResizeOptions, DEFAULT_THRESHOLD};
pub use platform::{InputMode, Platform};
pub use session::{AnchorStrategy, DragSession, Feedback, Phase, Throttle, Transition, MOVE_THROTTLE_MS};

/// Phase tag of the first callback of a drag
pub const START: Phase = Phase::Start;

/// Phase tag of throttled updates during a drag
pub const MOVE: Phase = Phase::Move;

/// Phase tag of the release callback
pub const END: Phase = Phase::End;
