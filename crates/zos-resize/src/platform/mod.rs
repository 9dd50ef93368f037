//! Platform surface the resize engine drives
//!
//! The engine never touches a document directly. A [`Platform`] provides
//! element creation, styling, measurement, clock and event registration.
//!
//! # Implementations
//!
//! - **Browser** (`wasm` feature): `web-sys` elements and DOM listeners
//! - **Memory**: [`memory::MemoryPlatform`], an in-memory document for
//!   headless hosts and tests

pub mod memory;

use std::rc::Rc;

use crate::error::ResizeError;
use crate::math::{Rect, Size, Vec2};

/// Listener invoked with the platform's raw event
pub type EventCallback<E> = Rc<dyn Fn(&E)>;

/// Which family of input events the platform delivers.
///
/// Resolved once when the platform is constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Pointer events (`pointerdown` / `pointermove` / `pointerup`)
    #[default]
    Pointer,
    /// Touch events (`touchstart` / `touchmove` / `touchend`)
    Touch,
}

impl InputMode {
    /// DOM event name for a pointer event kind
    pub fn event_name(&self, kind: PointerEventKind) -> &'static str {
        match (self, kind) {
            (InputMode::Pointer, PointerEventKind::Down) => "pointerdown",
            (InputMode::Pointer, PointerEventKind::Move) => "pointermove",
            (InputMode::Pointer, PointerEventKind::Up) => "pointerup",
            (InputMode::Touch, PointerEventKind::Down) => "touchstart",
            (InputMode::Touch, PointerEventKind::Move) => "touchmove",
            (InputMode::Touch, PointerEventKind::Up) => "touchend",
        }
    }
}

/// The three input events a drag session listens for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug)]
pub enum ListenTarget<'a, El> {
    /// A specific element (handle)
    Element(&'a El),
    /// The document, receiving every bubbled event
    Document,
}

/// Pointer position extracted from a raw event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Client (viewport) coordinates
    pub position: Vec2,
    /// False for secondary buttons and non-primary pointers
    pub primary: bool,
}

impl PointerSample {
    /// Sample from the primary pointer
    #[inline]
    pub const fn primary(position: Vec2) -> Self {
        Self { position, primary: true }
    }
}

/// Pick the touch point a touch event reports.
///
/// The first still-active touch wins; once every finger has lifted (END),
/// the first changed touch is used instead.
#[inline]
pub fn touch_point<T>(first_active: Option<T>, first_changed: Option<T>) -> Option<T> {
    first_active.or(first_changed)
}

/// Platform surface trait
///
/// All calls happen on the single event-loop thread. Implementations must
/// tolerate listeners being added or removed while an event is being
/// dispatched.
///
/// # Associated Types
///
/// - `Element`: handle to a document element (cheap to clone)
/// - `Event`: the raw event passed through to user callbacks
/// - `Listener`: registration token; dropping it without [`Platform::unlisten`]
///   is allowed to leak the registration
pub trait Platform: 'static {
    type Element: Clone + PartialEq + std::fmt::Debug + 'static;
    type Event: 'static;
    type Listener: 'static;

    /// Input family chosen at construction
    fn input_mode(&self) -> InputMode;

    /// Resolve a selector to an element
    fn query_element(&self, selector: &str) -> Option<Self::Element>;

    /// Create a detached element
    fn create_element(&self, tag: &str) -> Result<Self::Element, ResizeError>;

    /// Append `child` to `parent`
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), ResizeError>;

    /// Remove `child` from `parent`
    fn remove_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), ResizeError>;

    /// Element children of `parent`, in document order
    fn child_elements(&self, parent: &Self::Element) -> Vec<Self::Element>;

    /// Read an attribute of an element
    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Computed `position` property of an element (`"static"`, `"relative"`, ...)
    fn computed_position(&self, element: &Self::Element) -> Result<String, ResizeError>;

    /// Write inline style declarations; an empty value clears the property
    fn set_style(&self, element: &Self::Element, declarations: &[(&str, String)]) -> Result<(), ResizeError>;

    /// Set an attribute on an element
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<(), ResizeError>;

    /// Bounding client rect of an element
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Current viewport (document element client) size
    fn viewport_size(&self) -> Size;

    /// Monotonic timestamp in milliseconds
    fn now_ms(&self) -> f64;

    /// Extract the pointer position from a raw event, if it carries one
    fn pointer_sample(&self, event: &Self::Event) -> Option<PointerSample>;

    /// Register a listener for one event kind
    fn listen(
        &self,
        target: ListenTarget<'_, Self::Element>,
        kind: PointerEventKind,
        callback: EventCallback<Self::Event>,
    ) -> Result<Self::Listener, ResizeError>;

    /// Remove a listener registered with [`Platform::listen`]
    fn unlisten(&self, listener: Self::Listener);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(InputMode::Pointer.event_name(PointerEventKind::Down), "pointerdown");
        assert_eq!(InputMode::Pointer.event_name(PointerEventKind::Up), "pointerup");
        assert_eq!(InputMode::Touch.event_name(PointerEventKind::Move), "touchmove");
        assert_eq!(InputMode::Touch.event_name(PointerEventKind::Up), "touchend");
    }

    #[test]
    fn test_touch_point_prefers_active_touch() {
        assert_eq!(touch_point(Some(1), Some(2)), Some(1));
        assert_eq!(touch_point(None, Some(2)), Some(2));
        assert_eq!(touch_point::<u8>(None, None), None);
    }
}
