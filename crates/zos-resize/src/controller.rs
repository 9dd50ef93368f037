//! Resize controller owning the handles of one target element

use std::rc::Rc;

use tracing::{debug, warn};

use crate::direction::{Direction, HandlePlacement};
use crate::error::ResizeError;
use crate::handler::Handler;
use crate::options::{NormalizedOptions, ResizeConfig, ResizeOptions};
use crate::platform::Platform;
use crate::session::binding::SessionBinding;
use crate::session::{DragSession, Phase};

/// Attribute tagging each handle element with its direction
pub const HANDLE_ATTRIBUTE: &str = "data-resize-handle";

/// Base style shared by every handle element
const HANDLE_BASE_STYLE: [(&str, &str); 2] = [("position", "absolute"), ("user-select", "none")];

/// Element a controller decorates
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<El> {
    /// An element reference
    Element(El),
    /// A selector resolved through the platform
    Selector(String),
}

impl<El> Target<El> {
    pub fn selector(selector: impl Into<String>) -> Self {
        Target::Selector(selector.into())
    }
}

/// One resize handle attached to the target
pub struct Handle<P: Platform> {
    direction: Direction,
    element: P::Element,
    placement: HandlePlacement,
    binding: SessionBinding<P>,
}

impl<P: Platform> Handle<P> {
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn element(&self) -> &P::Element {
        &self.element
    }

    #[inline]
    pub fn placement(&self) -> &HandlePlacement {
        &self.placement
    }

    /// Phase of the handle's drag session
    #[inline]
    pub fn phase(&self) -> Phase {
        self.binding.phase()
    }
}

impl<P: Platform> std::fmt::Debug for Handle<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("direction", &self.direction)
            .field("element", &self.element)
            .field("phase", &self.phase())
            .finish()
    }
}

/// Resize controller
///
/// Creates one handle per configured direction on the target and owns them
/// until [`Resizable::destroy`] (or drop). Each handle runs its own drag
/// session and reports to a single handler built from the options.
pub struct Resizable<P: Platform> {
    platform: Rc<P>,
    target: P::Element,
    config: ResizeConfig,
    options: NormalizedOptions,
    handler: Rc<Handler<P::Event>>,
    handles: Vec<Handle<P>>,
}

impl<P: Platform> Resizable<P> {
    /// Phase tag of the first callback of a drag
    pub const START: Phase = Phase::Start;
    /// Phase tag of throttled updates during a drag
    pub const MOVE: Phase = Phase::Move;
    /// Phase tag of the release callback
    pub const END: Phase = Phase::End;

    /// Decorate `target` with resize handles.
    ///
    /// Fails before touching the document if the target cannot be resolved.
    pub fn new(
        platform: Rc<P>,
        target: Target<P::Element>,
        options: ResizeOptions<P::Event>,
    ) -> Result<Self, ResizeError> {
        let target = resolve_target(platform.as_ref(), target)?;
        let (config, callbacks) = options.into_parts();

        let mut resizable = Self {
            platform,
            target,
            options: config.normalize(),
            config,
            handler: Rc::new(Handler::new(callbacks)),
            handles: Vec::new(),
        };
        resizable.init()?;
        Ok(resizable)
    }

    /// Take over the target of `previous`, removing its handles first
    pub fn reclaim(mut previous: Resizable<P>, options: ResizeOptions<P::Event>) -> Result<Self, ResizeError> {
        previous.cleanup();
        let platform = previous.platform.clone();
        let target = previous.target.clone();
        drop(previous);
        Self::new(platform, Target::Element(target), options)
    }

    /// Rebuild every handle with new options on the same target
    pub fn reinit(&mut self, options: ResizeOptions<P::Event>) -> Result<(), ResizeError> {
        self.cleanup();
        let (config, callbacks) = options.into_parts();
        self.options = config.normalize();
        self.config = config;
        self.handler = Rc::new(Handler::new(callbacks));
        self.init()
    }

    /// Remove all handles and their listeners. Safe to call repeatedly.
    ///
    /// A drag in progress is abandoned: no END callback is emitted.
    pub fn cleanup(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        let removed = self.handles.len();
        for mut handle in self.handles.drain(..) {
            handle.binding.release();
            if let Err(err) = self.platform.remove_child(&self.target, &handle.element) {
                warn!(direction = %handle.direction, %err, "failed to remove resize handle");
            }
        }
        debug!(removed, "resize handles removed");
    }

    /// Tear the controller down
    pub fn destroy(&mut self) {
        self.cleanup();
    }

    /// Handles in canonical direction order
    #[inline]
    pub fn handles(&self) -> &[Handle<P>] {
        &self.handles
    }

    #[inline]
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Handle for a direction, if configured
    pub fn handle(&self, direction: Direction) -> Option<&Handle<P>> {
        self.handles.iter().find(|h| h.direction == direction)
    }

    #[inline]
    pub fn target(&self) -> &P::Element {
        &self.target
    }

    /// Configuration as supplied
    #[inline]
    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Configuration after normalization
    #[inline]
    pub fn options(&self) -> &NormalizedOptions {
        &self.options
    }

    fn init(&mut self) -> Result<(), ResizeError> {
        if self.platform.computed_position(&self.target)? == "static" {
            self.platform
                .set_style(&self.target, &[("position", "relative".to_string())])?;
        }

        self.remove_stale_handles();

        let directions = self.options.handles.clone();
        for direction in directions {
            let handle = self.create_handle(direction)?;
            self.handles.push(handle);
        }

        debug!(
            handles = self.handles.len(),
            half = self.options.half,
            bound = self.options.bound,
            input = ?self.platform.input_mode(),
            "resize handles attached"
        );
        Ok(())
    }

    /// Detach handles a previous controller left on the target
    fn remove_stale_handles(&self) {
        let stale: Vec<P::Element> = self
            .platform
            .child_elements(&self.target)
            .into_iter()
            .filter(|child| self.platform.get_attribute(child, HANDLE_ATTRIBUTE).is_some())
            .collect();
        if stale.is_empty() {
            return;
        }

        for child in &stale {
            if let Err(err) = self.platform.remove_child(&self.target, child) {
                warn!(%err, "failed to remove stale resize handle");
            }
        }
        debug!(removed = stale.len(), "stale resize handles removed");
    }

    fn create_handle(&self, direction: Direction) -> Result<Handle<P>, ResizeError> {
        let NormalizedOptions { half, bound, anchor, .. } = self.options;
        let placement = HandlePlacement::new(direction, half);

        let element = self.platform.create_element("div")?;
        let mut style: Vec<(&str, String)> = HANDLE_BASE_STYLE
            .iter()
            .map(|(property, value)| (*property, value.to_string()))
            .collect();
        style.extend(placement.style());
        self.platform.set_style(&element, &style)?;
        self.platform
            .set_attribute(&element, HANDLE_ATTRIBUTE, direction.as_str())?;

        let mut binding = SessionBinding::bind(
            self.platform.clone(),
            element.clone(),
            DragSession::new(direction, half, bound, anchor),
            self.handler.clone(),
        )?;
        if let Err(err) = self.platform.append_child(&self.target, &element) {
            binding.release();
            return Err(err);
        }

        Ok(Handle {
            direction,
            element,
            placement,
            binding,
        })
    }
}

impl<P: Platform> std::fmt::Debug for Resizable<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resizable")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("handles", &self.handles)
            .finish()
    }
}

impl<P: Platform> Drop for Resizable<P> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn resolve_target<P: Platform>(platform: &P, target: Target<P::Element>) -> Result<P::Element, ResizeError> {
    match target {
        Target::Element(element) => Ok(element),
        Target::Selector(selector) => {
            let selector = selector.trim();
            if selector.is_empty() {
                return Err(ResizeError::MissingTarget);
            }
            platform
                .query_element(selector)
                .ok_or_else(|| ResizeError::TargetNotFound {
                    selector: selector.to_string(),
                })
        }
    }
}
