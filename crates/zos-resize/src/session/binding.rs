//! Wiring between a handle element, its drag session and the platform
//!
//! The handle listens for START permanently. MOVE and END listeners live on
//! the document only for the duration of one drag and are released at END or
//! when the binding is torn down.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::{DragSession, Feedback, Phase, Transition};
use crate::cursor::Cursor;
use crate::error::ResizeError;
use crate::handler::Handler;
use crate::platform::{ListenTarget, Platform, PointerEventKind};

/// State shared between the listeners of one handle
struct BindingState<P: Platform> {
    platform: Rc<P>,
    element: P::Element,
    session: RefCell<DragSession>,
    handler: Rc<Handler<P::Event>>,
    /// Document listeners of the running drag
    drag_listeners: RefCell<Vec<P::Listener>>,
    released: Cell<bool>,
}

/// Live event binding of one handle
pub(crate) struct SessionBinding<P: Platform> {
    state: Rc<BindingState<P>>,
    start_listener: Option<P::Listener>,
}

impl<P: Platform> SessionBinding<P> {
    /// Attach the START listener to `element`
    pub(crate) fn bind(
        platform: Rc<P>,
        element: P::Element,
        session: DragSession,
        handler: Rc<Handler<P::Event>>,
    ) -> Result<Self, ResizeError> {
        let state = Rc::new(BindingState {
            platform,
            element,
            session: RefCell::new(session),
            handler,
            drag_listeners: RefCell::new(Vec::new()),
            released: Cell::new(false),
        });

        let weak = Rc::downgrade(&state);
        let start_listener = state.platform.listen(
            ListenTarget::Element(&state.element),
            PointerEventKind::Down,
            Rc::new(move |event: &P::Event| {
                if let Some(state) = weak.upgrade() {
                    handle_start(&state, event);
                }
            }),
        )?;

        Ok(Self {
            state,
            start_listener: Some(start_listener),
        })
    }

    /// Current phase of the handle's session
    pub(crate) fn phase(&self) -> Phase {
        self.state.session.borrow().phase()
    }

    /// Remove every listener this binding registered.
    ///
    /// A drag in progress is abandoned without an END callback.
    pub(crate) fn release(&mut self) {
        if let Some(listener) = self.start_listener.take() {
            self.state.platform.unlisten(listener);
        }
        self.state.released.set(true);
        if self.phase().is_active() {
            debug!(
                direction = %self.state.session.borrow().direction(),
                "releasing handle mid-drag"
            );
        }
        release_drag_listeners(&self.state);
    }
}

impl<P: Platform> Drop for SessionBinding<P> {
    fn drop(&mut self) {
        self.release();
    }
}

fn handle_start<P: Platform>(state: &Rc<BindingState<P>>, event: &P::Event) {
    let Some(sample) = state.platform.pointer_sample(event) else {
        return;
    };
    if !sample.primary {
        trace!("ignoring non-primary pointer down");
        return;
    }

    let transition = {
        let mut session = state.session.borrow_mut();
        if session.phase().is_active() {
            // The release of the previous drag never arrived; restart on the new anchor.
            debug!(direction = %session.direction(), "restarting drag without a release");
        }
        let handle_rect = match session.anchor_strategy() {
            super::AnchorStrategy::HandleRect => Some(state.platform.bounding_rect(&state.element)),
            super::AnchorStrategy::Pointer => None,
        };
        let transition = session.start(
            sample.position,
            handle_rect,
            state.platform.viewport_size(),
            state.platform.now_ms(),
        );
        debug!(direction = %session.direction(), x = sample.position.x, y = sample.position.y, "drag start");
        transition
    };

    release_drag_listeners(state);
    apply(state, &transition);
    state.handler.dispatch(Phase::Start, &transition.delta, event);

    // A callback may have torn the controller down.
    if state.released.get() {
        return;
    }

    let move_listener = listen_document(state, PointerEventKind::Move, handle_move::<P>);
    let end_listener = listen_document(state, PointerEventKind::Up, handle_end::<P>);
    let mut drag_listeners = state.drag_listeners.borrow_mut();
    drag_listeners.extend(move_listener);
    drag_listeners.extend(end_listener);
}

fn handle_move<P: Platform>(state: &Rc<BindingState<P>>, event: &P::Event) {
    let Some(sample) = state.platform.pointer_sample(event) else {
        return;
    };
    let now_ms = state.platform.now_ms();
    let Some(transition) = state.session.borrow_mut().moved(sample.position, now_ms) else {
        return;
    };

    trace!(dx = transition.offset.x, dy = transition.offset.y, "drag move");
    apply(state, &transition);
    state.handler.dispatch(Phase::Move, &transition.delta, event);
}

fn handle_end<P: Platform>(state: &Rc<BindingState<P>>, event: &P::Event) {
    let pointer = state.platform.pointer_sample(event).map(|sample| sample.position);
    let Some(transition) = state.session.borrow_mut().end(pointer) else {
        return;
    };

    debug!(
        direction = %state.session.borrow().direction(),
        dx = transition.offset.x,
        dy = transition.offset.y,
        "drag end"
    );
    apply(state, &transition);
    state.handler.dispatch(Phase::End, &transition.delta, event);
    release_drag_listeners(state);
}

fn listen_document<P: Platform>(
    state: &Rc<BindingState<P>>,
    kind: PointerEventKind,
    on_event: fn(&Rc<BindingState<P>>, &P::Event),
) -> Option<P::Listener> {
    let weak: Weak<BindingState<P>> = Rc::downgrade(state);
    let result = state.platform.listen(
        ListenTarget::Document,
        kind,
        Rc::new(move |event: &P::Event| {
            if let Some(state) = weak.upgrade() {
                on_event(&state, event);
            }
        }),
    );

    match result {
        Ok(listener) => Some(listener),
        Err(err) => {
            warn!(?kind, %err, "failed to bind document listener");
            None
        }
    }
}

fn release_drag_listeners<P: Platform>(state: &BindingState<P>) {
    let listeners: Vec<P::Listener> = state.drag_listeners.borrow_mut().drain(..).collect();
    for listener in listeners {
        state.platform.unlisten(listener);
    }
}

fn apply<P: Platform>(state: &BindingState<P>, transition: &Transition) {
    if let Some(feedback) = transition.feedback {
        set_feedback(state, feedback);
    }
    if let Some(cursor) = transition.cursor {
        set_cursor(state, cursor);
    }
}

fn set_feedback<P: Platform>(state: &BindingState<P>, feedback: Feedback) {
    if let Err(err) = state.platform.set_style(&state.element, &feedback.style()) {
        warn!(?feedback, %err, "failed to update handle highlight");
    }
}

fn set_cursor<P: Platform>(state: &BindingState<P>, cursor: Cursor) {
    if let Err(err) = state
        .platform
        .set_style(&state.element, &[("cursor", cursor.as_str().to_string())])
    {
        warn!(%cursor, %err, "failed to update handle cursor");
    }
}
