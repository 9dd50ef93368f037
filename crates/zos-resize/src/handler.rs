//! Normalized handler fanning phase updates out to user callbacks

use std::cell::RefCell;

use tracing::warn;

use crate::geometry::Delta;
use crate::session::Phase;

/// Catch-all callback receiving every phase
pub type PhaseCallback<E> = Box<dyn FnMut(Phase, &Delta, &E)>;

/// Callback for a single phase
pub type PhaseHook<E> = Box<dyn FnMut(&Delta, &E)>;

/// User callbacks; unset callbacks are no-ops
pub struct Callbacks<E> {
    pub callback: Option<PhaseCallback<E>>,
    pub on_start: Option<PhaseHook<E>>,
    pub on_move: Option<PhaseHook<E>>,
    pub on_end: Option<PhaseHook<E>>,
}

impl<E> Default for Callbacks<E> {
    fn default() -> Self {
        Self {
            callback: None,
            on_start: None,
            on_move: None,
            on_end: None,
        }
    }
}

impl<E> std::fmt::Debug for Callbacks<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("callback", &self.callback.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

/// Single entry point every drag session reports to
pub struct Handler<E> {
    callbacks: RefCell<Callbacks<E>>,
}

impl<E> Handler<E> {
    pub fn new(callbacks: Callbacks<E>) -> Self {
        Self {
            callbacks: RefCell::new(callbacks),
        }
    }

    /// Deliver one phase update.
    ///
    /// The catch-all callback runs first, then the hook for `phase`. A
    /// dispatch issued from inside a callback is dropped.
    pub fn dispatch(&self, phase: Phase, delta: &Delta, event: &E) {
        let Ok(mut callbacks) = self.callbacks.try_borrow_mut() else {
            warn!(%phase, "re-entrant resize dispatch dropped");
            return;
        };

        if let Some(callback) = callbacks.callback.as_mut() {
            callback(phase, delta, event);
        }

        let hook = match phase {
            Phase::Start => callbacks.on_start.as_mut(),
            Phase::Move => callbacks.on_move.as_mut(),
            Phase::End => callbacks.on_end.as_mut(),
            Phase::Idle => None,
        };
        if let Some(hook) = hook {
            hook(delta, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording_handler(log: &Log) -> Handler<()> {
        let (all, start, moved, end) = (log.clone(), log.clone(), log.clone(), log.clone());
        Handler::new(Callbacks {
            callback: Some(Box::new(move |phase, d, _| all.borrow_mut().push(format!("callback {phase} {}", d.width)))),
            on_start: Some(Box::new(move |d, _| start.borrow_mut().push(format!("start {}", d.width)))),
            on_move: Some(Box::new(move |d, _| moved.borrow_mut().push(format!("move {}", d.width)))),
            on_end: Some(Box::new(move |d, _| end.borrow_mut().push(format!("end {}", d.width)))),
        })
    }

    #[test]
    fn test_callback_runs_before_phase_hook() {
        let log: Log = Rc::default();
        let handler = recording_handler(&log);
        let delta = Delta { width: 4.0, ..Delta::ZERO };

        handler.dispatch(Phase::Start, &Delta::ZERO, &());
        handler.dispatch(Phase::Move, &delta, &());
        handler.dispatch(Phase::End, &delta, &());

        assert_eq!(
            *log.borrow(),
            vec![
                "callback START 0",
                "start 0",
                "callback MOVE 4",
                "move 4",
                "callback END 4",
                "end 4",
            ]
        );
    }

    #[test]
    fn test_missing_callbacks_are_noops() {
        let handler: Handler<()> = Handler::new(Callbacks::default());
        handler.dispatch(Phase::Move, &Delta::ZERO, &());
    }

    #[test]
    fn test_idle_only_reaches_catch_all() {
        let log: Log = Rc::default();
        let handler = recording_handler(&log);
        handler.dispatch(Phase::Idle, &Delta::ZERO, &());
        assert_eq!(*log.borrow(), vec!["callback IDLE 0"]);
    }
}
