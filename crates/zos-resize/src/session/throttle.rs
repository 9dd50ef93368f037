//! Leading-edge throttle for pointer move sampling

/// Minimum spacing between processed move events, in milliseconds
pub const MOVE_THROTTLE_MS: f64 = 12.0;

/// Leading-edge throttle.
///
/// The first call in a window is admitted and opens the window; calls that
/// land inside it are dropped, never queued.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MOVE_THROTTLE_MS)
    }
}

impl Throttle {
    /// Create a throttle with the given window length
    pub const fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Admit or drop a call made at `now_ms`
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }

    /// Forget the open window so the next call is admitted
    #[inline]
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_admitted() {
        let mut throttle = Throttle::default();
        assert!(throttle.admit(1000.0));
        assert!(!throttle.admit(1000.0));
    }

    #[test]
    fn test_window_boundaries() {
        let mut throttle = Throttle::new(12.0);
        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(11.9));
        assert!(throttle.admit(12.0));
        assert!(!throttle.admit(23.0));
        assert!(throttle.admit(30.0));
    }

    #[test]
    fn test_one_ms_events_for_100ms() {
        let mut throttle = Throttle::default();
        let admitted = (1..=100).filter(|t| throttle.admit(*t as f64)).count();
        assert!(admitted <= (100.0_f64 / MOVE_THROTTLE_MS).ceil() as usize);
        assert_eq!(admitted, 9);
    }

    #[test]
    fn test_reset_reopens() {
        let mut throttle = Throttle::default();
        assert!(throttle.admit(5.0));
        throttle.reset();
        assert!(throttle.admit(6.0));
    }
}
