use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Lets through at most one call per `window_ms`, measured on the caller's
/// clock (animation frame or `Event::time_stamp` milliseconds).
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms, last: None }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.window_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}

/// Trailing-edge debounce. Scheduling again drops the pending timeout,
/// which cancels it.
#[derive(Clone)]
pub struct Debounce {
    wait_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        // A fired timeout stays in the slot until the next call replaces it.
        let timeout = Timeout::new(self.wait_ms, f);
        *self.pending.borrow_mut() = Some(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_admits_first_call() {
        let mut throttle = Throttle::new(16.0);
        assert!(throttle.admit(1000.0));
    }

    #[test]
    fn throttle_blocks_inside_window() {
        let mut throttle = Throttle::new(16.0);
        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(5.0));
        assert!(!throttle.admit(15.9));
        assert!(throttle.admit(16.0));
        assert!(!throttle.admit(20.0));
    }

    #[test]
    fn throttle_admits_at_most_once_per_window() {
        let mut throttle = Throttle::new(16.0);
        let admitted = (0..160).filter(|ms| throttle.admit(*ms as f64)).count();
        assert_eq!(admitted, 10);
    }
}
