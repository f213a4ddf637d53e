//! # Debounced Input Controller
//!
//! Trailing-edge debounce: a value is committed only after the input has been quiet
//! for the whole window. Each new input cancels the scheduled commit and restarts the
//! window from zero, so intermediate values are dropped. A submit commits at once and
//! cancels anything pending.
//!
//! ```text
//! Idle --input--> Pending(v, t+w) --input--> Pending(v', t'+w)
//!                 Pending(v, d) --now >= d--> Committed(v) --> Idle
//! ```

use crate::timer::Timer;
use std::time::Duration;

/// Quiet period before a typed search term is committed.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending { deadline: Duration },
}

/// A committed value and the time it was committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit<T> {
    pub value: T,
    pub at: Duration,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    timer: Timer<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            timer: Timer::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records a raw input event, returning the new commit deadline.
    pub fn input(&mut self, value: T, now: Duration) -> Duration {
        let deadline = now + self.window;
        self.timer.schedule(deadline, value);
        deadline
    }

    /// Commits immediately, discarding any pending value.
    pub fn submit(&mut self, value: T, now: Duration) -> Commit<T> {
        self.timer.cancel();
        Commit { value, at: now }
    }

    /// Returns the pending value once its window has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<Commit<T>> {
        self.timer
            .fire(now)
            .map(|(at, value)| Commit { value, at })
    }

    pub fn phase(&self) -> Phase {
        match self.timer.deadline() {
            Some(deadline) => Phase::Pending { deadline },
            None => Phase::Idle,
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    pub fn pending(&self) -> Option<&T> {
        self.timer.payload()
    }
}
