//! Single-slot, cancellable timers on an explicit clock.
//!
//! Time is a [`Duration`] since the listing started; the host decides what "now" is
//! and polls. Scheduling over a pending timer replaces it, so at most one deadline per
//! timer is ever outstanding.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Timer<T> {
    slot: Option<(Duration, T)>,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Timer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer, returning the payload of the timer it replaced, if any.
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> Option<T> {
        self.slot
            .replace((deadline, payload))
            .map(|(_, cancelled)| cancelled)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|(_, payload)| payload)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.slot.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn payload(&self) -> Option<&T> {
        self.slot.as_ref().map(|(_, payload)| payload)
    }

    /// Takes the payload if the deadline has been reached, with the deadline it fired at.
    pub fn fire(&mut self, now: Duration) -> Option<(Duration, T)> {
        match self.slot {
            Some((deadline, _)) if deadline <= now => self.slot.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_at_or_after_deadline() {
        let mut timer = Timer::new();
        timer.schedule(ms(300), "a");

        assert_eq!(timer.fire(ms(299)), None);
        assert_eq!(timer.fire(ms(300)), Some((ms(300), "a")));
        assert_eq!(timer.fire(ms(1000)), None);
        assert!(!timer.is_pending());
    }

    #[test]
    fn rescheduling_replaces_the_pending_payload() {
        let mut timer = Timer::new();
        assert_eq!(timer.schedule(ms(300), 1), None);
        assert_eq!(timer.schedule(ms(500), 2), Some(1));
        assert_eq!(timer.deadline(), Some(ms(500)));
        assert_eq!(timer.fire(ms(400)), None);
        assert_eq!(timer.fire(ms(500)), Some((ms(500), 2)));
    }

    #[test]
    fn cancel_clears_the_slot() {
        let mut timer = Timer::new();
        timer.schedule(ms(10), 'x');
        assert_eq!(timer.cancel(), Some('x'));
        assert_eq!(timer.deadline(), None);
        assert_eq!(timer.fire(ms(10)), None);
    }
}
