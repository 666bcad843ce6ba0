//! Timer-based input coalescer.
//!
//! # Design
//! - Hold one pending value and the deadline at which it settles.
//! - Take time as a monotonic `Duration` supplied by the host so the same code
//!   runs under a browser timer and a native clock.
//! - Never own a callback; hosts poll and forward the settled value.

use std::time::Duration;

/// Default quiet period for free-text search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces bursts of values into the last one once input goes quiet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    deadline: Duration,
}

impl<T> Debouncer<T> {
    /// Create a coalescer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period applied after each push.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet period from `now`.
    pub fn push(&mut self, value: T, now: Duration) {
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.delay),
        });
    }

    /// Instant at which the pending value settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Whether a value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Return the pending value once `now` reaches its deadline.
    ///
    /// A poll landing exactly on the deadline settles the value.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Settle the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value without settling it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_settles_once_with_last_value() {
        let mut debouncer = Debouncer::new(ms(500));
        debouncer.push("n", ms(0));
        debouncer.push("na", ms(120));
        assert_eq!(debouncer.poll(ms(400)), None);
        debouncer.push("nar", ms(499));
        assert_eq!(debouncer.poll(ms(900)), None);
        assert_eq!(debouncer.poll(ms(999)), Some("nar"));
        assert_eq!(debouncer.poll(ms(2_000)), None);
    }

    #[test]
    fn poll_at_exact_deadline_settles() {
        let mut debouncer = Debouncer::new(ms(500));
        debouncer.push(1, ms(10));
        assert_eq!(debouncer.deadline(), Some(ms(510)));
        assert_eq!(debouncer.poll(ms(509)), None);
        assert_eq!(debouncer.poll(ms(510)), Some(1));
    }

    #[test]
    fn cancel_and_flush() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.delay(), DEFAULT_DEBOUNCE);
        debouncer.push(1, ms(0));
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(ms(10_000)), None);

        debouncer.push(2, ms(0));
        assert_eq!(debouncer.flush(), Some(2));
        assert_eq!(debouncer.flush(), None);
    }
}
