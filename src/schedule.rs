use std::time::{Duration, Instant};

/// Cancellable fixed-cadence repeating tick.
///
/// The scheduler owns no callback; the event loop asks [`poll`](Self::poll)
/// whether a tick is due. While cancelled it never reports a due tick.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arms the scheduler; the first tick is due one interval after `now`.
    /// Already-armed schedulers keep their cadence.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true at most once per interval while armed.
    ///
    /// Missed intervals are dropped rather than replayed in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }
}
