//! Single-threaded delayed tasks and debouncing.
//!
//! Nothing here runs on its own: the event loop asks for the next deadline, sleeps until then (or
//! until input arrives), and collects whatever is due. Time is the caller's `Duration` since the
//! session started, which keeps every decision deterministic under test.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle for cancelling a scheduled task.
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

#[derive(Debug)]
/// Queue of cancellable delayed tasks.
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to fire `delay` after `now`.
    pub fn schedule(&mut self, task: T, delay: Duration, now: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: now.saturating_add(delay),
            task,
        });
        id
    }

    /// Drops a pending task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Removes and returns every task due at `now`, earliest deadline first.
    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| p.task).collect()
    }

    #[must_use]
    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    #[must_use]
    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[derive(Debug)]
/// Coalesces bursts of triggers into one run carrying the last payload.
///
/// Each trigger cancels the pending run and reschedules it `delay` later, so a run only happens
/// once triggers have been quiet for the full delay.
pub struct Debouncer<T> {
    delay: Duration,
    scheduler: Scheduler<T>,
    pending: Option<TimerId>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// A debouncer that waits `delay` after the last trigger.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduler: Scheduler::new(),
            pending: None,
        }
    }

    #[must_use]
    /// Quiet period required before a run.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a trigger, superseding any pending run.
    pub fn trigger(&mut self, payload: T, now: Duration) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.pending = Some(self.scheduler.schedule(payload, self.delay, now));
    }

    /// Returns the payload of the pending run once it is due.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let fired = self.scheduler.take_due(now).pop();
        if fired.is_some() {
            self.pending = None;
        }
        fired
    }

    /// Drops the pending run, if any.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    #[must_use]
    /// Deadline of the pending run.
    pub fn deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    /// Whether a run is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "tests/scheduler.rs"]
mod tests;
