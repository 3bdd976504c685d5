//! Repeating tasks for a single-threaded poll loop.
//!
//! The scheduler never sleeps or spawns; callers pass the current `Instant`
//! and receive the tasks that are due. The `watch` loop sleeps until
//! [`Scheduler::next_deadline`]; tests step time forward explicitly.
//!
//! Firing follows interval-timer semantics: the first run is one interval
//! after registration, and a loop that falls behind runs a task once, not
//! once per missed interval.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Cancellation handle for a scheduled task.
///
/// Dropping the handle does not cancel the task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    /// Stop the task. It will never be reported as due again.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug)]
struct Entry<T> {
    id: u64,
    task: T,
    interval: Duration,
    next_due: Instant,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `task` to fire every `interval`, starting one interval after `now`.
    pub fn every(&mut self, task: T, interval: Duration, now: Instant) -> TaskHandle {
        // A zero interval would make the task due on every call forever.
        let interval = interval.max(Duration::from_millis(1));
        let id = self.next_id;
        self.next_id += 1;

        let cancelled = Rc::new(Cell::new(false));
        self.entries.push(Entry {
            id,
            task,
            interval,
            next_due: now + interval,
            cancelled: Rc::clone(&cancelled),
        });

        TaskHandle { cancelled }
    }

    /// Collect every task due at `now`, earliest deadline first, and
    /// schedule each one's next run.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        self.entries.retain(|e| !e.cancelled.get());

        let mut fired: Vec<(Instant, u64, T)> = Vec::new();
        for entry in &mut self.entries {
            if entry.next_due > now {
                continue;
            }
            fired.push((entry.next_due, entry.id, entry.task.clone()));

            entry.next_due += entry.interval;
            if entry.next_due <= now {
                entry.next_due = now + entry.interval;
            }
        }

        fired.sort_by_key(|(due, id, _)| (*due, *id));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }

    /// Earliest upcoming deadline among live tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .iter()
            .filter(|e| !e.cancelled.get())
            .map(|e| e.next_due)
            .min()
    }
}
