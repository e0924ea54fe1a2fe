//! Single-threaded cooperative scheduler.
//!
//! Two kinds of pending work: next-tick tasks (FIFO, run after the current
//! event handler's synchronous section, before any later event) and keyed
//! debounce timers over a logical millisecond clock (a new timer with the
//! same key replaces the pending one, so only the latest survives). Nothing
//! here touches OS timers or threads; the owner advances the clock
//! explicitly, which keeps every interleaving deterministic and testable.

use std::collections::VecDeque;

use crate::core::Slot;

/// Deferred work item. Field ids stay strings because that is the contract
/// with external callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Focus bookkeeping plus commit of the previously focused field.
    FocusGained(String),
    /// Focus bookkeeping plus commit of the field itself.
    FocusLost(String),
    /// Recompute one slot's suggestion list.
    Search(Slot),
    /// Recompute the converted result from the committed tuple.
    Recompute,
}

/// Identity of a debounce timer; scheduling on an occupied key cancels the
/// pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKey {
    Search(Slot),
    Convert,
}

#[derive(Debug)]
struct Timer {
    key: TimerKey,
    deadline: u64,
    action: Action,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    queue: VecDeque<Action>,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now
    }

    /// Enqueue a next-tick task. FIFO order is the ordering guarantee the
    /// validation engine relies on.
    pub fn defer(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Schedule `action` to fire `delay_ms` from now, replacing any pending
    /// timer with the same key.
    pub fn debounce(&mut self, key: TimerKey, delay_ms: u64, action: Action) {
        self.timers.retain(|t| t.key != key);
        self.timers.push(Timer {
            key,
            deadline: self.now + delay_ms,
            action,
        });
    }

    pub fn cancel(&mut self, key: TimerKey) {
        self.timers.retain(|t| t.key != key);
    }

    /// Advance the logical clock, promoting due timers into the task queue
    /// in deadline order.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
        let now = self.now;

        let (mut due, keep): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = keep;

        due.sort_by_key(|t| t.deadline);
        for timer in due {
            self.queue.push_back(timer.action);
        }
    }

    pub fn pop(&mut self) -> Option<Action> {
        self.queue.pop_front()
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.timers.is_empty()
    }
}
