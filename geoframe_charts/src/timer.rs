// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Periodic timers.
//!
//! Charts never own a clock. The host supplies a [`Scheduler`]; a chart holds each interval it
//! starts through a [`TimerGuard`], which cancels the interval when dropped.

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Identifies one periodic timer of a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Callback invoked on every period with the id of the timer that fired.
pub type TimerCallback = Box<dyn FnMut(TimerId)>;

/// Host-provided periodic timers.
///
/// Callbacks run on the host's (single) thread. A cancelled timer must not fire again.
pub trait Scheduler {
    /// Starts calling `callback` every `period_ms` milliseconds.
    fn start_interval(&self, period_ms: u32, callback: TimerCallback) -> TimerId;

    /// Cancels a timer. Cancelling an unknown or already-cancelled timer does nothing.
    fn cancel(&self, id: TimerId);
}

/// Owns a running interval and cancels it on drop.
pub struct TimerGuard {
    id: TimerId,
    period_ms: u32,
    scheduler: Rc<dyn Scheduler>,
}

impl fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGuard")
            .field("id", &self.id)
            .field("period_ms", &self.period_ms)
            .finish_non_exhaustive()
    }
}

impl TimerGuard {
    /// Starts an interval on `scheduler`.
    pub fn start(scheduler: &Rc<dyn Scheduler>, period_ms: u32, callback: TimerCallback) -> Self {
        let id = scheduler.start_interval(period_ms, callback);
        log::debug!("timer {id:?} started, period {period_ms} ms");
        Self {
            id,
            period_ms,
            scheduler: Rc::clone(scheduler),
        }
    }

    /// The id the scheduler assigned.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// The period in milliseconds.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        log::debug!("timer {:?} cancelled", self.id);
        self.scheduler.cancel(self.id);
    }
}

struct ManualTimer {
    id: TimerId,
    period_ms: u64,
    next_due_ms: u64,
    // Taken out while the callback runs so it may call back into the scheduler.
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

/// A scheduler driven by explicit calls to [`ManualScheduler::advance`].
///
/// Used by tests and headless hosts. Timers fire in due-time order (ties by start order), once
/// per elapsed period.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now_ms", &state.now_ms)
            .field("active", &state.timers.len())
            .finish()
    }
}

impl ManualScheduler {
    /// Creates a scheduler at time zero with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of timers that have not been cancelled.
    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Moves time forward by `dt_ms`, firing every callback that comes due.
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, dt_ms: u64) -> usize {
        let target = self.now_ms().saturating_add(dt_ms);
        let mut fired = 0;
        loop {
            let (id, callback) = {
                let mut state = self.state.borrow_mut();
                let Some(timer) = state
                    .timers
                    .iter_mut()
                    .filter(|t| t.next_due_ms <= target)
                    .min_by_key(|t| (t.next_due_ms, t.id))
                else {
                    break;
                };
                let due = timer.next_due_ms;
                timer.next_due_ms = due.saturating_add(timer.period_ms);
                let id = timer.id;
                let callback = timer.callback.take();
                state.now_ms = due;
                (id, callback)
            };
            let Some(mut callback) = callback else {
                continue;
            };
            callback(id);
            fired += 1;
            let mut state = self.state.borrow_mut();
            if let Some(timer) = state.timers.iter_mut().find(|t| t.id == id) {
                timer.callback = Some(callback);
            }
        }
        self.state.borrow_mut().now_ms = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn start_interval(&self, period_ms: u32, callback: TimerCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let period_ms = u64::from(period_ms.max(1));
        let next_due_ms = state.now_ms + period_ms;
        state.timers.push(ManualTimer {
            id,
            period_ms,
            next_due_ms,
            callback: Some(callback),
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.state.borrow_mut().timers.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use core::cell::Cell;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, TimerCallback) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, Box::new(move |_| c.set(c.get() + 1)))
    }

    #[test]
    fn fires_once_per_elapsed_period() {
        let s = ManualScheduler::new();
        let (count, cb) = counter();
        s.start_interval(100, cb);
        assert_eq!(s.advance(99), 0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.advance(350), 3);
        assert_eq!(count.get(), 4);
        assert_eq!(s.now_ms(), 450);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let s = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for period in [30, 20] {
            let log = Rc::clone(&log);
            s.start_interval(period, Box::new(move |id| log.borrow_mut().push(id.0)));
        }
        s.advance(60);
        // t=20 (#1), t=30 (#0), t=40 (#1), t=60 (#0 then #1 by id).
        assert_eq!(*log.borrow(), vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn guard_cancels_on_drop() {
        let s = Rc::new(ManualScheduler::new());
        let dyn_s: Rc<dyn Scheduler> = s.clone();
        let (count, cb) = counter();
        let guard = TimerGuard::start(&dyn_s, 10, cb);
        assert_eq!(s.active_timers(), 1);
        s.advance(10);
        drop(guard);
        assert_eq!(s.active_timers(), 0);
        s.advance(100);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn callbacks_may_cancel_themselves() {
        let s = Rc::new(ManualScheduler::new());
        let s2 = Rc::clone(&s);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        s.start_interval(
            5,
            Box::new(move |id| {
                c.set(c.get() + 1);
                s2.cancel(id);
            }),
        );
        assert_eq!(s.advance(50), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(s.active_timers(), 0);
    }
}
