//! Intervals - Recurring callbacks emulated on top of frame ticks
//!
//! The shell only delivers `Frame` events with the time elapsed since the
//! previous frame. `Intervals` turns "call me every N milliseconds" into a
//! per-frame hook: each hook accumulates `dt * 1000` and fires once the
//! accumulator reaches the period.
//!
//! After firing the accumulator goes back to exactly zero. Overshoot is
//! dropped, so a slow frame never causes a burst of catch-up calls: hooks fire
//! at most once per frame and never more often than their period.
//!
//! # Example
//!
//! ```rust
//! use scenekit::Intervals;
//!
//! let mut intervals = Intervals::new();
//! let handle = intervals.start("blink", 500.0);
//!
//! let mut fired = Vec::new();
//! for _ in 0..4 {
//!     intervals.run_frame(0.25, |_, _, task| fired.push(task));
//! }
//! assert_eq!(fired, ["blink", "blink"]);
//!
//! intervals.cancel(handle);
//! assert!(intervals.is_empty());
//! ```

use std::fmt;

/// Identifies a registered interval.
///
/// Returned by [`Intervals::start`] and consumed by [`Intervals::cancel`].
/// Handles are never reused within one `Intervals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug)]
struct Hook<T> {
    handle: TimerHandle,
    period_ms: f64,
    elapsed_ms: f64,
    task: T,
}

/// Registry of interval hooks, run once per frame in registration order.
///
/// `T` is the task token handed back to the dispatcher when a hook fires.
/// Scenes usually use a small `Copy` enum naming what should happen.
#[derive(Debug)]
pub struct Intervals<T> {
    next_id: u64,
    hooks: Vec<Hook<T>>,
}

impl<T> Default for Intervals<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            hooks: Vec::new(),
        }
    }
}

impl<T: Clone> Intervals<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook that fires `task` every `period_ms` milliseconds.
    ///
    /// A hook registered while a frame is being dispatched starts
    /// accumulating on the next frame.
    pub fn start(&mut self, task: T, period_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.hooks.push(Hook {
            handle,
            period_ms,
            elapsed_ms: 0.0,
            task,
        });
        log::debug!("{} started with period {}ms", handle, period_ms);
        handle
    }

    /// Deregister a hook. Returns `false` if it was not active.
    ///
    /// Cancelling twice, or cancelling an unknown handle, does nothing.
    /// Once this returns the hook never fires again, not even later in the
    /// frame currently being dispatched.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|hook| hook.handle != handle);
        let removed = self.hooks.len() != before;
        if removed {
            log::debug!("{} cancelled", handle);
        }
        removed
    }

    /// Remove every hook.
    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.hooks.iter().any(|hook| hook.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Milliseconds accumulated by a hook since it last fired.
    pub fn elapsed_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.hooks
            .iter()
            .find(|hook| hook.handle == handle)
            .map(|hook| hook.elapsed_ms)
    }

    /// Advance every hook by `dt_secs` and dispatch the ones that are due.
    ///
    /// `fire` receives the registry itself so a firing task can cancel its
    /// own hook, cancel others, or start new ones.
    pub fn run_frame<F>(&mut self, dt_secs: f64, mut fire: F)
    where
        F: FnMut(&mut Self, TimerHandle, T),
    {
        let delta_ms = dt_secs * 1000.0;
        let scheduled: Vec<TimerHandle> = self.hooks.iter().map(|hook| hook.handle).collect();

        for handle in scheduled {
            // Cancelled by an earlier hook in this frame
            let Some(hook) = self.hooks.iter_mut().find(|hook| hook.handle == handle) else {
                continue;
            };

            hook.elapsed_ms += delta_ms;
            if hook.elapsed_ms >= hook.period_ms {
                hook.elapsed_ms = 0.0;
                let task = hook.task.clone();
                fire(self, handle, task);
            }
        }
    }
}
