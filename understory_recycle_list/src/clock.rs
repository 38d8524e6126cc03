// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic time sources for throttled signals.

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic clock reporting seconds.
pub trait Clock {
    /// Current time in seconds. Must never decrease.
    fn now(&self) -> f64;
}

impl<F: Fn() -> f64> Clock for F {
    fn now(&self) -> f64 {
        self()
    }
}

/// A clock advanced by hand, for tests and fixed-step hosts.
///
/// Clones share the same time, so a host can keep one clone while a layout
/// owns another.
///
/// ```rust
/// use understory_recycle_list::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let owned = clock.clone();
/// clock.advance(0.25);
/// assert_eq!(owned.now(), 0.25);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    /// Sets the current time.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Wall clock measured from construction, backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock whose zero is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
