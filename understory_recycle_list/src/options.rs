// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Offset past an edge within which arrow hints stay hidden.
pub const ARROW_HINT_EPSILON: f64 = 0.13;

/// Distance from the leading edge beyond which a layout locks.
pub const LOCK_DISTANCE: f64 = 0.12;

/// Content must exceed the viewport by more than this to be draggable.
pub const AUTO_DRAG_SLACK: f64 = 0.2;

/// Bias added before snapping an offset to a page index.
pub const PAGE_SNAP_BIAS: f64 = 0.2;

/// Tolerance when deciding whether the viewport sits at the content end.
pub const SETTLE_EPSILON: f64 = 0.2;

/// Default minimum interval between load-more signals, in seconds.
pub const DEFAULT_LOAD_MORE_COOLDOWN: f64 = 0.1;

/// Switches for the ancillary checks run after every layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Disable dragging while all content fits in the viewport.
    pub auto_drag: bool,
    /// Emit [`LockStateChanged`](crate::LayoutEvent::LockStateChanged).
    pub lock_events: bool,
    /// Emit [`LoadMore`](crate::LayoutEvent::LoadMore).
    pub load_more_events: bool,
    /// Minimum interval between two load-more signals, in seconds.
    pub load_more_cooldown: f64,
    /// Emit [`ArrowHint`](crate::LayoutEvent::ArrowHint).
    pub arrow_hints: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            auto_drag: true,
            lock_events: false,
            load_more_events: false,
            load_more_cooldown: DEFAULT_LOAD_MORE_COOLDOWN,
            arrow_hints: false,
        }
    }
}

impl LayoutOptions {
    /// Returns a copy with `auto_drag` set.
    #[must_use]
    pub const fn with_auto_drag(mut self, enabled: bool) -> Self {
        self.auto_drag = enabled;
        self
    }

    /// Returns a copy with `lock_events` set.
    #[must_use]
    pub const fn with_lock_events(mut self, enabled: bool) -> Self {
        self.lock_events = enabled;
        self
    }

    /// Returns a copy with `load_more_events` set.
    #[must_use]
    pub const fn with_load_more_events(mut self, enabled: bool) -> Self {
        self.load_more_events = enabled;
        self
    }

    /// Returns a copy with the load-more cooldown set.
    #[must_use]
    pub const fn with_load_more_cooldown(mut self, seconds: f64) -> Self {
        self.load_more_cooldown = seconds;
        self
    }

    /// Returns a copy with `arrow_hints` set.
    #[must_use]
    pub const fn with_arrow_hints(mut self, enabled: bool) -> Self {
        self.arrow_hints = enabled;
        self
    }
}
