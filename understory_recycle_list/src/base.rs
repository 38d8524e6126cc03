// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State and driver shared by every recycling layout.

use alloc::vec::Drain;
use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};

use crate::options::{ARROW_HINT_EPSILON, LOCK_DISTANCE};
use crate::{
    Axis, Clock, Edge, LayoutContext, LayoutEvent, LayoutOptions, PositionChange, ScrollContainer,
};

/// What started a layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutTrigger {
    /// The scroll container reported a content move.
    Scrolled {
        /// Whether the content moved forward along the main axis.
        forward: bool,
    },
    /// A refresh or configuration change.
    Refreshed,
}

impl LayoutTrigger {
    /// Whether the pass should consider the content as moving forward.
    ///
    /// Refreshes count as forward so that a too-short data set asks for more.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        match self {
            Self::Scrolled { forward } => forward,
            Self::Refreshed => true,
        }
    }
}

/// The steps of one layout pass.
///
/// Each layout variant implements the four steps; [`perform_layout`]
/// runs them in their fixed order. Every step is a no-op while the
/// layout has no adapter or no scroll container.
///
/// [`perform_layout`]: LayoutStrategy::perform_layout
pub trait LayoutStrategy {
    /// Moves views that left the viewport to the pool.
    fn recycle(&mut self);

    /// Attaches views for data that entered the viewport.
    fn fill(&mut self);

    /// Fits the content size and position to the attached views.
    fn adjust_extent(&mut self);

    /// Runs the auto-drag, arrow hint, lock, and load-more checks.
    fn check_ancillary(&mut self, trigger: LayoutTrigger);

    /// Runs recycle, fill, adjust, and the ancillary checks.
    fn perform_layout(&mut self, trigger: LayoutTrigger) {
        self.recycle();
        self.fill();
        self.adjust_extent();
        self.check_ancillary(trigger);
    }
}

/// Public surface shared by every recycling layout.
pub trait RecyclingLayout {
    /// Forwards a content move reported by the scroll container.
    fn on_content_position_changed(&mut self, old: Point, new: Point);

    /// Scrolls back to the start, unlocks, and rebuilds the window.
    fn refresh_all_items(&mut self);

    /// Rebinds the window in place, for example after data changed.
    fn refresh_current_items(&mut self);

    /// Rebinds the item at `index` if it is visible.
    fn refresh_item(&mut self, index: usize);

    /// Pools every visible view, then offers the pool to the adapter.
    fn reclaim_all_items(&mut self);

    /// Empties the pool, destroying the views if `destroy` is set.
    fn clear_pool(&mut self, destroy: bool);

    /// Whether the user has scrolled away from the leading edge.
    fn is_locked(&self) -> bool;

    /// Removes and returns the queued events.
    fn drain_events(&mut self) -> Drain<'_, LayoutEvent>;
}

/// Scroll-facing half of a layout: the container, the clock, and the
/// transition state behind the ancillary events.
pub(crate) struct LayoutCore<S, C> {
    pub(crate) scroll: Option<S>,
    pub(crate) clock: C,
    pub(crate) axis: Axis,
    pub(crate) options: LayoutOptions,
    locked: bool,
    last_load_more: Option<f64>,
    arrows: [Option<bool>; 2],
    events: Vec<LayoutEvent>,
}

impl<S: ScrollContainer, C: Clock> LayoutCore<S, C> {
    pub(crate) fn new(axis: Axis, options: LayoutOptions, clock: C) -> Self {
        Self {
            scroll: None,
            clock,
            axis,
            options,
            locked: false,
            last_load_more: None,
            arrows: [None; 2],
            events: Vec::new(),
        }
    }

    pub(crate) fn has_scroll(&self) -> bool {
        self.scroll.is_some()
    }

    pub(crate) fn context(&self, first_position: usize, visible_len: usize) -> LayoutContext {
        LayoutContext {
            axis: self.axis,
            viewport: self.viewport_size(),
            first_position,
            visible_len,
        }
    }

    /// Scroll offset along the main axis.
    pub(crate) fn offset(&self) -> f64 {
        self.scroll
            .as_ref()
            .map_or(0.0, |s| self.axis.main_of(s.content_position()))
    }

    pub(crate) fn viewport_size(&self) -> Size {
        self.scroll.as_ref().map_or(Size::ZERO, S::viewport_size)
    }

    pub(crate) fn viewport_len(&self) -> f64 {
        self.axis.main(self.viewport_size())
    }

    pub(crate) fn viewport_cross(&self) -> f64 {
        self.axis.cross(self.viewport_size())
    }

    pub(crate) fn content_len(&self) -> f64 {
        self.scroll
            .as_ref()
            .map_or(0.0, |s| self.axis.main(s.content_size()))
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.scroll.as_ref().is_some_and(S::is_dragging)
    }

    /// Not dragged and not moving.
    pub(crate) fn is_at_rest(&self) -> bool {
        self.scroll
            .as_ref()
            .is_none_or(|s| !s.is_dragging() && s.velocity() == Vec2::ZERO)
    }

    /// Logs and returns `false` if the container scrolls on another axis.
    pub(crate) fn accepts_axis(&self) -> bool {
        let Some(scroll) = self.scroll.as_ref() else {
            return false;
        };
        if scroll.scroll_axis() == Some(self.axis) {
            return true;
        }
        log::error!(
            "{:?} layout needs a container scrolling only on that axis, got {:?}",
            self.axis,
            scroll.scroll_axis()
        );
        false
    }

    /// Moves the content, shifting the gesture anchors by the same delta.
    ///
    /// Velocity is inverted when the move crosses the origin from an
    /// overscroll while the content is still heading forward.
    pub(crate) fn set_offset(&mut self, offset: f64) {
        let axis = self.axis;
        let Some(scroll) = self.scroll.as_mut() else {
            return;
        };
        let old = scroll.content_position();
        let new = axis.with_main(old, offset);
        let delta = old - new;
        scroll.set_content_position(new);
        scroll.set_drag_start_anchor(scroll.drag_start_anchor() - delta);
        scroll.set_previous_position(scroll.previous_position() - delta);
        let old_offset = axis.main_of(old);
        if old_offset < 0.0 && offset > 0.0 && axis.main_of_vec(scroll.velocity()) > 0.0 {
            scroll.invert_velocity();
        }
    }

    /// Resizes the content along the main axis; the cross size follows the
    /// viewport.
    ///
    /// Velocity is inverted when the growth swallows an overscroll past the
    /// trailing edge while the content is still heading backward.
    pub(crate) fn set_content_len(&mut self, len: f64) {
        let axis = self.axis;
        let Some(scroll) = self.scroll.as_mut() else {
            return;
        };
        let viewport = scroll.viewport_size();
        let bottom = axis.main_of(scroll.content_position()) + axis.main(viewport);
        let previous = axis.main(scroll.content_size());
        if bottom > previous && bottom < len && axis.main_of_vec(scroll.velocity()) < 0.0 {
            scroll.invert_velocity();
        }
        scroll.set_content_size(axis.size(len, axis.cross(viewport)));
    }

    pub(crate) fn stop_movement(&mut self) {
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.stop_movement();
        }
    }

    pub(crate) fn stop_animation(&mut self, snap_to_target: bool) {
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.stop_animation(snap_to_target);
        }
    }

    /// Asks the container to move to `offset`; returns the move if it was immediate.
    pub(crate) fn start_animation(
        &mut self,
        offset: f64,
        reset_origin: bool,
        animate: bool,
    ) -> Option<PositionChange> {
        let axis = self.axis;
        let scroll = self.scroll.as_mut()?;
        let old = scroll.content_position();
        scroll.start_animation(axis.with_main(old, offset), reset_origin, animate);
        let new = scroll.content_position();
        (old != new).then_some(PositionChange { old, new })
    }

    pub(crate) const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Records a lock state, queueing an event on change. Returns whether it changed.
    pub(crate) fn set_locked(&mut self, locked: bool) -> bool {
        if !self.options.lock_events || self.locked == locked {
            return false;
        }
        self.locked = locked;
        self.events.push(LayoutEvent::LockStateChanged(locked));
        true
    }

    /// Locks past the lock distance; unlocks near the leading edge once the
    /// drag ended. Returns `true` when this call unlocked.
    pub(crate) fn update_lock(&mut self, scrollable: bool) -> bool {
        if !self.options.lock_events || !scrollable {
            return false;
        }
        let offset = self.offset();
        if self.locked && !self.is_dragging() && offset <= LOCK_DISTANCE {
            return self.set_locked(false);
        }
        if offset > LOCK_DISTANCE {
            self.set_locked(true);
        }
        false
    }

    pub(crate) fn update_drag(&mut self, scrollable: bool) {
        let enabled = !self.options.auto_drag || scrollable;
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.set_drag_enabled(enabled);
        }
    }

    pub(crate) fn update_arrows(&mut self) {
        if !self.options.arrow_hints || !self.has_scroll() {
            return;
        }
        let offset = self.offset();
        let leading = offset >= ARROW_HINT_EPSILON;
        let trailing = self.content_len() - ARROW_HINT_EPSILON > offset + self.viewport_len();
        self.push_arrow(Edge::Leading, leading);
        self.push_arrow(Edge::Trailing, trailing);
    }

    fn push_arrow(&mut self, edge: Edge, visible: bool) {
        let slot = match edge {
            Edge::Leading => &mut self.arrows[0],
            Edge::Trailing => &mut self.arrows[1],
        };
        if *slot != Some(visible) {
            *slot = Some(visible);
            self.events.push(LayoutEvent::ArrowHint { edge, visible });
        }
    }

    /// Signals load-more when moving forward past the content end, at most
    /// once per cooldown.
    pub(crate) fn update_load_more(&mut self, forward: bool) {
        if !self.options.load_more_events || !forward || !self.has_scroll() {
            return;
        }
        if self.content_len() >= self.offset() + self.viewport_len() {
            return;
        }
        let now = self.clock.now();
        if let Some(last) = self.last_load_more
            && now - last < self.options.load_more_cooldown
        {
            return;
        }
        self.last_load_more = Some(now);
        self.events.push(LayoutEvent::LoadMore);
    }

    pub(crate) fn push_event(&mut self, event: LayoutEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Drain<'_, LayoutEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, ScrollState};

    fn core(options: LayoutOptions) -> (LayoutCore<ScrollState, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut core = LayoutCore::new(Axis::Vertical, options, clock.clone());
        let mut scroll = ScrollState::new(Axis::Vertical, Size::new(100.0, 200.0));
        scroll.set_content_size(Size::new(100.0, 1000.0));
        core.scroll = Some(scroll);
        (core, clock)
    }

    fn scroll(core: &mut LayoutCore<ScrollState, ManualClock>) -> &mut ScrollState {
        core.scroll.as_mut().unwrap()
    }

    #[test]
    fn set_offset_shifts_the_gesture_anchors() {
        let (mut core, _) = core(LayoutOptions::default());
        let state = scroll(&mut core);
        state.scroll_to(Point::new(0.0, 50.0));
        state.begin_drag();
        state.set_previous_position(Point::new(0.0, 45.0));

        core.set_offset(80.0);
        let state = scroll(&mut core);
        assert_eq!(state.content_position(), Point::new(0.0, 80.0));
        assert_eq!(state.drag_start_anchor(), Point::new(0.0, 80.0));
        assert_eq!(state.previous_position(), Point::new(0.0, 75.0));
    }

    #[test]
    fn crossing_the_origin_inverts_forward_velocity() {
        let (mut core, _) = core(LayoutOptions::default());
        let state = scroll(&mut core);
        state.scroll_to(Point::new(0.0, -10.0));
        state.set_velocity(Vec2::new(0.0, 30.0));
        core.set_offset(5.0);
        assert_eq!(scroll(&mut core).velocity(), Vec2::new(0.0, -30.0));

        // Moving without crossing keeps it.
        core.set_offset(8.0);
        assert_eq!(scroll(&mut core).velocity(), Vec2::new(0.0, -30.0));
    }

    #[test]
    fn growing_under_a_trailing_overscroll_inverts_backward_velocity() {
        let (mut core, _) = core(LayoutOptions::default());
        let state = scroll(&mut core);
        // Viewport bottom at 1050, past the 1000 long content.
        state.scroll_to(Point::new(0.0, 850.0));
        state.set_velocity(Vec2::new(0.0, -20.0));
        core.set_content_len(1200.0);
        let state = scroll(&mut core);
        assert_eq!(state.velocity(), Vec2::new(0.0, 20.0));
        assert_eq!(state.content_size(), Size::new(100.0, 1200.0));
    }

    #[test]
    fn load_more_respects_the_cooldown() {
        let options = LayoutOptions::default().with_load_more_events(true);
        let (mut core, clock) = core(options);
        scroll(&mut core).scroll_to(Point::new(0.0, 900.0));

        core.update_load_more(true);
        core.update_load_more(true);
        clock.advance(0.05);
        core.update_load_more(true);
        assert_eq!(core.drain_events().collect::<Vec<_>>(), [LayoutEvent::LoadMore]);

        clock.advance(0.06);
        core.update_load_more(false);
        assert_eq!(core.drain_events().count(), 0, "backward moves never load more");
        core.update_load_more(true);
        assert_eq!(core.drain_events().collect::<Vec<_>>(), [LayoutEvent::LoadMore]);
    }

    #[test]
    fn arrow_hints_fire_on_transitions_only() {
        let options = LayoutOptions::default().with_arrow_hints(true);
        let (mut core, _) = core(options);
        core.update_arrows();
        core.update_arrows();
        assert_eq!(
            core.drain_events().collect::<Vec<_>>(),
            [
                LayoutEvent::ArrowHint {
                    edge: Edge::Leading,
                    visible: false
                },
                LayoutEvent::ArrowHint {
                    edge: Edge::Trailing,
                    visible: true
                },
            ]
        );

        // Settling noise below the epsilon keeps the leading hint hidden.
        scroll(&mut core).scroll_to(Point::new(0.0, 0.1));
        core.update_arrows();
        assert_eq!(core.drain_events().count(), 0, "no transition");

        scroll(&mut core).scroll_to(Point::new(0.0, 800.0));
        core.update_arrows();
        assert_eq!(
            core.drain_events().collect::<Vec<_>>(),
            [
                LayoutEvent::ArrowHint {
                    edge: Edge::Leading,
                    visible: true
                },
                LayoutEvent::ArrowHint {
                    edge: Edge::Trailing,
                    visible: false
                },
            ]
        );
    }

    #[test]
    fn lock_follows_the_distance_from_the_leading_edge() {
        let options = LayoutOptions::default().with_lock_events(true);
        let (mut core, _) = core(options);
        scroll(&mut core).scroll_to(Point::new(0.0, 0.1));
        assert!(!core.update_lock(true), "no unlock transition");
        assert!(!core.is_locked(), "within the lock distance");

        scroll(&mut core).scroll_to(Point::new(0.0, 40.0));
        core.update_lock(true);
        assert!(core.is_locked(), "scrolled away");

        // Still dragging near the edge keeps the lock.
        let state = scroll(&mut core);
        state.begin_drag();
        state.drag_by(Vec2::new(0.0, -40.0));
        assert!(!core.update_lock(true), "dragging keeps the lock");
        scroll(&mut core).end_drag();
        assert!(core.update_lock(true), "released near the edge unlocks");
        assert_eq!(
            core.drain_events().collect::<Vec<_>>(),
            [
                LayoutEvent::LockStateChanged(true),
                LayoutEvent::LockStateChanged(false)
            ]
        );
    }

    #[test]
    fn auto_drag_disables_input_for_short_content() {
        let (mut core, _) = core(LayoutOptions::default());
        core.update_drag(false);
        assert!(!scroll(&mut core).is_drag_enabled(), "content fits");
        core.update_drag(true);
        assert!(scroll(&mut core).is_drag_enabled(), "content scrolls");

        core.options.auto_drag = false;
        core.update_drag(false);
        assert!(scroll(&mut core).is_drag_enabled(), "auto drag is off");
    }
}
