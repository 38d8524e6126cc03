// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll container boundary and a headless implementation of it.
//!
//! Positions exchanged with a [`ScrollContainer`] live in offset space: the
//! main-axis coordinate is the distance the content has been scrolled
//! forward, so it grows when content moves up (vertical) or left
//! (horizontal). Velocity uses the same sign convention.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Size, Vec2};

use crate::{AccelerateDecelerate, Axis, Interpolator};

/// Default duration of a scroll-to animation, in seconds.
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.5;

/// A content move reported by a scroll container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionChange {
    /// Position before the move.
    pub old: Point,
    /// Position after the move.
    pub new: Point,
}

/// Scroll state a layout reads and conditionally rewrites.
///
/// Implemented by the host's scroll widget. A layout never subscribes to the
/// container; the host forwards every content move to
/// [`RecyclingLayout::on_content_position_changed`](crate::RecyclingLayout::on_content_position_changed).
/// Writes made by the layout itself must not be reported back.
pub trait ScrollContainer {
    /// Size of the scrollable content.
    fn content_size(&self) -> Size;

    /// Resizes the content.
    fn set_content_size(&mut self, size: Size);

    /// Size of the visible clipping region.
    fn viewport_size(&self) -> Size;

    /// Current content position in offset space.
    fn content_position(&self) -> Point;

    /// Moves the content without reporting a position change.
    fn set_content_position(&mut self, position: Point);

    /// Content position captured when the current drag started.
    fn drag_start_anchor(&self) -> Point;

    /// Rewrites the drag start anchor.
    fn set_drag_start_anchor(&mut self, anchor: Point);

    /// Content position of the previous frame, used to derive velocity.
    fn previous_position(&self) -> Point;

    /// Rewrites the previous-frame position.
    fn set_previous_position(&mut self, position: Point);

    /// Current scroll velocity in offset space.
    fn velocity(&self) -> Vec2;

    /// Negates the velocity.
    fn invert_velocity(&mut self);

    /// Whether a drag gesture is in progress.
    fn is_dragging(&self) -> bool;

    /// The single axis the container scrolls on, or `None` when it scrolls
    /// on both axes or on neither.
    fn scroll_axis(&self) -> Option<Axis>;

    /// Enables or disables drag input.
    fn set_drag_enabled(&mut self, enabled: bool);

    /// Cancels any inertial movement.
    fn stop_movement(&mut self);

    /// Stops a running scroll-to animation, snapping to its target if requested.
    fn stop_animation(&mut self, snap_to_target: bool);

    /// Moves the content toward `target`.
    ///
    /// With `animate` unset the move is immediate. Otherwise the content
    /// first jumps to the origin if `reset_origin` is set, then animates.
    fn start_animation(&mut self, target: Point, reset_origin: bool, animate: bool);
}

#[derive(Copy, Clone, Debug)]
struct Animation {
    start: Point,
    end: Point,
    elapsed: f64,
}

/// Headless [`ScrollContainer`] driven by explicit calls.
///
/// It keeps the state a layout needs (content and viewport sizes, a position,
/// drag anchors, velocity) and runs scroll-to animations stepped by
/// [`advance`](Self::advance). It has no physics: inertia and elasticity are
/// left to the host, which feeds positions through
/// [`scroll_to`](Self::scroll_to) or [`drag_by`](Self::drag_by).
///
/// Every host-driven method returns the [`PositionChange`] to forward to the
/// layout.
pub struct ScrollState {
    axis: Option<Axis>,
    viewport: Size,
    content: Size,
    position: Point,
    velocity: Vec2,
    dragging: bool,
    drag_enabled: bool,
    drag_start_anchor: Point,
    previous_position: Point,
    animation: Option<Animation>,
    animation_duration: f64,
    interpolator: Box<dyn Interpolator>,
}

impl fmt::Debug for ScrollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollState")
            .field("axis", &self.axis)
            .field("viewport", &self.viewport)
            .field("content", &self.content)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("dragging", &self.dragging)
            .field("drag_enabled", &self.drag_enabled)
            .field("animating", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}

impl ScrollState {
    /// Creates a container scrolling along `axis` with the given viewport.
    #[must_use]
    pub fn new(axis: Axis, viewport: Size) -> Self {
        Self {
            axis: Some(axis),
            viewport,
            content: viewport,
            position: Point::ORIGIN,
            velocity: Vec2::ZERO,
            dragging: false,
            drag_enabled: true,
            drag_start_anchor: Point::ORIGIN,
            previous_position: Point::ORIGIN,
            animation: None,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            interpolator: Box::new(AccelerateDecelerate),
        }
    }

    /// Creates a container that scrolls freely on both axes.
    #[must_use]
    pub fn free(viewport: Size) -> Self {
        Self {
            axis: None,
            ..Self::new(Axis::Vertical, viewport)
        }
    }

    /// Replaces the viewport size.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Replaces the easing used by scroll-to animations.
    pub fn set_interpolator(&mut self, interpolator: Box<dyn Interpolator>) {
        self.interpolator = interpolator;
    }

    /// Duration of scroll-to animations, in seconds.
    #[must_use]
    pub const fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    /// Sets the duration of scroll-to animations.
    pub fn set_animation_duration(&mut self, seconds: f64) {
        self.animation_duration = seconds.max(0.0);
    }

    /// Whether a scroll-to animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether drag input is accepted.
    #[must_use]
    pub const fn is_drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    /// Sets the velocity reported to the layout.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Moves the content to `position` as a user or inertia step would.
    pub fn scroll_to(&mut self, position: Point) -> Option<PositionChange> {
        let position = self.restrict(position);
        self.move_to(position)
    }

    /// Starts a drag gesture at the current position.
    ///
    /// Returns `false` when drag input is disabled.
    pub fn begin_drag(&mut self) -> bool {
        if !self.drag_enabled {
            return false;
        }
        self.animation = None;
        self.dragging = true;
        self.velocity = Vec2::ZERO;
        self.drag_start_anchor = self.position;
        self.previous_position = self.position;
        true
    }

    /// Moves the content to the drag anchor plus `delta`, the total pointer
    /// travel since [`begin_drag`](Self::begin_drag) in offset space.
    pub fn drag_by(&mut self, delta: Vec2) -> Option<PositionChange> {
        if !self.dragging {
            return None;
        }
        let target = self.restrict(self.drag_start_anchor + delta);
        self.previous_position = self.position;
        self.move_to(target)
    }

    /// Ends the drag gesture. The velocity is left as set by the host.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Steps a running animation by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Option<PositionChange> {
        let mut animation = self.animation?;
        animation.elapsed += dt;
        let target = if animation.elapsed >= self.animation_duration {
            self.animation = None;
            animation.end
        } else {
            self.animation = Some(animation);
            let t = animation.elapsed / self.animation_duration;
            let factor = self.interpolator.interpolate(t);
            animation.start + (animation.end - animation.start) * factor
        };
        let target = self.clamp_animation_position(target);
        self.move_to(target)
    }

    fn move_to(&mut self, position: Point) -> Option<PositionChange> {
        let old = self.position;
        if old == position {
            return None;
        }
        self.position = position;
        Some(PositionChange { old, new: position })
    }

    /// Zeroes movement on axes the container does not scroll on.
    fn restrict(&self, position: Point) -> Point {
        match self.axis {
            Some(Axis::Vertical) => Point::new(self.position.x, position.y),
            Some(Axis::Horizontal) => Point::new(position.x, self.position.y),
            None => position,
        }
    }

    /// Clamps into the scrollable range, ending the animation on contact.
    fn clamp_animation_position(&mut self, position: Point) -> Point {
        let Some(axis) = self.axis else {
            return position;
        };
        let max = (axis.main(self.content) - axis.main(self.viewport)).max(0.0);
        let main = axis.main_of(position);
        if main < 0.0 || main > max {
            self.animation = None;
        }
        axis.with_main(position, main.clamp(0.0, max))
    }
}

impl ScrollContainer for ScrollState {
    fn content_size(&self) -> Size {
        self.content
    }

    fn set_content_size(&mut self, size: Size) {
        self.content = size;
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn content_position(&self) -> Point {
        self.position
    }

    fn set_content_position(&mut self, position: Point) {
        self.position = position;
    }

    fn drag_start_anchor(&self) -> Point {
        self.drag_start_anchor
    }

    fn set_drag_start_anchor(&mut self, anchor: Point) {
        self.drag_start_anchor = anchor;
    }

    fn previous_position(&self) -> Point {
        self.previous_position
    }

    fn set_previous_position(&mut self, position: Point) {
        self.previous_position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn invert_velocity(&mut self) {
        self.velocity = -self.velocity;
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn scroll_axis(&self) -> Option<Axis> {
        self.axis
    }

    fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
        if !enabled {
            self.dragging = false;
        }
    }

    fn stop_movement(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    fn stop_animation(&mut self, snap_to_target: bool) {
        if let Some(animation) = self.animation.take()
            && snap_to_target
        {
            let end = self.clamp_animation_position(animation.end);
            self.position = end;
        }
    }

    fn start_animation(&mut self, target: Point, reset_origin: bool, animate: bool) {
        let target = self.restrict(target);
        if !animate {
            self.animation = None;
            self.position = target;
            return;
        }
        if reset_origin {
            self.position = self.restrict(Point::ORIGIN);
        }
        self.velocity = Vec2::ZERO;
        self.animation = Some(Animation {
            start: self.position,
            end: target,
            elapsed: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Linear;

    fn vertical() -> ScrollState {
        let mut state = ScrollState::new(Axis::Vertical, Size::new(100.0, 100.0));
        state.set_content_size(Size::new(100.0, 1000.0));
        state
    }

    #[test]
    fn animation_reaches_the_target_and_stops() {
        let mut state = vertical();
        state.set_interpolator(Box::new(Linear));
        state.start_animation(Point::new(0.0, 200.0), false, true);
        assert!(state.is_animating(), "animation should be running");

        let step = state.advance(0.25).unwrap();
        assert_eq!(step.old, Point::ORIGIN);
        assert!((step.new.y - 100.0).abs() < 1e-9, "halfway after half the duration");

        let last = state.advance(0.5).unwrap();
        assert_eq!(last.new, Point::new(0.0, 200.0));
        assert!(!state.is_animating(), "animation should be finished");
        assert_eq!(state.advance(0.1), None);
    }

    #[test]
    fn animation_is_clamped_to_the_scrollable_range() {
        let mut state = vertical();
        state.start_animation(Point::new(0.0, 5000.0), false, true);
        state.advance(1.0);
        assert_eq!(state.content_position().y, 900.0);
    }

    #[test]
    fn immediate_moves_skip_the_animation() {
        let mut state = vertical();
        state.start_animation(Point::new(0.0, 40.0), false, false);
        assert_eq!(state.content_position(), Point::new(0.0, 40.0));
        assert!(!state.is_animating(), "immediate moves do not animate");
    }

    #[test]
    fn reset_origin_jumps_before_animating() {
        let mut state = vertical();
        state.scroll_to(Point::new(0.0, 300.0));
        state.start_animation(Point::new(0.0, 100.0), true, true);
        assert_eq!(state.content_position(), Point::ORIGIN);
        state.stop_animation(true);
        assert_eq!(state.content_position(), Point::new(0.0, 100.0));
    }

    #[test]
    fn drag_tracks_the_anchor() {
        let mut state = vertical();
        assert!(state.begin_drag(), "drag is enabled");
        let change = state.drag_by(Vec2::new(5.0, 30.0)).unwrap();
        // Cross-axis travel is ignored.
        assert_eq!(change.new, Point::new(0.0, 30.0));

        // A layout shifting the anchor keeps the gesture continuous.
        state.set_drag_start_anchor(Point::new(0.0, 10.0));
        let change = state.drag_by(Vec2::new(0.0, 35.0)).unwrap();
        assert_eq!(change.new, Point::new(0.0, 45.0));

        state.set_drag_enabled(false);
        assert!(!state.is_dragging(), "disabling drag ends the gesture");
        assert!(!state.begin_drag(), "drag is disabled");
    }
}
