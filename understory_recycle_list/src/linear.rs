// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured items stacked along one axis.

use alloc::vec::Drain;
use core::fmt;
use core::mem;

use kurbo::{Insets, Point};
use understory_collections::Deque;

use crate::base::{LayoutCore, LayoutStrategy, LayoutTrigger, RecyclingLayout};
use crate::options::{AUTO_DRAG_SLACK, SETTLE_EPSILON};
use crate::{
    Axis, Clock, FlexibleAdapter, ItemView, LayoutContext, LayoutEvent, LayoutOptions, Placement,
    RecycleBin, ScrollContainer, ViewHandle,
};

/// Geometry of a [`LinearLayout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearConfig {
    /// Stacking and scroll axis.
    pub axis: Axis,
    /// Space around the items inside the content.
    pub padding: Insets,
    /// Gap between consecutive items.
    pub divider: f64,
    /// Stretch items across the viewport, minus the cross padding.
    pub expand_cross: bool,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            padding: Insets::ZERO,
            divider: 0.0,
            expand_cross: true,
        }
    }
}

struct Slot<V> {
    handle: ViewHandle<V>,
    offset: f64,
    extent: f64,
}

/// A virtualized list of measured items along one axis.
///
/// Only the items intersecting the viewport have views. The content length
/// is discovered lazily: it grows while the window advances, shrinks to
/// fit once the last item is reached, and the coordinates of earlier items
/// are estimated until they are re-measured. When the first item is laid
/// out the whole stack is shifted so that it sits at the leading padding,
/// and the scroll offset is compensated by the same amount.
///
/// Positions of the window (`first_position` up to `first_position +
/// visible_len`) are always contiguous.
pub struct LinearLayout<A: FlexibleAdapter, S, C> {
    core: LayoutCore<S, C>,
    config: LinearConfig,
    adapter: Option<A>,
    bin: RecycleBin<A::View>,
    window: Deque<Slot<A::View>>,
    first_position: usize,
    // Main-axis offset just above the front item's divider.
    leading: f64,
    // Main-axis offset where the item after the back one would start.
    trailing: f64,
}

impl<A: FlexibleAdapter, S, C> fmt::Debug for LinearLayout<A, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearLayout")
            .field("config", &self.config)
            .field("first_position", &self.first_position)
            .field("visible_len", &self.window.len())
            .field("pooled", &self.bin.len())
            .field("leading", &self.leading)
            .field("trailing", &self.trailing)
            .finish_non_exhaustive()
    }
}

impl<A: FlexibleAdapter, S: ScrollContainer, C: Clock> LinearLayout<A, S, C> {
    /// Creates a layout without adapter or scroll container.
    pub fn new(config: LinearConfig, options: LayoutOptions, clock: C) -> Self {
        let start = config.axis.leading(config.padding);
        Self {
            core: LayoutCore::new(config.axis, options, clock),
            config,
            adapter: None,
            bin: RecycleBin::new(),
            window: Deque::new(),
            first_position: 0,
            leading: start - config.divider,
            trailing: start,
        }
    }

    /// The current geometry.
    pub const fn config(&self) -> &LinearConfig {
        &self.config
    }

    /// The ancillary check switches.
    pub const fn options(&self) -> &LayoutOptions {
        &self.core.options
    }

    /// Replaces the ancillary check switches. They apply from the next pass.
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.core.options = options;
    }

    /// Changes the gap between items and rebinds the window in place.
    pub fn set_divider(&mut self, divider: f64) {
        self.recycle_window();
        self.config.divider = divider;
        self.leading = self.trailing - divider;
        self.refresh_current_items();
    }

    /// Changes the padding and restarts from the leading edge.
    pub fn set_padding(&mut self, padding: Insets) {
        self.config.padding = padding;
        self.refresh_all_items();
    }

    /// Toggles stretching items across the viewport.
    pub fn set_expand_cross(&mut self, expand: bool) {
        self.config.expand_cross = expand;
        self.refresh_current_items();
    }

    /// Installs a new adapter, returning the previous one.
    ///
    /// Visible views are reclaimed through the old adapter first. With
    /// `clear_pool` set, the pool is then emptied and its views destroyed.
    ///
    /// # Panics
    ///
    /// Panics if the new adapter declares zero view types.
    pub fn set_adapter(&mut self, adapter: Option<A>, clear_pool: bool) -> Option<A> {
        self.reclaim_all_items();
        if clear_pool {
            self.bin.clear(true);
        }
        let old = mem::replace(&mut self.adapter, adapter);
        if let Some(adapter) = &self.adapter {
            self.bin.set_view_type_count(adapter.view_type_count());
        }
        self.refresh_all_items();
        old
    }

    /// The installed adapter.
    pub const fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// The installed adapter, mutably. Call a refresh after changing data.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// Installs a new scroll container, returning the previous one.
    pub fn set_scroll_container(&mut self, scroll: Option<S>) -> Option<S> {
        self.recycle_window();
        let old = mem::replace(&mut self.core.scroll, scroll);
        self.refresh_all_items();
        old
    }

    /// The installed scroll container.
    pub const fn scroll_container(&self) -> Option<&S> {
        self.core.scroll.as_ref()
    }

    /// The installed scroll container, mutably.
    ///
    /// Moves made through it must be reported back with
    /// [`on_content_position_changed`](RecyclingLayout::on_content_position_changed).
    pub fn scroll_container_mut(&mut self) -> Option<&mut S> {
        self.core.scroll.as_mut()
    }

    /// The clock used to throttle load-more signals.
    pub const fn clock(&self) -> &C {
        &self.core.clock
    }

    /// Data index of the first visible item.
    pub const fn first_position(&self) -> usize {
        self.first_position
    }

    /// Number of visible items.
    pub fn visible_len(&self) -> usize {
        self.window.len()
    }

    /// Visible items with their data index, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &A::View)> + '_ {
        let first = self.first_position;
        self.window
            .iter()
            .enumerate()
            .map(move |(i, slot)| (first + i, slot.handle.view()))
    }

    /// Main-axis offset and extent of the visible item at `index`.
    pub fn item_span(&self, index: usize) -> Option<(f64, f64)> {
        let slot = self.window.get(index.checked_sub(self.first_position)?)?;
        Some((slot.offset, slot.extent))
    }

    /// The pool of retired views.
    pub const fn pool(&self) -> &RecycleBin<A::View> {
        &self.bin
    }

    /// Content length along the main axis.
    pub fn content_length(&self) -> f64 {
        self.core.content_len()
    }

    /// Moves item `index` into view immediately.
    ///
    /// `factor` places the item within the free viewport space: `0.0` aligns
    /// it with the leading edge, `1.0` with the trailing edge. Out of range
    /// indices are ignored with a warning.
    pub fn scroll_to_item(&mut self, index: usize, factor: f64) {
        if !self.is_ready() {
            return;
        }
        let count = self.count();
        if index >= count {
            log::warn!("linear layout: item {index} is out of range for {count} items");
            return;
        }
        self.core.stop_animation(false);
        self.core.stop_movement();
        self.recycle_window();
        let before = self.core.offset();
        self.first_position = index;
        self.leading = before - self.config.divider;
        self.trailing = before;
        self.perform_layout(LayoutTrigger::Refreshed);

        if let Some((offset, extent)) = self.item_span(index) {
            let free = (self.core.viewport_len() - extent).max(0.0);
            let target = offset - factor.clamp(0.0, 1.0) * free;
            if !approx_eq(target, self.core.offset()) {
                self.core.set_offset(target);
                self.perform_layout(LayoutTrigger::Refreshed);
            }
        }
        self.settle(before);
    }

    fn is_ready(&self) -> bool {
        self.core.has_scroll() && self.adapter.is_some()
    }

    fn count(&self) -> usize {
        self.adapter.as_ref().map_or(0, A::len)
    }

    fn padding_start(&self) -> f64 {
        self.config.axis.leading(self.config.padding)
    }

    fn padding_end(&self) -> f64 {
        self.config.axis.trailing(self.config.padding)
    }

    fn context(&self) -> LayoutContext {
        self.core.context(self.first_position, self.window.len())
    }

    /// Placement at main offset zero; callers move the origin.
    fn placement_template(&self) -> Placement {
        let axis = self.config.axis;
        let placement = Placement::at(axis.point(0.0, axis.cross_leading(self.config.padding)));
        if !self.config.expand_cross {
            return placement;
        }
        let cross = (self.core.viewport_cross() - axis.cross_total(self.config.padding)).max(0.0);
        match axis {
            Axis::Vertical => placement.with_width(cross),
            Axis::Horizontal => placement.with_height(cross),
        }
    }

    /// Takes a compatible view from the pool or creates one, then binds and
    /// measures it.
    fn acquire(&mut self, position: usize) -> Option<(ViewHandle<A::View>, f64)> {
        let cx = self.context();
        let axis = self.config.axis;
        let adapter = self.adapter.as_mut()?;
        let mut handle = match self
            .bin
            .get_scrap_view(position, |p| adapter.view_type_of(p))
        {
            Some(handle) => handle,
            None => ViewHandle::new(adapter.create_view(position, &cx)),
        };
        debug_assert_eq!(
            handle.view_type(),
            adapter.view_type_of(position),
            "view for position {position} has the wrong view type"
        );
        adapter.bind(position, handle.view_mut(), &cx);
        let extent = axis.main(handle.view_mut().measure());
        Some((handle, extent))
    }

    fn attach(&self, mut handle: ViewHandle<A::View>, offset: f64, extent: f64) -> Slot<A::View> {
        let mut placement = self.placement_template();
        placement.origin = self.config.axis.with_main(placement.origin, offset);
        let view = handle.view_mut();
        view.place(placement);
        view.set_visible(true);
        Slot {
            handle,
            offset,
            extent,
        }
    }

    /// Re-derives the edges from the window when it is not empty.
    fn sync_edges(&mut self) {
        let divider = self.config.divider;
        if let Ok(front) = self.window.peek_front() {
            self.leading = front.offset - divider;
        }
        if let Ok(back) = self.window.peek_back() {
            self.trailing = back.offset + back.extent + divider;
        }
    }

    /// Pools the whole window, keeping `first_position`.
    fn recycle_window(&mut self) {
        if let Ok(front) = self.window.peek_front() {
            self.trailing = front.offset;
            self.leading = front.offset - self.config.divider;
        }
        while let Ok(slot) = self.window.pop_back() {
            self.bin.add_scrap_view(slot.handle);
        }
    }

    /// Pools every item from window slot `from` on.
    fn truncate(&mut self, from: usize) {
        while self.window.len() > from {
            let Ok(slot) = self.window.pop_back() else {
                break;
            };
            self.trailing -= slot.extent + self.config.divider;
            self.bin.add_scrap_view(slot.handle);
        }
    }

    fn shift(&mut self, delta: f64) {
        let axis = self.config.axis;
        let template = self.placement_template();
        for slot in &mut self.window {
            slot.offset += delta;
            let mut placement = template;
            placement.origin = axis.with_main(template.origin, slot.offset);
            slot.handle.view_mut().place(placement);
        }
        self.leading += delta;
        self.trailing += delta;
    }

    /// Pulls an overscrolled viewport back into the content once at rest.
    fn settle(&mut self, before: f64) {
        let offset = self.core.offset();
        if !(self.core.is_at_rest() || (before > 0.0 && offset < 0.0)) {
            return;
        }
        let max = (self.core.content_len() - self.core.viewport_len()).max(0.0);
        let clamped = offset.clamp(0.0, max);
        if clamped != offset {
            self.core.set_offset(clamped);
            self.perform_layout(LayoutTrigger::Refreshed);
        }
    }
}

impl<A: FlexibleAdapter, S: ScrollContainer, C: Clock> LayoutStrategy for LinearLayout<A, S, C> {
    fn recycle(&mut self) {
        if !self.core.has_scroll() {
            return;
        }
        let divider = self.config.divider;
        let offset = self.core.offset();
        let bottom = offset + self.core.viewport_len();
        while self
            .window
            .peek_front()
            .is_ok_and(|slot| slot.offset + slot.extent < offset)
        {
            let Ok(slot) = self.window.pop_front() else {
                break;
            };
            self.first_position += 1;
            self.leading += slot.extent + divider;
            self.bin.add_scrap_view(slot.handle);
        }
        while self.window.peek_back().is_ok_and(|slot| slot.offset >= bottom) {
            let Ok(slot) = self.window.pop_back() else {
                break;
            };
            self.trailing -= slot.extent + divider;
            self.bin.add_scrap_view(slot.handle);
        }
    }

    fn fill(&mut self) {
        if !self.is_ready() {
            return;
        }
        let count = self.count();
        let divider = self.config.divider;
        let offset = self.core.offset();
        let viewport = self.core.viewport_len();

        self.sync_edges();
        let mut next = self.first_position + self.window.len();
        while next < count && self.trailing - offset < viewport {
            let Some((handle, extent)) = self.acquire(next) else {
                return;
            };
            self.trailing += extent;
            if self.trailing - offset <= 0.0 {
                // At or above the viewport start after a long jump.
                self.bin.add_scrap_view(handle);
                self.first_position = next + 1;
            } else {
                let slot = self.attach(handle, self.trailing - extent, extent);
                self.window.push_back(slot);
            }
            next += 1;
            self.trailing += divider;
        }
        if self.window.is_empty() {
            self.leading = self.trailing - divider;
        }

        self.sync_edges();
        while self.first_position > 0 && self.leading - offset > 0.0 {
            let position = self.first_position - 1;
            let Some((handle, extent)) = self.acquire(position) else {
                return;
            };
            self.leading -= extent;
            if self.leading - offset > viewport {
                self.bin.add_scrap_view(handle);
            } else {
                let slot = self.attach(handle, self.leading, extent);
                self.window.push_front(slot);
            }
            self.first_position = position;
            self.leading -= divider;
        }
        if self.window.is_empty() {
            self.trailing = self.leading + divider;
        }
        self.sync_edges();
    }

    fn adjust_extent(&mut self) {
        if !self.is_ready() {
            return;
        }
        let count = self.count();
        let divider = self.config.divider;
        let padding_start = self.padding_start();
        let padding_end = self.padding_end();
        if count == 0 {
            self.core.set_content_len(padding_start + padding_end);
            return;
        }

        let at_end = self.first_position + self.window.len() >= count;
        let mut bottom = self.trailing;
        if at_end {
            bottom += padding_end - divider;
        }
        let len = self.core.content_len();
        if bottom > len || (at_end && bottom < len) {
            self.core.set_content_len(bottom);
        }

        let mut top = self.leading;
        if self.first_position == 0 {
            top += divider - padding_start;
        }
        if top < 0.0 || (self.first_position == 0 && top > 0.0) {
            let offset = self.core.offset();
            self.core.set_offset(offset - top);
            let len = self.core.content_len();
            self.core.set_content_len(len - top);
            self.shift(-top);
            self.recycle();
        }
    }

    fn check_ancillary(&mut self, trigger: LayoutTrigger) {
        if !self.is_ready() {
            return;
        }
        let content = self.core.content_len();
        let viewport = self.core.viewport_len();
        let fits = self.first_position == 0
            && self.window.len() >= self.count()
            && content - AUTO_DRAG_SLACK < viewport;
        self.core.update_drag(!fits);
        self.core.update_arrows();
        if self.core.update_lock(content > viewport + AUTO_DRAG_SLACK) {
            self.refresh_all_items();
            return;
        }
        self.core.update_load_more(trigger.is_forward());
    }
}

impl<A: FlexibleAdapter, S: ScrollContainer, C: Clock> RecyclingLayout for LinearLayout<A, S, C> {
    fn on_content_position_changed(&mut self, old: Point, new: Point) {
        if !self.is_ready() || self.count() == 0 || !self.core.accepts_axis() {
            return;
        }
        let axis = self.config.axis;
        let forward = axis.main_of(new) > axis.main_of(old);
        log::trace!(
            "linear layout: offset {} -> {}",
            axis.main_of(old),
            axis.main_of(new)
        );
        self.perform_layout(LayoutTrigger::Scrolled { forward });
    }

    fn refresh_all_items(&mut self) {
        if !self.is_ready() {
            return;
        }
        log::debug!("linear layout: full refresh of {} items", self.count());
        self.recycle_window();
        self.first_position = 0;
        self.trailing = self.padding_start();
        self.leading = self.trailing - self.config.divider;
        self.core.set_offset(0.0);
        self.core.stop_movement();
        self.core.set_locked(false);
        self.refresh_current_items();
    }

    fn refresh_current_items(&mut self) {
        if !self.is_ready() {
            return;
        }
        let count = self.count();
        let divider = self.config.divider;
        let measured = self.window.len();
        let mean_extent = if measured == 0 {
            0.0
        } else {
            self.window.iter().map(|slot| slot.extent).sum::<f64>() / measured as f64
        };
        self.recycle_window();
        if count == 0 {
            self.first_position = 0;
            self.trailing = self.padding_start();
            self.leading = self.trailing - divider;
            self.core.set_content_len(self.padding_start() + self.padding_end());
            self.core.set_offset(0.0);
            self.check_ancillary(LayoutTrigger::Refreshed);
            return;
        }
        if self.first_position >= count {
            // The data shrank below the window; rebuild upward from the end.
            self.first_position = count;
            let bottom = if measured == 0 {
                let content = self.core.content_len();
                let bottom = self.core.offset() + self.core.viewport_len();
                if bottom >= content - SETTLE_EPSILON {
                    content - self.padding_end()
                } else {
                    bottom
                }
            } else {
                // Earlier items are estimated at the mean measured extent.
                let content = self.padding_start()
                    + count as f64 * (mean_extent + divider)
                    - divider
                    + self.padding_end();
                self.core.set_content_len(content);
                let top = (content - self.core.viewport_len()).max(0.0);
                self.core.set_offset(top);
                content - self.padding_end()
            };
            self.leading = bottom;
            self.trailing = bottom + divider;
        }
        let before = self.core.offset();
        self.perform_layout(LayoutTrigger::Refreshed);
        self.settle(before);
    }

    fn refresh_item(&mut self, index: usize) {
        if !self.is_ready() {
            return;
        }
        let Some(i) = index
            .checked_sub(self.first_position)
            .filter(|&i| i < self.window.len())
        else {
            return;
        };
        let cx = self.context();
        let axis = self.config.axis;
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let wanted = adapter.view_type_of(index);
        let evict_from = match self.window.get_mut(i) {
            Some(slot) if slot.handle.view_type() == wanted => {
                adapter.bind(index, slot.handle.view_mut(), &cx);
                let extent = axis.main(slot.handle.view_mut().measure());
                if approx_eq(extent, slot.extent) {
                    return;
                }
                slot.extent = extent;
                i + 1
            }
            _ => i,
        };
        self.truncate(evict_from);
        self.perform_layout(LayoutTrigger::Refreshed);
    }

    fn reclaim_all_items(&mut self) {
        self.recycle_window();
        let cx = self.context();
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        self.bin.recycle_all(|view| adapter.reclaim(view, &cx));
        adapter.reclaim_done(&cx);
    }

    fn clear_pool(&mut self, destroy: bool) {
        self.bin.clear(destroy);
    }

    fn is_locked(&self) -> bool {
        self.core.is_locked()
    }

    fn drain_events(&mut self) -> Drain<'_, LayoutEvent> {
        self.core.drain_events()
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON.max(1e-6 * a.abs().max(b.abs()))
}
