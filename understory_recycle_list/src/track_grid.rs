// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window management shared by the fixed-size grid layouts.
//!
//! A grid is a sequence of tracks along the main axis (rows of a vertical
//! grid, columns of a horizontal one), each holding a fixed number of cells.
//! The visible window is the contiguous range of tracks intersecting the
//! viewport; a pass diffs the new range against the previous one, pooling
//! the cells of tracks that left and binding the cells of tracks that
//! entered. A [`GridGeometry`] supplies the arithmetic.

use alloc::vec::Drain;
use core::fmt;
use core::mem;

use kurbo::{Point, Size};
use understory_collections::Deque;

use crate::base::{LayoutCore, LayoutStrategy, LayoutTrigger, RecyclingLayout};
use crate::options::{AUTO_DRAG_SLACK, SETTLE_EPSILON};
use crate::{
    Axis, Clock, FixedSizeAdapter, ItemView, LayoutContext, LayoutEvent, LayoutOptions, Placement,
    RecycleBin, ScrollContainer, ViewHandle, ViewType,
};

/// An inclusive range of tracks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackRange {
    /// First track in the range.
    pub first: usize,
    /// Last track in the range.
    pub last: usize,
}

impl TrackRange {
    /// Whether `track` lies within the range.
    #[must_use]
    pub const fn contains(&self, track: usize) -> bool {
        self.first <= track && track <= self.last
    }
}

/// Arithmetic of a fixed-size grid.
///
/// Offsets are main-axis distances in offset space. Implementations may
/// cache state in [`update`](Self::update), which runs before the other
/// methods in every pass.
pub trait GridGeometry {
    /// Scroll axis of the grid.
    fn axis(&self) -> Axis;

    /// Number of cells in each track.
    fn cells_per_track(&self) -> usize;

    /// Recomputes the track layout for `count` items and returns the content
    /// length along the main axis.
    fn update(
        &mut self,
        count: usize,
        item: Size,
        viewport: Size,
        emit: &mut dyn FnMut(LayoutEvent),
    ) -> f64;

    /// Tracks intersecting the viewport at `offset`, or `None` if there are none.
    fn visible_tracks(&self, offset: f64, content: f64, viewport: Size) -> Option<TrackRange>;

    /// Data index shown in `cell` of `track`. May be past the data end.
    fn cell_index(&self, track: usize, cell: usize) -> usize;

    /// Where the view in `cell` of `track` goes.
    fn placement(&self, track: usize, cell: usize, item: Size, viewport: Size) -> Placement;

    /// Offset that shows `index` at `factor` of the free viewport space.
    ///
    /// The result is clamped to the scrollable range by the caller.
    fn item_offset(&self, index: usize, factor: f64, item: Size, viewport: Size) -> f64;

    /// Runs after every pass with the final offset.
    fn on_layout(
        &mut self,
        offset: f64,
        content: f64,
        viewport: Size,
        emit: &mut dyn FnMut(LayoutEvent),
    ) {
        let _ = (offset, content, viewport, emit);
    }
}

pub(crate) struct Cell<V> {
    pub(crate) handle: ViewHandle<V>,
    pub(crate) track: usize,
    pub(crate) index: usize,
}

/// A virtualized grid of same-sized items, parameterized by its geometry.
///
/// Use the [`GridLayout`](crate::GridLayout) or
/// [`PagedGridLayout`](crate::PagedGridLayout) aliases, or supply a custom
/// [`GridGeometry`].
pub struct TrackGridLayout<G, A: FixedSizeAdapter, S, C> {
    pub(crate) core: LayoutCore<S, C>,
    pub(crate) geometry: G,
    adapter: Option<A>,
    bin: RecycleBin<A::View>,
    window: Deque<Cell<A::View>>,
    range: Option<TrackRange>,
    pending: Option<TrackRange>,
}

impl<G: fmt::Debug, A: FixedSizeAdapter, S, C> fmt::Debug for TrackGridLayout<G, A, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackGridLayout")
            .field("geometry", &self.geometry)
            .field("range", &self.range)
            .field("visible_len", &self.window.len())
            .field("pooled", &self.bin.len())
            .finish_non_exhaustive()
    }
}

impl<G: GridGeometry, A: FixedSizeAdapter, S: ScrollContainer, C: Clock>
    TrackGridLayout<G, A, S, C>
{
    /// Creates a layout around `geometry`, without adapter or scroll container.
    pub fn with_geometry(geometry: G, options: LayoutOptions, clock: C) -> Self {
        Self {
            core: LayoutCore::new(geometry.axis(), options, clock),
            geometry,
            adapter: None,
            bin: RecycleBin::new(),
            window: Deque::new(),
            range: None,
            pending: None,
        }
    }

    /// The grid arithmetic.
    pub const fn geometry(&self) -> &G {
        &self.geometry
    }

    /// The ancillary check switches.
    pub const fn options(&self) -> &LayoutOptions {
        &self.core.options
    }

    /// Replaces the ancillary check switches. They apply from the next pass.
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.core.options = options;
    }

    /// Installs a new adapter, returning the previous one.
    ///
    /// Visible views are reclaimed through the old adapter first. With
    /// `clear_pool` set, the pool is then emptied and its views destroyed.
    pub fn set_adapter(&mut self, adapter: Option<A>, clear_pool: bool) -> Option<A> {
        self.reclaim_all_items();
        if clear_pool {
            self.bin.clear(true);
        }
        let old = mem::replace(&mut self.adapter, adapter);
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
        self.pool_window();
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

    /// The visible track range.
    pub const fn visible_range(&self) -> Option<TrackRange> {
        self.range
    }

    /// Number of visible items.
    pub fn visible_len(&self) -> usize {
        self.window.len()
    }

    /// Visible items with their data index, in window order.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &A::View)> + '_ {
        self.window
            .iter()
            .map(|cell| (cell.index, cell.handle.view()))
    }

    /// The pool of retired views.
    pub const fn pool(&self) -> &RecycleBin<A::View> {
        &self.bin
    }

    /// Content length along the main axis.
    pub fn content_length(&self) -> f64 {
        self.core.content_len()
    }

    /// Scrolls so that item `index` shows at `factor` of the free viewport
    /// space: `0.0` at the leading edge, `1.0` at the trailing edge.
    ///
    /// With `animate` set the scroll container animates toward the target,
    /// first jumping to the origin if `reset_origin` is set. Out of range
    /// indices are ignored with a warning.
    pub fn scroll_to_item(&mut self, index: usize, factor: f64, reset_origin: bool, animate: bool) {
        if !self.is_ready() {
            return;
        }
        let count = self.count();
        if index >= count {
            log::warn!("grid layout: item {index} is out of range for {count} items");
            return;
        }
        let viewport = self.core.viewport_size();
        let target = self
            .geometry
            .item_offset(index, factor.clamp(0.0, 1.0), self.item_size(), viewport);
        let max = (self.core.content_len() - self.core.viewport_len()).max(0.0);
        self.scroll_to_offset(target.clamp(0.0, max), reset_origin, animate);
    }

    pub(crate) fn scroll_to_offset(&mut self, offset: f64, reset_origin: bool, animate: bool) {
        if let Some(change) = self.core.start_animation(offset, reset_origin, animate) {
            self.on_content_position_changed(change.old, change.new);
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.core.has_scroll() && self.adapter.is_some()
    }

    fn count(&self) -> usize {
        self.adapter.as_ref().map_or(0, A::len)
    }

    fn item_size(&self) -> Size {
        self.adapter.as_ref().map_or(Size::ZERO, A::item_size)
    }

    fn context(&self) -> LayoutContext {
        let first = self.window.peek_front().map_or(0, |cell| cell.index);
        self.core.context(first, self.window.len())
    }

    fn update_content(&mut self) {
        let count = self.count();
        let item = self.item_size();
        let viewport = self.core.viewport_size();
        let core = &mut self.core;
        let len = self
            .geometry
            .update(count, item, viewport, &mut |event| core.push_event(event));
        self.core.set_content_len(len);
    }

    /// Pulls an overscrolled viewport back into the content once at rest.
    fn settle(&mut self) {
        if !self.core.is_at_rest() {
            return;
        }
        let offset = self.core.offset();
        let viewport = self.core.viewport_len();
        let content = self.core.content_len();
        if offset + viewport > content {
            self.core.set_offset((content - viewport).max(0.0));
        } else if offset < -SETTLE_EPSILON {
            self.core.set_offset(0.0);
        }
    }

    fn pool_window(&mut self) {
        while let Ok(cell) = self.window.pop_back() {
            self.bin.add_scrap_view(cell.handle);
        }
        self.range = None;
        self.pending = None;
    }

    /// Binds and places the cells of `track`, at the front or the back of the window.
    fn add_track(&mut self, track: usize, front: bool) {
        let cells = self.geometry.cells_per_track();
        if front {
            for cell in (0..cells).rev() {
                self.add_cell(track, cell, true);
            }
        } else {
            for cell in 0..cells {
                self.add_cell(track, cell, false);
            }
        }
    }

    fn add_cell(&mut self, track: usize, cell: usize, front: bool) {
        let index = self.geometry.cell_index(track, cell);
        if index >= self.count() {
            return;
        }
        let cx = self.context();
        let item = self.item_size();
        let viewport = self.core.viewport_size();
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let mut handle = match self.bin.get_scrap_view(index, |_| ViewType::DEFAULT) {
            Some(handle) => handle,
            None => ViewHandle::with_type(adapter.create_view(&cx), ViewType::DEFAULT),
        };
        adapter.bind(index, handle.view_mut(), &cx);
        let view = handle.view_mut();
        view.place(self.geometry.placement(track, cell, item, viewport));
        view.set_visible(true);
        let cell = Cell {
            handle,
            track,
            index,
        };
        if front {
            self.window.push_front(cell);
        } else {
            self.window.push_back(cell);
        }
    }
}

impl<G: GridGeometry, A: FixedSizeAdapter, S: ScrollContainer, C: Clock> LayoutStrategy
    for TrackGridLayout<G, A, S, C>
{
    fn recycle(&mut self) {
        if !self.is_ready() {
            return;
        }
        let target = if self.count() == 0 {
            None
        } else {
            self.geometry.visible_tracks(
                self.core.offset(),
                self.core.content_len(),
                self.core.viewport_size(),
            )
        };
        self.pending = target;
        let Some(target) = target else {
            while let Ok(cell) = self.window.pop_back() {
                self.bin.add_scrap_view(cell.handle);
            }
            return;
        };
        while self
            .window
            .peek_front()
            .is_ok_and(|cell| cell.track < target.first)
        {
            if let Ok(cell) = self.window.pop_front() {
                self.bin.add_scrap_view(cell.handle);
            }
        }
        while self
            .window
            .peek_back()
            .is_ok_and(|cell| cell.track > target.last)
        {
            if let Ok(cell) = self.window.pop_back() {
                self.bin.add_scrap_view(cell.handle);
            }
        }
    }

    fn fill(&mut self) {
        if !self.is_ready() || self.pending == self.range {
            return;
        }
        let old = mem::replace(&mut self.range, self.pending);
        let Some(new) = self.pending else {
            return;
        };
        match old {
            None => {
                for track in new.first..=new.last {
                    self.add_track(track, false);
                }
            }
            Some(old) => {
                if new.first < old.first {
                    let end = new.last.min(old.first - 1);
                    for track in (new.first..=end).rev() {
                        self.add_track(track, true);
                    }
                }
                if new.last > old.last {
                    let start = new.first.max(old.last + 1);
                    for track in start..=new.last {
                        self.add_track(track, false);
                    }
                }
            }
        }
    }

    fn adjust_extent(&mut self) {
        if self.is_ready() {
            self.update_content();
        }
    }

    fn check_ancillary(&mut self, trigger: LayoutTrigger) {
        if !self.is_ready() {
            return;
        }
        let content = self.core.content_len();
        let scrollable = content > self.core.viewport_len() + AUTO_DRAG_SLACK;
        self.core.update_drag(scrollable);
        self.core.update_arrows();
        if self.core.update_lock(scrollable) {
            self.refresh_all_items();
            return;
        }
        self.core.update_load_more(trigger.is_forward());
        let offset = self.core.offset();
        let viewport = self.core.viewport_size();
        let core = &mut self.core;
        self.geometry
            .on_layout(offset, content, viewport, &mut |event| core.push_event(event));
    }
}

impl<G: GridGeometry, A: FixedSizeAdapter, S: ScrollContainer, C: Clock> RecyclingLayout
    for TrackGridLayout<G, A, S, C>
{
    fn on_content_position_changed(&mut self, old: Point, new: Point) {
        if !self.is_ready() || self.count() == 0 || !self.core.accepts_axis() {
            return;
        }
        let axis = self.core.axis;
        log::trace!(
            "grid layout: offset {} -> {}",
            axis.main_of(old),
            axis.main_of(new)
        );
        self.perform_layout(LayoutTrigger::Scrolled {
            forward: axis.main_of(new) > axis.main_of(old),
        });
    }

    fn refresh_all_items(&mut self) {
        if !self.is_ready() {
            return;
        }
        log::debug!("grid layout: full refresh of {} items", self.count());
        self.core.set_offset(0.0);
        self.core.stop_movement();
        self.core.stop_animation(false);
        self.core.set_locked(false);
        self.refresh_current_items();
    }

    fn refresh_current_items(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.pool_window();
        self.update_content();
        self.settle();
        self.perform_layout(LayoutTrigger::Refreshed);
    }

    fn refresh_item(&mut self, index: usize) {
        let cx = self.context();
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        if let Some(cell) = self.window.iter_mut().find(|cell| cell.index == index) {
            adapter.bind(index, cell.handle.view_mut(), &cx);
        }
    }

    fn reclaim_all_items(&mut self) {
        self.pool_window();
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

/// Floors `value` into an index, saturating at zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "track indices are far below the f64 integer range; callers clamp the result"
)]
pub(crate) fn floor_index(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    libm::floor(value) as usize
}
