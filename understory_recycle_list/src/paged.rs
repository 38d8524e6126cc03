// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A grid split into viewport-sized pages.

use core::num::NonZeroUsize;

use kurbo::{Size, Vec2};

use crate::options::PAGE_SNAP_BIAS;
use crate::track_grid::{GridGeometry, TrackGridLayout, TrackRange, floor_index};
use crate::{
    Axis, Clock, FixedSizeAdapter, LayoutEvent, LayoutOptions, Placement, RecyclingLayout,
    ScrollContainer,
};

/// Geometry of a [`PagedGridLayout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PagedGridConfig {
    /// Axis along which pages follow each other.
    pub axis: Axis,
    /// Rows on each page.
    pub page_rows: NonZeroUsize,
    /// Columns on each page.
    pub page_columns: NonZeroUsize,
    /// Total inset of each page, split evenly between both sides.
    pub page_padding: Vec2,
    /// Gaps between items: `x` between columns, `y` between rows.
    pub spacing: Vec2,
    /// Stretch items to their column width.
    pub expand_width: bool,
    /// Stretch items to their row height.
    pub expand_height: bool,
}

impl Default for PagedGridConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            page_rows: NonZeroUsize::MIN,
            page_columns: NonZeroUsize::MIN,
            page_padding: Vec2::ZERO,
            spacing: Vec2::ZERO,
            expand_width: false,
            expand_height: false,
        }
    }
}

/// Page-local coordinates of a data index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageCell {
    /// Page holding the item.
    pub page: usize,
    /// Row within the page.
    pub row: usize,
    /// Column within the page.
    pub column: usize,
}

/// Pages of `page_rows` by `page_columns` items, numbered row by row
/// inside each page.
///
/// Each page is exactly one viewport long. Tracks are global: for a
/// vertical grid track `t` is row `t % page_rows` of page `t / page_rows`;
/// a horizontal grid uses columns the same way.
#[derive(Clone, Debug, PartialEq)]
pub struct PageGrid {
    config: PagedGridConfig,
    pages: usize,
    first_page: Option<usize>,
}

impl PageGrid {
    /// Creates the arithmetic for `config`.
    #[must_use]
    pub const fn new(config: PagedGridConfig) -> Self {
        Self {
            config,
            pages: 0,
            first_page: None,
        }
    }

    /// The geometry in use.
    #[must_use]
    pub const fn config(&self) -> &PagedGridConfig {
        &self.config
    }

    /// Items on a full page.
    #[must_use]
    pub const fn page_item_count(&self) -> usize {
        self.config.page_rows.get() * self.config.page_columns.get()
    }

    /// Number of pages after the last update.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.pages
    }

    /// Page last announced as the leading one.
    #[must_use]
    pub const fn first_page(&self) -> Option<usize> {
        self.first_page
    }

    /// Data index of the item at `row` and `column` of `page`.
    #[must_use]
    pub const fn index_of(&self, page: usize, row: usize, column: usize) -> usize {
        page * self.page_item_count() + row * self.config.page_columns.get() + column
    }

    /// Page coordinates of data `index`.
    #[must_use]
    pub const fn position_of(&self, index: usize) -> PageCell {
        let per_page = self.page_item_count();
        let columns = self.config.page_columns.get();
        let within = index % per_page;
        PageCell {
            page: index / per_page,
            row: within / columns,
            column: within % columns,
        }
    }

    /// Tracks on each page along the main axis.
    const fn tracks_per_page(&self) -> usize {
        match self.config.axis {
            Axis::Vertical => self.config.page_rows.get(),
            Axis::Horizontal => self.config.page_columns.get(),
        }
    }

    /// Track stride along the main axis and cell stride along the cross axis.
    fn strides(&self, viewport: Size) -> (f64, f64) {
        let axis = self.config.axis;
        let cross = axis.cross_axis();
        let main = (axis.main(viewport) + axis.main_of_vec(self.config.spacing)
            - axis.main_of_vec(self.config.page_padding))
            / self.tracks_per_page() as f64;
        let cells = (axis.cross(viewport) + cross.main_of_vec(self.config.spacing)
            - cross.main_of_vec(self.config.page_padding))
            / self.cells_per_track() as f64;
        (main, cells)
    }
}

impl GridGeometry for PageGrid {
    fn axis(&self) -> Axis {
        self.config.axis
    }

    fn cells_per_track(&self) -> usize {
        match self.config.axis {
            Axis::Vertical => self.config.page_columns.get(),
            Axis::Horizontal => self.config.page_rows.get(),
        }
    }

    fn update(
        &mut self,
        count: usize,
        _item: Size,
        viewport: Size,
        emit: &mut dyn FnMut(LayoutEvent),
    ) -> f64 {
        let pages = count.div_ceil(self.page_item_count());
        if pages != self.pages {
            self.pages = pages;
            emit(LayoutEvent::PageCountChanged(pages));
            if let Some(page) = self.first_page {
                emit(LayoutEvent::FirstPageChanged {
                    old: None,
                    new: page,
                });
            }
        }
        self.config.axis.main(viewport) * pages as f64
    }

    fn visible_tracks(&self, offset: f64, content: f64, viewport: Size) -> Option<TrackRange> {
        let page_len = self.config.axis.main(viewport);
        if self.pages == 0 || page_len <= 0.0 {
            return None;
        }
        let per_page = self.tracks_per_page();
        let last_track = per_page * self.pages - 1;
        let (stride, _) = self.strides(viewport);
        if stride <= 0.0 {
            return Some(TrackRange {
                first: 0,
                last: last_track,
            });
        }
        let half_padding = self.config.axis.main_of_vec(self.config.page_padding) * 0.5;
        // Past the end the range stays put.
        let from = offset.min(content - page_len);

        let (first_page, leading) = if from < 0.0 {
            (0, half_padding)
        } else {
            let page = floor_index(from / page_len);
            (page, from - page as f64 * page_len - half_padding)
        };
        let first = (first_page * per_page)
            .saturating_add_signed(floor_signed(leading / stride))
            .min(last_track);

        let to = page_len + from.max(0.0);
        let last_page = floor_index(to / page_len);
        let trailing = to - last_page as f64 * page_len - half_padding;
        let last = (last_page * per_page).saturating_add_signed(-floor_signed(-trailing / stride));
        Some(TrackRange {
            first,
            last: last.clamp(first, last_track),
        })
    }

    fn cell_index(&self, track: usize, cell: usize) -> usize {
        let per_page = self.tracks_per_page();
        let page = track / per_page;
        let within = track % per_page;
        match self.config.axis {
            Axis::Vertical => self.index_of(page, within, cell),
            Axis::Horizontal => self.index_of(page, cell, within),
        }
    }

    fn placement(&self, track: usize, cell: usize, _item: Size, viewport: Size) -> Placement {
        let axis = self.config.axis;
        let cross_axis = axis.cross_axis();
        let per_page = self.tracks_per_page();
        let (main_stride, cross_stride) = self.strides(viewport);
        let page = (track / per_page) as f64;
        let within = (track % per_page) as f64;
        let main = page * axis.main(viewport)
            + axis.main_of_vec(self.config.page_padding) * 0.5
            + within * main_stride;
        let cross =
            cross_axis.main_of_vec(self.config.page_padding) * 0.5 + cell as f64 * cross_stride;
        let mut placement = Placement::at(axis.point(main, cross));

        let forced_main = (main_stride - axis.main_of_vec(self.config.spacing)).max(0.0);
        let forced_cross = (cross_stride - cross_axis.main_of_vec(self.config.spacing)).max(0.0);
        let (width, height) = match axis {
            Axis::Vertical => (forced_cross, forced_main),
            Axis::Horizontal => (forced_main, forced_cross),
        };
        if self.config.expand_width {
            placement = placement.with_width(width);
        }
        if self.config.expand_height {
            placement = placement.with_height(height);
        }
        placement
    }

    fn item_offset(&self, index: usize, factor: f64, _item: Size, viewport: Size) -> f64 {
        let axis = self.config.axis;
        let cell = self.position_of(index);
        let within = match axis {
            Axis::Vertical => cell.row,
            Axis::Horizontal => cell.column,
        };
        let (stride, _) = self.strides(viewport);
        let page_len = axis.main(viewport);
        cell.page as f64 * page_len
            + axis.main_of_vec(self.config.page_padding) * 0.5
            + stride * within as f64
            - factor * (page_len - stride)
    }

    fn on_layout(
        &mut self,
        offset: f64,
        content: f64,
        viewport: Size,
        emit: &mut dyn FnMut(LayoutEvent),
    ) {
        let page_len = self.config.axis.main(viewport);
        if self.pages == 0 || page_len <= 0.0 {
            return;
        }
        let snapped = (offset.clamp(0.0, content.max(0.0)) + PAGE_SNAP_BIAS) / page_len;
        let page = floor_index(snapped).min(self.pages - 1);
        if self.first_page != Some(page) {
            let old = self.first_page.replace(page);
            emit(LayoutEvent::FirstPageChanged { old, new: page });
        }
    }
}

/// Floors `value` to a signed track delta.
#[expect(
    clippy::cast_possible_truncation,
    reason = "deltas are bounded by the tracks on one page"
)]
fn floor_signed(value: f64) -> isize {
    if value.is_nan() {
        return 0;
    }
    libm::floor(value) as isize
}

/// A virtualized grid of viewport-sized pages.
pub type PagedGridLayout<A, S, C> = TrackGridLayout<PageGrid, A, S, C>;

impl<A: FixedSizeAdapter, S: ScrollContainer, C: Clock> TrackGridLayout<PageGrid, A, S, C> {
    /// Creates a paged grid without adapter or scroll container.
    pub fn new(config: PagedGridConfig, options: LayoutOptions, clock: C) -> Self {
        Self::with_geometry(PageGrid::new(config), options, clock)
    }

    /// The current geometry.
    pub const fn config(&self) -> &PagedGridConfig {
        self.geometry.config()
    }

    /// Replaces the geometry and rebinds the window.
    pub fn set_config(&mut self, config: PagedGridConfig) {
        let first_page = self.geometry.first_page;
        self.geometry = PageGrid::new(config);
        self.geometry.first_page = first_page;
        self.core.axis = config.axis;
        self.refresh_current_items();
    }

    /// Number of pages.
    pub const fn page_count(&self) -> usize {
        self.geometry.page_count()
    }

    /// Page currently snapped at the viewport's leading edge.
    pub const fn first_page(&self) -> Option<usize> {
        self.geometry.first_page()
    }

    /// Scrolls to the start of `page`.
    ///
    /// With `animate` set the scroll container animates toward the page,
    /// first jumping to the origin if `reset_origin` is set. Out of range
    /// pages are ignored with a warning.
    pub fn scroll_to_page(&mut self, page: usize, reset_origin: bool, animate: bool) {
        if !self.is_ready() {
            return;
        }
        let pages = self.page_count();
        if page >= pages {
            log::warn!("paged grid layout: page {page} is out of range for {pages} pages");
            return;
        }
        let target = page as f64 * self.core.viewport_len();
        self.scroll_to_offset(target, reset_origin, animate);
    }
}
