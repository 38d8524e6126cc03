// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A continuous grid of same-sized items.

use core::num::NonZeroUsize;

use kurbo::{Insets, Size, Vec2};

use crate::track_grid::{GridGeometry, TrackGridLayout, TrackRange, floor_index};
use crate::{
    Axis, Clock, FixedSizeAdapter, LayoutEvent, LayoutOptions, Placement, RecyclingLayout,
    ScrollContainer,
};

/// Geometry of a [`GridLayout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Scroll axis. Tracks are rows for [`Axis::Vertical`], columns otherwise.
    pub axis: Axis,
    /// Space around the grid inside the content.
    pub padding: Insets,
    /// Gaps between items: `x` between columns, `y` between rows.
    pub spacing: Vec2,
    /// Items per track: columns of a vertical grid, rows of a horizontal one.
    pub cross_count: NonZeroUsize,
    /// Stretch items to fill their share of the cross axis.
    pub expand_cross: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            padding: Insets::ZERO,
            spacing: Vec2::ZERO,
            cross_count: NonZeroUsize::MIN,
            expand_cross: false,
        }
    }
}

/// Uniform tracks separated by the configured spacing.
///
/// A vertical grid numbers items row by row. A horizontal grid numbers the
/// first row across every column before moving to the next row.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformGrid {
    config: GridConfig,
    tracks: usize,
    item_extent: f64,
}

impl UniformGrid {
    /// Creates the arithmetic for `config`.
    #[must_use]
    pub const fn new(config: GridConfig) -> Self {
        Self {
            config,
            tracks: 0,
            item_extent: 0.0,
        }
    }

    /// The geometry in use.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of tracks after the last update.
    #[must_use]
    pub const fn track_count(&self) -> usize {
        self.tracks
    }

    /// Data index shown in `cell` of `track`.
    #[must_use]
    pub const fn index_of(&self, track: usize, cell: usize) -> usize {
        match self.config.axis {
            Axis::Vertical => track * self.config.cross_count.get() + cell,
            Axis::Horizontal => track + cell * self.tracks,
        }
    }

    /// Track showing data `index`.
    #[must_use]
    pub const fn track_of(&self, index: usize) -> usize {
        match self.config.axis {
            Axis::Vertical => index / self.config.cross_count.get(),
            Axis::Horizontal => {
                if self.tracks == 0 {
                    0
                } else {
                    index % self.tracks
                }
            }
        }
    }

    fn main_spacing(&self) -> f64 {
        self.config.axis.main_of_vec(self.config.spacing)
    }

    fn cross_spacing(&self) -> f64 {
        self.config.axis.cross_axis().main_of_vec(self.config.spacing)
    }
}

impl GridGeometry for UniformGrid {
    fn axis(&self) -> Axis {
        self.config.axis
    }

    fn cells_per_track(&self) -> usize {
        self.config.cross_count.get()
    }

    fn update(
        &mut self,
        count: usize,
        item: Size,
        _viewport: Size,
        _emit: &mut dyn FnMut(LayoutEvent),
    ) -> f64 {
        let axis = self.config.axis;
        self.tracks = count.div_ceil(self.config.cross_count.get());
        self.item_extent = axis.main(item);
        let padding = axis.leading(self.config.padding) + axis.trailing(self.config.padding);
        self.tracks as f64 * self.item_extent
            + self.tracks.saturating_sub(1) as f64 * self.main_spacing()
            + padding
    }

    fn visible_tracks(&self, offset: f64, content: f64, viewport: Size) -> Option<TrackRange> {
        if self.tracks == 0 {
            return None;
        }
        let axis = self.config.axis;
        let last_track = self.tracks - 1;
        let viewport_len = axis.main(viewport);
        let stride = self.item_extent + self.main_spacing();
        if stride <= 0.0 {
            return Some(TrackRange {
                first: 0,
                last: last_track,
            });
        }
        // Past the end the range stays put.
        let from = (offset - axis.leading(self.config.padding)).min(content - viewport_len);
        let first = floor_index(from / stride).min(last_track);
        let to = viewport_len + from.max(0.0);
        let last = floor_index(to / stride).clamp(first, last_track);
        Some(TrackRange { first, last })
    }

    fn cell_index(&self, track: usize, cell: usize) -> usize {
        self.index_of(track, cell)
    }

    fn placement(&self, track: usize, cell: usize, item: Size, viewport: Size) -> Placement {
        let axis = self.config.axis;
        let padding = self.config.padding;
        let main_stride = axis.main(item) + self.main_spacing();
        let cross_spacing = self.cross_spacing();
        let cross_stride = (axis.cross(viewport) + cross_spacing - axis.cross_total(padding))
            / self.config.cross_count.get() as f64;
        let main = axis.leading(padding) + track as f64 * main_stride;
        let cross = axis.cross_leading(padding) + cell as f64 * cross_stride;
        let placement = Placement::at(axis.point(main, cross));
        if !self.config.expand_cross {
            return placement;
        }
        let forced = (cross_stride - cross_spacing).max(0.0);
        match axis {
            Axis::Vertical => placement.with_width(forced),
            Axis::Horizontal => placement.with_height(forced),
        }
    }

    fn item_offset(&self, index: usize, factor: f64, item: Size, viewport: Size) -> f64 {
        let axis = self.config.axis;
        let extent = axis.main(item);
        let track = self.track_of(index) as f64;
        axis.leading(self.config.padding) + track * (extent + self.main_spacing())
            - factor * (axis.main(viewport) - extent)
    }
}

/// A virtualized grid of same-sized items scrolling along one axis.
pub type GridLayout<A, S, C> = TrackGridLayout<UniformGrid, A, S, C>;

impl<A: FixedSizeAdapter, S: ScrollContainer, C: Clock> TrackGridLayout<UniformGrid, A, S, C> {
    /// Creates a grid without adapter or scroll container.
    pub fn new(config: GridConfig, options: LayoutOptions, clock: C) -> Self {
        Self::with_geometry(UniformGrid::new(config), options, clock)
    }

    /// The current geometry.
    pub const fn config(&self) -> &GridConfig {
        self.geometry.config()
    }

    /// Replaces the geometry and rebinds the window.
    pub fn set_config(&mut self, config: GridConfig) {
        self.geometry = UniformGrid::new(config);
        self.core.axis = config.axis;
        self.refresh_current_items();
    }
}
