// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_recycle_list --heading-base-level=0

//! Understory Recycle List: virtualized list and grid layouts backed by a view pool.
//!
//! A recycling layout keeps only the item views that intersect a scroll
//! viewport alive. When an item scrolls out, its view is hidden and parked
//! in a [`RecycleBin`] keyed by [`ViewType`]; when another item scrolls in,
//! a pooled view of the right type is rebound to it instead of creating a
//! new one.
//!
//! Three layouts are provided:
//!
//! - [`LinearLayout`]: items of measured, possibly heterogeneous extents
//!   stacked along one axis, fed by a [`FlexibleAdapter`].
//! - [`GridLayout`]: same-sized items in a continuous grid, fed by a
//!   [`FixedSizeAdapter`].
//! - [`PagedGridLayout`]: same-sized items on viewport-sized pages, with
//!   page count and page change events.
//!
//! The layouts never own a widget tree. They talk to a [`ScrollContainer`]
//! (a host scroll widget, or the headless [`ScrollState`]) and to item
//! views through the [`ItemView`] trait, and they queue [`LayoutEvent`]s
//! for the host to drain. All positions live in offset space: the
//! main-axis coordinate is the distance the content has scrolled forward.
//!
//! Time for throttled signals comes from an injected [`Clock`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_recycle_list::{
//!     Axis, FlexibleAdapter, ItemView, LayoutContext, LayoutOptions, LinearConfig,
//!     LinearLayout, ManualClock, Placement, RecyclingLayout, ScrollState,
//! };
//!
//! struct Row {
//!     text: String,
//!     origin: Point,
//! }
//!
//! impl ItemView for Row {
//!     fn measure(&mut self) -> Size {
//!         Size::new(200.0, 20.0)
//!     }
//!     fn place(&mut self, placement: Placement) {
//!         self.origin = placement.origin;
//!     }
//!     fn set_visible(&mut self, _visible: bool) {}
//! }
//!
//! struct Rows(Vec<String>);
//!
//! impl FlexibleAdapter for Rows {
//!     type View = Row;
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn create_view(&mut self, _: usize, _: &LayoutContext) -> Row {
//!         Row { text: String::new(), origin: Point::ORIGIN }
//!     }
//!     fn bind(&mut self, position: usize, view: &mut Row, _: &LayoutContext) {
//!         view.text.clone_from(&self.0[position]);
//!     }
//! }
//!
//! let rows = Rows((0..1000).map(|i| format!("row {i}")).collect());
//! let mut list = LinearLayout::new(LinearConfig::default(), LayoutOptions::default(), ManualClock::new());
//! list.set_scroll_container(Some(ScrollState::new(Axis::Vertical, Size::new(200.0, 100.0))));
//! list.set_adapter(Some(rows), false);
//! assert_eq!(list.visible_len(), 5);
//!
//! // The host scrolls and reports the move.
//! let change = list
//!     .scroll_container_mut()
//!     .unwrap()
//!     .scroll_to(Point::new(0.0, 510.0))
//!     .unwrap();
//! list.on_content_position_changed(change.old, change.new);
//! assert_eq!(list.first_position(), 25);
//! assert_eq!(list.visible_items().next().unwrap().1.text, "row 25");
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature adds [`StdClock`].

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod adapter;
mod axis;
mod base;
mod clock;
mod events;
mod grid;
mod interpolator;
mod linear;
mod options;
mod paged;
mod recycle_bin;
mod scroll;
mod track_grid;
mod view;

#[cfg(test)]
mod test_view;

pub use adapter::{FixedSizeAdapter, FlexibleAdapter, LayoutContext, Reclaim};
pub use axis::{Axis, Edge};
pub use base::{LayoutStrategy, LayoutTrigger, RecyclingLayout};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};
pub use events::LayoutEvent;
pub use grid::{GridConfig, GridLayout, UniformGrid};
pub use interpolator::{AccelerateDecelerate, Interpolator, Linear};
pub use linear::{LinearConfig, LinearLayout};
pub use options::{
    ARROW_HINT_EPSILON, AUTO_DRAG_SLACK, DEFAULT_LOAD_MORE_COOLDOWN, LOCK_DISTANCE, LayoutOptions,
    PAGE_SNAP_BIAS, SETTLE_EPSILON,
};
pub use paged::{PageCell, PageGrid, PagedGridConfig, PagedGridLayout};
pub use recycle_bin::RecycleBin;
pub use scroll::{DEFAULT_ANIMATION_DURATION, PositionChange, ScrollContainer, ScrollState};
pub use track_grid::{GridGeometry, TrackGridLayout, TrackRange};
pub use view::{ItemView, Placement, ViewHandle, ViewType};
