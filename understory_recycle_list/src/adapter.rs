// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter contracts implemented by application code.

use kurbo::Size;

use crate::{Axis, ItemView, ViewType};

/// Read-only snapshot of the layout handed to adapter callbacks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutContext {
    /// Scroll axis of the layout.
    pub axis: Axis,
    /// Viewport size reported by the scroll container.
    pub viewport: Size,
    /// Data index of the first item in the visible window.
    pub first_position: usize,
    /// Number of items in the visible window.
    pub visible_len: usize,
}

/// Outcome of offering a pooled view back to its adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reclaim<V> {
    /// The layout keeps pooling the view.
    Keep(V),
    /// The adapter took ownership; the layout forgets the view.
    Claimed,
}

/// Adapter for layouts whose items share one caller-declared size.
///
/// Used by [`GridLayout`](crate::GridLayout) and
/// [`PagedGridLayout`](crate::PagedGridLayout). All views share
/// [`ViewType::DEFAULT`].
pub trait FixedSizeAdapter {
    /// The item view type.
    type View: ItemView;

    /// Number of data items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no data items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of every item.
    fn item_size(&self) -> Size;

    /// Creates a view when the pool has none to reuse.
    fn create_view(&mut self, cx: &LayoutContext) -> Self::View;

    /// Fills `view` with the data at `position`.
    fn bind(&mut self, position: usize, view: &mut Self::View, cx: &LayoutContext);

    /// Offered every pooled view by [`reclaim_all_items`](crate::RecyclingLayout::reclaim_all_items).
    fn reclaim(&mut self, view: Self::View, cx: &LayoutContext) -> Reclaim<Self::View> {
        let _ = cx;
        Reclaim::Keep(view)
    }

    /// Called once after every pooled view was offered to [`reclaim`](Self::reclaim).
    fn reclaim_done(&mut self, cx: &LayoutContext) {
        let _ = cx;
    }
}

/// Adapter for layouts with measured, possibly heterogeneous items.
///
/// Used by [`LinearLayout`](crate::LinearLayout). Each position maps to a
/// view type; views are only reused for positions of the same type.
pub trait FlexibleAdapter {
    /// The item view type.
    type View: ItemView;

    /// Number of data items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no data items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View type needed to show `position`.
    fn view_type_of(&self, position: usize) -> ViewType {
        let _ = position;
        ViewType::DEFAULT
    }

    /// Number of distinct view types. Must be at least one.
    fn view_type_count(&self) -> usize {
        1
    }

    /// Creates a view suitable for `position`.
    ///
    /// The view must report [`view_type_of(position)`](Self::view_type_of)
    /// from [`ItemView::view_type`].
    fn create_view(&mut self, position: usize, cx: &LayoutContext) -> Self::View;

    /// Fills `view` with the data at `position`.
    fn bind(&mut self, position: usize, view: &mut Self::View, cx: &LayoutContext);

    /// Offered every pooled view by [`reclaim_all_items`](crate::RecyclingLayout::reclaim_all_items).
    fn reclaim(&mut self, view: Self::View, cx: &LayoutContext) -> Reclaim<Self::View> {
        let _ = cx;
        Reclaim::Keep(view)
    }

    /// Called once after every pooled view was offered to [`reclaim`](Self::reclaim).
    fn reclaim_done(&mut self, cx: &LayoutContext) {
        let _ = cx;
    }
}
