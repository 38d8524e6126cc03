// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared adapters and views for the layout integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(dead_code, reason = "Each test binary uses a different subset.")]

use std::collections::HashSet;

use kurbo::{Point, Size};
use understory_recycle_list::{
    Axis, FixedSizeAdapter, FlexibleAdapter, ItemView, LayoutContext, Placement, PositionChange,
    RecycleBin, RecyclingLayout, ViewType,
};

/// A view that records what the layout did to it.
#[derive(Debug)]
pub(crate) struct Bubble {
    pub(crate) id: usize,
    pub(crate) view_type: ViewType,
    pub(crate) size: Size,
    pub(crate) bound: Option<usize>,
    pub(crate) placement: Option<Placement>,
    pub(crate) frame: Size,
    pub(crate) visible: bool,
}

impl Bubble {
    fn new(id: usize, view_type: ViewType, size: Size) -> Self {
        Self {
            id,
            view_type,
            size,
            bound: None,
            placement: None,
            frame: Size::ZERO,
            visible: false,
        }
    }

    pub(crate) fn origin(&self) -> Option<Point> {
        self.placement.map(|p| p.origin)
    }
}

impl ItemView for Bubble {
    fn view_type(&self) -> ViewType {
        self.view_type
    }

    fn measure(&mut self) -> Size {
        self.size
    }

    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
        self.frame = placement.resolve(self.size);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A conversation with five kinds of message, each of its own height.
pub(crate) struct Chat {
    pub(crate) axis: Axis,
    pub(crate) kinds: Vec<usize>,
    pub(crate) extents: Vec<f64>,
    pub(crate) created: usize,
}

impl Chat {
    pub(crate) const KINDS: usize = 5;

    /// `len` messages of `extent`, with kinds cycling through all five.
    pub(crate) fn uniform(len: usize, extent: f64) -> Self {
        Self {
            axis: Axis::Vertical,
            kinds: (0..len).map(|i| i % Self::KINDS).collect(),
            extents: vec![extent; len],
            created: 0,
        }
    }

    /// Messages whose extent is decided by their kind.
    pub(crate) fn by_kind(len: usize, extent_of: impl Fn(usize) -> f64) -> Self {
        let kinds: Vec<usize> = (0..len).map(|i| i % Self::KINDS).collect();
        let extents = kinds.iter().map(|&k| extent_of(k)).collect();
        Self {
            axis: Axis::Vertical,
            kinds,
            extents,
            created: 0,
        }
    }

    pub(crate) fn horizontal(mut self) -> Self {
        self.axis = Axis::Horizontal;
        self
    }
}

impl FlexibleAdapter for Chat {
    type View = Bubble;

    fn len(&self) -> usize {
        self.kinds.len()
    }

    fn view_type_of(&self, position: usize) -> ViewType {
        ViewType::new(self.kinds[position])
    }

    fn view_type_count(&self) -> usize {
        Self::KINDS
    }

    fn create_view(&mut self, position: usize, _: &LayoutContext) -> Bubble {
        self.created += 1;
        Bubble::new(self.created, self.view_type_of(position), Size::ZERO)
    }

    fn bind(&mut self, position: usize, view: &mut Bubble, _: &LayoutContext) {
        view.bound = Some(position);
        view.size = self.axis.size(self.extents[position], 24.0);
    }
}

/// Same-sized tiles.
pub(crate) struct Tiles {
    pub(crate) len: usize,
    pub(crate) size: Size,
    pub(crate) created: usize,
}

impl Tiles {
    pub(crate) fn new(len: usize, size: Size) -> Self {
        Self {
            len,
            size,
            created: 0,
        }
    }
}

impl FixedSizeAdapter for Tiles {
    type View = Bubble;

    fn len(&self) -> usize {
        self.len
    }

    fn item_size(&self) -> Size {
        self.size
    }

    fn create_view(&mut self, _: &LayoutContext) -> Bubble {
        self.created += 1;
        Bubble::new(self.created, ViewType::DEFAULT, self.size)
    }

    fn bind(&mut self, position: usize, view: &mut Bubble, _: &LayoutContext) {
        view.bound = Some(position);
    }
}

/// Forwards a host scroll to the layout, as a scroll widget's listener would.
pub(crate) fn report(layout: &mut impl RecyclingLayout, change: Option<PositionChange>) {
    if let Some(change) = change {
        layout.on_content_position_changed(change.old, change.new);
    }
}

/// Checks that visible views are shown and bound to their own item, that
/// pooled views are hidden, and that no view is in both places.
pub(crate) fn assert_window_and_pool<'a>(
    visible: impl Iterator<Item = (usize, &'a Bubble)>,
    pool: &RecycleBin<Bubble>,
) {
    let mut ids = HashSet::new();
    for (index, view) in visible {
        assert_eq!(view.bound, Some(index), "view {} shows another item", view.id);
        assert!(view.visible, "visible item {index} is hidden");
        assert!(ids.insert(view.id), "view {} is attached twice", view.id);
    }
    for handle in pool.iter() {
        let view = handle.view();
        assert!(!view.visible, "pooled view {} is shown", view.id);
        assert!(ids.insert(view.id), "view {} is attached and pooled", view.id);
    }
}

/// Deterministic positions for scroll scripts.
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// A value in `0.0..1.0`.
    pub(crate) fn next_unit(&mut self) -> f64 {
        // Knuth's MMIX LCG multiplier.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from(u32::try_from(self.0 >> 40).unwrap_or(0)) / f64::from(1_u32 << 24)
    }
}
