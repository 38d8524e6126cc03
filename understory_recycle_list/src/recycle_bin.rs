// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view-type free pool of retired views.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{ItemView, Reclaim, ViewHandle, ViewType};

/// Free lists of retired views, one per view type.
///
/// Views are pushed and popped LIFO per type. A view in the bin is hidden
/// and belongs to no visible window.
///
/// ```rust
/// use kurbo::Size;
/// use understory_recycle_list::{ItemView, Placement, RecycleBin, ViewHandle, ViewType};
///
/// #[derive(Debug)]
/// struct Label(ViewType, bool);
///
/// impl ItemView for Label {
///     fn view_type(&self) -> ViewType { self.0 }
///     fn measure(&mut self) -> Size { Size::new(10.0, 10.0) }
///     fn place(&mut self, _: Placement) {}
///     fn set_visible(&mut self, visible: bool) { self.1 = visible; }
/// }
///
/// let mut bin = RecycleBin::new();
/// bin.set_view_type_count(2);
/// bin.add_scrap_view(ViewHandle::new(Label(ViewType::new(1), true)));
///
/// assert_eq!(bin.len_of(ViewType::new(1)), 1);
/// let reused = bin.get_scrap_view(7, |_| ViewType::new(1)).unwrap();
/// assert!(!reused.view().1);
/// assert!(bin.get_scrap_view(7, |_| ViewType::new(0)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct RecycleBin<V> {
    pools: SmallVec<[Vec<ViewHandle<V>>; 4]>,
}

impl<V: ItemView> RecycleBin<V> {
    /// Creates a bin with a single view type.
    #[must_use]
    pub fn new() -> Self {
        let mut pools = SmallVec::new();
        pools.push(Vec::new());
        Self { pools }
    }

    /// Number of view types the bin routes between.
    #[must_use]
    pub fn view_type_count(&self) -> usize {
        self.pools.len()
    }

    /// Sets the number of view types.
    ///
    /// Pools of types that remain valid are kept. Views in pools beyond the
    /// new count are destroyed.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn set_view_type_count(&mut self, count: usize) {
        assert!(count >= 1, "view type count must be at least 1, got {count}");
        if count < self.pools.len() {
            for pool in self.pools.drain(count..) {
                for mut handle in pool {
                    handle.view_mut().destroy();
                }
            }
        }
        while self.pools.len() < count {
            self.pools.push(Vec::new());
        }
    }

    /// Pops a reusable view for data `position`.
    ///
    /// With a single view type the only pool is used and `type_of` is never
    /// called. Otherwise `type_of(position)` selects the pool.
    pub fn get_scrap_view(
        &mut self,
        position: usize,
        type_of: impl FnOnce(usize) -> ViewType,
    ) -> Option<ViewHandle<V>> {
        let view_type = if self.pools.len() == 1 {
            ViewType::DEFAULT
        } else {
            type_of(position)
        };
        self.take(view_type)
    }

    /// Pops a view of `view_type`, if one is pooled.
    pub fn take(&mut self, view_type: ViewType) -> Option<ViewHandle<V>> {
        self.pools.get_mut(view_type.index())?.pop()
    }

    /// Hides `handle` and pushes it onto its type's pool.
    ///
    /// # Panics
    ///
    /// Panics if the handle's view type is outside the declared count.
    pub fn add_scrap_view(&mut self, mut handle: ViewHandle<V>) {
        let index = handle.view_type().index();
        let count = self.pools.len();
        assert!(
            index < count,
            "view type {index} is outside the declared view type count {count}"
        );
        handle.view_mut().set_visible(false);
        self.pools[index].push(handle);
    }

    /// Total number of pooled views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no views are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.iter().all(Vec::is_empty)
    }

    /// Number of pooled views of `view_type`.
    #[must_use]
    pub fn len_of(&self, view_type: ViewType) -> usize {
        self.pools.get(view_type.index()).map_or(0, Vec::len)
    }

    /// Iterates pooled handles, grouped by view type.
    pub fn iter(&self) -> impl Iterator<Item = &ViewHandle<V>> + '_ {
        self.pools.iter().flat_map(|pool| pool.iter())
    }

    /// Offers every pooled view to `reclaim`, newest first within each type.
    ///
    /// Views answered with [`Reclaim::Claimed`] leave the pool; the rest stay
    /// in place.
    pub fn recycle_all(&mut self, mut reclaim: impl FnMut(V) -> Reclaim<V>) {
        for pool in &mut self.pools {
            let mut kept = Vec::with_capacity(pool.len());
            while let Some(handle) = pool.pop() {
                let view_type = handle.view_type();
                if let Reclaim::Keep(view) = reclaim(handle.into_view()) {
                    kept.push(ViewHandle::with_type(view, view_type));
                }
            }
            kept.reverse();
            *pool = kept;
        }
    }

    /// Empties every pool, destroying the views if `destroy` is set.
    pub fn clear(&mut self, destroy: bool) {
        for pool in &mut self.pools {
            for mut handle in pool.drain(..) {
                if destroy {
                    handle.view_mut().destroy();
                }
            }
        }
    }
}

impl<V: ItemView> Default for RecycleBin<V> {
    fn default() -> Self {
        Self::new()
    }
}
