// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item views and the handles layouts move between window and pool.

use kurbo::{Point, Size};

/// Opaque pool-routing key classifying item views.
///
/// Layouts never interpret a view type; they only use it to return a retired
/// view to the free list it came from and to pick a compatible view for a
/// data position. Adapters typically derive it from the variant of an enum
/// view, one type per distinct visual structure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ViewType(usize);

impl ViewType {
    /// The type used when an adapter declares a single view type.
    pub const DEFAULT: Self = Self(0);

    /// Creates a view type from its index in `0..view_type_count`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index of this type in `0..view_type_count`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Where a layout places an item view, in content coordinates.
///
/// `width` and `height` are set when the layout forces that extent on the
/// item (for example a grid cell that expands to its stride).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Placement {
    /// Top-left corner of the item within the content.
    pub origin: Point,
    /// Forced width, if any.
    pub width: Option<f64>,
    /// Forced height, if any.
    pub height: Option<f64>,
}

impl Placement {
    /// A placement at `origin` that keeps the item's own size.
    #[must_use]
    pub const fn at(origin: Point) -> Self {
        Self {
            origin,
            width: None,
            height: None,
        }
    }

    /// Returns a copy forcing `width`.
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns a copy forcing `height`.
    #[must_use]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Size forced by this placement, with unforced extents taken from `own`.
    #[must_use]
    pub fn resolve(&self, own: Size) -> Size {
        Size::new(
            self.width.unwrap_or(own.width),
            self.height.unwrap_or(own.height),
        )
    }
}

/// An item view managed by a recycling layout.
///
/// The layout treats a view as an opaque rectangle. It binds data through
/// the adapter, asks the view for its measured size, and tells it where to
/// sit and whether it is on screen.
pub trait ItemView {
    /// Pool-routing key of this view. Read once when the view is created.
    fn view_type(&self) -> ViewType {
        ViewType::DEFAULT
    }

    /// Rebuilds the view from its bound content and returns its size.
    fn measure(&mut self) -> Size;

    /// Moves the view, forcing any extents the placement carries.
    fn place(&mut self, placement: Placement);

    /// Shows or hides the view. Pooled views are hidden, not torn down.
    fn set_visible(&mut self, visible: bool);

    /// Releases the underlying UI element. Called when a pool is cleared with
    /// `destroy` set.
    fn destroy(&mut self) {}
}

/// An owned view together with the view type it was created with.
///
/// A handle is held by exactly one container at a time: a layout's visible
/// window or a [`RecycleBin`](crate::RecycleBin) free list.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewHandle<V> {
    view: V,
    view_type: ViewType,
}

impl<V: ItemView> ViewHandle<V> {
    /// Wraps `view`, caching its view type.
    #[must_use]
    pub fn new(view: V) -> Self {
        let view_type = view.view_type();
        Self { view, view_type }
    }
}

impl<V> ViewHandle<V> {
    /// Re-wraps a view whose type is already known.
    pub(crate) const fn with_type(view: V, view_type: ViewType) -> Self {
        Self { view, view_type }
    }

    /// The cached view type.
    #[must_use]
    pub const fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// The wrapped view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// The wrapped view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Unwraps the view.
    #[must_use]
    pub fn into_view(self) -> V {
        self.view
    }
}
