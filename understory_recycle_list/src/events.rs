// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Edge;

/// A notification produced by a layout pass.
///
/// Layouts queue events instead of invoking callbacks; the host drains them
/// with [`RecyclingLayout::drain_events`](crate::RecyclingLayout::drain_events)
/// after forwarding a scroll or refresh. Every event reports a transition,
/// never a repeated value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutEvent {
    /// The user scrolled away from (`true`) or back to (`false`) the leading
    /// edge. While locked, hosts should not auto-scroll to new data.
    LockStateChanged(bool),
    /// The content ran out within the viewport; fetch more data.
    LoadMore,
    /// More content is (or is no longer) available past `edge`.
    ArrowHint {
        /// The edge the hint points at.
        edge: Edge,
        /// Whether the hint should be shown.
        visible: bool,
    },
    /// A paged layout's page count changed.
    PageCountChanged(usize),
    /// The page snapped at the viewport's leading edge changed.
    ///
    /// `old` is `None` when the page is announced afresh, for example right
    /// after a page count change.
    FirstPageChanged {
        /// Previously announced page.
        old: Option<usize>,
        /// Newly current page.
        new: usize,
    },
}
