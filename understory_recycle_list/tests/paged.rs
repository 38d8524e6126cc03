// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll scripts against `PagedGridLayout`.

mod common;

use std::num::NonZeroUsize;

use common::{Tiles, assert_window_and_pool, report};
use kurbo::{Point, Size};
use understory_recycle_list::{
    Axis, LayoutEvent, LayoutOptions, ManualClock, PagedGridConfig, PagedGridLayout,
    RecyclingLayout, ScrollContainer, ScrollState, TrackRange,
};

type Layout = PagedGridLayout<Tiles, ScrollState, ManualClock>;

fn layout(axis: Axis, rows: usize, columns: usize, viewport: Size, len: usize) -> Layout {
    let config = PagedGridConfig {
        axis,
        page_rows: NonZeroUsize::new(rows).unwrap(),
        page_columns: NonZeroUsize::new(columns).unwrap(),
        expand_width: true,
        expand_height: true,
        ..PagedGridConfig::default()
    };
    let mut layout = PagedGridLayout::new(config, LayoutOptions::default(), ManualClock::new());
    layout.set_scroll_container(Some(ScrollState::new(axis, viewport)));
    layout.set_adapter(Some(Tiles::new(len, Size::new(30.0, 50.0))), false);
    layout
}

/// Two rows of three items per 90 by 100 page.
fn vertical(len: usize) -> Layout {
    layout(Axis::Vertical, 2, 3, Size::new(90.0, 100.0), len)
}

fn scroll_to(layout: &mut Layout, main: f64) {
    let axis = layout.config().axis;
    let change = layout
        .scroll_container_mut()
        .unwrap()
        .scroll_to(axis.point(main, 0.0));
    report(layout, change);
}

fn indices(layout: &Layout) -> Vec<usize> {
    layout.visible_items().map(|(i, _)| i).collect()
}

fn events(layout: &mut Layout) -> Vec<LayoutEvent> {
    layout.drain_events().collect()
}

#[test]
fn a_new_last_track_attaches_while_the_first_stays() {
    let mut layout = vertical(30);
    assert_eq!(layout.visible_range(), Some(TrackRange { first: 0, last: 2 }));
    assert_eq!(indices(&layout), (0..9).collect::<Vec<_>>());

    scroll_to(&mut layout, 10.0);
    assert_eq!(layout.visible_range(), Some(TrackRange { first: 0, last: 3 }));
    // The second row of page 1 came into view.
    assert_eq!(indices(&layout), (0..12).collect::<Vec<_>>());
    assert_window_and_pool(layout.visible_items(), layout.pool());

    let (_, view) = layout.visible_items().find(|(i, _)| *i == 10).unwrap();
    let placement = view.placement.unwrap();
    assert_eq!(placement.origin, Point::new(30.0, 150.0));
    assert_eq!(placement.width, Some(30.0));
    assert_eq!(placement.height, Some(50.0));
}

#[test]
fn page_events_announce_count_and_position() {
    let mut layout = vertical(30);
    assert_eq!(
        events(&mut layout),
        [
            LayoutEvent::PageCountChanged(5),
            LayoutEvent::FirstPageChanged { old: None, new: 0 },
        ]
    );
    assert_eq!(layout.content_length(), 500.0);

    // Within the snap bias of page 1.
    scroll_to(&mut layout, 99.85);
    assert_eq!(
        events(&mut layout),
        [LayoutEvent::FirstPageChanged {
            old: Some(0),
            new: 1
        }]
    );

    layout.scroll_to_page(3, false, false);
    assert_eq!(
        events(&mut layout),
        [LayoutEvent::FirstPageChanged {
            old: Some(1),
            new: 3
        }]
    );
    assert_eq!(layout.first_page(), Some(3));
    assert_eq!(layout.visible_range(), Some(TrackRange { first: 6, last: 8 }));

    layout.scroll_to_page(5, false, false);
    assert!(events(&mut layout).is_empty(), "out of range pages are ignored");

    layout.adapter_mut().unwrap().len = 40;
    layout.refresh_current_items();
    assert_eq!(
        events(&mut layout),
        [
            LayoutEvent::PageCountChanged(7),
            LayoutEvent::FirstPageChanged { old: None, new: 3 },
        ]
    );
    assert_eq!(layout.page_count(), 7);
}

#[test]
fn horizontal_pages_use_columns_as_tracks() {
    let mut layout = layout(Axis::Horizontal, 3, 2, Size::new(100.0, 90.0), 30);
    assert_eq!(layout.page_count(), 5);
    assert_eq!(indices(&layout), [0, 2, 4, 1, 3, 5, 6, 8, 10]);
    let (_, view) = layout.visible_items().find(|(i, _)| *i == 3).unwrap();
    assert_eq!(view.origin(), Some(Point::new(50.0, 30.0)));

    // Item 11 is the second column of page 1.
    layout.scroll_to_item(11, 0.0, false, false);
    assert_eq!(
        layout.scroll_container().unwrap().content_position(),
        Point::new(150.0, 0.0)
    );
    assert_eq!(layout.visible_range(), Some(TrackRange { first: 3, last: 5 }));
    assert!(indices(&layout).contains(&11), "target item is visible");
    assert_window_and_pool(layout.visible_items(), layout.pool());
}

#[test]
fn short_pages_pin_the_range_when_overscrolled() {
    let mut layout = vertical(30);
    scroll_to(&mut layout, 400.0);
    let at_end = layout.visible_range();
    scroll_to(&mut layout, 460.0);
    assert_eq!(layout.visible_range(), at_end);
    assert_eq!(at_end, Some(TrackRange { first: 8, last: 9 }));
    assert_eq!(indices(&layout), (24..30).collect::<Vec<_>>());
}
