// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::num::NonZeroUsize;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_recycle_list::{
    Axis, FixedSizeAdapter, FlexibleAdapter, GridConfig, GridLayout, ItemView, LayoutContext,
    LayoutOptions, LinearConfig, LinearLayout, ManualClock, Placement, RecyclingLayout,
    ScrollState, ViewType,
};

struct Cell {
    view_type: ViewType,
    size: Size,
    origin: Point,
    bound: usize,
}

impl ItemView for Cell {
    fn view_type(&self) -> ViewType {
        self.view_type
    }

    fn measure(&mut self) -> Size {
        self.size
    }

    fn place(&mut self, placement: Placement) {
        self.origin = placement.origin;
    }

    fn set_visible(&mut self, _visible: bool) {}
}

/// Rows of three kinds with kind-dependent heights.
struct Feed {
    len: usize,
}

impl FlexibleAdapter for Feed {
    type View = Cell;

    fn len(&self) -> usize {
        self.len
    }

    fn view_type_of(&self, position: usize) -> ViewType {
        ViewType::new(position % 3)
    }

    fn view_type_count(&self) -> usize {
        3
    }

    fn create_view(&mut self, position: usize, _: &LayoutContext) -> Cell {
        Cell {
            view_type: self.view_type_of(position),
            size: Size::ZERO,
            origin: Point::ORIGIN,
            bound: 0,
        }
    }

    fn bind(&mut self, position: usize, view: &mut Cell, _: &LayoutContext) {
        view.bound = position;
        view.size = Size::new(320.0, 40.0 + 20.0 * (position % 3) as f64);
    }
}

struct Tiles {
    len: usize,
}

impl FixedSizeAdapter for Tiles {
    type View = Cell;

    fn len(&self) -> usize {
        self.len
    }

    fn item_size(&self) -> Size {
        Size::new(80.0, 80.0)
    }

    fn create_view(&mut self, _: &LayoutContext) -> Cell {
        Cell {
            view_type: ViewType::DEFAULT,
            size: Size::new(80.0, 80.0),
            origin: Point::ORIGIN,
            bound: 0,
        }
    }

    fn bind(&mut self, position: usize, view: &mut Cell, _: &LayoutContext) {
        view.bound = position;
    }
}

fn linear(len: usize) -> LinearLayout<Feed, ScrollState, ManualClock> {
    let mut layout =
        LinearLayout::new(LinearConfig::default(), LayoutOptions::default(), ManualClock::new());
    layout.set_scroll_container(Some(ScrollState::new(
        Axis::Vertical,
        Size::new(320.0, 640.0),
    )));
    layout.set_adapter(Some(Feed { len }), false);
    layout
}

fn grid(len: usize) -> GridLayout<Tiles, ScrollState, ManualClock> {
    let config = GridConfig {
        cross_count: NonZeroUsize::new(4).unwrap(),
        ..GridConfig::default()
    };
    let mut layout = GridLayout::new(config, LayoutOptions::default(), ManualClock::new());
    layout.set_scroll_container(Some(ScrollState::new(
        Axis::Vertical,
        Size::new(320.0, 640.0),
    )));
    layout.set_adapter(Some(Tiles { len }), false);
    layout
}

fn fling<L: RecyclingLayout>(
    layout: &mut L,
    scroll: impl Fn(&mut L) -> Option<&mut ScrollState>,
    steps: u32,
    stride: f64,
) {
    for i in 1..=steps {
        let y = f64::from(i) * stride;
        let change = scroll(layout).and_then(|scroll| scroll.scroll_to(Point::new(0.0, y)));
        if let Some(change) = change {
            layout.on_content_position_changed(change.old, change.new);
        }
    }
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_layout");
    group.sample_size(50);

    group.bench_function("fling(len=10000,steps=500)", |b| {
        b.iter_batched(
            || linear(10_000),
            |mut layout| {
                fling(&mut layout, |l| l.scroll_container_mut(), 500, 37.0);
                black_box(layout.first_position());
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("jump(len=10000)", |b| {
        b.iter_batched(
            || linear(10_000),
            |mut layout| {
                layout.scroll_to_item(9_000, 0.0);
                black_box(layout.visible_len());
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_layout");
    group.sample_size(50);

    group.bench_function("fling(len=40000,steps=500)", |b| {
        b.iter_batched(
            || grid(40_000),
            |mut layout| {
                fling(&mut layout, |l| l.scroll_container_mut(), 500, 53.0);
                black_box(layout.visible_range());
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_linear, bench_grid);
criterion_main!(benches);
