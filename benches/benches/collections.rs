// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_collections::{Deque, LinkedMap, MaxLen, Order, PriorityQueue};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

fn bench_deque(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque");

    for &len in &[16_usize, 256, 4_096] {
        group.bench_function(format!("slide_window(len={len})"), |b| {
            b.iter_batched(
                || {
                    let mut window = Deque::with_capacity(len);
                    for i in 0..len {
                        window.push_back(i);
                    }
                    window
                },
                |mut window| {
                    // Forward then back, the traffic of a scrolling list.
                    for i in len..len * 2 {
                        let _ = window.pop_front();
                        window.push_back(i);
                    }
                    for i in (0..len).rev() {
                        let _ = window.pop_back();
                        window.push_front(i);
                    }
                    black_box(window);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_linked_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_map");

    for &max in &[64_usize, 1_024] {
        group.bench_function(format!("lru_hits(max={max})"), |b| {
            b.iter_batched(
                || {
                    let mut map = LinkedMap::with_order(Order::Access);
                    map.set_eviction_policy(Some(Box::new(MaxLen::new(max))));
                    (map, Lcg::new(0x1ABE_0000_0000_0001))
                },
                |(mut map, mut rng)| {
                    for _ in 0..max * 4 {
                        // Keys from twice the capacity: about half the reads miss.
                        let key = rng.next_u32() as usize % (max * 2);
                        if map.get(&key).is_none() {
                            map.insert(key, key);
                        }
                    }
                    black_box(map.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_priority_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_queue");

    for &len in &[256_usize, 4_096] {
        group.bench_function(format!("push_pop(len={len})"), |b| {
            b.iter_batched(
                || Lcg::new(0x9E37_0000_0000_0001),
                |mut rng| {
                    let mut queue = PriorityQueue::with_capacity(len);
                    for _ in 0..len {
                        queue.push(rng.next_u32());
                    }
                    while let Ok(value) = queue.pop() {
                        black_box(value);
                    }
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("remove_arbitrary(len={len})"), |b| {
            b.iter_batched(
                || {
                    let values: Vec<u32> = (0..len as u32).collect();
                    let queue: PriorityQueue<u32> = values.iter().copied().collect();
                    (queue, values)
                },
                |(mut queue, values)| {
                    for value in values.iter().step_by(7) {
                        black_box(queue.remove(value));
                    }
                    black_box(queue);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_deque, bench_linked_map, bench_priority_queue);
criterion_main!(benches);
