// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dnd::hit_mode::{Adjacency, fraction_y, resolve_hit_mode};
use understory_dnd::types::{EnterResponse, HitMode, HitModes};

fn pointers(n: usize, row: Rect) -> Vec<Point> {
    // Evenly spread over the row, plus a few just outside it.
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * 1.2 - 0.1;
            Point::new(row.center().x, row.y0 + t * row.height())
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let row = Rect::new(0.0, 100.0, 240.0, 120.0);
    let pts = pointers(1024, row);
    let responses = [
        ("all", EnterResponse::Accept.normalize()),
        (
            "no_over",
            EnterResponse::Modes(HitModes::BEFORE | HitModes::AFTER).normalize(),
        ),
        ("pinned", EnterResponse::Pinned(HitMode::Over).normalize()),
    ];
    let adjacencies = [
        ("unrelated", Adjacency::default()),
        (
            "next_sibling",
            Adjacency {
                is_next_sibling: true,
                ..Adjacency::default()
            },
        ),
    ];

    let mut group = c.benchmark_group("resolve_hit_mode");
    group.throughput(Throughput::Elements(pts.len() as u64));
    for (rname, response) in responses {
        for (aname, adjacency) in adjacencies {
            group.bench_function(format!("{rname}/{aname}"), |b| {
                b.iter(|| {
                    let mut hits = 0_usize;
                    for &p in &pts {
                        let frac = fraction_y(p, row);
                        if resolve_hit_mode(black_box(response), frac, adjacency, true).is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
