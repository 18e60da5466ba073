// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_dnd::outline::{OutlineNode, OutlineTree};
use understory_dnd::policy::DndPolicy;
use understory_dnd::registry::{TreeInstance, TreeRegistry};
use understory_dnd::session::DragSessionController;
use understory_dnd::types::{DndOptions, TreeId};

#[derive(Default)]
struct Counting(u64);

impl DndPolicy<OutlineNode> for Counting {
    fn on_drag_over(
        &mut self,
        _target: &OutlineNode,
        _source: &OutlineNode,
        _mode: understory_dnd::types::HitMode,
    ) -> bool {
        self.0 += 1;
        true
    }
}

fn flat(rows: usize) -> (OutlineTree, Vec<OutlineNode>) {
    let mut tree = OutlineTree::new(TreeId(0));
    let nodes = (0..rows).map(|i| tree.insert(None, format!("row {i}"))).collect();
    (tree, nodes)
}

/// A pointer sweeping down the whole outline, one move per pixel.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_sweep");
    for &rows in &[32_usize, 256] {
        let (tree, nodes) = flat(rows);
        let height = rows as f64 * OutlineTree::ROW_HEIGHT;
        let moves: Vec<(Option<OutlineNode>, Point)> = (0..height as usize)
            .map(|y| {
                let p = Point::new(50.0, y as f64 + 0.5);
                (tree.node_at(p), p)
            })
            .collect();
        group.throughput(Throughput::Elements(moves.len() as u64));
        group.bench_function(format!("rows_{rows}"), |b| {
            b.iter_batched(
                || {
                    let mut trees = TreeRegistry::new();
                    trees.attach(
                        TreeId(0),
                        TreeInstance::new(tree.clone(), Counting::default(), DndOptions::default()),
                    );
                    (trees, DragSessionController::<OutlineNode>::new())
                },
                |(mut trees, mut ctl)| {
                    ctl.start(&mut trees, nodes[0]).unwrap();
                    for (i, &(target, p)) in moves.iter().enumerate() {
                        let now = Duration::from_millis(i as u64);
                        ctl.pointer_move(&mut trees, target, p, now).unwrap();
                    }
                    ctl.release(&mut trees, true).unwrap();
                    black_box(ctl.take_feedback().len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
