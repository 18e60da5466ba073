// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a row within one outline, wait for a folder to auto-expand, and drop into it.
//!
//! Run:
//! - `cargo run -p understory_demos --example dnd_outline`
//! - `RUST_LOG=understory_dnd=trace cargo run -p understory_demos --example dnd_outline`

use std::time::Duration;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_dnd::coordinator::{CrossTreeCoordinator, PointerEvent, PointerMechanism};
use understory_dnd::outline::{OutlineElement, OutlineNode, OutlineResolver, OutlineTree};
use understory_dnd::policy::DndPolicy;
use understory_dnd::types::{DndOptions, EnterResponse, HitMode, HitModes, TreeId};

/// Prints every callback; files accept `before`/`after` only, folders accept everything.
struct Printer {
    files: Vec<OutlineNode>,
}

impl DndPolicy<OutlineNode> for Printer {
    fn on_drag_start(&mut self, source: &OutlineNode) -> bool {
        println!("start  {source:?}");
        true
    }

    fn on_drag_enter(&mut self, target: &OutlineNode, _source: &OutlineNode) -> EnterResponse {
        println!("enter  {target:?}");
        if self.files.contains(target) {
            EnterResponse::from(HitModes::BEFORE | HitModes::AFTER)
        } else {
            EnterResponse::Accept
        }
    }

    fn on_drag_over(&mut self, target: &OutlineNode, _source: &OutlineNode, mode: HitMode) -> bool {
        println!("over   {target:?} {mode}");
        true
    }

    fn on_drop(&mut self, target: &OutlineNode, source: &OutlineNode, mode: HitMode) {
        println!("drop   {source:?} {mode} {target:?}");
    }

    fn on_drag_leave(&mut self, target: &OutlineNode, _source: &OutlineNode) {
        println!("leave  {target:?}");
    }

    fn on_drag_stop(&mut self, source: &OutlineNode) {
        println!("stop   {source:?}");
    }
}

#[derive(Debug, Default)]
struct Headless;

type Dnd = CrossTreeCoordinator<OutlineNode, OutlineTree, Printer, OutlineResolver, Headless>;

impl PointerMechanism for Headless {
    fn install_hooks(&mut self) {
        println!("(pointer hooks installed)");
    }

    fn cancel_current_gesture(&mut self) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let id = TreeId(0);
    let mut tree = OutlineTree::new(id);
    let notes = tree.insert(None, "notes.txt");
    let docs = tree.insert(None, "docs");
    tree.insert(Some(docs), "guide.md");
    let todo = tree.insert(None, "todo.txt");

    let mut dnd = Dnd::new(OutlineResolver, Headless);
    dnd.attach_tree(
        id,
        tree,
        Printer {
            files: vec![notes, todo],
        },
        DndOptions::default(),
    );

    let event = |dnd: &Dnd, y: f64, ms: u64| {
        let p = Point::new(40.0, y);
        let target = dnd
            .trees()
            .get(id)
            .ok()
            .and_then(|inst| inst.tree.node_at(p))
            .map(OutlineElement::Row);
        PointerEvent::new(target, p, Duration::from_millis(ms))
    };

    // Press on `notes.txt` and start dragging.
    let press = event(&dnd, 5.0, 0);
    dnd.on_helper_requested(&press);
    dnd.on_start(&press).expect("tree is attached");

    // Hover the middle of `docs` and keep still.
    for (y, ms) in [(30.0, 20), (30.0, 40), (31.0, 400)] {
        let ev = event(&dnd, y, ms);
        dnd.on_move(&ev).expect("tree is attached");
    }
    if let Some(deadline) = dnd.next_deadline() {
        let expanded = dnd.tick(deadline).expect("tree is attached");
        println!("auto-expanded {expanded:?} at {deadline:?}");
    }

    // `guide.md` is now visible; drop after it.
    for (y, ms) in [(57.0, 1100), (57.0, 1120)] {
        let ev = event(&dnd, y, ms);
        dnd.on_move(&ev).expect("tree is attached");
    }
    dnd.on_release(true).expect("tree is attached");

    for signal in dnd.take_feedback() {
        println!("feedback {signal:?} -> {:?}", signal.status());
    }
}
