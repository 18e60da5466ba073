// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One gesture spanning two outlines: a read-only palette on the left and an
//! editable list on the right. Shows that a drag started in one tree drops into
//! another, that void moves only apply within the source's own tree, and how
//! a cancelled gesture ends.
//!
//! Run:
//! - `cargo run -p understory_demos --example dnd_cross_tree`

use std::time::Duration;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_dnd::coordinator::{CrossTreeCoordinator, PointerEvent, PointerMechanism};
use understory_dnd::outline::{OutlineElement, OutlineNode, OutlineResolver, OutlineTree};
use understory_dnd::policy::DndPolicy;
use understory_dnd::types::{DndOptions, EnterResponse, HitMode, TreeId};

const PALETTE: TreeId = TreeId(1);
const LIST: TreeId = TreeId(2);

/// The palette only lends items; the list takes them anywhere.
struct Role {
    name: &'static str,
    accepts: bool,
}

impl DndPolicy<OutlineNode> for Role {
    fn accepts_drops(&self) -> bool {
        self.accepts
    }

    fn on_drag_enter(&mut self, target: &OutlineNode, _source: &OutlineNode) -> EnterResponse {
        println!("[{}] enter {target:?}", self.name);
        EnterResponse::Accept
    }

    fn on_drop(&mut self, target: &OutlineNode, source: &OutlineNode, mode: HitMode) {
        println!("[{}] drop {source:?} {mode} {target:?}", self.name);
    }

    fn on_drag_leave(&mut self, target: &OutlineNode, _source: &OutlineNode) {
        println!("[{}] leave {target:?}", self.name);
    }

    fn on_drag_stop(&mut self, source: &OutlineNode) {
        println!("[{}] stop {source:?}", self.name);
    }
}

/// Stands in for a real pointer mechanism: a cancel is reported back as a non-primary release.
#[derive(Debug, Default)]
struct Scripted {
    cancelled: bool,
}

impl PointerMechanism for Scripted {
    fn install_hooks(&mut self) {}

    fn cancel_current_gesture(&mut self) {
        self.cancelled = true;
    }
}

type Dnd = CrossTreeCoordinator<OutlineNode, OutlineTree, Role, OutlineResolver, Scripted>;

fn at(dnd: &Dnd, p: Point, ms: u64) -> PointerEvent<OutlineElement> {
    let target = dnd
        .trees()
        .iter()
        .find_map(|(_, inst)| inst.tree.node_at(p))
        .map_or(OutlineElement::Background, OutlineElement::Row);
    PointerEvent::new(Some(target), p, Duration::from_millis(ms))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut palette = OutlineTree::new(PALETTE);
    for label in ["button", "slider", "checkbox"] {
        palette.insert(None, label);
    }
    let mut list = OutlineTree::new(LIST).with_origin(Point::new(300.0, 0.0));
    for label in ["header", "body", "footer"] {
        list.insert(None, label);
    }

    let mut dnd = Dnd::new(OutlineResolver, Scripted::default());
    dnd.attach_tree(
        PALETTE,
        palette,
        Role {
            name: "palette",
            accepts: false,
        },
        DndOptions::default(),
    );
    dnd.attach_tree(
        LIST,
        list,
        Role {
            name: "list",
            accepts: true,
        },
        DndOptions::default(),
    );

    println!("-- drag `slider` between `header` and `body`");
    let press = at(&dnd, Point::new(50.0, 25.0), 0);
    dnd.on_helper_requested(&press);
    dnd.on_start(&press).expect("palette is attached");
    for (p, ms) in [
        // Over the palette itself: it accepts no drops, so nothing happens.
        (Point::new(50.0, 45.0), 10),
        (Point::new(350.0, 3.0), 20),
        (Point::new(350.0, 3.0), 30),
        (Point::new(350.0, 24.0), 40),
    ] {
        let ev = at(&dnd, p, ms);
        dnd.on_move(&ev).expect("trees are attached");
    }
    dnd.on_release(true).expect("trees are attached");

    println!("-- start again and cancel halfway");
    let press = at(&dnd, Point::new(50.0, 5.0), 100);
    dnd.on_helper_requested(&press);
    dnd.on_start(&press).expect("palette is attached");
    let ev = at(&dnd, Point::new(350.0, 50.0), 110);
    dnd.on_move(&ev).expect("list is attached");
    dnd.cancel();
    if dnd.mechanism().cancelled {
        dnd.on_release(false).expect("trees are attached");
    }
    println!("dragging after cancel: {}", dnd.is_dragging());
}
