// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixture: two outlines side by side driven through one coordinator.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Point;
use understory_dnd::coordinator::{CrossTreeCoordinator, PointerEvent, PointerMechanism};
use understory_dnd::outline::{OutlineElement, OutlineNode, OutlineResolver, OutlineTree};
use understory_dnd::policy::DndPolicy;
use understory_dnd::tree::DndTree;
use understory_dnd::types::{DndOptions, EnterResponse, HitMode, NodeKey, TreeId};

pub(crate) const LEFT: TreeId = TreeId(1);
pub(crate) const RIGHT: TreeId = TreeId(2);

/// One observed policy callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Start(OutlineNode),
    Enter(OutlineNode),
    Over(OutlineNode, HitMode),
    Drop {
        target: OutlineNode,
        source: OutlineNode,
        mode: HitMode,
    },
    Leave(OutlineNode),
    Stop(OutlineNode),
}

pub(crate) type Log = Rc<RefCell<Vec<Call>>>;

/// Policy recording every callback into a log shared by all trees.
#[derive(Clone, Debug)]
pub(crate) struct Recorder {
    pub(crate) log: Log,
    pub(crate) drag_source: bool,
    pub(crate) accepts: bool,
    pub(crate) veto_start: bool,
    pub(crate) enter: EnterResponse,
    /// Answer every `on_drag_over` with a rejection.
    pub(crate) reject_over: bool,
}

impl Recorder {
    pub(crate) fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            drag_source: true,
            accepts: true,
            veto_start: false,
            enter: EnterResponse::Accept,
            reject_over: false,
        }
    }

    pub(crate) fn inert(log: &Log) -> Self {
        Self {
            drag_source: false,
            accepts: false,
            ..Self::new(log)
        }
    }
}

impl DndPolicy<OutlineNode> for Recorder {
    fn is_drag_source(&self) -> bool {
        self.drag_source
    }

    fn accepts_drops(&self) -> bool {
        self.accepts
    }

    fn on_drag_start(&mut self, source: &OutlineNode) -> bool {
        self.log.borrow_mut().push(Call::Start(*source));
        !self.veto_start
    }

    fn on_drag_enter(&mut self, target: &OutlineNode, _source: &OutlineNode) -> EnterResponse {
        self.log.borrow_mut().push(Call::Enter(*target));
        self.enter
    }

    fn on_drag_over(&mut self, target: &OutlineNode, _source: &OutlineNode, mode: HitMode) -> bool {
        self.log.borrow_mut().push(Call::Over(*target, mode));
        !self.reject_over
    }

    fn on_drop(&mut self, target: &OutlineNode, source: &OutlineNode, mode: HitMode) {
        self.log.borrow_mut().push(Call::Drop {
            target: *target,
            source: *source,
            mode,
        });
    }

    fn on_drag_leave(&mut self, target: &OutlineNode, _source: &OutlineNode) {
        self.log.borrow_mut().push(Call::Leave(*target));
    }

    fn on_drag_stop(&mut self, source: &OutlineNode) {
        self.log.borrow_mut().push(Call::Stop(*source));
    }
}

/// Counts what the coordinator asks of the pointer mechanism.
#[derive(Debug, Default)]
pub(crate) struct Mechanism {
    pub(crate) installs: usize,
    pub(crate) cancels: usize,
}

impl PointerMechanism for Mechanism {
    fn install_hooks(&mut self) {
        self.installs += 1;
    }

    fn cancel_current_gesture(&mut self) {
        self.cancels += 1;
    }
}

pub(crate) type Dnd =
    CrossTreeCoordinator<OutlineNode, OutlineTree, Recorder, OutlineResolver, Mechanism>;

/// Rows of one fixture tree: `a`, `b` (collapsed, child `b1`), `c`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Rows {
    pub(crate) a: OutlineNode,
    pub(crate) b: OutlineNode,
    pub(crate) b1: OutlineNode,
    pub(crate) c: OutlineNode,
}

pub(crate) fn outline(id: TreeId, origin: Point) -> (OutlineTree, Rows) {
    let mut tree = OutlineTree::new(id).with_origin(origin);
    let a = tree.insert(None, "a");
    let b = tree.insert(None, "b");
    let b1 = tree.insert(Some(b), "b1");
    let c = tree.insert(None, "c");
    (tree, Rows { a, b, b1, c })
}

pub(crate) struct Fixture {
    pub(crate) dnd: Dnd,
    pub(crate) log: Log,
    pub(crate) left: Rows,
    pub(crate) right: Rows,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with(DndOptions::default(), |_| {})
    }

    /// Build both trees, letting `tweak` adjust the right tree's policy.
    pub(crate) fn with(options: DndOptions, tweak: impl FnOnce(&mut Recorder)) -> Self {
        let log = Log::default();
        let (lt, left) = outline(LEFT, Point::ORIGIN);
        let (rt, right) = outline(RIGHT, Point::new(300.0, 0.0));
        let mut right_policy = Recorder::new(&log);
        tweak(&mut right_policy);
        let mut dnd = Dnd::new(OutlineResolver, Mechanism::default());
        dnd.attach_tree(LEFT, lt, Recorder::new(&log), options);
        dnd.attach_tree(RIGHT, rt, right_policy, options);
        Self {
            dnd,
            log,
            left,
            right,
        }
    }

    pub(crate) fn tree(&self, id: TreeId) -> &OutlineTree {
        &self.dnd.trees().get(id).expect("fixture tree").tree
    }

    /// Event over `node` at vertical fraction `frac` of its row.
    pub(crate) fn at(
        &self,
        node: OutlineNode,
        frac: f64,
        ms: u64,
    ) -> PointerEvent<OutlineElement> {
        let tree = self.tree(node.tree());
        let pos = tree.point_in(node, frac).expect("row is visible");
        PointerEvent::new(Some(OutlineElement::Row(node)), pos, Duration::from_millis(ms))
    }

    pub(crate) fn element(
        &self,
        element: OutlineElement,
        ms: u64,
    ) -> PointerEvent<OutlineElement> {
        PointerEvent::new(
            Some(element),
            Point::new(-10.0, -10.0),
            Duration::from_millis(ms),
        )
    }

    pub(crate) fn begin(&mut self, source: OutlineNode) {
        let ev = self.at(source, 0.5, 0);
        self.dnd.on_helper_requested(&ev);
        self.dnd.on_start(&ev).expect("start");
    }

    /// Two moves over `node`: the first enters, the second resolves a hit mode.
    pub(crate) fn hover(&mut self, node: OutlineNode, frac: f64, ms: u64) {
        let ev = self.at(node, frac, ms);
        self.dnd.on_move(&ev).expect("move");
        self.dnd.on_move(&ev).expect("move");
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub(crate) fn is_expanded(&self, node: OutlineNode) -> bool {
        self.tree(node.tree()).is_expanded(&node)
    }
}
