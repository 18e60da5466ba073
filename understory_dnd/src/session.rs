// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state machine.
//!
//! ## Overview
//!
//! [`DragSessionController`] is either idle or dragging. While dragging it owns a
//! single [`DragSession`]; which node is hovered and which hit mode is active are
//! fields of that session, not controller states.
//!
//! Callers feed it node-resolved events:
//! - [`start`](DragSessionController::start) when a gesture begins,
//! - [`pointer_move`](DragSessionController::pointer_move) for every pointer move,
//! - [`release`](DragSessionController::release) when the gesture ends,
//! - [`tick`](DragSessionController::tick) when the auto-expand deadline passes.
//!
//! From these it derives the per-node `enter`, `over`, `drop` and `leave`
//! callbacks on the owning tree's [`DndPolicy`] and queues [`Feedback`] for
//! the renderer.
//!
//! ## Ordering
//!
//! For one gesture, callbacks fire as `start → (enter → over* → leave)* → [drop →] leave → stop`.
//! A `leave` for one node always precedes the `enter` for the next, so at most
//! one node is entered at any time. Every exit path (drop, cancel, vetoed or
//! replaced session) disarms the auto-expand timer and clears the session.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;

use crate::auto_expand::AutoExpandScheduler;
use crate::error::DndError;
use crate::feedback::{DropMarker, Feedback};
use crate::hit_mode::{Adjacency, fraction_y, resolve_hit_mode};
use crate::policy::DndPolicy;
use crate::registry::{TreeInstance, TreeRegistry};
use crate::tree::DndTree;
use crate::types::{HelperVisual, HitMode, HitResponse, NodeKey, StartOutcome};

/// Mutable state of one drag gesture, from `start` until `stop`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession<K> {
    source: K,
    current_target: Option<K>,
    previous_target: Option<K>,
    enter_response: Option<HitResponse>,
    hit_mode: Option<HitMode>,
    pending_expand: Option<K>,
    // Last marker sent for the current target, to only signal changes.
    shown: Option<(DropMarker, Option<bool>)>,
}

impl<K: Copy> DragSession<K> {
    fn new(source: K) -> Self {
        Self {
            source,
            current_target: None,
            previous_target: None,
            enter_response: None,
            hit_mode: None,
            pending_expand: None,
            shown: None,
        }
    }

    /// The node being dragged.
    pub fn source(&self) -> K {
        self.source
    }

    /// The node currently under the pointer.
    pub fn current_target(&self) -> Option<K> {
        self.current_target
    }

    /// The node that was under the pointer on the previous move.
    pub fn previous_target(&self) -> Option<K> {
        self.previous_target
    }

    /// Affinity of the current target, cached on enter.
    pub fn enter_response(&self) -> Option<HitResponse> {
        self.enter_response
    }

    /// Hit mode resolved by the last `over`.
    pub fn hit_mode(&self) -> Option<HitMode> {
        self.hit_mode
    }

    /// Node with an armed auto-expand timer.
    pub fn pending_expand(&self) -> Option<K> {
        self.pending_expand
    }
}

/// Owns the single live [`DragSession`] and runs the drag state machine.
#[derive(Clone, Debug)]
pub struct DragSessionController<K> {
    session: Option<DragSession<K>>,
    scheduler: AutoExpandScheduler<K>,
    feedback: Vec<Feedback<K>>,
}

impl<K: NodeKey> Default for DragSessionController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> DragSessionController<K> {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self {
            session: None,
            scheduler: AutoExpandScheduler::new(),
            feedback: Vec::new(),
        }
    }

    /// Returns true while a session is live.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    /// Drain queued visual feedback, oldest first.
    pub fn take_feedback(&mut self) -> Vec<Feedback<K>> {
        core::mem::take(&mut self.feedback)
    }

    /// The earliest pending auto-expand deadline; call [`tick`](Self::tick) at or after it.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Answer a helper request for `source`, or an error placeholder if it could not be resolved.
    pub fn helper(source: Option<K>) -> HelperVisual<K> {
        match source {
            Some(node) => HelperVisual::Node(node),
            None => {
                tracing::warn!("helper requested but source node not found");
                HelperVisual::Error("helper requested but source node not found")
            }
        }
    }

    /// Begin a gesture dragging `source`.
    ///
    /// The gesture is aborted without creating a session if the source tree does not
    /// drag, `source` is a placeholder, or the policy vetoes it.
    pub fn start<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
        source: K,
    ) -> Result<StartOutcome, DndError> {
        if let Some(stale) = &self.session {
            tracing::warn!(source = ?stale.source, "replacing stale drag session");
            if let Err(err) = self.stop(trees) {
                tracing::warn!(%err, "stale drag session could not be stopped cleanly");
            }
        }

        let inst = trees.get_mut(source.tree())?;
        let allowed = inst.policy.is_drag_source()
            && !inst.tree.is_placeholder(&source)
            && inst.policy.on_drag_start(&source);
        if !allowed {
            tracing::debug!(?source, "drag start cancelled");
            self.feedback.push(Feedback::HideHelper { node: source });
            return Ok(StartOutcome::Abort);
        }

        tracing::debug!(?source, "drag start");
        self.session = Some(DragSession::new(source));
        self.feedback.push(Feedback::DragSource {
            node: source,
            active: true,
        });
        Ok(StartOutcome::Proceed)
    }

    /// The pointer moved; `target` is the node now under it, or `None` outside any tree.
    ///
    /// Moving onto a different node leaves the old one and enters the new one.
    /// Moving within the same node runs hit-mode resolution for `pointer`.
    /// Ignored while idle.
    pub fn pointer_move<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
        target: Option<K>,
        pointer: Point,
        now: Duration,
    ) -> Result<(), DndError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let prev = session.current_target;
        if let Some(old) = prev
            && prev != target
        {
            self.leave(trees, old)?;
        }

        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.previous_target = prev;
        session.current_target = target;

        let Some(target) = target else {
            return Ok(());
        };
        let inst = trees.get_mut(target.tree())?;
        if !inst.policy.accepts_drops() {
            return Ok(());
        }
        if prev == Some(target) {
            self.over(inst, target, pointer, now);
        } else {
            self.enter(inst, target);
        }
        Ok(())
    }

    /// The gesture ended. `dropped` is true only for a primary-button release.
    ///
    /// Drops on the current target if a hit mode is active, leaves the target, then
    /// stops. The session is gone afterwards even if an error is returned.
    pub fn release<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
        dropped: bool,
    ) -> Result<(), DndError> {
        let Some(session) = &self.session else {
            tracing::warn!("release without a drag session");
            return Ok(());
        };
        let target = session.current_target;
        let result = match target {
            Some(target) => self.drop_on(trees, target, dropped),
            None => Ok(()),
        };
        let stopped = self.stop(trees);
        result.and(stopped)
    }

    /// Tear the session down and notify the source tree's policy.
    ///
    /// A still-entered target is left first. The session and all timers are cleared
    /// before any tree lookup, so an error here never leaves stale state behind.
    pub fn stop<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
    ) -> Result<(), DndError> {
        let entered = self.session.as_ref().and_then(|s| s.current_target);
        let left = match entered {
            Some(target) => self.leave(trees, target),
            None => Ok(()),
        };
        let Some(session) = self.session.take() else {
            return left;
        };
        self.scheduler.clear();
        let source = session.source;
        tracing::debug!(?source, "drag stop");
        self.feedback.push(Feedback::DragSource {
            node: source,
            active: false,
        });
        let inst = trees.get_mut(source.tree())?;
        inst.policy.on_drag_stop(&source);
        left
    }

    /// Fire auto-expand timers due at `now`. Returns the nodes that were expanded.
    pub fn tick<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
        now: Duration,
    ) -> Result<Vec<K>, DndError> {
        let mut expanded = Vec::new();
        for node in self.scheduler.fire_due(now) {
            if let Some(session) = self.session.as_mut()
                && session.pending_expand == Some(node)
            {
                session.pending_expand = None;
            }
            let inst = trees.get_mut(node.tree())?;
            if !inst.tree.is_expanded(&node) {
                tracing::debug!(?node, "auto-expand");
                inst.tree.expand(&node);
                expanded.push(node);
            }
        }
        Ok(expanded)
    }

    fn enter<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        inst: &mut TreeInstance<T, P>,
        target: K,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        debug_assert!(
            session.enter_response.is_none(),
            "enter while another node is entered"
        );
        let response = inst
            .policy
            .on_drag_enter(&target, &session.source)
            .normalize();
        tracing::debug!(?target, ?response, "drag enter");
        session.enter_response = Some(response);
        session.hit_mode = None;
        session.shown = Some((DropMarker::Out, None));
    }

    fn over<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        inst: &mut TreeInstance<T, P>,
        target: K,
        pointer: Point,
        now: Duration,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let source = session.source;
        let response = session.enter_response.unwrap_or(HitResponse::Rejected);
        if response.is_rejected() {
            session.hit_mode = None;
            return;
        }

        let frac_y = inst
            .tree
            .bounds(&target)
            .and_then(|bounds| fraction_y(pointer, bounds));
        let adjacency = Adjacency::between(&inst.tree, &target, &source);
        let mode = resolve_hit_mode(
            response,
            frac_y,
            adjacency,
            inst.options.prevent_void_moves,
        );
        session.hit_mode = mode;
        tracing::trace!(?target, ?mode, ?frac_y, "drag over");

        // Only `over` keeps (or arms) the expand timer; anything else cancels it.
        let delay = inst.options.auto_expand_delay;
        let expandable =
            inst.tree.has_children(&target) != Some(false) && !inst.tree.is_expanded(&target);
        if mode == Some(HitMode::Over) && !delay.is_zero() && expandable {
            if !self.scheduler.is_armed(&target) {
                self.scheduler.schedule(target, now, delay);
                session.pending_expand = Some(target);
            }
        } else if self.scheduler.cancel(&target) {
            session.pending_expand = None;
        }

        let accept = mode.map(|m| inst.policy.on_drag_over(&target, &source, m));
        let shown = (DropMarker::from(mode), accept);
        if session.shown != Some(shown) {
            session.shown = Some(shown);
            self.feedback.push(Feedback::Marker {
                source,
                target,
                marker: shown.0,
                accept,
            });
        }
    }

    fn drop_on<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
        target: K,
        dropped: bool,
    ) -> Result<(), DndError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        let source = session.source;
        let mode = session.hit_mode;
        self.scheduler.cancel(&target);
        if !dropped {
            tracing::debug!(?source, "drag cancelled");
        } else if let Some(mode) = mode {
            let inst = trees.get_mut(target.tree())?;
            if inst.policy.accepts_drops() {
                tracing::debug!(?target, ?source, ?mode, "drop");
                inst.policy.on_drop(&target, &source, mode);
            }
        }
        self.leave(trees, target)
    }

    fn leave<T: DndTree<K>, P: DndPolicy<K>>(
        &mut self,
        trees: &mut TreeRegistry<T, P>,
        target: K,
    ) -> Result<(), DndError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let source = session.source;
        self.scheduler.cancel(&target);
        if session.pending_expand == Some(target) {
            session.pending_expand = None;
        }
        if session.current_target == Some(target) {
            session.current_target = None;
        }
        session.enter_response = None;
        session.hit_mode = None;
        session.shown = None;

        let inst = trees.get_mut(target.tree())?;
        if inst.policy.accepts_drops() {
            tracing::debug!(?target, "drag leave");
            self.feedback.push(Feedback::Marker {
                source,
                target,
                marker: DropMarker::Out,
                accept: None,
            });
            inst.policy.on_drag_leave(&target, &source);
        }
        Ok(())
    }
}
