// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-tree coordination: bridge raw pointer-drag events to the session controller.
//!
//! ## Overview
//!
//! The host's pointer-drag mechanism reports gestures in terms of its own
//! elements (rows, the floating drag visual, empty space). The
//! [`CrossTreeCoordinator`] owns the [`TreeRegistry`] and a
//! [`DragSessionController`], resolves elements to node keys with an
//! [`ElementResolver`], and forwards the result. Because every node key names
//! its tree, a drag that starts in one tree and ends in another needs no
//! special handling.
//!
//! ## Event flow
//!
//! 1. [`on_helper_requested`](CrossTreeCoordinator::on_helper_requested) when the gesture needs a drag visual.
//! 2. [`on_start`](CrossTreeCoordinator::on_start) once the gesture begins.
//! 3. [`on_move`](CrossTreeCoordinator::on_move) for each pointer move. Moves over the
//!    drag visual itself are ignored; moves over empty space leave the current target.
//! 4. [`on_release`](CrossTreeCoordinator::on_release) when the button goes up or the gesture is cancelled.
//!
//! Between events, call [`tick`](CrossTreeCoordinator::tick) at or after
//! [`next_deadline`](CrossTreeCoordinator::next_deadline) to fire auto-expand timers.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;

use crate::error::DndError;
use crate::feedback::Feedback;
use crate::policy::DndPolicy;
use crate::registry::{TreeInstance, TreeRegistry, ensure_hooks_registered};
use crate::session::DragSessionController;
use crate::tree::DndTree;
use crate::types::{DndOptions, HelperVisual, NodeKey, StartOutcome, TreeId};

/// A pointer event as reported by the drag mechanism.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<E> {
    /// The element under the pointer, if any.
    pub target: Option<E>,
    /// Pointer position in the host's coordinate space.
    pub position: Point,
    /// Monotonic timestamp of the event.
    pub time: Duration,
}

impl<E> PointerEvent<E> {
    /// Create an event.
    pub fn new(target: Option<E>, position: Point, time: Duration) -> Self {
        Self {
            target,
            position,
            time,
        }
    }
}

/// Maps host elements to node keys.
pub trait ElementResolver<E, K> {
    /// The node `element` renders, if any.
    fn node_of(&self, element: &E) -> Option<K>;

    /// Returns true if `element` is the floating drag visual (or part of it).
    fn is_drag_visual(&self, element: &E) -> bool;
}

/// The host's pointer-drag mechanism.
pub trait PointerMechanism {
    /// Install the global start/move/stop hooks.
    ///
    /// Called at most once per process, on the mechanism of whichever
    /// coordinator first attaches a tree that drags or accepts drops.
    fn install_hooks(&mut self);

    /// Abort the gesture in progress.
    ///
    /// The mechanism must then report the end of the gesture as a non-primary release,
    /// i.e. [`CrossTreeCoordinator::on_release`] with `was_left_button = false`.
    fn cancel_current_gesture(&mut self);
}

/// Routes one pointer mechanism's gestures across every attached tree.
///
/// The pointer hooks are process-wide, so a process runs a single coordinator.
/// A second one never gets its mechanism's hooks installed; see
/// [`installed_hooks`](Self::installed_hooks).
#[derive(Debug)]
pub struct CrossTreeCoordinator<K, T, P, R, M> {
    trees: TreeRegistry<T, P>,
    controller: DragSessionController<K>,
    resolver: R,
    mechanism: M,
    helper_source: Option<K>,
    installed_hooks: bool,
}

impl<K, T, P, R, M> CrossTreeCoordinator<K, T, P, R, M>
where
    K: NodeKey,
    T: DndTree<K>,
    P: DndPolicy<K>,
    M: PointerMechanism,
{
    /// Create a coordinator with no attached trees.
    pub fn new(resolver: R, mechanism: M) -> Self {
        Self {
            trees: TreeRegistry::new(),
            controller: DragSessionController::new(),
            resolver,
            mechanism,
            helper_source: None,
            installed_hooks: false,
        }
    }

    /// Attach a tree instance under `id`, returning any instance it replaces.
    ///
    /// The first instance that drags or accepts drops installs the pointer hooks
    /// through this coordinator's mechanism, unless another coordinator in the
    /// process already did. Instances that do neither are registered but stay inert.
    pub fn attach_tree(
        &mut self,
        id: TreeId,
        tree: T,
        policy: P,
        options: DndOptions,
    ) -> Option<TreeInstance<T, P>> {
        if policy.is_drag_source() || policy.accepts_drops() {
            if !self.installed_hooks {
                let mechanism = &mut self.mechanism;
                self.installed_hooks = ensure_hooks_registered(|| mechanism.install_hooks());
                if !self.installed_hooks {
                    tracing::warn!(?id, "pointer hooks already installed by another coordinator");
                }
            }
        } else {
            tracing::debug!(?id, "tree neither drags nor accepts drops");
        }
        self.trees
            .attach(id, TreeInstance::new(tree, policy, options))
    }

    /// Detach the tree instance `id`.
    ///
    /// A live session touching that tree is stopped first.
    pub fn detach_tree(&mut self, id: TreeId) -> Option<TreeInstance<T, P>> {
        let touches = self.controller.session().is_some_and(|s| {
            s.source().tree() == id || s.current_target().is_some_and(|t| t.tree() == id)
        });
        if touches && let Err(err) = self.controller.stop(&mut self.trees) {
            tracing::warn!(%err, "drag session stopped with an error on detach");
        }
        self.trees.detach(id)
    }

    /// The attached tree instances.
    pub fn trees(&self) -> &TreeRegistry<T, P> {
        &self.trees
    }

    /// Mutable access to the attached tree instances.
    pub fn trees_mut(&mut self) -> &mut TreeRegistry<T, P> {
        &mut self.trees
    }

    /// The session controller.
    pub fn controller(&self) -> &DragSessionController<K> {
        &self.controller
    }

    /// The element resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The pointer mechanism.
    pub fn mechanism(&self) -> &M {
        &self.mechanism
    }

    /// Mutable access to the pointer mechanism.
    pub fn mechanism_mut(&mut self) -> &mut M {
        &mut self.mechanism
    }

    /// Returns true if the pointer hooks were installed through this coordinator's mechanism.
    pub fn installed_hooks(&self) -> bool {
        self.installed_hooks
    }

    /// Returns true while a drag session is live.
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Drain queued visual feedback.
    pub fn take_feedback(&mut self) -> Vec<Feedback<K>> {
        self.controller.take_feedback()
    }

    /// Earliest pending auto-expand deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.controller.next_deadline()
    }

    /// Fire auto-expand timers due at `now`. Returns the expanded nodes.
    pub fn tick(&mut self, now: Duration) -> Result<Vec<K>, DndError> {
        self.controller.tick(&mut self.trees, now)
    }

    /// The mechanism needs a drag visual for a gesture starting on `event.target`.
    ///
    /// The resolved source is remembered for the following [`on_start`](Self::on_start).
    pub fn on_helper_requested<E>(&mut self, event: &PointerEvent<E>) -> HelperVisual<K>
    where
        R: ElementResolver<E, K>,
    {
        let source = event
            .target
            .as_ref()
            .and_then(|e| self.resolver.node_of(e));
        self.helper_source = source;
        DragSessionController::helper(source)
    }

    /// The gesture began.
    ///
    /// Uses the source remembered from the helper request, or resolves `event.target`
    /// if there was none. If no source node can be found the gesture proceeds
    /// without a session and every later event is ignored.
    pub fn on_start<E>(&mut self, event: &PointerEvent<E>) -> Result<StartOutcome, DndError>
    where
        R: ElementResolver<E, K>,
    {
        let source = self.helper_source.take().or_else(|| {
            event
                .target
                .as_ref()
                .and_then(|e| self.resolver.node_of(e))
        });
        let Some(source) = source else {
            tracing::warn!("drag started without a source node");
            return Ok(StartOutcome::Proceed);
        };
        self.controller.start(&mut self.trees, source)
    }

    /// The pointer moved during a gesture.
    pub fn on_move<E>(&mut self, event: &PointerEvent<E>) -> Result<(), DndError>
    where
        R: ElementResolver<E, K>,
    {
        if !self.controller.is_dragging() {
            return Ok(());
        }
        let target = match &event.target {
            Some(e) if self.resolver.is_drag_visual(e) => {
                tracing::trace!("pointer over drag visual");
                return Ok(());
            }
            Some(e) => self.resolver.node_of(e),
            None => None,
        };
        self.controller
            .pointer_move(&mut self.trees, target, event.position, event.time)
    }

    /// The gesture ended. Only a primary-button release drops.
    pub fn on_release(&mut self, was_left_button: bool) -> Result<(), DndError> {
        self.helper_source = None;
        if !self.controller.is_dragging() {
            return Ok(());
        }
        self.controller.release(&mut self.trees, was_left_button)
    }

    /// Abort the live gesture through the pointer mechanism.
    ///
    /// Returns false (and does nothing) if no session is live.
    pub fn cancel(&mut self) -> bool {
        if !self.controller.is_dragging() {
            return false;
        }
        tracing::debug!("cancelling drag gesture");
        self.mechanism.cancel_current_gesture();
        true
    }
}
