// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied drag-and-drop policy.
//!
//! A [`DndPolicy`] decides what may be dragged, where it may be dropped and
//! what a drop means. The engine never moves or copies data itself; that is
//! the job of [`DndPolicy::on_drop`].
//!
//! Every method has a default, so a policy only overrides what it cares about.
//! Callbacks run synchronously and must not start a new drag gesture.

use crate::types::{EnterResponse, HitMode};

/// Callbacks invoked by the session controller over the course of a gesture.
///
/// For a single gesture they fire in the order
/// `start → (enter → over* → leave)* → [drop →] leave → stop`.
pub trait DndPolicy<K> {
    /// Whether nodes of this tree can be dragged at all.
    fn is_drag_source(&self) -> bool {
        true
    }

    /// Whether nodes of this tree accept drops.
    ///
    /// When false, hovering this tree's nodes produces no enter, over or leave callbacks.
    fn accepts_drops(&self) -> bool {
        true
    }

    /// A drag of `source` is about to start. Return false to veto it.
    fn on_drag_start(&mut self, _source: &K) -> bool {
        true
    }

    /// The pointer entered `target` while dragging `source`. Decide which hit modes it permits.
    fn on_drag_enter(&mut self, _target: &K, _source: &K) -> EnterResponse {
        EnterResponse::Accept
    }

    /// The pointer moved over `target` with the resolved `mode`. Return false to show a reject state.
    fn on_drag_over(&mut self, _target: &K, _source: &K, _mode: HitMode) -> bool {
        true
    }

    /// `source` was released over `target` with `mode`.
    fn on_drop(&mut self, _target: &K, _source: &K, _mode: HitMode) {}

    /// The pointer left `target`.
    fn on_drag_leave(&mut self, _target: &K, _source: &K) {}

    /// The gesture that dragged `source` ended, dropped or not.
    fn on_drag_stop(&mut self, _source: &K) {}
}

impl<K, P: DndPolicy<K> + ?Sized> DndPolicy<K> for alloc::boxed::Box<P> {
    fn is_drag_source(&self) -> bool {
        (**self).is_drag_source()
    }

    fn accepts_drops(&self) -> bool {
        (**self).accepts_drops()
    }

    fn on_drag_start(&mut self, source: &K) -> bool {
        (**self).on_drag_start(source)
    }

    fn on_drag_enter(&mut self, target: &K, source: &K) -> EnterResponse {
        (**self).on_drag_enter(target, source)
    }

    fn on_drag_over(&mut self, target: &K, source: &K, mode: HitMode) -> bool {
        (**self).on_drag_over(target, source, mode)
    }

    fn on_drop(&mut self, target: &K, source: &K, mode: HitMode) {
        (**self).on_drop(target, source, mode);
    }

    fn on_drag_leave(&mut self, target: &K, source: &K) {
        (**self).on_drag_leave(target, source);
    }

    fn on_drag_stop(&mut self, source: &K) {
        (**self).on_drag_stop(source);
    }
}

/// A policy that drags nothing and accepts no drops.
///
/// Attach a tree with this policy to let the pointer pass over it without any
/// drag-and-drop behaviour.
#[derive(Copy, Clone, Debug, Default)]
pub struct Inert;

impl<K> DndPolicy<K> for Inert {
    fn is_drag_source(&self) -> bool {
        false
    }

    fn accepts_drops(&self) -> bool {
        false
    }
}
