// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for drag and drop: tree identity, hit modes, affinity responses and options.
//!
//! ## Overview
//!
//! These types describe the inputs and outputs of the session engine.
//! They are referenced by the [`hit_mode`](crate::hit_mode) resolver, the
//! [`session`](crate::session) controller and the [`coordinator`](crate::coordinator).

use core::fmt;
use core::time::Duration;

/// Identifier for a tree instance attached to a [`TreeRegistry`](crate::registry::TreeRegistry).
///
/// Chosen by the host; the registry keys instances by it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TreeId(pub u32);

/// A node handle that knows which tree instance owns it.
///
/// Every node belongs to exactly one tree instance. The engine uses [`NodeKey::tree`]
/// to dispatch each callback against the owning instance, which is what lets a
/// drag start in one tree and end in another.
pub trait NodeKey: Copy + Eq + fmt::Debug {
    /// Returns the tree instance that owns this node.
    fn tree(&self) -> TreeId;
}

/// Semantic meaning of hovering a target node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HitMode {
    /// Insert the source before the target.
    Before,
    /// Drop the source onto (into) the target.
    Over,
    /// Insert the source after the target.
    After,
}

impl HitMode {
    /// The single-mode flag set for this hit mode.
    pub const fn flag(self) -> HitModes {
        match self {
            Self::Before => HitModes::BEFORE,
            Self::Over => HitModes::OVER,
            Self::After => HitModes::AFTER,
        }
    }

    /// Lowercase name, as used in logs and by string-based hosts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::Over => "over",
            Self::After => "after",
        }
    }
}

impl fmt::Display for HitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Set of hit modes a target permits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HitModes: u8 {
        /// Insert before the target.
        const BEFORE = 0b0000_0001;
        /// Drop onto the target.
        const OVER   = 0b0000_0010;
        /// Insert after the target.
        const AFTER  = 0b0000_0100;
    }
}

impl From<HitMode> for HitModes {
    fn from(mode: HitMode) -> Self {
        mode.flag()
    }
}

/// Affinity decision returned by [`DndPolicy::on_drag_enter`](crate::policy::DndPolicy::on_drag_enter).
///
/// Made once when the pointer enters a target and reused for every following
/// `over` on that target.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EnterResponse {
    /// All three hit modes are permitted.
    Accept,
    /// No hit mode is permitted; `over` produces no callback and no visual.
    Reject,
    /// Only the given modes are permitted; the pointer position picks among them.
    Modes(HitModes),
    /// Always use this mode regardless of pointer position.
    Pinned(HitMode),
}

impl EnterResponse {
    /// Normalize into the form cached by the session.
    ///
    /// An empty [`Modes`](Self::Modes) set is the same as [`Reject`](Self::Reject).
    pub fn normalize(self) -> HitResponse {
        match self {
            Self::Accept => HitResponse::Allowed(HitModes::all()),
            Self::Reject => HitResponse::Rejected,
            Self::Modes(modes) if modes.is_empty() => HitResponse::Rejected,
            Self::Modes(modes) => HitResponse::Allowed(modes),
            Self::Pinned(mode) => HitResponse::Pinned(mode),
        }
    }
}

impl From<bool> for EnterResponse {
    fn from(accept: bool) -> Self {
        if accept { Self::Accept } else { Self::Reject }
    }
}

impl From<HitMode> for EnterResponse {
    /// A single mode restricts banding to that mode; it does not pin it.
    fn from(mode: HitMode) -> Self {
        Self::Modes(mode.flag())
    }
}

impl From<HitModes> for EnterResponse {
    fn from(modes: HitModes) -> Self {
        Self::Modes(modes)
    }
}

/// Normalized affinity cached on the [`DragSession`](crate::session::DragSession).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HitResponse {
    /// The target refused every hit mode.
    Rejected,
    /// The target permits this non-empty subset of hit modes.
    Allowed(HitModes),
    /// The target pinned a single hit mode; geometry is skipped.
    Pinned(HitMode),
}

impl HitResponse {
    /// Returns true if the target refused every hit mode.
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Per-tree drag-and-drop configuration.
///
/// Immutable for the lifetime of a tree instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DndOptions {
    /// Hover time in `over` mode before a collapsed node expands. Zero disables auto-expand.
    pub auto_expand_delay: Duration,
    /// Refuse drops that would leave the tree unchanged (e.g. before the source's own next sibling).
    pub prevent_void_moves: bool,
}

impl DndOptions {
    /// Default auto-expand delay.
    pub const DEFAULT_AUTO_EXPAND_DELAY: Duration = Duration::from_millis(1000);

    /// Default options: one second auto-expand, void moves prevented.
    pub const fn new() -> Self {
        Self {
            auto_expand_delay: Self::DEFAULT_AUTO_EXPAND_DELAY,
            prevent_void_moves: true,
        }
    }

    /// Set the auto-expand delay.
    #[must_use]
    pub const fn with_auto_expand_delay(mut self, delay: Duration) -> Self {
        self.auto_expand_delay = delay;
        self
    }

    /// Enable or disable void-move prevention.
    #[must_use]
    pub const fn with_prevent_void_moves(mut self, prevent: bool) -> Self {
        self.prevent_void_moves = prevent;
        self
    }
}

impl Default for DndOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The drag visual handed back to the pointer mechanism on a helper request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HelperVisual<K> {
    /// Build the visual from this source node's presentation.
    Node(K),
    /// The source could not be resolved; show this message instead of failing the drag.
    Error(&'static str),
}

/// Whether the pointer mechanism should carry on with a gesture after `start`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StartOutcome {
    /// Keep dragging.
    Proceed,
    /// Cancel the gesture and hide the helper.
    Abort,
}
