// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory `DnD`: a deterministic, `no_std` drag-and-drop session engine for tree widgets.
//!
//! ## Overview
//!
//! This crate turns a raw pointer-drag gesture (start, move, release) into a
//! per-node sequence of drag-and-drop callbacks on caller-supplied policies:
//! start → enter → over → drop → leave → stop. It decides, for every pointer
//! position, whether a drop would land *before*, *over* (into) or *after* the
//! hovered node, refuses drops that would change nothing, and expands collapsed
//! nodes that are hovered long enough.
//!
//! It does not render, hit test rows, or move data. Rendering is driven by
//! [`Feedback`](crate::feedback::Feedback) values, hit testing by the host's
//! [`ElementResolver`](crate::coordinator::ElementResolver), and what a drop
//! means by [`DndPolicy::on_drop`](crate::policy::DndPolicy::on_drop).
//!
//! ## Pieces
//!
//! - [`types`]: node keys, hit modes, enter responses and per-tree [`DndOptions`](crate::types::DndOptions).
//! - [`tree`]: [`DndTree`](crate::tree::DndTree), the structure and layout queries the engine needs.
//! - [`policy`]: [`DndPolicy`](crate::policy::DndPolicy), the caller's callbacks.
//! - [`hit_mode`]: pure before/over/after resolution with void-move prevention.
//! - [`auto_expand`]: per-node delayed expand timers.
//! - [`session`]: [`DragSessionController`](crate::session::DragSessionController), the state machine.
//! - [`registry`]: tree instances and the process-wide pointer-hook guard.
//! - [`coordinator`]: [`CrossTreeCoordinator`](crate::coordinator::CrossTreeCoordinator), which resolves
//!   host elements and routes a single gesture across every attached tree.
//! - [`outline`]: a small reference tree widget model.
//!
//! ## Time
//!
//! The engine owns no clock. Every event carries a monotonic timestamp, and the
//! host calls `tick(now)` at or after `next_deadline()` to fire auto-expand timers.
//! The same sequence of events and ticks always produces the same callbacks.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use understory_dnd::coordinator::{CrossTreeCoordinator, PointerEvent, PointerMechanism};
//! use understory_dnd::outline::{OutlineElement, OutlineNode, OutlineResolver, OutlineTree};
//! use understory_dnd::policy::DndPolicy;
//! use understory_dnd::types::{DndOptions, HitMode, TreeId};
//!
//! #[derive(Default)]
//! struct Log(Vec<(usize, HitMode)>);
//! impl DndPolicy<OutlineNode> for Log {
//!     fn on_drop(&mut self, target: &OutlineNode, _source: &OutlineNode, mode: HitMode) {
//!         self.0.push((target.index(), mode));
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct Mechanism;
//! impl PointerMechanism for Mechanism {
//!     fn install_hooks(&mut self) {}
//!     fn cancel_current_gesture(&mut self) {}
//! }
//!
//! let mut tree = OutlineTree::new(TreeId(0));
//! let a = tree.insert(None, "a");
//! let b = tree.insert(None, "b");
//! let c = tree.insert(None, "c");
//!
//! let mut dnd: CrossTreeCoordinator<OutlineNode, _, _, _, _> =
//!     CrossTreeCoordinator::new(OutlineResolver, Mechanism);
//! dnd.attach_tree(TreeId(0), tree, Log::default(), DndOptions::default());
//!
//! let ms = Duration::from_millis;
//! let on = |node, y| PointerEvent::new(Some(OutlineElement::Row(node)), kurbo::Point::new(10.0, y), ms(0));
//!
//! // Drag `a` into the lower part of `c` (rows are 20 units tall).
//! dnd.on_helper_requested(&on(a, 5.0));
//! dnd.on_start(&on(a, 5.0)).unwrap();
//! dnd.on_move(&on(c, 58.0)).unwrap();
//! dnd.on_move(&on(c, 58.0)).unwrap();
//! dnd.on_release(true).unwrap();
//!
//! let log = &dnd.trees().get(TreeId(0)).unwrap().policy;
//! assert_eq!(log.0, vec![(c.index(), HitMode::After)]);
//! # let _ = b;
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod auto_expand;
pub mod coordinator;
pub mod error;
pub mod feedback;
pub mod hit_mode;
pub mod outline;
pub mod policy;
pub mod registry;
pub mod session;
pub mod tree;
pub mod types;
