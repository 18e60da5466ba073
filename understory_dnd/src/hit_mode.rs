// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-mode resolution: turn a pointer position over a target into before / over / after.
//!
//! ## Banding
//!
//! The pointer's vertical position is expressed as a fraction of the target row's
//! height (`0.0` top edge, `1.0` bottom edge) and mapped to a band:
//!
//! | `frac_y`          | all modes allowed | `over` not allowed |
//! |-------------------|-------------------|--------------------|
//! | `> 0.75`          | after             | after              |
//! | `(0.5, 0.75]`     | over              | after              |
//! | `(0.25, 0.5]`     | over              | before             |
//! | `<= 0.25`         | before            | before             |
//!
//! `after` is tested before `before`, so overlapping bands resolve to `after`.
//! A band whose mode is not allowed falls through to `over` if that is allowed,
//! otherwise to no hit mode at all.
//!
//! ## Void moves
//!
//! With void-move prevention on, a mode is dropped when applying it would leave
//! the tree unchanged. See [`Adjacency`].
//!
//! ## Example
//!
//! ```
//! use understory_dnd::hit_mode::{Adjacency, resolve_hit_mode};
//! use understory_dnd::types::{EnterResponse, HitMode};
//!
//! let response = EnterResponse::Accept.normalize();
//! let none = Adjacency::default();
//! assert_eq!(resolve_hit_mode(response, Some(0.1), none, true), Some(HitMode::Before));
//! assert_eq!(resolve_hit_mode(response, Some(0.5), none, true), Some(HitMode::Over));
//! assert_eq!(resolve_hit_mode(response, Some(0.9), none, true), Some(HitMode::After));
//!
//! // Hovering the dragged node itself never resolves.
//! let self_drop = Adjacency { is_source: true, ..Adjacency::default() };
//! assert_eq!(resolve_hit_mode(response, Some(0.5), self_drop, true), None);
//! ```

use kurbo::{Point, Rect};

use crate::tree::DndTree;
use crate::types::{HitMode, HitModes, HitResponse, NodeKey};

/// Vertical pointer position as a fraction of `bounds`' height.
///
/// Returns `None` for empty or degenerate bounds. The value is not clamped;
/// a pointer above the row yields a negative fraction.
pub fn fraction_y(pointer: Point, bounds: Rect) -> Option<f64> {
    let height = bounds.height();
    if height <= 0.0 || height.is_nan() {
        return None;
    }
    Some((pointer.y - bounds.y0) / height)
}

/// Pick a hit mode from `modes` for the vertical fraction `frac_y`.
pub fn band(modes: HitModes, frac_y: f64) -> Option<HitMode> {
    let over = modes.contains(HitModes::OVER);
    let before = modes.contains(HitModes::BEFORE);
    let after = modes.contains(HitModes::AFTER);

    if after && (frac_y > 0.75 || (!over && frac_y > 0.5)) {
        Some(HitMode::After)
    } else if before && (frac_y <= 0.25 || (!over && frac_y <= 0.5)) {
        Some(HitMode::Before)
    } else if over {
        Some(HitMode::Over)
    } else {
        None
    }
}

/// Structural facts about a (target, source) pair that make a drop a no-op.
///
/// All facts are relative to the dragged source node. Nodes in different
/// tree instances share no structure, so every fact is false for them.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Adjacency {
    /// The target is the source itself.
    pub is_source: bool,
    /// The target is the source's next sibling (so `before` is a no-op).
    pub is_next_sibling: bool,
    /// The target is the source's previous sibling (so `after` is a no-op).
    pub is_prev_sibling: bool,
    /// The target is the source's parent and the source is its last child (so `over` is a no-op).
    pub is_parent_of_last_child: bool,
}

impl Adjacency {
    /// Compute the adjacency facts for `target` relative to `source` from the target's tree.
    pub fn between<K: NodeKey>(tree: &impl DndTree<K>, target: &K, source: &K) -> Self {
        if target.tree() != source.tree() {
            return Self::default();
        }
        if target == source {
            return Self {
                is_source: true,
                ..Self::default()
            };
        }
        Self {
            is_source: false,
            is_next_sibling: tree.next_sibling(source).as_ref() == Some(target),
            is_prev_sibling: tree.prev_sibling(source).as_ref() == Some(target),
            is_parent_of_last_child: tree.parent(source).as_ref() == Some(target)
                && tree.is_last_sibling(source),
        }
    }

    /// Returns true if dropping with `mode` would leave the tree unchanged.
    pub const fn is_void(self, mode: HitMode) -> bool {
        if self.is_source {
            return true;
        }
        match mode {
            HitMode::Before => self.is_next_sibling,
            HitMode::After => self.is_prev_sibling,
            HitMode::Over => self.is_parent_of_last_child,
        }
    }
}

/// Resolve the hit mode for one `over` event.
///
/// This is a pure function of its inputs:
/// - a rejected `response` never resolves;
/// - a pinned `response` skips geometry;
/// - otherwise [`band`] picks among the allowed modes, and a missing `frac_y`
///   (target not laid out) resolves to nothing;
/// - finally, with `prevent_void_moves`, modes that [`Adjacency::is_void`] are dropped.
pub fn resolve_hit_mode(
    response: HitResponse,
    frac_y: Option<f64>,
    adjacency: Adjacency,
    prevent_void_moves: bool,
) -> Option<HitMode> {
    let mode = match response {
        HitResponse::Rejected => return None,
        HitResponse::Pinned(mode) => mode,
        HitResponse::Allowed(modes) => band(modes, frac_y?)?,
    };
    if prevent_void_moves && adjacency.is_void(mode) {
        tracing::debug!(?mode, ?adjacency, "void move prevented");
        return None;
    }
    Some(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnterResponse;

    fn all() -> HitResponse {
        EnterResponse::Accept.normalize()
    }

    fn resolve(response: HitResponse, frac_y: f64) -> Option<HitMode> {
        resolve_hit_mode(response, Some(frac_y), Adjacency::default(), true)
    }

    // Boundaries with every mode enabled.
    #[test]
    fn banding_boundaries_all_modes() {
        assert_eq!(resolve(all(), 0.0), Some(HitMode::Before));
        assert_eq!(resolve(all(), 0.24), Some(HitMode::Before));
        assert_eq!(resolve(all(), 0.25), Some(HitMode::Before));
        assert_eq!(resolve(all(), 0.26), Some(HitMode::Over));
        assert_eq!(resolve(all(), 0.5), Some(HitMode::Over));
        assert_eq!(resolve(all(), 0.74), Some(HitMode::Over));
        assert_eq!(resolve(all(), 0.75), Some(HitMode::Over));
        assert_eq!(resolve(all(), 0.76), Some(HitMode::After));
        assert_eq!(resolve(all(), 1.0), Some(HitMode::After));
    }

    // Without `over`, the before/after split moves to the middle.
    #[test]
    fn banding_without_over_splits_at_half() {
        let r = EnterResponse::Modes(HitModes::BEFORE | HitModes::AFTER).normalize();
        assert_eq!(resolve(r, 0.4), Some(HitMode::Before));
        assert_eq!(resolve(r, 0.5), Some(HitMode::Before));
        assert_eq!(resolve(r, 0.6), Some(HitMode::After));
    }

    #[test]
    fn single_mode_only_matches_its_band() {
        let before = EnterResponse::from(HitMode::Before).normalize();
        assert_eq!(resolve(before, 0.3), Some(HitMode::Before));
        assert_eq!(resolve(before, 0.9), None);

        let over = EnterResponse::from(HitMode::Over).normalize();
        assert_eq!(resolve(over, 0.0), Some(HitMode::Over));
        assert_eq!(resolve(over, 1.0), Some(HitMode::Over));
    }

    #[test]
    fn rejected_never_resolves() {
        let r = EnterResponse::Reject.normalize();
        for f in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(resolve(r, f), None);
        }
    }

    #[test]
    fn pinned_skips_geometry() {
        let r = EnterResponse::Pinned(HitMode::After).normalize();
        assert_eq!(resolve(r, 0.0), Some(HitMode::After));
        assert_eq!(
            resolve_hit_mode(r, None, Adjacency::default(), true),
            Some(HitMode::After)
        );
    }

    #[test]
    fn missing_geometry_resolves_to_none() {
        assert_eq!(
            resolve_hit_mode(all(), None, Adjacency::default(), true),
            None
        );
    }

    #[test]
    fn void_moves_are_suppressed_only_when_enabled() {
        let next = Adjacency {
            is_next_sibling: true,
            ..Adjacency::default()
        };
        assert_eq!(resolve_hit_mode(all(), Some(0.1), next, true), None);
        assert_eq!(
            resolve_hit_mode(all(), Some(0.1), next, false),
            Some(HitMode::Before)
        );
        // Other bands over the next sibling are still meaningful.
        assert_eq!(
            resolve_hit_mode(all(), Some(0.9), next, true),
            Some(HitMode::After)
        );

        let prev = Adjacency {
            is_prev_sibling: true,
            ..Adjacency::default()
        };
        assert_eq!(resolve_hit_mode(all(), Some(0.9), prev, true), None);

        let parent = Adjacency {
            is_parent_of_last_child: true,
            ..Adjacency::default()
        };
        assert_eq!(resolve_hit_mode(all(), Some(0.5), parent, true), None);
        assert_eq!(
            resolve_hit_mode(all(), Some(0.1), parent, true),
            Some(HitMode::Before)
        );
    }

    #[test]
    fn self_drop_never_resolves_even_when_pinned() {
        let me = Adjacency {
            is_source: true,
            ..Adjacency::default()
        };
        for f in [0.0, 0.3, 0.5, 0.8, 1.0] {
            assert_eq!(resolve_hit_mode(all(), Some(f), me, true), None);
        }
        let pinned = EnterResponse::Pinned(HitMode::Over).normalize();
        assert_eq!(resolve_hit_mode(pinned, Some(0.5), me, true), None);
    }

    #[test]
    fn fraction_y_is_relative_to_row() {
        let row = Rect::new(0.0, 100.0, 200.0, 120.0);
        assert_eq!(fraction_y(Point::new(5.0, 100.0), row), Some(0.0));
        assert_eq!(fraction_y(Point::new(5.0, 110.0), row), Some(0.5));
        assert_eq!(fraction_y(Point::new(5.0, 120.0), row), Some(1.0));
        assert_eq!(fraction_y(Point::new(5.0, 90.0), row), Some(-0.5));
        assert_eq!(
            fraction_y(Point::new(5.0, 100.0), Rect::new(0.0, 100.0, 200.0, 100.0)),
            None
        );
        assert_eq!(
            fraction_y(Point::new(5.0, 100.0), Rect::new(0.0, 100.0, 200.0, f64::NAN)),
            None
        );
    }
}
