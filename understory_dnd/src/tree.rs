// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree-widget side of drag and drop.
//!
//! The engine never owns nodes. It asks the tree widget about structure
//! (parents, siblings, children), expansion state and layout through
//! [`DndTree`], and asks it to expand a node when an auto-expand timer fires.

use kurbo::Rect;

/// Structure, expansion and layout queries the engine needs from a tree widget.
///
/// Sibling order must stay stable for the duration of a drag.
pub trait DndTree<K> {
    /// Returns the parent of `node`, or `None` for a top-level node.
    fn parent(&self, node: &K) -> Option<K>;

    /// Returns the sibling immediately after `node`.
    fn next_sibling(&self, node: &K) -> Option<K>;

    /// Returns the sibling immediately before `node`.
    fn prev_sibling(&self, node: &K) -> Option<K>;

    /// Returns true if `node` is the last child of its parent.
    fn is_last_sibling(&self, node: &K) -> bool {
        self.next_sibling(node).is_none()
    }

    /// Whether `node` has children.
    ///
    /// `None` means unknown (for example a lazily loaded node) and counts as expandable.
    fn has_children(&self, node: &K) -> Option<bool>;

    /// Returns true if `node` is expanded.
    fn is_expanded(&self, node: &K) -> bool;

    /// Expand `node`.
    fn expand(&mut self, node: &K);

    /// World-space bounding box of the node's row, if it is laid out.
    fn bounds(&self, node: &K) -> Option<Rect>;

    /// Returns true for status placeholders ("loading…", "error") that must never be dragged.
    fn is_placeholder(&self, _node: &K) -> bool {
        false
    }
}
