// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal outline (collapsible list) widget model implementing [`DndTree`].
//!
//! Rows are laid out top to bottom at a fixed height, children indented under
//! their parent and hidden while it is collapsed. It is small enough to drive the
//! engine in tests and demos, and shows what a host tree must provide.
//!
//! ```
//! use kurbo::Point;
//! use understory_dnd::outline::OutlineTree;
//! use understory_dnd::tree::DndTree;
//! use understory_dnd::types::TreeId;
//!
//! let mut tree = OutlineTree::new(TreeId(0));
//! let docs = tree.insert(None, "docs");
//! let readme = tree.insert(Some(docs), "README");
//! let src = tree.insert(None, "src");
//!
//! // `README` is hidden until `docs` is expanded.
//! assert_eq!(tree.visible_rows(), vec![docs, src]);
//! assert_eq!(tree.node_at(Point::new(10.0, 25.0)), Some(src));
//! tree.expand(&docs);
//! assert_eq!(tree.visible_rows(), vec![docs, readme, src]);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::coordinator::ElementResolver;
use crate::tree::DndTree;
use crate::types::{NodeKey, TreeId};

/// Handle to a row of an [`OutlineTree`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct OutlineNode {
    tree: TreeId,
    index: usize,
}

impl OutlineNode {
    /// Insertion index of this row within its tree.
    pub const fn index(self) -> usize {
        self.index
    }
}

impl NodeKey for OutlineNode {
    fn tree(&self) -> TreeId {
        self.tree
    }
}

#[derive(Clone, Debug)]
struct Row {
    label: String,
    parent: Option<usize>,
    children: Vec<usize>,
    expanded: bool,
    lazy: bool,
    placeholder: bool,
}

/// Fixed-row-height outline model.
#[derive(Clone, Debug)]
pub struct OutlineTree {
    id: TreeId,
    rows: Vec<Row>,
    roots: Vec<usize>,
    origin: Point,
    row_height: f64,
    width: f64,
    indent: f64,
}

impl OutlineTree {
    /// Default row height.
    pub const ROW_HEIGHT: f64 = 20.0;
    /// Default row width.
    pub const WIDTH: f64 = 200.0;
    /// Default horizontal indent per depth level.
    pub const INDENT: f64 = 16.0;

    /// Create an empty outline for tree instance `id`, laid out from the origin.
    pub fn new(id: TreeId) -> Self {
        Self {
            id,
            rows: Vec::new(),
            roots: Vec::new(),
            origin: Point::ORIGIN,
            row_height: Self::ROW_HEIGHT,
            width: Self::WIDTH,
            indent: Self::INDENT,
        }
    }

    /// Place the first row's top-left corner at `origin`.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the row height. Non-positive heights leave rows without bounds.
    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// The tree instance id.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Number of rows, visible or not.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the outline has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a collapsed row under `parent` (or at top level).
    ///
    /// A `parent` from another tree is treated as `None`.
    pub fn insert(&mut self, parent: Option<OutlineNode>, label: impl Into<String>) -> OutlineNode {
        self.push(parent, label.into(), false)
    }

    /// Append a placeholder row ("loading…", "error") that can never be dragged.
    pub fn insert_placeholder(
        &mut self,
        parent: Option<OutlineNode>,
        label: impl Into<String>,
    ) -> OutlineNode {
        self.push(parent, label.into(), true)
    }

    fn push(&mut self, parent: Option<OutlineNode>, label: String, placeholder: bool) -> OutlineNode {
        let parent = parent.and_then(|p| self.slot(&p));
        let index = self.rows.len();
        self.rows.push(Row {
            label,
            parent,
            children: Vec::new(),
            expanded: false,
            lazy: false,
            placeholder,
        });
        match parent {
            Some(p) => self.rows[p].children.push(index),
            None => self.roots.push(index),
        }
        self.key(index)
    }

    /// Mark `node` as lazily loaded: while it has no children, whether it has any is unknown.
    pub fn set_lazy(&mut self, node: OutlineNode, lazy: bool) {
        if let Some(i) = self.slot(&node) {
            self.rows[i].lazy = lazy;
        }
    }

    /// Collapse `node`.
    pub fn collapse(&mut self, node: OutlineNode) {
        if let Some(i) = self.slot(&node) {
            self.rows[i].expanded = false;
        }
    }

    /// The row's label.
    pub fn label(&self, node: OutlineNode) -> Option<&str> {
        self.slot(&node).map(|i| self.rows[i].label.as_str())
    }

    /// Children of `node`, in order.
    pub fn children(&self, node: OutlineNode) -> Vec<OutlineNode> {
        self.slot(&node)
            .map(|i| self.rows[i].children.iter().map(|&c| self.key(c)).collect())
            .unwrap_or_default()
    }

    /// Nesting depth of `node`; top-level rows are at depth 0.
    pub fn depth(&self, node: OutlineNode) -> usize {
        let mut depth = 0;
        let mut cur = self.slot(&node).and_then(|i| self.rows[i].parent);
        while let Some(p) = cur {
            depth += 1;
            cur = self.rows[p].parent;
        }
        depth
    }

    /// Rows currently shown, top to bottom.
    pub fn visible_rows(&self) -> Vec<OutlineNode> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            out.push(self.key(i));
            let row = &self.rows[i];
            if row.expanded {
                stack.extend(row.children.iter().rev().copied());
            }
        }
        out
    }

    /// The visible row whose full-width band contains `pt`.
    pub fn node_at(&self, pt: Point) -> Option<OutlineNode> {
        if !self.has_height() || pt.x < self.origin.x || pt.x >= self.origin.x + self.width {
            return None;
        }
        self.visible_rows()
            .into_iter()
            .enumerate()
            .find(|&(i, _)| {
                let top = self.row_top(i);
                pt.y >= top && pt.y < top + self.row_height
            })
            .map(|(_, node)| node)
    }

    /// A point inside `node`'s row at vertical fraction `frac_y` of its height.
    pub fn point_in(&self, node: OutlineNode, frac_y: f64) -> Option<Point> {
        let b = self.bounds(&node)?;
        Some(Point::new(b.center().x, b.y0 + frac_y * b.height()))
    }

    /// False for zero, negative or NaN row heights.
    fn has_height(&self) -> bool {
        self.row_height > 0.0
    }

    fn row_top(&self, row: usize) -> f64 {
        self.origin.y + row as f64 * self.row_height
    }

    fn key(&self, index: usize) -> OutlineNode {
        OutlineNode {
            tree: self.id,
            index,
        }
    }

    fn slot(&self, node: &OutlineNode) -> Option<usize> {
        (node.tree == self.id && node.index < self.rows.len()).then_some(node.index)
    }

    fn siblings(&self, i: usize) -> &[usize] {
        match self.rows[i].parent {
            Some(p) => &self.rows[p].children,
            None => &self.roots,
        }
    }

    fn sibling_at(&self, node: &OutlineNode, step: isize) -> Option<OutlineNode> {
        let i = self.slot(node)?;
        let siblings = self.siblings(i);
        let pos = siblings.iter().position(|&s| s == i)?;
        let pos = pos.checked_add_signed(step)?;
        siblings.get(pos).map(|&s| self.key(s))
    }
}

impl DndTree<OutlineNode> for OutlineTree {
    fn parent(&self, node: &OutlineNode) -> Option<OutlineNode> {
        let i = self.slot(node)?;
        self.rows[i].parent.map(|p| self.key(p))
    }

    fn next_sibling(&self, node: &OutlineNode) -> Option<OutlineNode> {
        self.sibling_at(node, 1)
    }

    fn prev_sibling(&self, node: &OutlineNode) -> Option<OutlineNode> {
        self.sibling_at(node, -1)
    }

    fn has_children(&self, node: &OutlineNode) -> Option<bool> {
        let row = &self.rows[self.slot(node)?];
        if !row.children.is_empty() {
            Some(true)
        } else if row.lazy {
            None
        } else {
            Some(false)
        }
    }

    fn is_expanded(&self, node: &OutlineNode) -> bool {
        self.slot(node).is_some_and(|i| self.rows[i].expanded)
    }

    fn expand(&mut self, node: &OutlineNode) {
        if let Some(i) = self.slot(node) {
            self.rows[i].expanded = true;
        }
    }

    fn bounds(&self, node: &OutlineNode) -> Option<Rect> {
        if !self.has_height() {
            return None;
        }
        let row = self.visible_rows().iter().position(|n| n == node)?;
        let top = self.row_top(row);
        let left = self.origin.x + self.depth(*node) as f64 * self.indent;
        Some(Rect::new(
            left,
            top,
            self.origin.x + self.width,
            top + self.row_height,
        ))
    }

    fn is_placeholder(&self, node: &OutlineNode) -> bool {
        self.slot(node).is_some_and(|i| self.rows[i].placeholder)
    }
}

/// What a host reports under the pointer when it renders [`OutlineTree`]s.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutlineElement {
    /// A row.
    Row(OutlineNode),
    /// The floating drag visual following the pointer.
    DragVisual,
    /// Anything else: gutters, scrollbars, other widgets.
    Background,
}

/// [`ElementResolver`] for [`OutlineElement`].
#[derive(Copy, Clone, Debug, Default)]
pub struct OutlineResolver;

impl ElementResolver<OutlineElement, OutlineNode> for OutlineResolver {
    fn node_of(&self, element: &OutlineElement) -> Option<OutlineNode> {
        match element {
            OutlineElement::Row(node) => Some(*node),
            OutlineElement::DragVisual | OutlineElement::Background => None,
        }
    }

    fn is_drag_visual(&self, element: &OutlineElement) -> bool {
        matches!(element, OutlineElement::DragVisual)
    }
}
