// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual-feedback signals for the renderer.
//!
//! The engine renders nothing. It queues [`Feedback`] values that a renderer
//! drains with [`DragSessionController::take_feedback`](crate::session::DragSessionController::take_feedback)
//! and turns into a drop marker, accept/reject styling and a drag-source highlight.

use kurbo::Vec2;

use crate::types::HitMode;

/// Where the drop marker goes relative to the target row.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DropMarker {
    /// Between the target and its previous sibling.
    Before,
    /// On the target itself.
    Over,
    /// Between the target and its next sibling.
    After,
    /// Hidden; the pointer is not over a usable drop position.
    Out,
}

impl From<HitMode> for DropMarker {
    fn from(mode: HitMode) -> Self {
        match mode {
            HitMode::Before => Self::Before,
            HitMode::Over => Self::Over,
            HitMode::After => Self::After,
        }
    }
}

impl From<Option<HitMode>> for DropMarker {
    fn from(mode: Option<HitMode>) -> Self {
        mode.map_or(Self::Out, Self::from)
    }
}

impl DropMarker {
    /// Displacement of the marker from the target row's origin, or `None` if it is hidden.
    pub fn offset(self) -> Option<Vec2> {
        match self {
            Self::Before => Some(Vec2::new(0.0, -8.0)),
            Self::After => Some(Vec2::new(0.0, 8.0)),
            Self::Over => Some(Vec2::new(8.0, 0.0)),
            Self::Out => None,
        }
    }

    /// State classes the renderer should apply to the target row.
    pub fn status(self, accept: Option<bool>) -> DropStatus {
        let mut status = match self {
            Self::Before => DropStatus::DROP_BEFORE,
            Self::After => DropStatus::DROP_AFTER,
            Self::Over => DropStatus::DROP_TARGET,
            Self::Out => DropStatus::empty(),
        };
        match accept {
            Some(true) => status |= DropStatus::ACCEPT,
            Some(false) => status |= DropStatus::REJECT,
            None => {}
        }
        status
    }
}

bitflags::bitflags! {
    /// Renderer state classes for rows taking part in a drag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DropStatus: u8 {
        /// The row being dragged.
        const DRAG_SOURCE = 0b0000_0001;
        /// The row the source would be dropped onto.
        const DROP_TARGET = 0b0000_0010;
        /// The source would land before this row.
        const DROP_BEFORE = 0b0000_0100;
        /// The source would land after this row.
        const DROP_AFTER  = 0b0000_1000;
        /// The policy accepts the current drop position.
        const ACCEPT      = 0b0001_0000;
        /// The policy rejects the current drop position.
        const REJECT      = 0b0010_0000;
    }
}

/// A single visual-feedback signal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Feedback<K> {
    /// Mark or unmark `node` as the node being dragged.
    DragSource {
        /// The source node.
        node: K,
        /// True while the drag is live.
        active: bool,
    },
    /// Update the drop marker for `target`.
    Marker {
        /// The node being dragged.
        source: K,
        /// The hovered node.
        target: K,
        /// Marker placement.
        marker: DropMarker,
        /// Policy verdict from `on_drag_over`, if it was consulted.
        accept: Option<bool>,
    },
    /// The gesture was vetoed at start; hide the drag helper.
    HideHelper {
        /// The node whose drag was vetoed.
        node: K,
    },
}

impl<K> Feedback<K> {
    /// Renderer state classes implied by this signal for the node it concerns.
    pub fn status(&self) -> DropStatus {
        match self {
            Self::DragSource { active: true, .. } => DropStatus::DRAG_SOURCE,
            Self::DragSource { active: false, .. } | Self::HideHelper { .. } => {
                DropStatus::empty()
            }
            Self::Marker { marker, accept, .. } => marker.status(*accept),
        }
    }
}
