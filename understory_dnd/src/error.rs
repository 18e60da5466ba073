// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type.

use crate::types::TreeId;

/// Errors returned by the session controller and coordinator.
///
/// Policy vetoes and unresolvable pointer targets are not errors; they are
/// ordinary control flow. These variants signal a host wiring mistake.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DndError {
    /// A node names a tree instance that was never attached (or was detached).
    #[error("tree {0:?} is not attached")]
    UnknownTree(TreeId),
}
