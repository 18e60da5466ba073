// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree instances taking part in drag and drop, and the process-wide hook flag.
//!
//! ## Hooks
//!
//! The pointer-drag mechanism reports gestures globally, whichever tree the
//! pointer happens to be over. Its start/move/stop hooks must therefore be
//! installed once for the whole process no matter how many trees exist.
//! [`ensure_hooks_registered`] guards that installation with a process-wide flag.
//!
//! ## Instances
//!
//! A [`TreeRegistry`] maps each [`TreeId`] to its [`TreeInstance`]: the tree
//! widget, its [`DndPolicy`](crate::policy::DndPolicy) and its [`DndOptions`].
//! The session controller resolves the owning instance of every node through it.

use alloc::collections::BTreeMap;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::DndError;
use crate::types::{DndOptions, TreeId};

static HOOKS_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Run `install` unless the pointer hooks have already been installed in this process.
///
/// Returns true if `install` ran. Only the first caller's `install` ever runs, so a
/// process drives all of its trees through one pointer mechanism.
pub fn ensure_hooks_registered(install: impl FnOnce()) -> bool {
    if HOOKS_REGISTERED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return false;
    }
    tracing::debug!("installing pointer drag hooks");
    install();
    true
}

/// Returns true once the pointer hooks have been installed.
pub fn hooks_registered() -> bool {
    HOOKS_REGISTERED.load(Ordering::Acquire)
}

/// One tree widget together with its drag-and-drop policy and options.
#[derive(Clone, Debug)]
pub struct TreeInstance<T, P> {
    /// The tree widget.
    pub tree: T,
    /// Caller-supplied callbacks.
    pub policy: P,
    /// Per-tree configuration.
    pub options: DndOptions,
}

impl<T, P> TreeInstance<T, P> {
    /// Bundle a tree, policy and options.
    pub fn new(tree: T, policy: P, options: DndOptions) -> Self {
        Self {
            tree,
            policy,
            options,
        }
    }
}

/// Tree instances keyed by [`TreeId`].
#[derive(Clone, Debug)]
pub struct TreeRegistry<T, P> {
    instances: BTreeMap<TreeId, TreeInstance<T, P>>,
}

impl<T, P> Default for TreeRegistry<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> TreeRegistry<T, P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            instances: BTreeMap::new(),
        }
    }

    /// Attach `instance` as tree `id`, returning any instance previously attached under that id.
    pub fn attach(
        &mut self,
        id: TreeId,
        instance: TreeInstance<T, P>,
    ) -> Option<TreeInstance<T, P>> {
        self.instances.insert(id, instance)
    }

    /// Detach tree `id`.
    pub fn detach(&mut self, id: TreeId) -> Option<TreeInstance<T, P>> {
        self.instances.remove(&id)
    }

    /// Returns true if tree `id` is attached.
    pub fn contains(&self, id: TreeId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Number of attached trees.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if no tree is attached.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The instance for tree `id`.
    pub fn get(&self, id: TreeId) -> Result<&TreeInstance<T, P>, DndError> {
        self.instances.get(&id).ok_or(DndError::UnknownTree(id))
    }

    /// The instance for tree `id`, mutably.
    pub fn get_mut(&mut self, id: TreeId) -> Result<&mut TreeInstance<T, P>, DndError> {
        self.instances.get_mut(&id).ok_or(DndError::UnknownTree(id))
    }

    /// Iterate attached trees in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TreeId, &TreeInstance<T, P>)> + '_ {
        self.instances.iter().map(|(id, inst)| (*id, inst))
    }
}
