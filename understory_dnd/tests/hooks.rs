// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hook installation across coordinators.
//!
//! Runs in its own test binary so it owns the process-wide hook flag.

mod common;

use kurbo::Point;
use understory_dnd::outline::OutlineResolver;
use understory_dnd::registry::hooks_registered;
use understory_dnd::types::{DndOptions, TreeId};

use common::{Dnd, Log, Mechanism, Recorder, outline};

#[test]
fn only_the_first_coordinator_installs_hooks() {
    let log = Log::default();
    assert!(!hooks_registered());

    let mut first = Dnd::new(OutlineResolver, Mechanism::default());
    let (inert, _) = outline(TreeId(1), Point::ORIGIN);
    first.attach_tree(TreeId(1), inert, Recorder::inert(&log), DndOptions::default());
    assert!(!hooks_registered());
    assert_eq!(first.mechanism().installs, 0);

    let (tree, _) = outline(TreeId(2), Point::new(300.0, 0.0));
    first.attach_tree(TreeId(2), tree, Recorder::new(&log), DndOptions::default());
    assert!(hooks_registered());
    assert!(first.installed_hooks());
    assert_eq!(first.mechanism().installs, 1);

    // Re-attaching does not reinstall.
    let (tree, _) = outline(TreeId(2), Point::new(300.0, 0.0));
    first.attach_tree(TreeId(2), tree, Recorder::new(&log), DndOptions::default());
    assert_eq!(first.mechanism().installs, 1);

    let mut second = Dnd::new(OutlineResolver, Mechanism::default());
    let (tree, _) = outline(TreeId(3), Point::ORIGIN);
    second.attach_tree(TreeId(3), tree, Recorder::new(&log), DndOptions::default());
    assert!(!second.installed_hooks());
    assert_eq!(second.mechanism().installs, 0);
}
