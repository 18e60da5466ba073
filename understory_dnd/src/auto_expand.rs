// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-expand scheduling: expand a collapsed node after a sustained hover.
//!
//! The scheduler does not own a clock. Callers pass the current time to
//! [`AutoExpandScheduler::schedule`] and [`AutoExpandScheduler::fire_due`], and can
//! use [`AutoExpandScheduler::next_deadline`] to arm a single host timer.
//!
//! ```
//! use core::time::Duration;
//! use understory_dnd::auto_expand::AutoExpandScheduler;
//!
//! let ms = Duration::from_millis;
//! let mut s: AutoExpandScheduler<u32> = AutoExpandScheduler::new();
//! s.schedule(7, ms(0), ms(1000));
//! assert!(s.fire_due(ms(999)).is_empty());
//! assert_eq!(s.fire_due(ms(1000)), vec![7]);
//! // Fired timers are gone.
//! assert!(s.fire_due(ms(5000)).is_empty());
//! ```

use alloc::vec::Vec;
use core::time::Duration;

/// Per-node delayed expand timers with cancel.
///
/// At most one timer is armed per node. Scheduling an armed node again resets its delay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoExpandScheduler<K> {
    armed: Vec<(K, Duration)>,
}

impl<K: Copy + Eq> AutoExpandScheduler<K> {
    /// Create a scheduler with no armed timers.
    pub fn new() -> Self {
        Self { armed: Vec::new() }
    }

    /// Arm (or re-arm) the timer for `node` to fire at `now + delay`.
    pub fn schedule(&mut self, node: K, now: Duration, delay: Duration) {
        let deadline = now.saturating_add(delay);
        if let Some(slot) = self.armed.iter_mut().find(|(k, _)| *k == node) {
            slot.1 = deadline;
        } else {
            self.armed.push((node, deadline));
        }
    }

    /// Disarm the timer for `node`. Returns true if one was armed.
    ///
    /// Cancelling a node with no armed timer is a no-op.
    pub fn cancel(&mut self, node: &K) -> bool {
        let before = self.armed.len();
        self.armed.retain(|(k, _)| k != node);
        self.armed.len() != before
    }

    /// Disarm every timer.
    pub fn clear(&mut self) {
        self.armed.clear();
    }

    /// Returns true if a timer is armed for `node`.
    pub fn is_armed(&self, node: &K) -> bool {
        self.armed.iter().any(|(k, _)| k == node)
    }

    /// Returns true if no timer is armed.
    pub fn is_idle(&self) -> bool {
        self.armed.is_empty()
    }

    /// The deadline of `node`'s timer, if armed.
    pub fn deadline(&self, node: &K) -> Option<Duration> {
        self.armed.iter().find(|(k, _)| k == node).map(|(_, d)| *d)
    }

    /// The earliest deadline over all armed timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.iter().map(|(_, d)| *d).min()
    }

    /// Disarm and return every node whose deadline is at or before `now`, earliest first.
    pub fn fire_due(&mut self, now: Duration) -> Vec<K> {
        let mut due: Vec<(K, Duration)> = Vec::new();
        self.armed.retain(|&(k, d)| {
            if d <= now {
                due.push((k, d));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, d)| d);
        due.into_iter().map(|(k, _)| k).collect()
    }
}
