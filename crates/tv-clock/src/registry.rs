//! `TickRegistry` — dense subscriber storage.
//!
//! # Layout
//!
//! The engine targets 10⁵–10⁶ long-lived subscribers, so the per-tick fan-out
//! dominates.  Subscribers live in one contiguous `Vec` that dispatch walks
//! front to back with no allocation.  An `FxHashMap` from id to slot gives
//! O(1) attach and O(1) detach: removal swaps the last entry into the hole
//! and patches its index.  Dispatch order is therefore unspecified.
//!
//! # Tickets
//!
//! Every guard carries a ticket, issued from a counter that only grows.  An
//! entry remembers the ticket that created it (`since`); a guard holds the
//! entry only if its ticket is not older than that.  Once an entry is
//! removed outright (`remove`/`clear`), guards issued before the removal can
//! never match a later entry for the same id, so they release nothing.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tv_core::TickableId;

use crate::Tickable;

pub(crate) struct Entry {
    pub(crate) id:       TickableId,
    pub(crate) tickable: Rc<dyn Tickable>,
    /// Live guards for this subscriber.  The entry is removed when the last
    /// one is released.
    holds:               u32,
    /// Ticket of the guard that created this entry.
    since:               u64,
}

/// Subscriber set keyed by [`TickableId`].
#[derive(Default)]
pub struct TickRegistry {
    dense: Vec<Entry>,
    index: FxHashMap<TickableId, usize>,
}

impl TickRegistry {
    pub fn with_capacity(n: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(n);
        Self {
            dense: Vec::with_capacity(n),
            index,
        }
    }

    /// Add a subscriber for the guard holding `ticket`, or take another hold
    /// on it if already present.
    ///
    /// Returns `true` if the subscriber was newly inserted.
    pub(crate) fn insert(&mut self, id: TickableId, tickable: Rc<dyn Tickable>, ticket: u64) -> bool {
        if let Some(&slot) = self.index.get(&id) {
            let entry = &mut self.dense[slot];
            entry.holds += 1;
            entry.since = entry.since.min(ticket);
            return false;
        }
        self.index.insert(id, self.dense.len());
        self.dense.push(Entry { id, tickable, holds: 1, since: ticket });
        true
    }

    /// Drop the hold of the guard with `ticket`; removes the subscriber once
    /// no holds remain.  Guards older than the current entry are ignored.
    ///
    /// Returns `true` if the subscriber was removed.
    pub(crate) fn release(&mut self, id: TickableId, ticket: u64) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        let entry = &mut self.dense[slot];
        if ticket < entry.since {
            return false;
        }
        entry.holds = entry.holds.saturating_sub(1);
        if entry.holds == 0 {
            self.remove(id)
        } else {
            false
        }
    }

    /// Remove `id` regardless of outstanding holds.  No-op for non-members.
    pub(crate) fn remove(&mut self, id: TickableId) -> bool {
        let Some(slot) = self.index.remove(&id) else {
            return false;
        };
        self.dense.swap_remove(slot);
        if let Some(moved) = self.dense.get(slot) {
            self.index.insert(moved.id, slot);
        }
        true
    }

    pub(crate) fn clear(&mut self) {
        self.dense.clear();
        self.index.clear();
    }

    pub fn contains(&self, id: TickableId) -> bool {
        self.index.contains_key(&id)
    }

    /// `true` if the guard with `ticket` still holds `id`.
    pub(crate) fn is_held_by(&self, id: TickableId, ticket: u64) -> bool {
        self.index
            .get(&id)
            .is_some_and(|&slot| ticket >= self.dense[slot].since)
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.dense
    }
}
