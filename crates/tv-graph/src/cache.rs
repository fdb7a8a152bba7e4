//! At-most-once-per-tick evaluation.
//!
//! # Contract
//!
//! A stateful node implements [`Recompute`] and routes every read through a
//! [`TickCache`].  The cache calls `recompute` only when the requested tick
//! moves past the last computed one, so a node feeding many consumers is
//! evaluated once per tick no matter how many of them read it.  Nodes must
//! never call `recompute` themselves (not at construction, not when attached
//! to a clock); all computation happens inside the cache.
//!
//! # Non-monotonic ticks
//!
//! A read at a tick *earlier* than the last computed one is a caller bug.
//! The cache clamps it: the last computed value is returned unchanged and
//! a warning is logged.  Nothing is ever integrated backwards.

use std::cell::Cell;

use tracing::warn;
use tv_core::Tick;

use crate::{Source, TimedVal};

/// The computation a [`TickCache`] guards.
pub trait Recompute {
    /// Compute the value at `now`, given the node was last computed (or
    /// created) at `last`.  Only called with `now >= last`.
    fn recompute(&self, last: Tick, now: Tick) -> f64;
}

/// `(last computed tick, last computed value)` for one node.
#[derive(Debug)]
pub struct TickCache {
    last_tick:  Cell<Tick>,
    last_value: Cell<Option<f64>>,
}

impl TickCache {
    /// An empty cache for a node created at `created`.  The first read at
    /// `created` computes with zero elapsed time.
    pub fn new(created: Tick) -> Self {
        Self {
            last_tick:  Cell::new(created),
            last_value: Cell::new(None),
        }
    }

    /// The node's value at `now`, recomputing only if `now` is a new tick.
    pub fn get<R: Recompute + ?Sized>(&self, now: Tick, node: &R) -> f64 {
        let last = self.last_tick.get();
        match self.last_value.get() {
            Some(value) if now == last => value,
            Some(value) if now < last => {
                warn!(%now, %last, "non-monotonic tick; returning last computed value");
                value
            }
            None if now < last => {
                warn!(%now, created = %last, "tick precedes node creation; evaluating at creation");
                self.store(last, node.recompute(last, last))
            }
            _ => self.store(now, node.recompute(last, now)),
        }
    }

    fn store(&self, now: Tick, value: f64) -> f64 {
        self.last_tick.set(now);
        self.last_value.set(Some(value));
        value
    }

    pub fn last_tick(&self) -> Tick {
        self.last_tick.get()
    }

    /// `None` until the first read.
    pub fn last_value(&self) -> Option<f64> {
        self.last_value.get()
    }
}

// ── CachedVal ─────────────────────────────────────────────────────────────────

/// Memoizes any source so that an expensive subgraph shared by many
/// consumers is evaluated once per tick.
pub struct CachedVal {
    inner: Source,
    cache: TickCache,
}

impl CachedVal {
    pub fn new(inner: Source, created: Tick) -> Self {
        Self {
            inner,
            cache: TickCache::new(created),
        }
    }

    pub fn inner(&self) -> &Source {
        &self.inner
    }
}

impl Recompute for CachedVal {
    fn recompute(&self, _last: Tick, now: Tick) -> f64 {
        self.inner.value_at(now)
    }
}

impl TimedVal for CachedVal {
    fn value_at(&self, now: Tick) -> f64 {
        self.cache.get(now, self)
    }
}
