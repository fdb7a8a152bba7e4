//! Scoped registration guards.
//!
//! A subscriber that is forgotten in the registry keeps receiving ticks after
//! its owner is gone.  Registration therefore always hands back a guard, and
//! dropping the guard is what detaches.
//!
//! - [`Registration`]: bare guard for a node shared elsewhere.
//! - [`Attached<T>`]: owns the node and its registration together; derefs
//!   to the node so it reads like the node itself.

use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use tv_core::TickableId;

use crate::Tickable;
use crate::clock::ClockShared;

// ── Registration ──────────────────────────────────────────────────────────────

/// Keeps one subscriber attached to a clock for as long as it lives.
///
/// If the clock is dropped first, dropping the guard is a no-op.
#[must_use = "dropping a Registration detaches the subscriber immediately"]
pub struct Registration {
    clock:  Weak<ClockShared>,
    id:     TickableId,
    ticket: u64,
    /// Pins the subscriber's allocation so its address (and therefore its
    /// id) cannot be reused by another node while this guard exists.
    _pin:   Weak<dyn Tickable>,
}

impl Registration {
    pub(crate) fn new(clock: Weak<ClockShared>, id: TickableId, ticket: u64, pin: Weak<dyn Tickable>) -> Self {
        Self { clock, id, ticket, _pin: pin }
    }

    pub fn id(&self) -> TickableId {
        self.id
    }

    /// `true` while the clock is alive and this guard still holds the
    /// subscriber.  Turns `false` for good once the subscriber is removed
    /// outright, even if it is later registered again.
    pub fn is_active(&self) -> bool {
        self.clock
            .upgrade()
            .is_some_and(|shared| shared.is_held_by(self.id, self.ticket))
    }

    /// Detach now.  Equivalent to dropping the guard.
    pub fn detach(self) {}
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(shared) = self.clock.upgrade() {
            shared.release(self.id, self.ticket);
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

// ── Attached ──────────────────────────────────────────────────────────────────

/// A node together with the registration that keeps it ticking.
pub struct Attached<T: Tickable + 'static> {
    node:         Rc<T>,
    registration: Registration,
}

impl<T: Tickable + 'static> Attached<T> {
    pub(crate) fn new(node: Rc<T>, registration: Registration) -> Self {
        Self { node, registration }
    }

    /// The shared node handle, e.g. to feed it into other nodes as a source.
    pub fn node(&self) -> &Rc<T> {
        &self.node
    }

    pub fn id(&self) -> TickableId {
        self.registration.id()
    }

    pub fn is_active(&self) -> bool {
        self.registration.is_active()
    }

    /// Detach from the clock and hand back the node.  The node keeps working
    /// as a lazily evaluated value; it just stops receiving ticks.
    pub fn detach(self) -> Rc<T> {
        let Attached { node, registration } = self;
        drop(registration);
        node
    }
}

impl<T: Tickable + 'static> Deref for Attached<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.node
    }
}

impl<T: Tickable + fmt::Debug + 'static> fmt::Debug for Attached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attached")
            .field("id", &self.registration.id())
            .field("node", &self.node)
            .finish()
    }
}
