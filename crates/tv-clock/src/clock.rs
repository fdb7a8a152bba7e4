//! The `Clock` context and the `Tickable` subscriber trait.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};
use tv_core::{ClockConfig, Tick, TickableId, TvResult};

use crate::registry::TickRegistry;
use crate::{Attached, Registration};

// ── Tickable ──────────────────────────────────────────────────────────────────

/// A node that needs proactive notification on every tick, not just
/// on-demand queries.
///
/// # Contract
///
/// - `tick` is called exactly once per `Clock::tick()` with the new tick.
/// - The order across subscribers is unspecified; each call must be
///   self-contained given the shared tick.
/// - Must not block.  May attach or detach other subscribers; such requests
///   take effect after the current dispatch finishes.
pub trait Tickable {
    fn tick(&self, now: Tick);
}

// ── Shared state ──────────────────────────────────────────────────────────────

/// Registry mutation requested while a dispatch held the registry.
enum Deferred {
    Insert(TickableId, Rc<dyn Tickable>, u64),
    Release(TickableId, u64),
    Remove(TickableId),
    Clear,
}

pub(crate) struct ClockShared {
    config:      ClockConfig,
    now:         Cell<Tick>,
    registry:    RefCell<TickRegistry>,
    dispatching: Cell<bool>,
    deferred:    RefCell<Vec<Deferred>>,
    /// Next guard ticket.  See `registry` for how tickets retire stale guards.
    next_ticket: Cell<u64>,
}

impl ClockShared {
    pub(crate) fn contains(&self, id: TickableId) -> bool {
        self.registry.borrow().contains(id)
    }

    pub(crate) fn is_held_by(&self, id: TickableId, ticket: u64) -> bool {
        self.registry.borrow().is_held_by(id, ticket)
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.next_ticket.get();
        self.next_ticket.set(ticket + 1);
        ticket
    }

    fn insert(&self, id: TickableId, tickable: Rc<dyn Tickable>, ticket: u64) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                if registry.insert(id, tickable, ticket) {
                    debug!(%id, subscribers = registry.len(), "tickable attached");
                }
            }
            Err(_) => self.deferred.borrow_mut().push(Deferred::Insert(id, tickable, ticket)),
        }
    }

    pub(crate) fn release(&self, id: TickableId, ticket: u64) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                if registry.release(id, ticket) {
                    debug!(%id, subscribers = registry.len(), "tickable detached");
                }
            }
            Err(_) => self.deferred.borrow_mut().push(Deferred::Release(id, ticket)),
        }
    }

    fn remove(&self, id: TickableId) -> bool {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                let removed = registry.remove(id);
                if removed {
                    debug!(%id, subscribers = registry.len(), "tickable unregistered");
                }
                removed
            }
            Err(_) => {
                self.deferred.borrow_mut().push(Deferred::Remove(id));
                false
            }
        }
    }

    fn clear(&self) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                debug!(subscribers = registry.len(), "jettisoning all tickables");
                registry.clear();
            }
            Err(_) => self.deferred.borrow_mut().push(Deferred::Clear),
        }
    }

    /// Apply requests queued during dispatch, in the order they were made.
    fn apply_deferred(&self) {
        loop {
            let pending = std::mem::take(&mut *self.deferred.borrow_mut());
            if pending.is_empty() {
                return;
            }
            for op in pending {
                match op {
                    Deferred::Insert(id, tickable, ticket) => self.insert(id, tickable, ticket),
                    Deferred::Release(id, ticket) => self.release(id, ticket),
                    Deferred::Remove(id) => {
                        self.remove(id);
                    }
                    Deferred::Clear => self.clear(),
                }
            }
        }
    }
}

/// Clears the dispatching flag even if a subscriber panics mid-dispatch.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Discrete time source and tick dispatcher.
///
/// `Clock` is a cheap-to-clone handle to one simulation's time.  There is no
/// process-wide clock: each simulation (or test) creates its own, and
/// independent clocks never see each other's subscribers.
///
/// Single-threaded by construction (`Rc` inside, so `!Send`).  A host that
/// runs several threads must keep each engine instance on one of them.
#[derive(Clone)]
pub struct Clock {
    shared: Rc<ClockShared>,
}

impl Clock {
    /// A clock starting at tick 0 with no pre-allocated subscriber slots.
    pub fn new() -> Self {
        Self::from_valid_config(ClockConfig::default())
    }

    /// A clock built from a validated [`ClockConfig`].
    pub fn with_config(config: ClockConfig) -> TvResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ClockConfig) -> Self {
        Self {
            shared: Rc::new(ClockShared {
                now:         Cell::new(config.start),
                registry:    RefCell::new(TickRegistry::with_capacity(config.subscriber_capacity)),
                dispatching: Cell::new(false),
                deferred:    RefCell::new(Vec::new()),
                next_ticket: Cell::new(0),
                config,
            }),
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.shared.config
    }

    /// The current tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.shared.now.get()
    }

    /// Advance time by exactly one tick and notify every subscriber with the
    /// new tick.  Returns the new tick.
    ///
    /// A `tick()` issued from inside a subscriber's `tick` callback is
    /// ignored: nesting would hand subscribers two different "now"s within a
    /// single step.
    pub fn tick(&self) -> Tick {
        let shared = &*self.shared;
        if shared.dispatching.get() {
            warn!(now = %shared.now.get(), "nested Clock::tick ignored");
            return shared.now.get();
        }

        let now = shared.now.get() + 1;
        shared.now.set(now);

        {
            shared.dispatching.set(true);
            let _guard = DispatchGuard(&shared.dispatching);
            let registry = shared.registry.borrow();
            trace!(tick = %now, subscribers = registry.len(), "dispatching tick");
            for entry in registry.entries() {
                entry.tickable.tick(now);
            }
        }

        shared.apply_deferred();
        now
    }

    /// Attach `node` and return a guard that owns it.  Dropping the guard
    /// detaches the node.
    pub fn attach<T: Tickable + 'static>(&self, node: Rc<T>) -> Attached<T> {
        let registration = self.register(&node);
        Attached::new(node, registration)
    }

    /// Attach a node that is shared elsewhere.  The clock keeps its own
    /// handle until the returned guard is dropped.
    ///
    /// Registering the same node twice does not double-notify it; it stays
    /// attached until every guard for it is gone.
    pub fn register<T: Tickable + 'static>(&self, node: &Rc<T>) -> Registration {
        let tickable: Rc<dyn Tickable> = node.clone();
        let id = Self::id_of(&tickable);
        let pin = Rc::downgrade(&tickable);
        let ticket = self.shared.issue_ticket();
        self.shared.insert(id, tickable, ticket);
        Registration::new(Rc::downgrade(&self.shared), id, ticket, pin)
    }

    /// Remove a subscriber outright, regardless of outstanding guards.  Those
    /// guards are retired: dropping them later does nothing, even if the
    /// node has been registered again in the meantime.
    ///
    /// Returns `false` for non-members (and for removals deferred until the
    /// current dispatch ends).
    pub fn unregister(&self, id: TickableId) -> bool {
        self.shared.remove(id)
    }

    pub fn is_registered(&self, id: TickableId) -> bool {
        self.shared.contains(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    /// Identity of `node` as a subscriber of any clock.
    pub fn id_of<T: ?Sized>(node: &Rc<T>) -> TickableId {
        TickableId(Rc::as_ptr(node) as *const () as usize as u64)
    }

    // ── Test setup only ───────────────────────────────────────────────────

    /// Return to the configured start tick.  Never call mid-simulation.
    pub fn reset(&self) {
        debug!(start = %self.shared.config.start, "clock reset");
        self.shared.now.set(self.shared.config.start);
    }

    /// Drop every subscriber.  Outstanding guards are retired and become
    /// no-ops, even for nodes registered again afterwards.  Never call
    /// mid-simulation.
    pub fn jettison_subscribers(&self) {
        self.shared.clear();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("now", &self.now())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
