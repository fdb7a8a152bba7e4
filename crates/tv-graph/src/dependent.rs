//! `DependentAccumulator` — kinematic integrator whose rates are nodes.
//!
//! # Ticking
//!
//! The velocity and acceleration sources can change between ticks without
//! anyone telling the accumulator (a knob twiddled by gameplay code).  To
//! see every such change at the tick it happened, the accumulator must be
//! refreshed every tick, read or not.  Attach it to a `Clock`:
//!
//! ```rust,ignore
//! let skill = clock.attach(daccum(0.0, clock.now(), rate, zero()));
//! ```
//!
//! The returned guard detaches it when the owning entity goes away.
//!
//! # Update rule at tick `t` (last computed at `last`)
//!
//! ```text
//! v_now     = velocity_source(t)
//! velocity += v_now - v_last          // jump in the source = impulse at the tick boundary
//! a         = acceleration_source(t)
//! value    += velocity·dT + ½·a·dT²
//! velocity += a·dT
//! v_last    = v_now
//! ```
//!
//! The tracked `velocity` is distinct from the source's reading: it also
//! carries everything the acceleration has added.

use std::cell::{Cell, RefCell};
use std::fmt;

use tv_clock::Tickable;
use tv_core::Tick;

use crate::{Recompute, Source, TickCache, TimedVal};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Motion {
    value:            f64,
    velocity:         f64,
    /// Velocity source reading at the last computed tick.  Starts at zero so
    /// the first computation picks up the source's initial reading as an
    /// impulse.
    velocity_at_last: f64,
}

pub struct DependentAccumulator {
    cache:        TickCache,
    motion:       Cell<Motion>,
    velocity:     RefCell<Source>,
    acceleration: RefCell<Source>,
}

impl DependentAccumulator {
    /// Start at `value` at tick `created`.  Sources are not read until the
    /// first evaluation.
    pub fn new(value: f64, created: Tick, velocity: Source, acceleration: Source) -> Self {
        Self {
            cache:        TickCache::new(created),
            motion:       Cell::new(Motion {
                value,
                velocity:         0.0,
                velocity_at_last: 0.0,
            }),
            velocity:     RefCell::new(velocity),
            acceleration: RefCell::new(acceleration),
        }
    }

    /// Integrate up to `now`, then read velocity from `velocity` instead.
    /// The difference between the new and old source readings arrives as an
    /// impulse on the next tick.
    pub fn change_velocity(&self, velocity: Source, now: Tick) {
        self.value_at(now);
        *self.velocity.borrow_mut() = velocity;
    }

    /// Integrate up to `now`, then read acceleration from `acceleration`.
    pub fn change_acceleration(&self, acceleration: Source, now: Tick) {
        self.value_at(now);
        *self.acceleration.borrow_mut() = acceleration;
    }

    /// Internally tracked velocity as of the last computed tick.
    pub fn velocity(&self) -> f64 {
        self.motion.get().velocity
    }

    pub fn last_tick(&self) -> Tick {
        self.cache.last_tick()
    }
}

impl Recompute for DependentAccumulator {
    fn recompute(&self, last: Tick, now: Tick) -> f64 {
        let v_now = self.velocity.borrow().value_at(now);
        let accel = self.acceleration.borrow().value_at(now);
        let dt = now.since(last) as f64;

        let mut m = self.motion.get();
        m.velocity += v_now - m.velocity_at_last;
        m.value += m.velocity * dt + 0.5 * accel * dt * dt;
        m.velocity += accel * dt;
        m.velocity_at_last = v_now;
        self.motion.set(m);
        m.value
    }
}

impl TimedVal for DependentAccumulator {
    fn value_at(&self, now: Tick) -> f64 {
        self.cache.get(now, self)
    }
}

impl Tickable for DependentAccumulator {
    fn tick(&self, now: Tick) {
        self.value_at(now);
    }
}

impl fmt::Debug for DependentAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.motion.get();
        f.debug_struct("DependentAccumulator")
            .field("value", &m.value)
            .field("velocity", &m.velocity)
            .field("last_tick", &self.cache.last_tick())
            .finish_non_exhaustive()
    }
}
