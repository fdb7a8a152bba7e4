//! `Accumulator` — kinematic integrator driven by scalar rates.
//!
//! # Update rule
//!
//! Integration is lazy: nothing happens until the node is read.  A read at
//! tick `t`, last computed at `last`, advances by `dT = t - last`:
//!
//! ```text
//! value    += velocity·dT + ½·acceleration·dT²
//! velocity += acceleration·dT
//! ```
//!
//! Rate changes are knife-edge events.  `change_velocity(v, t)` first
//! integrates up to `t` under the *old* rates and only then installs `v`, so
//! a change never rewrites history.

use std::cell::Cell;
use std::fmt;

use tv_core::Tick;

use crate::{Recompute, TickCache, TimedVal};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Motion {
    value:        f64,
    velocity:     f64,
    acceleration: f64,
}

/// A running integral whose rates change only through explicit calls.
pub struct Accumulator {
    cache:  TickCache,
    motion: Cell<Motion>,
}

impl Accumulator {
    /// Start at `value` at tick `created`.
    pub fn new(value: f64, created: Tick, velocity: f64, acceleration: f64) -> Self {
        Self {
            cache:  TickCache::new(created),
            motion: Cell::new(Motion { value, velocity, acceleration }),
        }
    }

    /// Integrate up to `now` under the current rates, then switch velocity.
    pub fn change_velocity(&self, velocity: f64, now: Tick) {
        self.value_at(now);
        let mut m = self.motion.get();
        m.velocity = velocity;
        self.motion.set(m);
    }

    /// Integrate up to `now` under the current rates, then switch
    /// acceleration.
    pub fn change_acceleration(&self, acceleration: f64, now: Tick) {
        self.value_at(now);
        let mut m = self.motion.get();
        m.acceleration = acceleration;
        self.motion.set(m);
    }

    /// Velocity as of the last computed tick.
    pub fn velocity(&self) -> f64 {
        self.motion.get().velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.motion.get().acceleration
    }

    pub fn last_tick(&self) -> Tick {
        self.cache.last_tick()
    }
}

impl Recompute for Accumulator {
    fn recompute(&self, last: Tick, now: Tick) -> f64 {
        let dt = now.since(last) as f64;
        let mut m = self.motion.get();
        m.value += m.velocity * dt + 0.5 * m.acceleration * dt * dt;
        m.velocity += m.acceleration * dt;
        self.motion.set(m);
        m.value
    }
}

impl TimedVal for Accumulator {
    fn value_at(&self, now: Tick) -> f64 {
        self.cache.get(now, self)
    }
}

impl fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.motion.get();
        f.debug_struct("Accumulator")
            .field("value", &m.value)
            .field("velocity", &m.velocity)
            .field("acceleration", &m.acceleration)
            .field("last_tick", &self.cache.last_tick())
            .finish()
    }
}
