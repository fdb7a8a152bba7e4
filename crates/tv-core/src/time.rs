//! Engine time model.
//!
//! # Design
//!
//! Time is an abstract, monotonically increasing `Tick` counter.  There is no
//! mapping to wall-clock time: the host loop decides how often to call
//! `Clock::tick()`, and the engine only ever sees the integer.
//!
//! Ticks are signed.  The clock itself only counts upward from its start
//! tick, but pure nodes (constants, knobs, combinators of them) may be
//! queried at any tick, including ones before the origin.  Stateful nodes
//! require non-decreasing ticks; see `tv-graph` for how violations are
//! handled.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute engine tick.
///
/// Stored as `i64`: at 60 ticks per second a signed 64-bit counter lasts
/// ~4.8 billion years, and the sign bit lets graph authors place nodes at
/// negative ticks when convenient for tests.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub i64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: i64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: Tick) -> i64 {
        self.0 - earlier.0
    }

    /// The tick as a float, for kinematic and integral arithmetic.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl std::ops::Add<i64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: i64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Tick) -> i64 {
        self.0 - rhs.0
    }
}

impl From<i64> for Tick {
    #[inline]
    fn from(n: i64) -> Tick {
        Tick(n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
