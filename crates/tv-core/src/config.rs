//! Engine configuration.
//!
//! Plain structs with sensible `Default`s.  Applications typically build
//! them in code; with the `serde` feature they can also be loaded from a
//! TOML/JSON file by the application crate.  Call `validate()` (or let the
//! consuming constructor do it) before use.

use crate::{Tick, TvError, TvResult};

/// Largest refinement count accepted by [`IntegratorConfig::validate`].
/// Refinement `n` evaluates the integrand at 2^(n-2) new points.
pub const MAX_REFINEMENT_LIMIT: u32 = 30;

// ── ClockConfig ───────────────────────────────────────────────────────────────

/// Configuration for a `Clock`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Tick the clock reports before the first `tick()`, and returns to on
    /// `reset()`.  Default: 0.
    pub start: Tick,

    /// Subscriber slots to pre-allocate.  Set this near the expected
    /// population (10⁵–10⁶ skill values in a full game) so that attaching
    /// them does not repeatedly reallocate the registry.  Default: 0.
    pub subscriber_capacity: usize,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start:               Tick::ZERO,
            subscriber_capacity: 0,
        }
    }
}

impl ClockConfig {
    /// A clock config with room for `n` subscribers.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            subscriber_capacity: n,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> TvResult<()> {
        if self.start.0 < 0 {
            return Err(TvError::Config(format!(
                "clock start tick must be non-negative, got {}",
                self.start
            )));
        }
        Ok(())
    }
}

// ── IntegratorConfig ──────────────────────────────────────────────────────────

/// Tuning for the Simpson's-rule definite integral.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegratorConfig {
    /// Relative agreement required between two successive Simpson estimates.
    /// Default: 1e-4.
    pub tolerance: f64,

    /// Trapezoid refinements before giving up and returning the last
    /// estimate.  Default: 14 (about 8k integrand evaluations).
    pub max_refinements: u32,

    /// Refinements that must be performed before convergence is tested.
    /// Guards against two coarse estimates agreeing by accident.  Default: 5.
    pub min_refinements: u32,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            tolerance:       1.0e-4,
            max_refinements: 14,
            min_refinements: 5,
        }
    }
}

impl IntegratorConfig {
    pub fn validate(&self) -> TvResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TvError::Config(format!(
                "integrator tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_refinements == 0 || self.max_refinements > MAX_REFINEMENT_LIMIT {
            return Err(TvError::Config(format!(
                "max_refinements must be in 1..={MAX_REFINEMENT_LIMIT}, got {}",
                self.max_refinements
            )));
        }
        if self.min_refinements >= self.max_refinements {
            return Err(TvError::Config(format!(
                "min_refinements ({}) must be below max_refinements ({})",
                self.min_refinements, self.max_refinements
            )));
        }
        Ok(())
    }
}
