//! Simpson's rule by successive trapezoid refinement.
//!
//! Pass `n` halves the trapezoid spacing of pass `n - 1`, reusing every
//! sample already taken, and Richardson extrapolation of two consecutive
//! passes gives the Simpson estimate:
//!
//! ```text
//! T(1) = (b - a)/2 · (f(a) + f(b))
//! T(n) = T(n-1)/2 + (b - a)/2^(n-1) · Σ f(midpoints of pass n-1)
//! S(n) = (4·T(n) - T(n-1)) / 3
//! ```
//!
//! Iteration stops once `|S(n) - S(n-1)| < tolerance · |S(n-1)|` (or both
//! are exactly zero), but not before `min_refinements` passes.

use tracing::debug;
use tv_core::IntegratorConfig;

use crate::{IntegralResult, TimeFxn};

/// Seed for the "previous" estimates so the first comparison never passes.
const UNSET: f64 = -1.0e30;

/// Successive trapezoid refinements over `[a, b]`.
struct Trapezoid {
    a:    f64,
    b:    f64,
    sum:  f64,
    pass: u32,
}

impl Trapezoid {
    fn new(a: f64, b: f64) -> Self {
        Self { a, b, sum: 0.0, pass: 0 }
    }

    /// Run the next pass and return its estimate.
    fn refine<F: TimeFxn + ?Sized>(&mut self, f: &F) -> f64 {
        let width = self.b - self.a;
        self.pass += 1;
        if self.pass == 1 {
            self.sum = 0.5 * width * (f.eval(self.a) + f.eval(self.b));
        } else {
            let points = 1u64 << (self.pass - 2);
            let n = points as f64;
            let del = width / n;
            let mut x = self.a + 0.5 * del;
            let mut acc = 0.0;
            for _ in 0..points {
                acc += f.eval(x);
                x += del;
            }
            self.sum = 0.5 * (self.sum + width * acc / n);
        }
        self.sum
    }
}

/// `∫[a, b] f(t) dt`.  `b < a` yields the negated integral.
pub fn definite<F: TimeFxn + ?Sized>(f: &F, a: f64, b: f64, config: &IntegratorConfig) -> f64 {
    let mut trapezoid = Trapezoid::new(a, b);
    let mut prev_s = UNSET;
    let mut prev_t = UNSET;
    let mut s = 0.0;
    let mut delta = f64::NAN;

    for pass in 1..=config.max_refinements {
        let t = trapezoid.refine(f);
        s = (4.0 * t - prev_t) / 3.0;
        if pass > config.min_refinements {
            delta = (s - prev_s).abs();
            if delta < config.tolerance * prev_s.abs() || (s == 0.0 && prev_s == 0.0) {
                return s;
            }
        }
        prev_s = s;
        prev_t = t;
    }

    debug!(a, b, estimate = s, delta, passes = config.max_refinements, "integral did not converge");
    s
}

// ── Integrator ────────────────────────────────────────────────────────────────

/// The definite integral of `fxn` from a fixed start time.
///
/// An `Integrator` is itself a [`TimeFxn`] of its upper limit, so it can be
/// integrated again or wrapped in another integrator.
pub struct Integrator<F> {
    start:  f64,
    fxn:    F,
    config: IntegratorConfig,
}

impl<F: TimeFxn> Integrator<F> {
    pub fn new(start: f64, fxn: F) -> Self {
        Self {
            start,
            fxn,
            config: IntegratorConfig::default(),
        }
    }

    pub fn with_config(start: f64, fxn: F, config: IntegratorConfig) -> IntegralResult<Self> {
        config.validate()?;
        Ok(Self { start, fxn, config })
    }

    /// `∫[start, t] fxn`.
    pub fn integrate(&self, t: f64) -> f64 {
        definite(&self.fxn, self.start, t, &self.config)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn fxn(&self) -> &F {
        &self.fxn
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }
}

impl<F: TimeFxn> TimeFxn for Integrator<F> {
    fn eval(&self, t: f64) -> f64 {
        self.integrate(t)
    }
}
