//! Single-input filters.

use std::cell::Cell;

use tv_core::Tick;

use crate::{Source, TimedVal};

/// A scalar function applied to a filter's input.
pub trait FilterFn {
    fn apply(&self, x: f64) -> f64;
}

/// One source passed through `F`.
pub struct Filter<F> {
    input: Source,
    f:     F,
}

impl<F: FilterFn> Filter<F> {
    pub fn with_fn(input: Source, f: F) -> Self {
        Self { input, f }
    }

    pub fn input(&self) -> &Source {
        &self.input
    }

    pub fn function(&self) -> &F {
        &self.f
    }
}

impl<F: FilterFn> TimedVal for Filter<F> {
    #[inline]
    fn value_at(&self, now: Tick) -> f64 {
        self.f.apply(self.input.value_at(now))
    }
}

// ── Clamp ─────────────────────────────────────────────────────────────────────

/// Clip to the closed interval `[min, max]`.  Both bounds may be moved after
/// construction.
#[derive(Debug)]
pub struct Clamp {
    min: Cell<f64>,
    max: Cell<f64>,
}

impl FilterFn for Clamp {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        let (min, max) = (self.min.get(), self.max.get());
        // `f64::clamp` panics on min > max; an inverted range just pins to
        // whichever bound is crossed first.
        if x < min {
            min
        } else if x > max {
            max
        } else {
            x
        }
    }
}

pub type Clamper = Filter<Clamp>;

impl Filter<Clamp> {
    pub fn new(input: Source, min: f64, max: f64) -> Self {
        Self::with_fn(input, Clamp {
            min: Cell::new(min),
            max: Cell::new(max),
        })
    }

    pub fn set_min(&self, min: f64) {
        self.f.min.set(min);
    }

    pub fn set_max(&self, max: f64) {
        self.f.max.set(max);
    }

    /// `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.f.min.get(), self.f.max.get())
    }
}

// ── Logistic ──────────────────────────────────────────────────────────────────

/// `scale / (1 + e^(x + shift))`.
///
/// The shift is added to the input before exponentiation, so a positive
/// shift moves the curve *left*, and the curve falls as `x` grows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Logistic {
    pub shift: f64,
    pub scale: f64,
}

impl Default for Logistic {
    fn default() -> Self {
        Self { shift: 0.0, scale: 1.0 }
    }
}

impl FilterFn for Logistic {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        self.scale * (1.0 / (1.0 + (x + self.shift).exp()))
    }
}

pub type Sigmoid = Filter<Logistic>;

impl Filter<Logistic> {
    pub fn new(input: Source, shift: f64, scale: f64) -> Self {
        Self::with_fn(input, Logistic { shift, scale })
    }
}
