//! Zero-input value sources.
//!
//! None of these cache: reading them is O(1) and always reflects the latest
//! external write, whatever tick is asked for.

use std::cell::Cell;

use tv_core::Tick;

use crate::TimedVal;

/// A value that never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(f64);

impl Constant {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

impl TimedVal for Constant {
    #[inline]
    fn value_at(&self, _now: Tick) -> f64 {
        self.0
    }
}

/// A scalar set by external events (a morale modifier, a difficulty slider).
#[derive(Debug, Default)]
pub struct Knob {
    value: Cell<f64>,
}

impl Knob {
    pub fn new(value: f64) -> Self {
        Self { value: Cell::new(value) }
    }

    pub fn set_value(&self, value: f64) {
        self.value.set(value);
    }

    pub fn get(&self) -> f64 {
        self.value.get()
    }
}

impl TimedVal for Knob {
    #[inline]
    fn value_at(&self, _now: Tick) -> f64 {
        self.value.get()
    }
}

/// An on/off switch read as `1.0`/`0.0`.  Typically gates a rate, e.g.
/// "is this employee in training right now".
#[derive(Debug, Default)]
pub struct Button {
    on: Cell<bool>,
}

impl Button {
    pub fn new(on: bool) -> Self {
        Self { on: Cell::new(on) }
    }

    pub fn toggle(&self) {
        self.on.set(!self.on.get());
    }

    pub fn set(&self, on: bool) {
        self.on.set(on);
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }
}

impl TimedVal for Button {
    #[inline]
    fn value_at(&self, _now: Tick) -> f64 {
        if self.on.get() { 1.0 } else { 0.0 }
    }
}
