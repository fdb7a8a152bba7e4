//! Factory functions — the intended way to assemble a graph.
//!
//! Gameplay code should build nodes through these rather than through the
//! node types' constructors, so node choices stay adjustable in one place.
//! Each factory returns the concrete handle: keep it to call
//! `set_value`/`toggle`/`change_*`, and pass a clone wherever a [`Source`]
//! is expected (combinator lists via [`sources!`](crate::sources)).
//!
//! Stateful factories take the creation tick, normally `clock.now()`.
//! `daccum` only builds the node; attach it with `clock.attach(..)`.

use std::rc::Rc;

use tv_core::Tick;

use crate::{
    Accumulator, Adder, Averager, Button, CachedVal, Clamper, Constant, DependentAccumulator,
    DotProduct, GraphResult, Knob, Multiplier, Sigmoid, Source, WeightedAverage,
};

pub fn num(value: f64) -> Rc<Constant> {
    Rc::new(Constant::new(value))
}

pub fn zero() -> Source {
    num(0.0)
}

pub fn half() -> Source {
    num(0.5)
}

pub fn one() -> Source {
    num(1.0)
}

pub fn knob(value: f64) -> Rc<Knob> {
    Rc::new(Knob::new(value))
}

pub fn button(on: bool) -> Rc<Button> {
    Rc::new(Button::new(on))
}

pub fn cached(inner: Source, created: Tick) -> Rc<CachedVal> {
    Rc::new(CachedVal::new(inner, created))
}

pub fn add(sources: Vec<Source>) -> Rc<Adder> {
    Rc::new(Adder::new(sources))
}

/// Fails on an empty list.
pub fn avg(sources: Vec<Source>) -> GraphResult<Rc<Averager>> {
    Averager::new(sources).map(Rc::new)
}

pub fn mul(sources: Vec<Source>) -> Rc<Multiplier> {
    Rc::new(Multiplier::new(sources))
}

pub fn clamp(input: Source, min: f64, max: f64) -> Rc<Clamper> {
    Rc::new(Clamper::new(input, min, max))
}

/// `scale / (1 + e^(x + shift))`; the usual defaults are `shift = 0`,
/// `scale = 1`.
pub fn sigmoid(input: Source, shift: f64, scale: f64) -> Rc<Sigmoid> {
    Rc::new(Sigmoid::new(input, shift, scale))
}

pub fn dot(a: Vec<Source>, b: Vec<Source>) -> Rc<DotProduct> {
    Rc::new(DotProduct::new(a, b))
}

pub fn weighted_avg(weights: Vec<Source>, inputs: Vec<Source>) -> Rc<WeightedAverage> {
    Rc::new(WeightedAverage::new(weights, inputs))
}

pub fn accum(value: f64, created: Tick, velocity: f64, acceleration: f64) -> Rc<Accumulator> {
    Rc::new(Accumulator::new(value, created, velocity, acceleration))
}

pub fn daccum(
    value:        f64,
    created:      Tick,
    velocity:     Source,
    acceleration: Source,
) -> Rc<DependentAccumulator> {
    Rc::new(DependentAccumulator::new(value, created, velocity, acceleration))
}
