//! Integrands.

use tv_core::Tick;
use tv_graph::{Source, TimedVal};

/// A pure function of continuous time.
///
/// Implemented for every `Fn(f64) -> f64`, so closures can be integrated
/// directly.
pub trait TimeFxn {
    fn eval(&self, t: f64) -> f64;
}

impl<F: Fn(f64) -> f64> TimeFxn for F {
    #[inline]
    fn eval(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Views a graph node as a step function of continuous time.
///
/// `eval(t)` reads the node at `floor(t)`.  Only pure nodes should be
/// sampled: the integrator visits points out of order, which a stateful
/// node treats as non-monotonic reads.
pub struct SampledVal {
    node: Source,
}

impl SampledVal {
    pub fn new(node: Source) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &Source {
        &self.node
    }
}

impl TimeFxn for SampledVal {
    fn eval(&self, t: f64) -> f64 {
        self.node.value_at(Tick(t.floor() as i64))
    }
}
