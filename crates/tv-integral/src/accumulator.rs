//! Running integral.
//!
//! Each read integrates only the span since the previous read and adds it to
//! a stored total.  The integrand may be replaced between reads, so the
//! total is a sum of per-interval integrals of whatever function was current
//! at the time.  It need not equal the integral of the final function over
//! the whole span.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;
use tv_core::{IntegratorConfig, Tick};
use tv_graph::TimedVal;

use crate::{IntegralResult, TimeFxn, definite};

pub struct IntegralAccumulator {
    value:     Cell<f64>,
    last_time: Cell<f64>,
    fxn:       RefCell<Box<dyn TimeFxn>>,
    config:    IntegratorConfig,
}

impl IntegralAccumulator {
    /// Start at `value`, integrating `fxn` from `start` on the next read.
    pub fn new(value: f64, start: f64, fxn: impl TimeFxn + 'static) -> Self {
        Self {
            value:     Cell::new(value),
            last_time: Cell::new(start),
            fxn:       RefCell::new(Box::new(fxn)),
            config:    IntegratorConfig::default(),
        }
    }

    pub fn with_config(
        value: f64,
        start: f64,
        fxn: impl TimeFxn + 'static,
        config: IntegratorConfig,
    ) -> IntegralResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(value, start, fxn)
        })
    }

    /// Add `∫[last, t] fxn` to the total and move `last` to `t`.  Reads at
    /// or before `last` return the total unchanged.
    pub fn accumulate(&self, t: f64) -> f64 {
        let last = self.last_time.get();
        if t <= last {
            return self.value.get();
        }
        let area = definite(&**self.fxn.borrow(), last, t, &self.config);
        trace!(from = last, to = t, area, "accumulate");
        self.value.set(self.value.get() + area);
        self.last_time.set(t);
        self.value.get()
    }

    /// Replace the integrand for all spans not yet integrated.
    pub fn set_fxn(&self, fxn: impl TimeFxn + 'static) {
        *self.fxn.borrow_mut() = Box::new(fxn);
    }

    /// The total as of the last accumulation.
    pub fn value(&self) -> f64 {
        self.value.get()
    }

    pub fn last_time(&self) -> f64 {
        self.last_time.get()
    }
}

impl TimedVal for IntegralAccumulator {
    fn value_at(&self, now: Tick) -> f64 {
        self.accumulate(now.as_f64())
    }
}

impl fmt::Debug for IntegralAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegralAccumulator")
            .field("value", &self.value.get())
            .field("last_time", &self.last_time.get())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Shared running integral, ready to feed graph combinators.
pub fn integral_accum(value: f64, start: Tick, fxn: impl TimeFxn + 'static) -> Rc<IntegralAccumulator> {
    Rc::new(IntegralAccumulator::new(value, start.as_f64(), fxn))
}
