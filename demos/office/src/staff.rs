//! Employees and their skill graphs.

use std::rc::Rc;

use tv_clock::{Attached, Clock};
use tv_graph::build::{button, daccum, knob, mul, num, zero};
use tv_graph::{Button, Constant, DependentAccumulator, Knob, Source, as_source, sources};

pub const SKILLS: [&str; 3] = ["coding", "design", "sales"];

pub struct Employee {
    pub name:       &'static str,
    pub training:   Rc<Button>,
    pub learn_rate: Rc<Knob>,
    pub seniority:  Rc<Constant>,
    /// One accumulator per entry of [`SKILLS`], refreshed by the clock.
    pub skills:     Vec<Attached<DependentAccumulator>>,
}

impl Employee {
    /// Skill `i` grows at `training × learn_rate` per tick while training is
    /// on and holds still while it is off.
    pub fn hire(clock: &Clock, name: &'static str, seniority: f64, rate: f64, start: [f64; 3]) -> Self {
        let training = button(false);
        let learn_rate = knob(rate);
        let skills = start
            .into_iter()
            .map(|level| {
                let growth = mul(sources![training.clone(), learn_rate.clone()]);
                clock.attach(daccum(level, clock.now(), growth, zero()))
            })
            .collect();

        Self {
            name,
            training,
            learn_rate,
            seniority: num(seniority),
            skills,
        }
    }

    pub fn skill(&self, i: usize) -> Source {
        as_source(self.skills[i].node())
    }
}
