//! `tv-graph` — the time-varying value graph.
//!
//! Every node answers one question: "what is this quantity at tick `t`?"
//! Nodes hold shared handles to the sources they were built from, so one
//! source can feed many downstream nodes.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                 |
//! |-------------------|----------------------------------------------------------|
//! | [`value`]         | `TimedVal` trait, `Source` handle, `sources!` macro      |
//! | [`source`]        | `Constant`, `Knob`, `Button`                             |
//! | [`cache`]         | `Recompute`, `TickCache`, `CachedVal`                    |
//! | [`combine`]       | `Adder`/`Summer`, `Averager`, `Multiplier`               |
//! | [`filter`]        | `Clamper`, `Sigmoid`                                     |
//! | [`zip`]           | `DotProduct`, `WeightedAverage`                          |
//! | [`accumulator`]   | `Accumulator` (scalar velocity/acceleration)             |
//! | [`dependent`]     | `DependentAccumulator` (velocity/acceleration are nodes) |
//! | [`build`]         | Factory functions, the intended construction API         |
//! | [`error`]         | `GraphError`, `GraphResult`                              |
//!
//! # Evaluation model
//!
//! ```text
//! pure nodes      value_at(t) = f(sources.value_at(t))      (no state)
//! cached nodes    value_at(t) computed at most once per tick (TickCache)
//! tickable nodes  cached + refreshed by Clock::tick() even when unread
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tv_graph::build::{button, daccum, knob, mul, zero};
//! use tv_graph::{sources, TimedVal};
//!
//! let training = button(true);
//! let rate     = knob(0.001);
//! let skill    = clock.attach(daccum(0.0, clock.now(), mul(sources![training.clone(), rate.clone()]), zero()));
//! clock.tick();
//! let s = skill.value_at(clock.now());
//! ```

pub mod accumulator;
pub mod build;
pub mod cache;
pub mod combine;
pub mod dependent;
pub mod error;
pub mod filter;
pub mod source;
pub mod value;
pub mod zip;

#[cfg(test)]
mod tests;

pub use accumulator::Accumulator;
pub use cache::{CachedVal, Recompute, TickCache};
pub use combine::{Adder, Averager, Combiner, Fold, Multiplier, Summer};
pub use dependent::DependentAccumulator;
pub use error::{GraphError, GraphResult};
pub use filter::{Clamp, Clamper, Filter, FilterFn, Logistic, Sigmoid};
pub use source::{Button, Constant, Knob};
pub use value::{Source, TimedVal, as_source};
pub use zip::{DotProduct, WeightedAverage, ZipCombiner, ZipFold};
