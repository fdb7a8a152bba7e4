//! `tv-integral` — numerical integration over engine time.
//!
//! Used where a quantity is the area under an arbitrary curve and no closed
//! form is available.  Closed-form kinematics belong in
//! `tv_graph::Accumulator`; this crate is the fallback.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`fxn`]         | `TimeFxn` trait, `SampledVal` adapter for graph nodes  |
//! | [`simpson`]     | `definite`, `Integrator`                               |
//! | [`accumulator`] | `IntegralAccumulator` (running integral, a `TimedVal`) |
//! | [`error`]       | `IntegralError`, `IntegralResult`                      |
//!
//! # Numerical behaviour
//!
//! Integration never fails.  If successive refinements do not agree within
//! `IntegratorConfig::tolerance` after `max_refinements` passes, the last
//! estimate is returned and a `debug!` event is emitted.

pub mod accumulator;
pub mod error;
pub mod fxn;
pub mod simpson;


pub use accumulator::{IntegralAccumulator, integral_accum};
pub use error::{IntegralError, IntegralResult};
pub use fxn::{SampledVal, TimeFxn};
pub use simpson::{Integrator, definite};
