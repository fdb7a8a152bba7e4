//! `tv-clock` — the discrete time source for the rust_tv engine.
//!
//! # Tick dispatch
//!
//! ```text
//! clock.tick():
//!   ① now += 1
//!   ② for every attached Tickable (dense Vec, unspecified order):
//!        tickable.tick(now)
//!   ③ apply attach/detach requests made from inside step ②
//! ```
//!
//! Only nodes whose value must be refreshed even when nobody reads them
//! (chiefly `DependentAccumulator`) attach to a clock.  Everything else is
//! evaluated lazily when queried.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`clock`]      | `Clock` context handle, `Tickable` trait              |
//! | [`registry`]   | Dense subscriber storage with O(1) attach/detach      |
//! | [`guard`]      | `Registration` and `Attached<T>` RAII guards          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tv_clock::Clock;
//!
//! let clock = Clock::new();
//! let skill = clock.attach(Rc::new(DependentAccumulator::new(..)));
//! clock.tick();
//! drop(skill); // detached; no ghost updates
//! ```

pub mod clock;
pub mod guard;
pub mod registry;


pub use clock::{Clock, Tickable};
pub use guard::{Attached, Registration};
