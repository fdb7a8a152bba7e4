//! `tv-core` — foundational types for the `rust_tv` time-varying value engine.
//!
//! This crate is a dependency of every other `tv-*` crate.  It intentionally
//! has no `tv-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`time`]        | `Tick`                                                |
//! | [`ids`]         | `TickableId`                                          |
//! | [`config`]      | `ClockConfig`, `IntegratorConfig`                     |
//! | [`error`]       | `TvError`, `TvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ClockConfig, IntegratorConfig};
pub use error::{TvError, TvResult};
pub use ids::TickableId;
pub use time::Tick;
