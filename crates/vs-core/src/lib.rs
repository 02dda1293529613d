//! `vs-core`: foundational types for the `virus_sim` grid epidemic engine.
//!
//! This crate is a dependency of every other `vs-*` crate.  It has no
//! `vs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `MemberId`                                            |
//! | [`time`]        | `Tick` counter of recalculations                      |
//! | [`params`]      | `SimParams`, run configuration and validation         |
//! | [`rng`]         | `SimRng` (seeded run-level RNG)                       |
//! | [`error`]       | `VsError`, `VsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{VsError, VsResult};
pub use ids::MemberId;
pub use params::SimParams;
pub use rng::SimRng;
pub use time::Tick;
