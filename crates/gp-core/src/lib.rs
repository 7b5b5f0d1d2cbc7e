//! `gp-core` — foundational types for the `geoplace` positioning engine.
//!
//! This crate is a dependency of every other `gp-*` crate.  It has no `gp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`geo`]     | `GeoPoint`, haversine distance, `EARTH_RADIUS_M`          |
//! | [`ids`]     | `TargetId`                                                |
//! | [`time`]    | `Tick`, `EngineClock`                                     |
//! | [`sync`]    | `duration_stretch` phase function, `TimeSync` holder      |
//! | [`rng`]     | `NoiseRng` — deterministic sensor jitter for fakes/demos  |
//! | [`error`]   | `GpError`, `GpResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod sync;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GpError, GpResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint, distance_m};
pub use ids::TargetId;
pub use rng::{NoiseRng, offset_by_metres};
pub use sync::{TimeSync, duration_stretch};
pub use time::{EngineClock, Tick};
