//! `gp-placement` — where each point of interest sits relative to the device.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`target`]    | `Target`, `PlacementResult`, `LocalOffset`, `TargetRegistry` |
//! | [`area`]      | `BoundedArea` — toroidal wrap window and seam distance       |
//! | [`config`]    | `PlacementConfig`                                            |
//! | [`transform`] | `place` (one target) and `PlacementTransform` (memoised)     |
//!
//! # Local frame
//!
//! The device sits at the origin.  `east` grows with longitude, `north` with
//! latitude, `up` is the target's configured altitude offset.  Distances along
//! each axis are great-circle distances, so they agree with the visibility
//! test to the bit.

pub mod area;
pub mod config;
pub mod target;
pub mod transform;

#[cfg(test)]
mod tests;

pub use area::BoundedArea;
pub use config::PlacementConfig;
pub use target::{LocalOffset, PlacementResult, Target, TargetRegistry};
pub use transform::{PlacementTransform, place};
