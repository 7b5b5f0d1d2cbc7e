//! `gp-filter` — smoothing of noisy location fixes.
//!
//! # Crate layout
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`config`] | `FilterConfig` — pass-through flag and process noise |
//! | [`filter`] | `PositionFilter`, `FilterState`                      |
//!
//! # Model
//!
//! A one-dimensional Kalman filter runs on latitude and longitude with one
//! shared scalar variance (in square metres).  The gain is dimensionless, so
//! applying a metre-based variance to degree-based coordinates is consistent.
//! Between fixes the variance grows by `q²` per second of sample time; each
//! fix shrinks it according to its reported horizontal accuracy.

pub mod config;
pub mod filter;


pub use config::FilterConfig;
pub use filter::{FilterState, PositionFilter};
