//! `gp-location` — driving a platform location provider to a steady stream
//! of filtered fixes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`provider`]    | `LocationProvider` capability trait, `LocationSample`       |
//! | [`config`]      | `AcquisitionConfig` — tick budgets, retries, throttling     |
//! | [`acquisition`] | `AcquisitionSession` state machine, `AcquisitionState`      |
//! | [`heading`]     | `HeadingTracker` — initial/current compass heading          |
//! | [`diagnostics`] | `Diagnostics` — frame rate and sample counters              |
//! | [`sim`]         | `SimulatedProvider` — scriptable fake for tests and demos   |
//! | [`error`]       | `AcquisitionError` — the terminal failure taxonomy          |
//!
//! # State machine
//!
//! ```text
//! NotStarted ─► RequestingPermission ─► WaitingForProviderEnable ─► Initializing ─► Sampling
//!      │                 │                          │                     │ ▲
//!      └─────────────────┼──────────────────────────┘                     └─┘ retry on failure
//!                        ▼                          ▼                     ▼
//!                      Fatal                      Fatal                 Fatal
//! ```
//!
//! Every wait is a number of no-op ticks counted against a budget; nothing
//! ever blocks inside a tick.

pub mod acquisition;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod heading;
pub mod provider;
pub mod sim;

#[cfg(test)]
mod tests;

pub use acquisition::{AcquisitionSession, AcquisitionState, StateChange, StepReport};
pub use config::AcquisitionConfig;
pub use diagnostics::Diagnostics;
pub use error::AcquisitionError;
pub use heading::HeadingTracker;
pub use provider::{LocationProvider, LocationSample, ProviderStatus};
pub use sim::{Availability, SimulatedProvider};
