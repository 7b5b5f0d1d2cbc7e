//! Engine observer trait for tracing and data collection.

use gp_core::{GeoPoint, Tick};
use gp_location::{AcquisitionError, AcquisitionState, StateChange};
use gp_placement::Target;

/// Callbacks invoked by [`Engine::tick`][crate::Engine::tick].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: fix logger
///
/// ```rust,ignore
/// struct FixLogger;
///
/// impl EngineObserver for FixLogger {
///     fn on_estimate(&mut self, tick: Tick, _now_ms: i64, estimate: GeoPoint, _variance: f64) {
///         println!("{tick}: {estimate}");
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called at the start of each tick, after the clock advanced.
    fn on_tick_start(&mut self, _tick: Tick, _now_ms: i64) {}

    /// Called when the acquisition state changed this tick.
    fn on_state_change(&mut self, _tick: Tick, _change: &StateChange) {}

    /// Called when a fresh fix went through the filter.
    fn on_estimate(&mut self, _tick: Tick, _now_ms: i64, _estimate: GeoPoint, _variance: f64) {}

    /// Called after placements were rewritten, with the full target list.
    fn on_placement(&mut self, _tick: Tick, _device: GeoPoint, _targets: &[Target]) {}

    /// Called once, on the tick acquisition gives up.
    fn on_fatal(&mut self, _tick: Tick, _error: &AcquisitionError) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _state: &AcquisitionState) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
