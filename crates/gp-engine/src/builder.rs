//! Fluent builder for constructing an [`Engine`].

use gp_core::{EngineClock, GeoPoint, TimeSync};
use gp_filter::PositionFilter;
use gp_location::{AcquisitionSession, Diagnostics, HeadingTracker, LocationProvider};
use gp_placement::{BoundedArea, PlacementTransform};
use tracing::info;

use crate::{Engine, EngineConfig, EngineError, EngineResult};

/// Fluent builder for [`Engine<P>`].
///
/// # Required inputs
///
/// - [`EngineConfig`]: budgets, filter, placement, time sync, …
/// - `P: LocationProvider`: the platform adapter (or
///   [`gp_location::SimulatedProvider`])
///
/// # Optional inputs (override the config)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.fixed_position(p)` | `config.fixed_device_position`            |
/// | `.area(a)`           | `config.placement.area()`                 |
/// | `.paused(b)`         | `false`                                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config, SimulatedProvider::new())
///     .area(BoundedArea::new(100.0, 100.0))
///     .build()?;
/// ```
pub struct EngineBuilder<P: LocationProvider> {
    config:         EngineConfig,
    provider:       P,
    fixed_position: Option<Option<GeoPoint>>,
    area:           Option<Option<BoundedArea>>,
    paused:         bool,
}

impl<P: LocationProvider> EngineBuilder<P> {
    pub fn new(config: EngineConfig, provider: P) -> Self {
        Self {
            config,
            provider,
            fixed_position: None,
            area:           None,
            paused:         false,
        }
    }

    /// Place targets relative to `position` (or, with `None`, always use the
    /// filter estimate) regardless of the config.
    pub fn fixed_position(mut self, position: Option<GeoPoint>) -> Self {
        self.fixed_position = Some(position);
        self
    }

    /// Use `area` as the wrap window regardless of the config.
    pub fn area(mut self, area: Option<BoundedArea>) -> Self {
        self.area = Some(area);
        self
    }

    /// Start with acquisition paused.
    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Validate the config and return a ready-to-tick [`Engine`].
    pub fn build(self) -> EngineResult<Engine<P>> {
        self.config.validate()?;

        let fixed_position = self.fixed_position.unwrap_or(self.config.fixed_device_position);
        if let Some(p) = fixed_position {
            if !p.is_finite() {
                return Err(EngineError::Config(format!("fixed position {p} is not finite")));
            }
        }
        let area = self.area.unwrap_or_else(|| self.config.placement.area());

        info!(
            apply_filter = self.config.filter.apply_filter,
            bounded = area.is_some(),
            time_sync_period_secs = self.config.time_sync_period_secs,
            recording = self.config.recording_frame_rate > 0.0,
            "engine built",
        );

        Ok(Engine {
            clock:          EngineClock::new(self.config.recording_frame_rate),
            provider:       self.provider,
            filter:         PositionFilter::new(&self.config.filter),
            session:        AcquisitionSession::new(self.config.acquisition.clone()),
            placement:      PlacementTransform::new(self.config.placement.tolerance_factor),
            area,
            heading:        HeadingTracker::new(self.config.heading_calibration_ms),
            time_sync:      TimeSync::new(self.config.time_sync_period_secs),
            diagnostics:    Diagnostics::new(),
            fixed_position,
            paused:         self.paused,
            error_message:  None,
            config:         self.config,
        })
    }
}
