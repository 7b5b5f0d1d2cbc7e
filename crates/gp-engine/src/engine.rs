//! The `Engine` struct and its tick.

use gp_core::{EngineClock, GeoPoint, Tick, TimeSync};
use gp_filter::PositionFilter;
use gp_location::{
    AcquisitionSession, AcquisitionState, Diagnostics, HeadingTracker, LocationProvider,
    StateChange, StepReport,
};
use gp_placement::{BoundedArea, PlacementTransform, TargetRegistry};
use tracing::{debug, info};

use crate::{EngineConfig, EngineObserver};

/// What one [`Engine::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// Acquisition transition taken this tick.
    pub state_change: Option<StateChange>,
    /// New filter estimate, when a fresh fix was accepted.
    pub estimate: Option<GeoPoint>,
    /// Whether placements were rewritten.
    pub placements_recomputed: bool,
}

/// The positioning and placement engine.
///
/// Owns the provider, the filter, the acquisition session, and the placement
/// memo; borrows the target registry for the duration of each tick.  Create
/// via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<P: LocationProvider> {
    pub config: EngineConfig,

    /// Tick counter and the engine's notion of now.
    pub clock: EngineClock,

    /// Platform location and compass adapter.
    pub provider: P,

    pub filter: PositionFilter,

    pub session: AcquisitionSession,

    pub placement: PlacementTransform,

    /// Wrap window, if the scene is bounded.
    pub area: Option<BoundedArea>,

    pub heading: HeadingTracker,

    pub time_sync: TimeSync,

    /// Counters for debug overlays.
    pub diagnostics: Diagnostics,

    pub(crate) fixed_position: Option<GeoPoint>,
    pub(crate) paused: bool,
    pub(crate) error_message: Option<String>,
}

impl<P: LocationProvider> Engine<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run one scheduler tick at wall time `now_ms`.
    ///
    /// Calls observer hooks along the way.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn tick<R, O>(&mut self, now_ms: i64, registry: &mut R, observer: &mut O) -> TickReport
    where
        R: TargetRegistry + ?Sized,
        O: EngineObserver,
    {
        self.clock.advance(now_ms);
        let tick = self.clock.current_tick();
        let now = self.clock.now_ms();
        observer.on_tick_start(tick, now);
        self.diagnostics.count_frame(self.clock.current_second());

        // ── Acquisition ───────────────────────────────────────────────────
        let step = if self.paused || self.session.state().is_fatal() {
            StepReport::default()
        } else {
            self.session.tick(&mut self.provider, now, &mut self.filter, &mut self.diagnostics)
        };

        if let Some(change) = &step.change {
            observer.on_state_change(tick, change);
            if let AcquisitionState::Fatal(reason) = &change.to {
                if self.error_message.is_none() {
                    self.error_message = Some(reason.to_string());
                    observer.on_fatal(tick, reason);
                }
            }
        }
        if let Some(estimate) = step.estimate {
            observer.on_estimate(tick, now, estimate, self.filter.variance());
        }

        // ── Heading ───────────────────────────────────────────────────────
        if *self.session.state() == AcquisitionState::Sampling {
            self.heading.update(self.provider.compass_heading(), now);
        }

        // ── Placement ─────────────────────────────────────────────────────
        let mut placements_recomputed = false;
        if let Some(device) = self.device_position() {
            let targets = registry.targets_mut();
            if self.placement.recompute(device, targets, self.area.as_ref()) {
                self.diagnostics.placements_recomputed += 1;
                placements_recomputed = true;
                observer.on_placement(tick, device, targets);
            }
        }

        // ── Time sync ─────────────────────────────────────────────────────
        self.time_sync.update(self.clock.current_second());

        observer.on_tick_end(tick, self.session.state());

        TickReport {
            tick,
            state_change: step.change,
            estimate: step.estimate,
            placements_recomputed,
        }
    }

    /// The position targets are placed relative to: the fixed override if
    /// set, else the filter estimate once one exists.
    pub fn device_position(&self) -> Option<GeoPoint> {
        self.fixed_position.or_else(|| self.filter.estimate())
    }

    #[inline]
    pub fn state(&self) -> &AcquisitionState {
        self.session.state()
    }

    /// The terminal error text, once acquisition has given up.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Playback-speed multiplier for the animation driver; `None` while time
    /// sync is disabled.
    #[inline]
    pub fn duration_stretch_factor(&self) -> Option<f64> {
        self.time_sync.factor()
    }

    /// Change the time-sync period.  `<= 0` disables sync.
    pub fn set_time_sync_period(&mut self, period_secs: f64) {
        self.time_sync.set_period(period_secs);
    }

    // ── Runtime controls ──────────────────────────────────────────────────

    /// Stop (or resume) ticking the acquisition session, e.g. while an info
    /// panel covers the view.  Budgets do not drain while paused.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "acquisition pause toggled");
        }
        self.paused = paused;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Override (or, with `None`, stop overriding) the device position used
    /// for placement.
    pub fn set_fixed_position(&mut self, position: Option<GeoPoint>) {
        if let Some(p) = position {
            info!(position = %p, "using fixed device position");
        }
        self.fixed_position = position;
    }

    #[inline]
    pub fn fixed_position(&self) -> Option<GeoPoint> {
        self.fixed_position
    }

    /// Replace the wrap window.  Placements are recomputed on the next tick.
    pub fn set_area(&mut self, area: Option<BoundedArea>) {
        self.area = area;
    }

    /// Re-anchor the scene heading, e.g. after switching layers.
    pub fn reset_heading(&mut self) {
        self.heading.reset_initial();
    }

    /// Force a full placement recompute on the next tick.
    pub fn invalidate_placements(&mut self) {
        self.placement.invalidate();
    }

    #[inline]
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}
