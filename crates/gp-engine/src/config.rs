//! Top-level engine configuration.

use gp_core::{GeoPoint, GpError, GpResult};
use gp_filter::FilterConfig;
use gp_location::AcquisitionConfig;
use gp_placement::PlacementConfig;

/// Default window after the first compass reading during which the initial
/// heading keeps following the sensor.
pub const DEFAULT_HEADING_CALIBRATION_MS: i64 = 500;

/// Slowest accepted recording rate, frames per second.
pub const MIN_RECORDING_FRAME_RATE: f64 = 1e-3;

/// Everything needed to build an [`Engine`][crate::Engine].
///
/// With the `serde` feature every field is optional in the serialised form and
/// falls back to its default, so a config file only lists what it changes:
///
/// ```json
/// { "time_sync_period_secs": 20.0, "placement": { "area_size_m": 100.0 } }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub acquisition: AcquisitionConfig,
    pub filter: FilterConfig,
    pub placement: PlacementConfig,

    /// Animation sync period, seconds.  `<= 0` disables time sync.
    pub time_sync_period_secs: f64,

    /// Frame rate of an external recorder.  `> 0` locks the engine clock to
    /// one frame per tick; `<= 0` follows wall time.
    pub recording_frame_rate: f64,

    /// Place targets relative to this point instead of the filtered fix.
    pub fixed_device_position: Option<GeoPoint>,

    pub heading_calibration_ms: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            acquisition:            AcquisitionConfig::default(),
            filter:                 FilterConfig::default(),
            placement:              PlacementConfig::default(),
            time_sync_period_secs:  0.0,
            recording_frame_rate:   0.0,
            fixed_device_position:  None,
            heading_calibration_ms: DEFAULT_HEADING_CALIBRATION_MS,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> GpResult<()> {
        self.acquisition.validate()?;
        self.placement.validate()?;

        let q = self.filter.process_noise_mps;
        if !(q.is_finite() && q >= 0.0) {
            return Err(GpError::Config(format!(
                "process_noise_mps must be finite and non-negative, got {q}"
            )));
        }
        if self.time_sync_period_secs.is_nan() {
            return Err(GpError::Config("time_sync_period_secs is NaN".into()));
        }
        let rate = self.recording_frame_rate;
        if !rate.is_finite() || (rate > 0.0 && rate < MIN_RECORDING_FRAME_RATE) {
            return Err(GpError::Config(format!(
                "recording_frame_rate must be <= 0 or at least {MIN_RECORDING_FRAME_RATE}, got {rate}"
            )));
        }
        if let Some(p) = self.fixed_device_position {
            if !p.is_finite() {
                return Err(GpError::Config(format!("fixed_device_position {p} is not finite")));
            }
        }
        if self.heading_calibration_ms < 0 {
            return Err(GpError::Config("heading_calibration_ms must not be negative".into()));
        }
        Ok(())
    }
}
