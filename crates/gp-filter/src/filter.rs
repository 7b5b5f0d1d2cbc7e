//! The position filter.

use gp_core::GeoPoint;
use tracing::trace;

use crate::FilterConfig;

/// Reported accuracies below this are clamped up to it.
const MIN_ACCURACY_M: f64 = 1.0;

/// Variance value meaning "no fix seen yet".
const UNINITIALIZED: f64 = -1.0;

/// Mutable estimator state.  Owned exclusively by [`PositionFilter`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterState {
    pub estimate: GeoPoint,
    /// Exactly `-1` before the first fix, `>= 0` afterwards.
    pub variance: f64,
    /// Latest sample timestamp seen; never moves backwards.
    pub last_timestamp_ms: i64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            estimate: GeoPoint::default(),
            variance: UNINITIALIZED,
            last_timestamp_ms: 0,
        }
    }
}

/// Smooths a stream of `(lat, lon, accuracy, timestamp)` samples.
///
/// Noise is expected traffic: accuracy below 1 m is clamped, timestamps that
/// go backwards are treated as zero elapsed time, and NaN inputs simply flow
/// into the estimate.  There are no error cases.
#[derive(Clone, Debug)]
pub struct PositionFilter {
    apply_filter: bool,
    process_noise_mps: f64,
    state: FilterState,
    /// Set by pass-through updates, which keep no smoothing state.
    has_estimate: bool,
}

impl PositionFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            apply_filter: config.apply_filter,
            process_noise_mps: config.process_noise_mps,
            state: FilterState::default(),
            has_estimate: false,
        }
    }

    /// Feed one sample and return the new estimate.
    pub fn update(
        &mut self,
        lat: f64,
        lon: f64,
        accuracy_m: f64,
        timestamp_ms: i64,
    ) -> GeoPoint {
        let sample = GeoPoint::new(lat, lon);
        self.has_estimate = true;

        if !self.apply_filter {
            self.state.estimate = sample;
            return sample;
        }

        let accuracy = accuracy_m.max(MIN_ACCURACY_M);
        let measurement_variance = accuracy * accuracy;
        let state = &mut self.state;

        if state.variance < 0.0 {
            state.estimate = sample;
            state.variance = measurement_variance;
            state.last_timestamp_ms = timestamp_ms;
            trace!(%sample, variance = state.variance, "filter initialised");
            return state.estimate;
        }

        let elapsed_ms = timestamp_ms.saturating_sub(state.last_timestamp_ms);
        if elapsed_ms > 0 {
            let dt_s = elapsed_ms as f64 / 1000.0;
            state.variance += dt_s * self.process_noise_mps * self.process_noise_mps;
            state.last_timestamp_ms = timestamp_ms;
        }

        let gain = state.variance / (state.variance + measurement_variance);
        state.estimate.lat += gain * (lat - state.estimate.lat);
        state.estimate.lon += gain * (lon - state.estimate.lon);
        state.variance *= 1.0 - gain;

        trace!(estimate = %state.estimate, gain, variance = state.variance, "filter update");
        state.estimate
    }

    /// The current smoothed position.  Origin `(0, 0)` before any sample.
    #[inline]
    pub fn current_estimate(&self) -> GeoPoint {
        self.state.estimate
    }

    /// `Some(estimate)` once at least one sample has been seen.
    #[inline]
    pub fn estimate(&self) -> Option<GeoPoint> {
        self.has_estimate.then_some(self.state.estimate)
    }

    /// `true` once at least one sample has been seen.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.has_estimate
    }

    /// Current variance in m², or `-1` while uninitialised or in pass-through.
    #[inline]
    pub fn variance(&self) -> f64 {
        self.state.variance
    }

    #[inline]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[inline]
    pub fn applies_filter(&self) -> bool {
        self.apply_filter
    }

    /// Forget all history; the next sample re-initialises the estimate.
    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.has_estimate = false;
    }
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
