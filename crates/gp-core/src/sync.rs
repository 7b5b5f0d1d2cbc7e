//! Shared animation phase across independently clocked devices.
//!
//! Every device running with the same period computes the same stretch
//! factor from its wall clock.  An animation driver multiplies its playback
//! speed by the factor so that all devices arrive at the period boundary
//! together.  During the final quarter of a period the factor exceeds 1 so a
//! lagging animation is stretched into the next boundary instead of being cut.

/// Fraction of the period after which the stretch switches to the longer form.
const LATE_WINDOW_START: f64 = 0.75;

/// Duration stretch factor for `now_secs` with a period of `period_secs`.
///
/// Returns `None` when `period_secs <= 0` (sync disabled).
pub fn duration_stretch(now_secs: f64, period_secs: f64) -> Option<f64> {
    if period_secs.is_nan() || period_secs <= 0.0 {
        return None;
    }
    let sync_time = now_secs.rem_euclid(period_secs);
    let rest = period_secs - sync_time;
    if sync_time < LATE_WINDOW_START * period_secs {
        Some(rest / period_secs)
    } else {
        Some((period_secs + rest) / period_secs)
    }
}

/// Holds the configured period and the latest factor.
///
/// A freshly enabled holder reports `Some(1.0)` until the first
/// [`update`][Self::update].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSync {
    period_secs: f64,
    factor: Option<f64>,
}

impl TimeSync {
    pub fn new(period_secs: f64) -> Self {
        let mut sync = Self::default();
        sync.set_period(period_secs);
        sync
    }

    /// Change the period.  `<= 0` disables sync.
    pub fn set_period(&mut self, period_secs: f64) {
        self.period_secs = period_secs;
        self.factor = (period_secs > 0.0).then_some(1.0);
    }

    #[inline]
    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }

    /// Recompute the factor for the given whole second.
    pub fn update(&mut self, current_second: i64) -> Option<f64> {
        self.factor = duration_stretch(current_second as f64, self.period_secs);
        self.factor
    }

    /// Latest factor; `None` while sync is disabled.
    #[inline]
    pub fn factor(&self) -> Option<f64> {
        self.factor
    }
}
