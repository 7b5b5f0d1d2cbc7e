//! Acquisition budgets and throttling.
//!
//! Budgets are in scheduler ticks.  The defaults assume a 10 ms cadence
//! (45 s for permission, 10 s for enablement, 30 s for initialisation) and
//! must be re-derived if the cadence changes.

use gp_core::{GpError, GpResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquisitionConfig {
    /// Ticks to wait for the user to grant permission.
    pub permission_budget_ticks: u64,

    /// Ticks to wait for location services to be switched on.
    pub enable_budget_ticks: u64,

    /// Ticks to wait for the provider to leave `Initializing`.
    pub init_budget_ticks: u64,

    /// Provider failures tolerated during initialisation before giving up.
    pub max_failures: u32,

    /// Passed to [`LocationProvider::start`][crate::LocationProvider::start].
    pub desired_accuracy_m: f64,

    /// Passed to [`LocationProvider::start`][crate::LocationProvider::start].
    pub desired_update_distance_m: f64,

    /// Minimum spacing between accepted fixes while sampling.  `<= 0`
    /// accepts every fresh fix.
    pub position_update_interval_secs: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            permission_budget_ticks:      4_500,
            enable_budget_ticks:          1_000,
            init_budget_ticks:            3_000,
            max_failures:                 10,
            desired_accuracy_m:           0.1,
            desired_update_distance_m:    0.1,
            position_update_interval_secs: 0.0,
        }
    }
}

impl AcquisitionConfig {
    pub fn validate(&self) -> GpResult<()> {
        for (name, budget) in [
            ("permission_budget_ticks", self.permission_budget_ticks),
            ("enable_budget_ticks", self.enable_budget_ticks),
            ("init_budget_ticks", self.init_budget_ticks),
        ] {
            if budget == 0 {
                return Err(GpError::Config(format!("{name} must be at least 1")));
            }
        }
        if !self.position_update_interval_secs.is_finite() {
            return Err(GpError::Config(format!(
                "position_update_interval_secs must be finite, got {}",
                self.position_update_interval_secs,
            )));
        }
        Ok(())
    }

    /// Throttle interval in ms, or `None` when throttling is disabled.
    /// Intervals beyond the `i64` range saturate.
    pub fn update_interval_ms(&self) -> Option<i64> {
        (self.position_update_interval_secs > 0.0)
            .then(|| (self.position_update_interval_secs * 1000.0).round() as i64)
    }
}
