//! Placement configuration.

use gp_core::{GpError, GpResult};

use crate::BoundedArea;

/// Default slack on visibility ranges, absorbing filter lag and jitter so that
/// objects do not flicker at the exact range boundary.
pub const DEFAULT_TOLERANCE_FACTOR: f64 = 1.25;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// A target is visible within `tolerance_factor × visibility_range_m`.
    pub tolerance_factor: f64,

    /// North–south extent of the wrap window, metres.  `<= 0` together with
    /// `area_width_m <= 0` disables wrapping.
    pub area_size_m: f64,

    /// East–west extent of the wrap window, metres.
    pub area_width_m: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            tolerance_factor: DEFAULT_TOLERANCE_FACTOR,
            area_size_m:      0.0,
            area_width_m:     0.0,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> GpResult<()> {
        if !(self.tolerance_factor.is_finite() && self.tolerance_factor > 0.0) {
            return Err(GpError::Config(format!(
                "tolerance_factor must be positive and finite, got {}",
                self.tolerance_factor,
            )));
        }
        if !self.area_size_m.is_finite() || !self.area_width_m.is_finite() {
            return Err(GpError::Config("area dimensions must be finite".into()));
        }
        Ok(())
    }

    /// The wrap window described by this config, if any.
    pub fn area(&self) -> Option<BoundedArea> {
        BoundedArea::from_dimensions(self.area_size_m, self.area_width_m)
    }
}
