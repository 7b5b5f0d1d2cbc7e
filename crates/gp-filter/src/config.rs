//! Filter configuration.

/// Default process noise, metres per √second.
pub const DEFAULT_PROCESS_NOISE_MPS: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// `false` turns the filter into a pass-through: the estimate is always
    /// the latest raw sample.
    pub apply_filter: bool,

    /// How fast position uncertainty grows between fixes (`q`, m/√s).
    pub process_noise_mps: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            apply_filter: true,
            process_noise_mps: DEFAULT_PROCESS_NOISE_MPS,
        }
    }
}
