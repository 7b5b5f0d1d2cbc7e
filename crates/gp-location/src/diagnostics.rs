//! Process-wide telemetry for debug overlays.
//!
//! Nothing in here feeds back into positioning; it is written by the engine
//! and the acquisition session and read by whatever displays it.

use crate::LocationSample;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    /// Frames counted during the last complete second.
    pub frames_per_second: u32,
    frames_this_second: u32,
    counted_second: Option<i64>,

    /// Fresh fixes forwarded to the filter.
    pub samples_accepted: u64,
    /// Sampling ticks skipped by the update-interval throttle.
    pub samples_throttled: u64,
    /// Provider failures seen during initialisation, retries included.
    pub provider_failures: u32,
    /// Times the placement transform actually ran.
    pub placements_recomputed: u64,
    /// Last fix forwarded to the filter.
    pub last_sample: Option<LocationSample>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame at wall second `current_second`.
    ///
    /// When the second rolls over the finished count becomes
    /// `frames_per_second`; if whole seconds were skipped it drops to 1.
    pub fn count_frame(&mut self, current_second: i64) {
        match self.counted_second {
            Some(s) if s == current_second => self.frames_this_second += 1,
            Some(s) => {
                self.frames_per_second = if s == current_second - 1 {
                    self.frames_this_second
                } else {
                    1
                };
                self.frames_this_second = 1;
                self.counted_second = Some(current_second);
            }
            None => {
                self.frames_per_second = 1;
                self.frames_this_second = 1;
                self.counted_second = Some(current_second);
            }
        }
    }

    pub(crate) fn record_sample(&mut self, sample: LocationSample) {
        self.samples_accepted += 1;
        self.last_sample = Some(sample);
    }
}
