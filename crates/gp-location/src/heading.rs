//! Compass heading bookkeeping.

/// Tracks the current compass heading and the heading at which the scene was
/// anchored.
///
/// For `calibration_ms` after the first reading the initial heading follows
/// the compass, letting the sensor settle.  After that it stays frozen until
/// [`reset_initial`][Self::reset_initial].
///
/// The window opens at the first reading, which the engine takes on the first
/// `Sampling` tick, not at engine start.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadingTracker {
    calibration_ms: i64,
    first_reading_ms: Option<i64>,
    initial: f64,
    current: f64,
}

impl HeadingTracker {
    pub fn new(calibration_ms: i64) -> Self {
        Self {
            calibration_ms,
            ..Self::default()
        }
    }

    pub fn update(&mut self, heading_deg: f64, now_ms: i64) {
        let first = *self.first_reading_ms.get_or_insert(now_ms);
        self.current = heading_deg;
        if self.is_calibrating_at(first, now_ms) {
            self.initial = heading_deg;
        }
    }

    /// Re-anchor on the current heading, e.g. after switching scenes.
    pub fn reset_initial(&mut self) {
        self.initial = self.current;
    }

    #[inline]
    pub fn initial(&self) -> f64 {
        self.initial
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// `true` until the calibration window after the first reading has passed.
    pub fn is_calibrating(&self, now_ms: i64) -> bool {
        match self.first_reading_ms {
            None => true,
            Some(first) => self.is_calibrating_at(first, now_ms),
        }
    }

    fn is_calibrating_at(&self, first: i64, now_ms: i64) -> bool {
        now_ms.saturating_sub(first) <= self.calibration_ms
    }
}
