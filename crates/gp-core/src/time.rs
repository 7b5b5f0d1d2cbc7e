//! Engine time model.
//!
//! # Design
//!
//! The engine is driven by a surrounding scheduler that calls `tick(now_ms)`
//! at a roughly periodic cadence (10–100 ms).  Two notions of time exist:
//!
//! - `Tick`: how many scheduler invocations have happened.  Acquisition
//!   budgets are counted in ticks.
//! - `now_ms`: the millisecond clock used for throttling, heading
//!   calibration, and time sync.
//!
//! In recording mode (`recording_frame_rate > 0`) a frame-capture tool calls
//! the engine once per captured frame, far slower than real time.  The clock
//! then ignores wall time after the first tick and advances by exactly one
//! frame interval per tick so that animations stay frame-locked.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing scheduler tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── EngineClock ───────────────────────────────────────────────────────────────

/// Tracks the current tick and the engine's notion of "now".
#[derive(Clone, Debug, Default)]
pub struct EngineClock {
    /// Frames per second of an external recorder, or `<= 0` for wall time.
    recording_frame_rate: f64,
    /// Time of the first tick, once seen.
    start_ms: Option<i64>,
    now_ms: i64,
    current_tick: Tick,
}

impl EngineClock {
    pub fn new(recording_frame_rate: f64) -> Self {
        Self {
            recording_frame_rate,
            ..Self::default()
        }
    }

    /// Advance by one tick.  `wall_ms` is the scheduler's current time.
    pub fn advance(&mut self, wall_ms: i64) {
        let start = *self.start_ms.get_or_insert(wall_ms);
        self.current_tick = Tick(self.current_tick.0 + 1);

        self.now_ms = if self.recording_frame_rate > 0.0 {
            let frames = (self.current_tick.0 - 1) as f64;
            // The cast saturates, so very slow rates pin the clock at i64::MAX.
            start.saturating_add((frames * 1000.0 / self.recording_frame_rate).round() as i64)
        } else {
            wall_ms
        };
    }

    /// Number of ticks seen so far (the tick currently being processed).
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    #[inline]
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Whole seconds of `now_ms`, rounded toward negative infinity.
    #[inline]
    pub fn current_second(&self) -> i64 {
        self.now_ms.div_euclid(1000)
    }

    /// Milliseconds since the first tick.  Zero before the first tick.
    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        self.start_ms.map_or(0, |start| self.now_ms.saturating_sub(start))
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.recording_frame_rate > 0.0
    }
}

impl fmt::Display for EngineClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ms)", self.current_tick, self.elapsed_ms())
    }
}
