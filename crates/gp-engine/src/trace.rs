//! CSV trace of filter estimates and placements.
//!
//! Creates two files in the output directory:
//! - `estimates.csv`: one row per fix forwarded to the filter
//! - `placements.csv`: one row per target per placement recompute

use std::fs::File;
use std::path::Path;

use csv::Writer;
use gp_core::{GeoPoint, Tick};
use gp_location::AcquisitionError;
use gp_placement::Target;
use thiserror::Error;
use tracing::warn;

use crate::EngineObserver;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type TraceResult<T> = Result<T, TraceError>;

/// An [`EngineObserver`] that records the run to CSV.
///
/// Errors are stored because observer methods have no return value.  Check
/// with [`take_error`][Self::take_error] or call [`finish`][Self::finish],
/// which flushes and reports the first stored error.
pub struct CsvTraceObserver {
    estimates:  Writer<File>,
    placements: Writer<File>,
    last_error: Option<TraceError>,
    finished:   bool,
}

impl CsvTraceObserver {
    /// Create both files in `dir` and write their header rows.
    pub fn new(dir: &Path) -> TraceResult<Self> {
        let mut estimates = Writer::from_path(dir.join("estimates.csv"))?;
        estimates.write_record(["tick", "now_ms", "lat", "lon", "variance"])?;

        let mut placements = Writer::from_path(dir.join("placements.csv"))?;
        placements.write_record([
            "tick", "target_id", "device_lat", "device_lon", "east", "up", "north", "visible", "scale",
        ])?;

        Ok(Self {
            estimates,
            placements,
            last_error: None,
            finished:   false,
        })
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Flush both files.  Further calls are no-ops.
    pub fn finish(&mut self) -> TraceResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.estimates.flush()?;
        self.placements.flush()?;
        Ok(())
    }

    fn store_err(&mut self, result: TraceResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_placements(&mut self, tick: Tick, device: GeoPoint, targets: &[Target]) -> TraceResult<()> {
        for target in targets {
            let p = &target.placement;
            self.placements.write_record(&[
                tick.0.to_string(),
                target.id.0.to_string(),
                device.lat.to_string(),
                device.lon.to_string(),
                p.local_offset.east.to_string(),
                p.local_offset.up.to_string(),
                p.local_offset.north.to_string(),
                (p.is_visible as u8).to_string(),
                p.scale.to_string(),
            ])?;
        }
        Ok(())
    }
}

impl EngineObserver for CsvTraceObserver {
    fn on_estimate(&mut self, tick: Tick, now_ms: i64, estimate: GeoPoint, variance: f64) {
        let result = self
            .estimates
            .write_record(&[
                tick.0.to_string(),
                now_ms.to_string(),
                estimate.lat.to_string(),
                estimate.lon.to_string(),
                variance.to_string(),
            ])
            .map_err(TraceError::from);
        self.store_err(result);
    }

    fn on_placement(&mut self, tick: Tick, device: GeoPoint, targets: &[Target]) {
        let result = self.write_placements(tick, device, targets);
        self.store_err(result);
    }

    fn on_fatal(&mut self, _tick: Tick, _error: &AcquisitionError) {
        let result = self
            .estimates
            .flush()
            .and_then(|()| self.placements.flush())
            .map_err(TraceError::from);
        if let Err(e) = &result {
            warn!(error = %e, "could not flush trace after fatal acquisition error");
        }
        self.store_err(result);
    }
}
