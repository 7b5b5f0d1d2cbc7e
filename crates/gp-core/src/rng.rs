//! Deterministic noise source for simulated sensors.
//!
//! Real location fixes wander by several metres around the true position.
//! `NoiseRng` reproduces that jitter from a seed so tests and demos see the
//! same "noisy" stream on every run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::GeoPoint;
use crate::geo::EARTH_RADIUS_M;

/// Seeded RNG producing metre-scale position jitter.
pub struct NoiseRng(SmallRng);

impl NoiseRng {
    pub fn new(seed: u64) -> Self {
        NoiseRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform jitter in `[-max_m, max_m]` metres.  Zero when `max_m <= 0`.
    pub fn jitter_m(&mut self, max_m: f64) -> f64 {
        if max_m <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-max_m..=max_m)
    }

    /// `point` displaced by independent north/east jitter of up to `max_m`.
    pub fn scatter(&mut self, point: GeoPoint, max_m: f64) -> GeoPoint {
        let north = self.jitter_m(max_m);
        let east = self.jitter_m(max_m);
        offset_by_metres(point, north, east)
    }
}

/// Move `point` by `north_m`/`east_m` metres on the spherical earth model.
///
/// Small-offset approximation; adequate for the few hundred metres a
/// simulated walk covers.
pub fn offset_by_metres(point: GeoPoint, north_m: f64, east_m: f64) -> GeoPoint {
    let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
    let d_lon = (east_m / (EARTH_RADIUS_M * point.lat.to_radians().cos())).to_degrees();
    GeoPoint::new(point.lat + d_lat, point.lon + d_lon)
}
