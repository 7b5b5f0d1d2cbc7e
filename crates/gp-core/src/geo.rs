//! Geodetic coordinate type and great-circle distance.
//!
//! The earth is modelled as a sphere of radius [`EARTH_RADIUS_M`].  The same
//! function is used by the visibility test and by the axis-distance transform,
//! so both always agree to the bit.

/// Radius of the spherical earth model, metres.
pub const EARTH_RADIUS_M: f64 = 6_367_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance to `other`, in metres.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        distance_m(self, other)
    }

    /// `true` if both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Haversine great-circle distance between `a` and `b`, in metres.
///
/// Never negative.  NaN inputs propagate to a NaN result; there are no error
/// cases.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = b.lon.to_radians() - a.lon.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    (EARTH_RADIUS_M * c).abs()
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
