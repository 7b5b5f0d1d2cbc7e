//! Toroidal wrap window.
//!
//! With an area set, the placement plane repeats every `width` metres east–
//! west and every `size` metres north–south.  Offsets are folded into
//! `[-width/2, width/2) × [-size/2, size/2)`, which keeps geometry numerically
//! small however far the device walks.  Objects close to the seam are shrunk
//! so the jump from one edge to the other is not visible.

/// Distance from the seam below which objects start to shrink, metres.
const FADE_DISTANCE_M: f64 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedArea {
    /// North–south extent, metres.  Always `> 0`.
    size: f64,
    /// East–west extent, metres.  Always `> 0`.
    width: f64,
}

impl BoundedArea {
    /// `None` unless both dimensions are positive.
    pub fn new(size: f64, width: f64) -> Option<Self> {
        (size > 0.0 && width > 0.0).then_some(Self { size, width })
    }

    /// Like [`new`][Self::new], but a missing dimension takes the other's
    /// value, giving a square window.
    pub fn from_dimensions(size: f64, width: f64) -> Option<Self> {
        match (size > 0.0, width > 0.0) {
            (true, true)   => Self::new(size, width),
            (true, false)  => Self::new(size, size),
            (false, true)  => Self::new(width, width),
            (false, false) => None,
        }
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Fold an east offset into `[-width/2, width/2)`.
    #[inline]
    pub fn wrap_east(&self, east_m: f64) -> f64 {
        wrap(east_m, self.width)
    }

    /// Fold a north offset into `[-size/2, size/2)`.
    #[inline]
    pub fn wrap_north(&self, north_m: f64) -> f64 {
        wrap(north_m, self.size)
    }

    /// Distance of a wrapped offset from the nearest seam.
    pub fn border_distance(&self, east_m: f64, north_m: f64) -> f64 {
        let to_north_seam = (self.size * 0.5 - north_m.abs()).abs();
        let to_east_seam = (self.width * 0.5 - east_m.abs()).abs();
        to_north_seam.min(to_east_seam)
    }

    /// Scale in `[0, 1]`: the seam distance when under a metre, else 1.
    pub fn border_scale(&self, east_m: f64, north_m: f64) -> f64 {
        let d = self.border_distance(east_m, north_m);
        if d < FADE_DISTANCE_M { d } else { 1.0 }
    }
}

/// Fold `value` into `[-period/2, period/2)`.  Non-finite values pass through.
fn wrap(value: f64, period: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let half = period * 0.5;
    let mut folded = (value + half).rem_euclid(period) - half;
    // rem_euclid may round up to exactly `period`.
    if folded >= half {
        folded -= period;
    }
    folded
}
