//! Geodetic → local transform.

use gp_core::{GeoPoint, distance_m};
use tracing::debug;

use crate::{BoundedArea, LocalOffset, PlacementResult, Target};

/// Place one target relative to `device`.
///
/// Pure; garbage geometry yields NaN offsets rather than an error.
pub fn place(
    device:           GeoPoint,
    target:           &Target,
    area:             Option<&BoundedArea>,
    tolerance_factor: f64,
) -> PlacementResult {
    let pos = target.position;

    let is_visible = target.visibility_range_m <= 0.0
        || distance_m(pos, device) <= tolerance_factor * target.visibility_range_m;

    let mut north = distance_m(pos, GeoPoint::new(device.lat, pos.lon));
    if pos.lat < device.lat {
        north = -north;
    }
    let mut east = distance_m(pos, GeoPoint::new(pos.lat, device.lon));
    if pos.lon < device.lon {
        east = -east;
    }

    let scale = match area {
        Some(area) => {
            east = area.wrap_east(east);
            north = area.wrap_north(north);
            area.border_scale(east, north)
        }
        None => 1.0,
    };

    PlacementResult {
        local_offset: LocalOffset::new(east, target.altitude_offset, north),
        is_visible,
        scale,
    }
}

/// Memoised placement of a whole scene.
///
/// [`recompute`][Self::recompute] only runs when the device position or area
/// changed since the last run, or a target is dirty.
#[derive(Clone, Debug)]
pub struct PlacementTransform {
    tolerance_factor: f64,
    last_device: Option<GeoPoint>,
    last_area: Option<BoundedArea>,
}

impl PlacementTransform {
    pub fn new(tolerance_factor: f64) -> Self {
        Self {
            tolerance_factor,
            last_device: None,
            last_area: None,
        }
    }

    #[inline]
    pub fn tolerance_factor(&self) -> f64 {
        self.tolerance_factor
    }

    /// Whether a call with these inputs would do any work.
    pub fn needs_recompute(
        &self,
        device:  GeoPoint,
        targets: &[Target],
        area:    Option<&BoundedArea>,
    ) -> bool {
        self.last_device != Some(device)
            || self.last_area.as_ref() != area
            || targets.iter().any(|t| t.is_dirty)
    }

    /// Write a fresh [`PlacementResult`] into every target if anything
    /// changed.  Returns `true` when placements were rewritten.
    pub fn recompute(
        &mut self,
        device:  GeoPoint,
        targets: &mut [Target],
        area:    Option<&BoundedArea>,
    ) -> bool {
        if !self.needs_recompute(device, targets, area) {
            return false;
        }
        for target in targets.iter_mut() {
            target.placement = place(device, target, area, self.tolerance_factor);
        }
        self.last_device = Some(device);
        self.last_area = area.copied();
        debug!(%device, targets = targets.len(), "placements recomputed");
        true
    }

    /// Forget the memo so the next call recomputes unconditionally.
    pub fn invalidate(&mut self) {
        self.last_device = None;
    }
}
