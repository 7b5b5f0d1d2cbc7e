//! Placeable points of interest and their derived placement.

use gp_core::{GeoPoint, TargetId};

/// Offset from the device in the local ground frame, metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalOffset {
    pub east: f64,
    pub up: f64,
    pub north: f64,
}

impl LocalOffset {
    #[inline]
    pub const fn new(east: f64, up: f64, north: f64) -> Self {
        Self { east, up, north }
    }

    /// Ground-plane length, ignoring `up`.
    #[inline]
    pub fn ground_distance(&self) -> f64 {
        self.east.hypot(self.north)
    }
}

/// Derived per-target output, overwritten on every recompute.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementResult {
    pub local_offset: LocalOffset,
    pub is_visible: bool,
    /// In `[0, 1]`; below 1 only near a wrap seam.
    pub scale: f64,
}

impl Default for PlacementResult {
    fn default() -> Self {
        Self {
            local_offset: LocalOffset::default(),
            is_visible:   true,
            scale:        1.0,
        }
    }
}

/// One point of interest.
///
/// Owned by the caller's registry.  The engine reads the input fields and
/// writes `placement`; it never creates, removes, or un-dirties targets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub id: TargetId,
    pub position: GeoPoint,
    /// Height above the device's ground plane, metres.
    pub altitude_offset: f64,
    /// Beyond this (times the tolerance factor) the target is hidden.
    /// `0` means always visible.
    pub visibility_range_m: f64,
    /// Set by the owner when input fields changed; cleared by the owner.
    pub is_dirty: bool,
    pub placement: PlacementResult,
}

impl Target {
    /// A new, dirty target with default placement.
    pub fn new(id: TargetId, position: GeoPoint) -> Self {
        Self {
            id,
            position,
            altitude_offset:    0.0,
            visibility_range_m: 0.0,
            is_dirty:           true,
            placement:          PlacementResult::default(),
        }
    }

    pub fn with_altitude(mut self, altitude_offset: f64) -> Self {
        self.altitude_offset = altitude_offset;
        self
    }

    pub fn with_visibility_range(mut self, range_m: f64) -> Self {
        self.visibility_range_m = range_m;
        self
    }
}

/// The object registry as seen by the engine.
pub trait TargetRegistry {
    /// All targets, for reading inputs and writing placements.
    fn targets_mut(&mut self) -> &mut [Target];

    /// Owner-side helper: mark every target clean after consuming placements.
    fn clear_dirty(&mut self) {
        for target in self.targets_mut() {
            target.is_dirty = false;
        }
    }
}

impl TargetRegistry for Vec<Target> {
    fn targets_mut(&mut self) -> &mut [Target] {
        self.as_mut_slice()
    }
}

impl TargetRegistry for [Target] {
    fn targets_mut(&mut self) -> &mut [Target] {
        self
    }
}
