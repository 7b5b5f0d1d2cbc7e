//! Unit tests for gp-placement.

use gp_core::{GeoPoint, TargetId, distance_m, offset_by_metres};

use crate::{BoundedArea, PlacementConfig, PlacementTransform, Target, TargetRegistry, place};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DEVICE: GeoPoint = GeoPoint::new(48.158526, 11.578670);
const TOLERANCE: f64 = 1.25;

fn target_at(north_m: f64, east_m: f64) -> Target {
    Target::new(TargetId(0), offset_by_metres(DEVICE, north_m, east_m))
}

fn square(side: f64) -> BoundedArea {
    BoundedArea::new(side, side).unwrap()
}

// ── Axis distances ────────────────────────────────────────────────────────────

#[cfg(test)]
mod axes {
    use super::*;

    #[test]
    fn north_east_signs() {
        let cases = [(100.0, 0.0), (-100.0, 0.0), (0.0, 60.0), (0.0, -60.0), (-30.0, 40.0)];
        for (north, east) in cases {
            let r = place(DEVICE, &target_at(north, east), None, TOLERANCE);
            let o = r.local_offset;
            assert!((o.north - north).abs() < 0.05, "north {} vs {north}", o.north);
            assert!((o.east - east).abs() < 0.05, "east {} vs {east}", o.east);
        }
    }

    #[test]
    fn axis_distances_use_haversine() {
        let t = target_at(250.0, 0.0);
        let r = place(DEVICE, &t, None, TOLERANCE);
        let expected = distance_m(t.position, GeoPoint::new(DEVICE.lat, t.position.lon));
        assert_eq!(r.local_offset.north, expected);
    }

    #[test]
    fn altitude_goes_up() {
        let t = target_at(10.0, 10.0).with_altitude(3.5);
        let r = place(DEVICE, &t, None, TOLERANCE);
        assert_eq!(r.local_offset.up, 3.5);
    }

    #[test]
    fn device_at_target_is_origin() {
        let t = Target::new(TargetId(1), DEVICE);
        let r = place(DEVICE, &t, None, TOLERANCE);
        assert_eq!(r.local_offset.ground_distance(), 0.0);
        assert_eq!(r.scale, 1.0);
    }

    #[test]
    fn nan_device_propagates() {
        let r = place(GeoPoint::new(f64::NAN, 0.0), &target_at(10.0, 0.0), Some(&square(100.0)), TOLERANCE);
        assert!(r.local_offset.north.is_nan());
    }
}

// ── Visibility ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod visibility {
    use super::*;

    #[test]
    fn exactly_at_range_is_visible() {
        let t = target_at(80.0, 20.0);
        let d = distance_m(t.position, DEVICE);
        let r = place(DEVICE, &t.with_visibility_range(d), None, TOLERANCE);
        assert!(r.is_visible);
    }

    #[test]
    fn within_tolerance_is_visible() {
        let t = target_at(120.0, 0.0);
        let d = distance_m(t.position, DEVICE);
        let r = place(DEVICE, &t.with_visibility_range(d / 1.2), None, TOLERANCE);
        assert!(r.is_visible);
    }

    #[test]
    fn beyond_tolerance_is_hidden() {
        let t = target_at(120.0, 0.0);
        let d = distance_m(t.position, DEVICE);
        let r = place(DEVICE, &t.with_visibility_range(d / 1.26), None, TOLERANCE);
        assert!(!r.is_visible);
    }

    #[test]
    fn zero_range_always_visible() {
        let r = place(DEVICE, &target_at(50_000.0, 0.0), None, TOLERANCE);
        assert!(r.is_visible);
    }
}

// ── Bounded area ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod area {
    use super::*;

    #[test]
    fn wrap_is_periodic() {
        let a = square(100.0);
        assert_eq!(a.wrap_north(30.0), 30.0);
        assert_eq!(a.wrap_north(130.0), 30.0);
        assert_eq!(a.wrap_north(-70.0), 30.0);
        assert_eq!(a.wrap_east(-170.0), 30.0);
    }

    #[test]
    fn wrap_is_half_open() {
        let a = square(100.0);
        assert_eq!(a.wrap_north(50.0), -50.0);
        assert_eq!(a.wrap_north(-50.0), -50.0);
        assert_eq!(a.wrap_east(49.5), 49.5);
    }

    #[test]
    fn wrapped_values_stay_in_window() {
        let a = BoundedArea::new(100.0, 60.0).unwrap();
        let mut x = -1_000.0;
        while x < 1_000.0 {
            let n = a.wrap_north(x);
            let e = a.wrap_east(x);
            assert!((-50.0..50.0).contains(&n), "{x} → {n}");
            assert!((-30.0..30.0).contains(&e), "{x} → {e}");
            x += 7.3;
        }
    }

    #[test]
    fn non_finite_passes_through() {
        let a = square(100.0);
        assert!(a.wrap_north(f64::NAN).is_nan());
        assert_eq!(a.wrap_east(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn placed_offsets_are_wrapped() {
        let a = square(100.0);
        let r = place(DEVICE, &target_at(130.0, -160.0), Some(&a), TOLERANCE);
        let o = r.local_offset;
        assert!((-50.0..50.0).contains(&o.north) && (-50.0..50.0).contains(&o.east));
        assert!((o.north - 30.0).abs() < 0.05, "north {}", o.north);
        assert!((o.east - 40.0).abs() < 0.05, "east {}", o.east);
    }

    #[test]
    fn border_fade() {
        let a = square(100.0);
        assert_eq!(a.border_scale(0.0, 49.5), 0.5);
        assert_eq!(a.border_scale(-49.75, 0.0), 0.25);
        assert_eq!(a.border_scale(0.0, 49.0), 1.0);
        assert_eq!(a.border_scale(10.0, 10.0), 1.0);

        let mut previous = 1.0;
        for i in 1..=10 {
            let north = 49.0 + i as f64 * 0.0999;
            let s = a.border_scale(0.0, north);
            assert!(s < previous, "scale must shrink toward the seam");
            previous = s;
        }
        assert!(previous < 0.01);
    }

    #[test]
    fn scale_always_in_unit_interval() {
        let a = BoundedArea::new(40.0, 25.0).unwrap();
        for north in (-300..300).step_by(11) {
            for east in (-300..300).step_by(13) {
                let r = place(DEVICE, &target_at(north as f64, east as f64), Some(&a), TOLERANCE);
                assert!((0.0..=1.0).contains(&r.scale), "scale {}", r.scale);
            }
        }
    }

    #[test]
    fn no_area_means_full_scale() {
        let r = place(DEVICE, &target_at(1e6, 1e6), None, TOLERANCE);
        assert_eq!(r.scale, 1.0);
    }

    #[test]
    fn missing_dimension_takes_the_other() {
        assert_eq!(BoundedArea::from_dimensions(0.0, 40.0), BoundedArea::new(40.0, 40.0));
        assert_eq!(BoundedArea::from_dimensions(30.0, -1.0), BoundedArea::new(30.0, 30.0));
        assert_eq!(BoundedArea::from_dimensions(20.0, 10.0), BoundedArea::new(20.0, 10.0));
        assert_eq!(BoundedArea::from_dimensions(0.0, 0.0), None);
    }

    #[test]
    fn config_builds_area() {
        let c = PlacementConfig { area_width_m: 80.0, ..PlacementConfig::default() };
        assert_eq!(c.area(), BoundedArea::new(80.0, 80.0));
        assert!(PlacementConfig::default().area().is_none());
        assert!(PlacementConfig { tolerance_factor: 0.0, ..c }.validate().is_err());
    }
}

// ── Memoisation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod memo {
    use super::*;

    fn scene() -> Vec<Target> {
        vec![target_at(10.0, 0.0), target_at(0.0, 20.0).with_altitude(2.0)]
    }

    #[test]
    fn stable_scene_is_not_recomputed() {
        let mut targets = scene();
        let mut t = PlacementTransform::new(TOLERANCE);

        assert!(t.recompute(DEVICE, &mut targets, None));
        targets.clear_dirty();
        assert!(!t.recompute(DEVICE, &mut targets, None));
    }

    #[test]
    fn moved_device_recomputes() {
        let mut targets = scene();
        let mut t = PlacementTransform::new(TOLERANCE);
        t.recompute(DEVICE, &mut targets, None);
        targets.clear_dirty();

        let moved = offset_by_metres(DEVICE, 5.0, 0.0);
        assert!(t.recompute(moved, &mut targets, None));
        assert!((targets[0].placement.local_offset.north - 5.0).abs() < 0.05);
    }

    #[test]
    fn dirty_target_recomputes() {
        let mut targets = scene();
        let mut t = PlacementTransform::new(TOLERANCE);
        t.recompute(DEVICE, &mut targets, None);
        targets.clear_dirty();

        targets[1].altitude_offset = 7.0;
        targets[1].is_dirty = true;
        assert!(t.recompute(DEVICE, &mut targets, None));
        assert_eq!(targets[1].placement.local_offset.up, 7.0);
        // The owner, not the transform, clears the flag.
        assert!(targets[1].is_dirty);
    }

    #[test]
    fn area_change_recomputes() {
        let mut targets = scene();
        let mut t = PlacementTransform::new(TOLERANCE);
        t.recompute(DEVICE, &mut targets, None);
        targets.clear_dirty();
        assert!(t.recompute(DEVICE, &mut targets, Some(&square(12.0))));
        assert!(!t.recompute(DEVICE, &mut targets, Some(&square(12.0))));
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut targets = scene();
        let mut t = PlacementTransform::new(TOLERANCE);
        t.recompute(DEVICE, &mut targets, None);
        targets.clear_dirty();
        t.invalidate();
        assert!(t.recompute(DEVICE, &mut targets, None));
    }
}
