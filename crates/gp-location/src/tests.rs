//! Unit tests for gp-location.

use gp_filter::{FilterConfig, PositionFilter};

use crate::{
    AcquisitionConfig, AcquisitionError, AcquisitionSession, AcquisitionState, Availability,
    Diagnostics, LocationSample, SimulatedProvider, StepReport,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sample(lat: f64, lon: f64, timestamp_secs: f64) -> LocationSample {
    LocationSample { lat, lon, horizontal_accuracy_m: 5.0, timestamp_secs }
}

/// Session, filter, and diagnostics bundled for stepping.
struct Rig {
    session:  AcquisitionSession,
    provider: SimulatedProvider,
    filter:   PositionFilter,
    diag:     Diagnostics,
    ticks:    u64,
}

impl Rig {
    fn new(config: AcquisitionConfig, provider: SimulatedProvider) -> Self {
        Self {
            session: AcquisitionSession::new(config),
            provider,
            filter: PositionFilter::new(&FilterConfig::default()),
            diag: Diagnostics::new(),
            ticks: 0,
        }
    }

    fn step_at(&mut self, now_ms: i64) -> StepReport {
        self.ticks += 1;
        self.session.tick(&mut self.provider, now_ms, &mut self.filter, &mut self.diag)
    }

    fn step(&mut self) -> StepReport {
        let now = self.ticks as i64 * 10;
        self.step_at(now)
    }

    /// Step until the state differs from `state` or `limit` ticks pass.
    fn run_while(&mut self, state: &AcquisitionState, limit: u64) {
        for _ in 0..limit {
            if self.session.state() != state {
                return;
            }
            self.step();
        }
    }

    fn state(&self) -> &AcquisitionState {
        self.session.state()
    }
}

fn small_budgets() -> AcquisitionConfig {
    AcquisitionConfig {
        permission_budget_ticks: 5,
        enable_budget_ticks:     5,
        init_budget_ticks:       5,
        ..AcquisitionConfig::default()
    }
}

// ── Budgets ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod budgets {
    use super::*;

    #[test]
    fn never_enabled_fails_exactly_at_budget() {
        let provider = SimulatedProvider::new()
            .needs_permission(false)
            .enabled(Availability::Never);
        let mut rig = Rig::new(AcquisitionConfig::default(), provider);

        rig.step();
        assert_eq!(rig.state(), &AcquisitionState::WaitingForProviderEnable);

        // 999 failed polls leave the session waiting …
        for _ in 0..999 {
            rig.step();
        }
        assert_eq!(rig.state(), &AcquisitionState::WaitingForProviderEnable);
        assert_eq!(rig.session.remaining_ticks(), 1);

        // … and the 1000th turns it fatal.
        let report = rig.step();
        assert_eq!(rig.state(), &AcquisitionState::Fatal(AcquisitionError::ProviderDisabled));
        let change = report.change.expect("transition reported");
        assert_eq!(change.from, AcquisitionState::WaitingForProviderEnable);
        assert_eq!(rig.ticks, 1 + 1000);
        assert_eq!(rig.provider.starts, 0);
    }

    #[test]
    fn permission_never_granted_fails_at_budget() {
        let provider = SimulatedProvider::new().permission(Availability::Never);
        let mut rig = Rig::new(AcquisitionConfig::default(), provider);

        rig.step();
        assert_eq!(rig.state(), &AcquisitionState::RequestingPermission);
        assert!(rig.provider.permission_requested());

        for _ in 0..4_499 {
            rig.step();
        }
        assert_eq!(rig.state(), &AcquisitionState::RequestingPermission);
        rig.step();
        assert_eq!(rig.state(), &AcquisitionState::Fatal(AcquisitionError::PermissionDenied));
    }

    #[test]
    fn initialization_timeout_stops_provider() {
        let provider = SimulatedProvider::new().init_polls(u32::MAX);
        let mut rig = Rig::new(small_budgets(), provider);

        rig.step(); // → WaitingForProviderEnable (permission already granted)
        rig.step(); // → Initializing
        assert_eq!(rig.state(), &AcquisitionState::Initializing);
        assert_eq!(rig.provider.starts, 1);

        for _ in 0..4 {
            rig.step();
        }
        assert_eq!(rig.state(), &AcquisitionState::Initializing);
        rig.step();
        assert_eq!(rig.state(), &AcquisitionState::Fatal(AcquisitionError::InitializationTimeout));
        assert_eq!(rig.provider.stops, 1);
        assert!(!rig.provider.is_started());
    }
}

// ── Happy path ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use super::*;

    #[test]
    fn skips_permission_when_already_granted() {
        let mut rig = Rig::new(small_budgets(), SimulatedProvider::new());
        rig.step();
        assert_eq!(rig.state(), &AcquisitionState::WaitingForProviderEnable);
        assert!(!rig.provider.permission_requested());
    }

    #[test]
    fn full_sequence_with_delayed_permission() {
        let provider = SimulatedProvider::new()
            .permission(Availability::AfterPolls(3))
            .enabled(Availability::AfterPolls(2))
            .init_polls(2)
            .with_sample(sample(48.158526, 11.578670, 1.0));
        let mut rig = Rig::new(AcquisitionConfig::default(), provider);

        let mut seen = vec![];
        for _ in 0..20 {
            if let Some(change) = rig.step().change {
                seen.push((rig.ticks, change.to));
            }
        }
        assert_eq!(seen, vec![
            (1,  AcquisitionState::RequestingPermission),
            (5,  AcquisitionState::WaitingForProviderEnable),
            (8,  AcquisitionState::Initializing),
            (11, AcquisitionState::Sampling),
        ]);
        assert_eq!(rig.provider.last_start_args, Some((0.1, 0.1)));
    }

    #[test]
    fn first_fix_is_processed_on_entering_sampling() {
        let provider = SimulatedProvider::new().with_sample(sample(10.0, 20.0, 1.0));
        let mut rig = Rig::new(small_budgets(), provider);
        rig.step();
        rig.step();
        let report = rig.step();
        assert_eq!(rig.state(), &AcquisitionState::Sampling);
        let est = report.estimate.expect("estimate on entry");
        assert_eq!((est.lat, est.lon), (10.0, 20.0));
        assert_eq!(rig.diag.samples_accepted, 1);
    }

    #[test]
    fn sampling_never_leaves_on_its_own() {
        let mut rig = Rig::new(small_budgets(), SimulatedProvider::new());
        rig.run_while(&AcquisitionState::NotStarted, 10);
        for _ in 0..100 {
            rig.step();
        }
        assert_eq!(rig.state(), &AcquisitionState::Sampling);
    }
}

// ── Provider failures ─────────────────────────────────────────────────────────

#[cfg(test)]
mod failures {
    use super::*;

    #[test]
    fn retries_below_threshold() {
        let provider = SimulatedProvider::new().failures(3);
        let mut rig = Rig::new(small_budgets(), provider);
        for _ in 0..20 {
            rig.step();
        }
        assert_eq!(rig.state(), &AcquisitionState::Sampling);
        assert_eq!(rig.session.failure_count(), 3);
        assert_eq!(rig.diag.provider_failures, 3);
        assert_eq!(rig.provider.starts, 4);
        assert_eq!(rig.provider.stops, 3);
    }

    #[test]
    fn retry_resets_init_budget() {
        // Each attempt takes 4 initializing polls, within the budget of 5.
        let provider = SimulatedProvider::new().init_polls(4).failures(2);
        let mut rig = Rig::new(small_budgets(), provider);
        for _ in 0..40 {
            rig.step();
        }
        assert_eq!(rig.state(), &AcquisitionState::Sampling);
    }

    #[test]
    fn too_many_failures_is_fatal() {
        let provider = SimulatedProvider::new().failures(50);
        let mut rig = Rig::new(small_budgets(), provider);
        for _ in 0..40 {
            rig.step();
        }
        assert_eq!(
            rig.state(),
            &AcquisitionState::Fatal(AcquisitionError::RepeatedProviderFailure { failures: 11 }),
        );
        assert_eq!(rig.provider.starts, 11);
        assert_eq!(rig.provider.stops, 11);
    }

    #[test]
    fn fatal_is_terminal() {
        let provider = SimulatedProvider::new().enabled(Availability::Never);
        let mut rig = Rig::new(small_budgets(), provider);
        for _ in 0..6 {
            rig.step();
        }
        assert!(rig.state().is_fatal());
        for _ in 0..50 {
            assert_eq!(rig.step(), StepReport::default());
        }
        assert_eq!(rig.session.fatal_error(), Some(&AcquisitionError::ProviderDisabled));
    }

    #[test]
    fn error_messages_are_human_readable() {
        assert_eq!(AcquisitionError::PermissionDenied.to_string(), "location permission denied");
        assert!(
            AcquisitionError::RepeatedProviderFailure { failures: 11 }
                .to_string()
                .contains("11 times")
        );
        assert_eq!(
            AcquisitionState::Fatal(AcquisitionError::InitializationTimeout).to_string(),
            "fatal: location service did not finish initializing in time",
        );
    }
}

// ── Sampling ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampling {
    use super::*;

    fn sampling_rig(config: AcquisitionConfig) -> Rig {
        let mut rig = Rig::new(config, SimulatedProvider::new());
        rig.step_at(0);
        rig.step_at(0);
        rig.step_at(0); // → Sampling, no fix yet
        assert_eq!(rig.state(), &AcquisitionState::Sampling);
        rig
    }

    #[test]
    fn only_fresh_fixes_are_forwarded() {
        let mut rig = sampling_rig(small_budgets());
        rig.provider.set_sample(sample(1.0, 1.0, 1.0));
        assert!(rig.step().estimate.is_some());
        assert!(rig.step().estimate.is_none(), "same fix twice");

        // Same position, new timestamp: fresh.
        rig.provider.set_sample(sample(1.0, 1.0, 2.0));
        assert!(rig.step().estimate.is_some());

        // Only accuracy changed: fresh.
        rig.provider.set_sample(LocationSample { horizontal_accuracy_m: 9.0, ..sample(1.0, 1.0, 2.0) });
        assert!(rig.step().estimate.is_some());
        assert_eq!(rig.diag.samples_accepted, 3);
        assert_eq!(rig.diag.last_sample.map(|s| s.horizontal_accuracy_m), Some(9.0));
    }

    #[test]
    fn throttle_spaces_accepted_fixes() {
        let config = AcquisitionConfig { position_update_interval_secs: 1.0, ..small_budgets() };
        let mut rig = sampling_rig(config);

        let mut accepted = vec![];
        for (i, now) in [10, 500, 1_010, 1_011, 2_000, 2_012].into_iter().enumerate() {
            rig.provider.set_sample(sample(1.0, 1.0, i as f64));
            if rig.step_at(now).estimate.is_some() {
                accepted.push(now);
            }
        }
        assert_eq!(accepted, vec![10, 1_011, 2_012]);
        assert_eq!(rig.diag.samples_throttled, 3);
    }

    #[test]
    fn no_throttle_when_interval_not_positive() {
        let config = AcquisitionConfig { position_update_interval_secs: -2.0, ..small_budgets() };
        let mut rig = sampling_rig(config);
        for i in 0..5 {
            rig.provider.set_sample(sample(1.0, 1.0, i as f64));
            assert!(rig.step_at(100 + i).estimate.is_some());
        }
        assert_eq!(rig.diag.samples_throttled, 0);
    }

    #[test]
    fn huge_interval_throttles_without_overflow() {
        let config = AcquisitionConfig { position_update_interval_secs: 1e300, ..small_budgets() };
        assert!(config.validate().is_ok());
        assert_eq!(config.update_interval_ms(), Some(i64::MAX));
        let mut rig = sampling_rig(config);

        rig.provider.set_sample(sample(1.0, 1.0, 1.0));
        assert!(rig.step_at(1_000).estimate.is_some());
        rig.provider.set_sample(sample(2.0, 2.0, 2.0));
        assert!(rig.step_at(i64::MAX - 1).estimate.is_none());
        assert_eq!(rig.diag.samples_throttled, 1);
    }

    #[test]
    fn estimate_feeds_filter() {
        let mut rig = sampling_rig(small_budgets());
        rig.provider.set_sample(sample(0.0, 0.0, 0.0));
        rig.step();
        rig.provider.set_sample(sample(1.0, 2.0, 0.0));
        let est = rig.step().estimate.unwrap();
        // Equal accuracy and no elapsed time → halfway.
        assert_eq!((est.lat, est.lon), (0.5, 1.0));
        assert_eq!(rig.filter.current_estimate(), est);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::AcquisitionConfig;

    #[test]
    fn defaults_match_reference_cadence() {
        let c = AcquisitionConfig::default();
        assert_eq!(c.permission_budget_ticks, 4_500);
        assert_eq!(c.enable_budget_ticks, 1_000);
        assert_eq!(c.init_budget_ticks, 3_000);
        assert_eq!(c.max_failures, 10);
        assert_eq!(c.update_interval_ms(), None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_budget_rejected() {
        let c = AcquisitionConfig { enable_budget_ticks: 0, ..AcquisitionConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn non_finite_interval_rejected() {
        for secs in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let c = AcquisitionConfig { position_update_interval_secs: secs, ..AcquisitionConfig::default() };
            assert!(c.validate().is_err(), "{secs} accepted");
        }
    }

    #[test]
    fn interval_converted_to_ms() {
        let c = AcquisitionConfig { position_update_interval_secs: 1.5, ..AcquisitionConfig::default() };
        assert_eq!(c.update_interval_ms(), Some(1_500));
    }
}

// ── Heading & diagnostics ─────────────────────────────────────────────────────

#[cfg(test)]
mod heading {
    use crate::HeadingTracker;

    #[test]
    fn initial_follows_during_calibration_then_freezes() {
        let mut h = HeadingTracker::new(500);
        h.update(10.0, 1_000);
        h.update(20.0, 1_500);
        assert_eq!(h.initial(), 20.0);
        h.update(90.0, 1_501);
        assert_eq!(h.initial(), 20.0);
        assert_eq!(h.current(), 90.0);
        assert!(!h.is_calibrating(1_501));
    }

    #[test]
    fn reset_reanchors() {
        let mut h = HeadingTracker::new(0);
        h.update(10.0, 0);
        h.update(45.0, 100);
        assert_eq!(h.initial(), 10.0);
        h.reset_initial();
        assert_eq!(h.initial(), 45.0);
    }
}

#[cfg(test)]
mod diagnostics {
    use crate::Diagnostics;

    #[test]
    fn frames_per_second_counts_previous_second() {
        let mut d = Diagnostics::new();
        d.count_frame(10);
        assert_eq!(d.frames_per_second, 1);
        for _ in 0..29 {
            d.count_frame(10);
        }
        d.count_frame(11);
        assert_eq!(d.frames_per_second, 30);
    }

    #[test]
    fn skipped_second_resets_to_one() {
        let mut d = Diagnostics::new();
        for _ in 0..5 {
            d.count_frame(1);
        }
        d.count_frame(4);
        assert_eq!(d.frames_per_second, 1);
    }
}

#[cfg(test)]
mod sim {
    use crate::{Availability, LocationProvider, ProviderStatus, SimulatedProvider};

    #[test]
    fn permission_counts_only_after_request() {
        let mut p = SimulatedProvider::new().permission(Availability::AfterPolls(1));
        assert!(!p.is_permission_granted());
        assert!(!p.is_permission_granted());
        p.request_permission();
        assert!(!p.is_permission_granted());
        assert!(p.is_permission_granted());
    }

    #[test]
    fn status_lifecycle() {
        let mut p = SimulatedProvider::new().init_polls(1).failures(1);
        assert_eq!(p.status(), ProviderStatus::Stopped);
        p.start(1.0, 1.0);
        assert_eq!(p.status(), ProviderStatus::Initializing);
        assert_eq!(p.status(), ProviderStatus::Failed);
        p.stop();
        p.start(1.0, 1.0);
        assert_eq!(p.status(), ProviderStatus::Initializing);
        assert_eq!(p.status(), ProviderStatus::Running);
    }

    #[test]
    fn no_sample_while_stopped() {
        let mut p = SimulatedProvider::new();
        p.set_sample(Default::default());
        assert!(p.last_sample().is_none());
        p.start(0.1, 0.1);
        assert!(p.last_sample().is_some());
    }
}
