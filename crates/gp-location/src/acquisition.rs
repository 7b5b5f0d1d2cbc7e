//! The acquisition state machine.

use std::fmt;

use gp_core::GeoPoint;
use gp_filter::PositionFilter;
use tracing::{debug, error, info, trace, warn};

use crate::{AcquisitionConfig, AcquisitionError, Diagnostics, LocationProvider, LocationSample, ProviderStatus};

/// Where the session currently is.  `Fatal` is terminal.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AcquisitionState {
    #[default]
    NotStarted,
    RequestingPermission,
    WaitingForProviderEnable,
    Initializing,
    Sampling,
    Fatal(AcquisitionError),
}

impl AcquisitionState {
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, AcquisitionState::Fatal(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionState::NotStarted               => "not_started",
            AcquisitionState::RequestingPermission     => "requesting_permission",
            AcquisitionState::WaitingForProviderEnable => "waiting_for_provider_enable",
            AcquisitionState::Initializing             => "initializing",
            AcquisitionState::Sampling                 => "sampling",
            AcquisitionState::Fatal(_)                 => "fatal",
        }
    }
}

impl fmt::Display for AcquisitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionState::Fatal(reason) => write!(f, "fatal: {reason}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A transition taken during one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: AcquisitionState,
    pub to:   AcquisitionState,
}

/// What happened during one [`AcquisitionSession::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Set when the state changed this tick.
    pub change: Option<StateChange>,
    /// The filter's new estimate, when a fresh fix was forwarded.
    pub estimate: Option<GeoPoint>,
}

/// One run of permission → enable → initialise → sample.
///
/// Each call to [`tick`][Self::tick] evaluates the current state once.  Waits
/// are counted down in ticks: a state entered on tick `T` whose condition
/// never holds turns fatal on tick `T + budget`.
#[derive(Clone, Debug)]
pub struct AcquisitionSession {
    config: AcquisitionConfig,
    state: AcquisitionState,
    failure_count: u32,
    remaining_ticks: u64,
    last_forwarded: Option<LocationSample>,
    next_accept_ms: Option<i64>,
}

impl AcquisitionSession {
    pub fn new(config: AcquisitionConfig) -> Self {
        Self {
            config,
            state: AcquisitionState::NotStarted,
            failure_count: 0,
            remaining_ticks: 0,
            last_forwarded: None,
            next_accept_ms: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &AcquisitionState {
        &self.state
    }

    /// The terminal error, once the session has given up.
    pub fn fatal_error(&self) -> Option<&AcquisitionError> {
        match &self.state {
            AcquisitionState::Fatal(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Ticks left before the current wait times out.  Zero outside waits.
    #[inline]
    pub fn remaining_ticks(&self) -> u64 {
        self.remaining_ticks
    }

    #[inline]
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Evaluate the current state once.
    pub fn tick<P: LocationProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        now_ms:   i64,
        filter:   &mut PositionFilter,
        diag:     &mut Diagnostics,
    ) -> StepReport {
        let before = self.state.clone();
        let mut estimate = None;

        match &before {
            AcquisitionState::NotStarted => {
                if provider.requires_permission() && !provider.is_permission_granted() {
                    provider.request_permission();
                    self.enter(AcquisitionState::RequestingPermission, self.config.permission_budget_ticks);
                } else {
                    self.enter(AcquisitionState::WaitingForProviderEnable, self.config.enable_budget_ticks);
                }
            }

            AcquisitionState::RequestingPermission => {
                if provider.is_permission_granted() {
                    self.enter(AcquisitionState::WaitingForProviderEnable, self.config.enable_budget_ticks);
                } else {
                    self.count_down(provider, AcquisitionError::PermissionDenied);
                }
            }

            AcquisitionState::WaitingForProviderEnable => {
                if provider.is_enabled_by_user() {
                    self.start_provider(provider);
                } else {
                    self.count_down(provider, AcquisitionError::ProviderDisabled);
                }
            }

            AcquisitionState::Initializing => match provider.status() {
                ProviderStatus::Running => {
                    self.enter(AcquisitionState::Sampling, 0);
                    estimate = self.sample(provider, now_ms, filter, diag);
                }
                ProviderStatus::Failed => self.handle_failure(provider, diag),
                ProviderStatus::Initializing | ProviderStatus::Stopped => {
                    self.count_down(provider, AcquisitionError::InitializationTimeout);
                }
            },

            AcquisitionState::Sampling => {
                estimate = self.sample(provider, now_ms, filter, diag);
            }

            AcquisitionState::Fatal(_) => {}
        }

        let change = (self.state != before).then(|| StateChange {
            from: before,
            to:   self.state.clone(),
        });
        if let Some(change) = &change {
            match &change.to {
                AcquisitionState::Fatal(reason) => error!(from = %change.from, %reason, "location acquisition failed"),
                to => info!(from = %change.from, %to, "location acquisition state change"),
            }
        }

        StepReport { change, estimate }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    fn enter(&mut self, state: AcquisitionState, budget_ticks: u64) {
        self.state = state;
        self.remaining_ticks = budget_ticks;
    }

    /// One failed poll of a wait.  Turns fatal when the budget is used up.
    fn count_down<P: LocationProvider + ?Sized>(&mut self, provider: &mut P, reason: AcquisitionError) {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.fail(provider, reason);
        }
    }

    fn fail<P: LocationProvider + ?Sized>(&mut self, provider: &mut P, reason: AcquisitionError) {
        if matches!(self.state, AcquisitionState::Initializing | AcquisitionState::Sampling) {
            provider.stop();
        }
        self.enter(AcquisitionState::Fatal(reason), 0);
    }

    fn start_provider<P: LocationProvider + ?Sized>(&mut self, provider: &mut P) {
        provider.start(self.config.desired_accuracy_m, self.config.desired_update_distance_m);
        self.enter(AcquisitionState::Initializing, self.config.init_budget_ticks);
    }

    fn handle_failure<P: LocationProvider + ?Sized>(&mut self, provider: &mut P, diag: &mut Diagnostics) {
        self.failure_count += 1;
        diag.provider_failures += 1;

        if self.failure_count > self.config.max_failures {
            self.fail(provider, AcquisitionError::RepeatedProviderFailure { failures: self.failure_count });
            return;
        }

        warn!(
            failures = self.failure_count,
            max = self.config.max_failures,
            "location provider failed to initialise, restarting",
        );
        provider.stop();
        self.start_provider(provider);
    }

    // ── Steady state ──────────────────────────────────────────────────────

    /// Forward the provider's latest fix to `filter` if it is fresh and the
    /// throttle allows it.  A throttled fix stays pending and is forwarded on
    /// a later tick if nothing newer has replaced it.
    fn sample<P: LocationProvider + ?Sized>(
        &mut self,
        provider: &P,
        now_ms:   i64,
        filter:   &mut PositionFilter,
        diag:     &mut Diagnostics,
    ) -> Option<GeoPoint> {
        let sample = provider.last_sample()?;
        if self.last_forwarded == Some(sample) {
            return None;
        }

        if let Some(interval_ms) = self.config.update_interval_ms() {
            match self.next_accept_ms {
                Some(next) if now_ms <= next => {
                    diag.samples_throttled += 1;
                    trace!(now_ms, next, "fix throttled");
                    return None;
                }
                _ => self.next_accept_ms = Some(now_ms.saturating_add(interval_ms)),
            }
        }

        self.last_forwarded = Some(sample);
        diag.record_sample(sample);

        let estimate = filter.update(
            sample.lat,
            sample.lon,
            sample.horizontal_accuracy_m,
            sample.timestamp_ms(),
        );
        debug!(
            lat = sample.lat,
            lon = sample.lon,
            accuracy = sample.horizontal_accuracy_m,
            %estimate,
            "fix forwarded to filter",
        );
        Some(estimate)
    }
}
