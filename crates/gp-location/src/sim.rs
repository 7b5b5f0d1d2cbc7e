//! A scriptable stand-in for a platform location provider.
//!
//! Every behaviour that depends on the user or the platform (permission
//! dialog, location switch, slow or failing start-up) is scripted in terms of
//! how many times the engine polls for it, which maps one-to-one onto ticks.

use std::cell::Cell;

use crate::{LocationProvider, LocationSample, ProviderStatus};

/// When a simulated condition becomes true.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Availability {
    /// True from the start.
    #[default]
    Immediately,
    /// True once this many polls have answered `false`.
    AfterPolls(u32),
    /// Never true.
    Never,
}

impl Availability {
    /// Answer one poll, counting it in `polls`.
    fn poll(self, polls: &Cell<u32>) -> bool {
        match self {
            Availability::Immediately => true,
            Availability::Never => false,
            Availability::AfterPolls(n) => {
                let seen = polls.get();
                if seen >= n {
                    true
                } else {
                    polls.set(seen + 1);
                    false
                }
            }
        }
    }
}

/// Fake [`LocationProvider`] for tests and demos.
///
/// ```rust,ignore
/// let mut provider = SimulatedProvider::new()
///     .permission(Availability::AfterPolls(3))
///     .init_polls(5)
///     .failures(2);
/// provider.set_sample(sample);
/// ```
#[derive(Debug, Default)]
pub struct SimulatedProvider {
    requires_permission: bool,
    permission: Availability,
    enabled: Availability,
    init_polls: u32,
    failures_left: u32,

    permission_requested: bool,
    permission_polls: Cell<u32>,
    enable_polls: Cell<u32>,
    status_polls: Cell<u32>,
    started: bool,

    sample: Option<LocationSample>,
    heading_deg: f64,

    /// Number of `start` calls seen.
    pub starts: u32,
    /// Number of `stop` calls seen.
    pub stops: u32,
    /// Accuracy/distance passed to the most recent `start`.
    pub last_start_args: Option<(f64, f64)>,
}

impl SimulatedProvider {
    /// A provider that needs permission, grants it immediately, is enabled,
    /// and runs on the first status poll.
    pub fn new() -> Self {
        Self {
            requires_permission: true,
            ..Self::default()
        }
    }

    pub fn needs_permission(mut self, required: bool) -> Self {
        self.requires_permission = required;
        self
    }

    /// When permission is granted.  `AfterPolls` counts only polls made after
    /// the permission request.
    pub fn permission(mut self, availability: Availability) -> Self {
        self.permission = availability;
        self
    }

    /// When the user has location services switched on.
    pub fn enabled(mut self, availability: Availability) -> Self {
        self.enabled = availability;
        self
    }

    /// Status polls after each `start` that report `Initializing`.
    pub fn init_polls(mut self, polls: u32) -> Self {
        self.init_polls = polls;
        self
    }

    /// Number of start attempts that end in `Failed`.
    pub fn failures(mut self, failures: u32) -> Self {
        self.failures_left = failures;
        self
    }

    pub fn with_sample(mut self, sample: LocationSample) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Replace the latest fix.
    pub fn set_sample(&mut self, sample: LocationSample) {
        self.sample = Some(sample);
    }

    pub fn set_heading(&mut self, heading_deg: f64) {
        self.heading_deg = heading_deg;
    }

    #[inline]
    pub fn permission_requested(&self) -> bool {
        self.permission_requested
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    fn past_initialisation(&self) -> bool {
        self.status_polls.get() > self.init_polls
    }
}

impl LocationProvider for SimulatedProvider {
    fn requires_permission(&self) -> bool {
        self.requires_permission
    }

    fn request_permission(&mut self) {
        self.permission_requested = true;
    }

    fn is_permission_granted(&self) -> bool {
        match self.permission {
            Availability::Immediately => true,
            _ if !self.permission_requested => false,
            other => other.poll(&self.permission_polls),
        }
    }

    fn is_enabled_by_user(&self) -> bool {
        self.enabled.poll(&self.enable_polls)
    }

    fn start(&mut self, desired_accuracy_m: f64, desired_update_distance_m: f64) {
        self.starts += 1;
        self.started = true;
        self.status_polls.set(0);
        self.last_start_args = Some((desired_accuracy_m, desired_update_distance_m));
    }

    fn stop(&mut self) {
        self.stops += 1;
        if self.started && self.failures_left > 0 && self.past_initialisation() {
            self.failures_left -= 1;
        }
        self.started = false;
    }

    fn status(&self) -> ProviderStatus {
        if !self.started {
            return ProviderStatus::Stopped;
        }
        let polls = self.status_polls.get().saturating_add(1);
        self.status_polls.set(polls);
        if polls <= self.init_polls {
            ProviderStatus::Initializing
        } else if self.failures_left > 0 {
            ProviderStatus::Failed
        } else {
            ProviderStatus::Running
        }
    }

    fn last_sample(&self) -> Option<LocationSample> {
        if self.started { self.sample } else { None }
    }

    fn compass_heading(&self) -> f64 {
        self.heading_deg
    }
}
