//! The platform location capability consumed by the engine.

/// Lifecycle of the provider after [`LocationProvider::start`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProviderStatus {
    #[default]
    Stopped,
    Initializing,
    Running,
    Failed,
}

/// One fix as reported by the provider.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationSample {
    pub lat: f64,
    pub lon: f64,
    /// Radius of the 68 % confidence circle, metres.
    pub horizontal_accuracy_m: f64,
    /// Provider timestamp, seconds.
    pub timestamp_secs: f64,
}

impl LocationSample {
    /// Provider timestamp truncated to whole milliseconds.
    #[inline]
    pub fn timestamp_ms(&self) -> i64 {
        (self.timestamp_secs * 1000.0) as i64
    }
}

/// Adapter over a platform location + compass API.
///
/// The engine calls these methods only from its tick, never concurrently.
/// Adapters whose platform delivers fixes on another thread must marshal
/// them so that `last_sample` returns the latest one.
pub trait LocationProvider {
    /// Whether the platform needs an explicit runtime permission grant.
    fn requires_permission(&self) -> bool {
        true
    }

    /// Ask the user for location permission.  Called at most once per session.
    fn request_permission(&mut self);

    fn is_permission_granted(&self) -> bool;

    /// Whether location services are switched on for this app.
    fn is_enabled_by_user(&self) -> bool;

    fn start(&mut self, desired_accuracy_m: f64, desired_update_distance_m: f64);

    fn stop(&mut self);

    fn status(&self) -> ProviderStatus;

    /// The most recent fix, if any has arrived.
    fn last_sample(&self) -> Option<LocationSample>;

    /// True heading in degrees.
    fn compass_heading(&self) -> f64;
}

impl<P: LocationProvider + ?Sized> LocationProvider for Box<P> {
    fn requires_permission(&self) -> bool {
        (**self).requires_permission()
    }
    fn request_permission(&mut self) {
        (**self).request_permission()
    }
    fn is_permission_granted(&self) -> bool {
        (**self).is_permission_granted()
    }
    fn is_enabled_by_user(&self) -> bool {
        (**self).is_enabled_by_user()
    }
    fn start(&mut self, desired_accuracy_m: f64, desired_update_distance_m: f64) {
        (**self).start(desired_accuracy_m, desired_update_distance_m)
    }
    fn stop(&mut self) {
        (**self).stop()
    }
    fn status(&self) -> ProviderStatus {
        (**self).status()
    }
    fn last_sample(&self) -> Option<LocationSample> {
        (**self).last_sample()
    }
    fn compass_heading(&self) -> f64 {
        (**self).compass_heading()
    }
}
