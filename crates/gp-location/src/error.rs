use thiserror::Error;

/// Why location acquisition gave up.  Every variant is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcquisitionError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location service disabled, please enable it for this app")]
    ProviderDisabled,

    #[error("location service did not finish initializing in time")]
    InitializationTimeout,

    #[error("location service failed {failures} times, please enable it for this app")]
    RepeatedProviderFailure { failures: u32 },
}
