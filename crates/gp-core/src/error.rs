//! Framework error type.
//!
//! Sub-crates define their own error enums where they have failure modes of
//! their own; configuration problems anywhere in the stack are reported as
//! `GpError::Config`.

use thiserror::Error;

/// The base error type shared by `gp-*` crates.
#[derive(Debug, Error)]
pub enum GpError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gp-*` crates.
pub type GpResult<T> = Result<T, GpError>;
