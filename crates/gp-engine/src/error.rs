use gp_core::GpError;
use thiserror::Error;

use crate::TraceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] GpError),

    #[error("trace output error: {0}")]
    Trace(#[from] TraceError),
}

pub type EngineResult<T> = Result<T, EngineError>;
