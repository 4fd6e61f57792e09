//! Errores de adaptadores y del gateway.

use ship_core::{PipelineError, StepError};
use thiserror::Error;

use crate::carrier::Carrier;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unsupported carrier: {0}")]
    UnsupportedCarrier(String),
    #[error("{carrier} does not support {operation}")]
    UnsupportedOperation { carrier: Carrier, operation: &'static str },
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("configuration error: {0}")]
    Config(String),
    /// El adaptador armó un pipeline inválido (ids vacíos o repetidos).
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// Fallo fatal de una operación multi-llamada; no hay resultado parcial.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// Fallo de una operación de una sola llamada.
    #[error(transparent)]
    Request(#[from] StepError),
}
