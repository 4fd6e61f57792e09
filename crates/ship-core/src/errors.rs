//! Errores del núcleo.
//!
//! `StepError` es lo que un paso (o el transporte que invoca) puede devolver.
//! `PipelineError` es lo que ve el caller de una ejecución.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error producido dentro de un paso o por el handler de transporte.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepError {
    /// La llamada de red falló (conexión, timeout, status inesperado).
    #[error("transport error: {0}")]
    Transport(String),
    /// La respuesta no se pudo interpretar en absoluto.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// El paso no produjo datos útiles, pero el resto del resultado sigue
    /// siendo válido.
    #[error("{0}")]
    Soft(String),
}

impl StepError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn soft(msg: impl Into<String>) -> Self {
        Self::Soft(msg.into())
    }

    /// Transporte y respuestas ilegibles abortan siempre la ejecución.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Soft(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PipelineError {
    /// Fallo fatal de un paso; `source` es el error original sin modificar.
    #[error("step '{step_id}' failed: {source}")]
    Step { step_id: String, source: StepError },
    #[error("step id must not be empty")]
    EmptyStepId,
    #[error("duplicate step id: {0}")]
    DuplicateStepId(String),
    /// Contrato roto por el adaptador: el `Job` no pertenece al paso que lo
    /// devolvió.
    #[error("step '{step_id}' returned a job with id '{job_id}'")]
    JobIdMismatch { step_id: String, job_id: String },
}

impl PipelineError {
    /// Error original del paso, si lo hay.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            Self::Step { source, .. } => Some(source),
            _ => None,
        }
    }

    /// `true` para defectos del adaptador (no condiciones remotas).
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::Step { .. })
    }
}
