//! Tipos de evento de una ejecución.
//!
//! Cada ejecución emite sus eventos a un `EventStore` append-only. Sirven para
//! observar el progreso y para reconstruir el estado (`RunState::replay`); el
//! resultado de la ejecución nunca depende de ellos.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineEventKind {
    /// Primer evento de un `run_id`.
    RunStarted { step_count: usize },
    StepStarted { step_index: usize, step_id: String },
    /// `used_fallback` indica que el `Job` llegó sin datos.
    StepFinished {
        step_index: usize,
        step_id: String,
        used_fallback: bool,
    },
    /// Fallo recuperable absorbido con el fallback declarado del paso.
    StepFellBack {
        step_index: usize,
        step_id: String,
        reason: String,
    },
    StepFailed {
        step_index: usize,
        step_id: String,
        error: String,
    },
    RunCompleted { fingerprint: String },
    /// Cierre de una ejecución abortada; no hay resultado parcial.
    RunFailed { step_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: PipelineEventKind,
    pub ts: DateTime<Utc>, // metadato, no entra en el fingerprint
}
