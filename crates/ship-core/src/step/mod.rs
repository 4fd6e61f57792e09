//! Pasos del pipeline.
//!
//! Un paso es un descriptor nombrado (`PipelineStep`) que, a partir de los
//! resultados ya materializados de los pasos anteriores (`StepContext`),
//! produce un `Job`. Cada paso declara si es crítico y qué valor lo reemplaza
//! cuando falla de forma recuperable.

mod context;
pub mod definition;
mod status;

pub use context::StepContext;
pub use definition::{FnStep, PipelineStep};
pub use status::StepStatus;
