//! ship-core: orquestación determinista de llamadas dependientes a carriers.
//!
//! Piezas del núcleo:
//! - `envelope`: `Serializable` / `Deserializable`, difieren la conversión a
//!   formato de cable hasta que se invoca explícitamente (y la registran).
//! - `job`: unidad de trabajo nombrada con valor de respaldo (`fallback`).
//! - `step` + `pipeline`: secuencia ordenada de pasos; cada paso ve los
//!   resultados acumulados de los anteriores.
//! - `event`: traza append-only de cada ejecución y replay de su estado.
//!
//! El núcleo no conoce XML/JSON/SOAP de ningún carrier: sólo secuencia y
//! envuelve.
pub mod constants;
pub mod envelope;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod job;
pub mod pipeline;
pub mod step;

pub use envelope::{Deserializable, Serializable};
pub use errors::{PipelineError, StepError};
pub use event::{EventStore, InMemoryEventStore, NullEventStore, PipelineEvent, PipelineEventKind, RunState, RunStatus};
pub use job::Job;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineOutput, StepWarning};
pub use step::{FnStep, PipelineStep, StepContext, StepStatus};
