//! Traza de ejecución del pipeline y replay de su estado.

mod replay;
mod store;
mod types;

pub use replay::{RunState, RunStatus};
pub use store::{EventStore, InMemoryEventStore, NullEventStore};
pub use types::{PipelineEvent, PipelineEventKind};
