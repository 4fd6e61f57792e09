use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{PipelineEvent, PipelineEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, run_id: Uuid, kind: PipelineEventKind) -> PipelineEvent;
    /// Eventos de una ejecución en orden ascendente por seq.
    fn list(&self, run_id: Uuid) -> Vec<PipelineEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: HashMap<Uuid, Vec<PipelineEvent>>,
}

impl InMemoryEventStore {
    pub fn run_ids(&self) -> Vec<Uuid> {
        self.inner.keys().copied().collect()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, run_id: Uuid, kind: PipelineEventKind) -> PipelineEvent {
        let events = self.inner.entry(run_id).or_default();
        let ev = PipelineEvent { seq: events.len() as u64,
                                 run_id,
                                 kind,
                                 ts: Utc::now() };
        events.push(ev.clone());
        ev
    }

    fn list(&self, run_id: Uuid) -> Vec<PipelineEvent> {
        self.inner.get(&run_id).cloned().unwrap_or_default()
    }
}

/// Store que descarta todo; lo usan `execute`/`apply` cuando no hay traza.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventStore;

impl EventStore for NullEventStore {
    fn append_kind(&mut self, run_id: Uuid, kind: PipelineEventKind) -> PipelineEvent {
        PipelineEvent { seq: 0,
                        run_id,
                        kind,
                        ts: Utc::now() }
    }

    fn list(&self, _run_id: Uuid) -> Vec<PipelineEvent> {
        Vec::new()
    }
}
