//! Reconstrucción del estado de una ejecución a partir de sus eventos.
//!
//! `Pending -> Running(i) -> Running(i+1) -> ... -> Completed`, o bien
//! `Running(i) -> Failed`. No existe estado de reintento: una ejecución
//! fallida se repite desde el primer paso.
use serde::{Deserialize, Serialize};

use super::{PipelineEvent, PipelineEventKind};
use crate::step::StepStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pending,
    Running { step_index: usize },
    Completed,
    Failed { step_index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub status: RunStatus,
    /// (step_id, estado) en orden de ejecución.
    pub steps: Vec<(String, StepStatus)>,
    pub fingerprint: Option<String>,
}

impl RunState {
    pub fn replay(events: &[PipelineEvent]) -> Self {
        let mut state = RunState { status: RunStatus::Pending,
                                   steps: Vec::new(),
                                   fingerprint: None };
        for ev in events {
            match &ev.kind {
                PipelineEventKind::RunStarted { .. } => {}
                PipelineEventKind::StepStarted { step_index, step_id } => {
                    state.status = RunStatus::Running { step_index: *step_index };
                    state.steps.push((step_id.clone(), StepStatus::Running));
                }
                PipelineEventKind::StepFinished { step_id, .. } => state.mark(step_id, StepStatus::Finished),
                PipelineEventKind::StepFellBack { step_id, .. } => state.mark(step_id, StepStatus::FellBack),
                PipelineEventKind::StepFailed { step_index, step_id, .. } => {
                    state.mark(step_id, StepStatus::Failed);
                    state.status = RunStatus::Failed { step_index: *step_index };
                }
                PipelineEventKind::RunCompleted { fingerprint } => {
                    state.status = RunStatus::Completed;
                    state.fingerprint = Some(fingerprint.clone());
                }
                PipelineEventKind::RunFailed { .. } => {}
            }
        }
        state
    }

    fn mark(&mut self, step_id: &str, status: StepStatus) {
        if let Some(slot) = self.steps.iter_mut().rev().find(|(id, _)| id == step_id) {
            slot.1 = status;
        }
    }

    pub fn status_of(&self, step_id: &str) -> StepStatus {
        self.steps
            .iter()
            .find(|(id, _)| id == step_id)
            .map(|(_, s)| *s)
            .unwrap_or(StepStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventStore, InMemoryEventStore};
    use uuid::Uuid;

    #[test]
    fn replay_of_empty_trace_is_pending() {
        let state = RunState::replay(&[]);
        assert_eq!(state.status, RunStatus::Pending);
        assert_eq!(state.status_of("create"), StepStatus::Pending);
    }

    #[test]
    fn replay_tracks_running_then_failed() {
        let mut store = InMemoryEventStore::default();
        let run = Uuid::new_v4();
        store.append_kind(run, PipelineEventKind::RunStarted { step_count: 2 });
        store.append_kind(run, PipelineEventKind::StepStarted { step_index: 0, step_id: "create".into() });
        let mid = RunState::replay(&store.list(run));
        assert_eq!(mid.status, RunStatus::Running { step_index: 0 });
        assert_eq!(mid.status_of("create"), StepStatus::Running);

        store.append_kind(run,
                          PipelineEventKind::StepFailed { step_index: 0,
                                                          step_id: "create".into(),
                                                          error: "transport error: reset".into() });
        let end = RunState::replay(&store.list(run));
        assert_eq!(end.status, RunStatus::Failed { step_index: 0 });
        assert_eq!(end.status_of("create"), StepStatus::Failed);
        assert!(end.status_of("create").is_terminal());
        assert_eq!(end.fingerprint, None);
    }
}
