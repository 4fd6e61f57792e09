//! Ejecución secuencial del pipeline.
//!
//! Por cada paso, en orden:
//! 1. se invoca con los resultados acumulados hasta ese momento;
//! 2. si el `Job` trae datos, el handler (transporte) los convierte en la
//!    respuesta del paso; si no, queda el `fallback` del `Job`;
//! 3. el valor se guarda bajo el id del paso antes de pasar al siguiente.
//!
//! Un error es recuperable sólo si el paso no es crítico y el error es
//! `StepError::Soft`; en ese caso queda el fallback declarado del paso. Todo
//! lo demás aborta la ejecución sin resultado parcial.
use indexmap::IndexMap;
use log::{debug, error, warn};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{Pipeline, PipelineOutput, StepWarning};
use crate::constants::ENGINE_VERSION;
use crate::errors::{PipelineError, StepError};
use crate::event::{EventStore, NullEventStore, PipelineEventKind};
use crate::hashing::hash_value;
use crate::job::Job;
use crate::step::{PipelineStep, StepContext};

enum StepFailure {
    Step(StepError),
    Contract(PipelineError),
}

impl Pipeline {
    /// Ejecuta sin transporte: el `data` de cada `Job` es su resultado.
    pub fn execute(&self) -> Result<PipelineOutput, PipelineError> {
        self.apply(|job: &Job| Ok(job.materialize()))
    }

    /// Ejecuta enviando cada `Job` con datos a través de `handler`.
    pub fn apply<H>(&self, handler: H) -> Result<PipelineOutput, PipelineError>
        where H: FnMut(&Job) -> Result<Value, StepError>
    {
        self.apply_with_events(handler, &mut NullEventStore)
    }

    pub fn apply_with_events<H, E>(&self, mut handler: H, events: &mut E) -> Result<PipelineOutput, PipelineError>
        where H: FnMut(&Job) -> Result<Value, StepError>,
              E: EventStore + ?Sized
    {
        let run_id = Uuid::new_v4();
        events.append_kind(run_id, PipelineEventKind::RunStarted { step_count: self.steps.len() });

        let mut results: IndexMap<String, Value> = IndexMap::with_capacity(self.steps.len());
        let mut warnings: Vec<StepWarning> = Vec::new();

        for (step_index, step) in self.steps.iter().enumerate() {
            let step_id = step.id().to_string();
            events.append_kind(run_id,
                               PipelineEventKind::StepStarted { step_index,
                                                                step_id: step_id.clone() });
            debug!("pipeline {run_id}: step {step_index} '{step_id}' started");

            let failure = match run_step(step.as_ref(), &results, &mut handler) {
                Ok((value, used_fallback)) => {
                    events.append_kind(run_id,
                                       PipelineEventKind::StepFinished { step_index,
                                                                         step_id: step_id.clone(),
                                                                         used_fallback });
                    results.insert(step_id, value);
                    continue;
                }
                Err(failure) => failure,
            };

            let err = match failure {
                StepFailure::Step(e) if !step.critical() && !e.is_fatal() => {
                    warn!("pipeline {run_id}: step '{step_id}' fell back: {e}");
                    events.append_kind(run_id,
                                       PipelineEventKind::StepFellBack { step_index,
                                                                         step_id: step_id.clone(),
                                                                         reason: e.to_string() });
                    warnings.push(StepWarning { step_id: step_id.clone(),
                                                message: e.to_string() });
                    results.insert(step_id, step.fallback());
                    continue;
                }
                StepFailure::Step(source) => PipelineError::Step { step_id: step_id.clone(),
                                                                   source },
                StepFailure::Contract(e) => e,
            };

            error!("pipeline {run_id}: step '{step_id}' failed: {err}");
            events.append_kind(run_id,
                               PipelineEventKind::StepFailed { step_index,
                                                               step_id: step_id.clone(),
                                                               error: err.to_string() });
            events.append_kind(run_id, PipelineEventKind::RunFailed { step_id });
            return Err(err);
        }

        let fingerprint = self.fingerprint(&results);
        events.append_kind(run_id,
                           PipelineEventKind::RunCompleted { fingerprint: fingerprint.clone() });
        debug!("pipeline {run_id}: completed ({} steps, {} warnings)", results.len(), warnings.len());

        Ok(PipelineOutput { run_id,
                            results,
                            warnings,
                            fingerprint })
    }

    fn fingerprint(&self, results: &IndexMap<String, Value>) -> String {
        let materialized: Map<String, Value> = results.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        hash_value(&json!({
            "engine_version": ENGINE_VERSION,
            "steps": self.step_ids(),
            "results": Value::Object(materialized),
        }))
    }
}

/// Devuelve el valor materializado y si proviene del fallback del `Job`.
fn run_step<H>(step: &dyn PipelineStep,
               results: &IndexMap<String, Value>,
               handler: &mut H)
               -> Result<(Value, bool), StepFailure>
    where H: FnMut(&Job) -> Result<Value, StepError>
{
    let ctx = StepContext::new(results);
    let job = step.run(&ctx).map_err(StepFailure::Step)?;
    if job.id != step.id() {
        return Err(StepFailure::Contract(PipelineError::JobIdMismatch { step_id: step.id().to_string(),
                                                                        job_id: job.id }));
    }
    if job.has_data() {
        handler(&job).map(|v| (v, false)).map_err(StepFailure::Step)
    } else {
        Ok((job.fallback, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{InMemoryEventStore, RunState, RunStatus};
    use crate::step::{FnStep, StepStatus};

    fn create_and_label(label: FnStep) -> Pipeline {
        Pipeline::builder().step(FnStep::critical("create", |_| Ok(Job::new("create").with_data(json!({"id": "SHP123"})))))
                           .step(label)
                           .build()
                           .unwrap()
    }

    #[test]
    fn label_step_reads_create_result() {
        let p = create_and_label(FnStep::optional("label", "", |ctx| {
                                     let id = ctx.get("create").and_then(|v| v["id"].as_str()).unwrap_or_default();
                                     Ok(Job::new("label").with_data(json!({"href": format!("http://x/{id}.pdf")})))
                                 }));
        let out = p.execute().unwrap();
        assert_eq!(out.get("label"), Some(&json!({"href": "http://x/SHP123.pdf"})));
        assert!(!out.is_partial());
    }

    #[test]
    fn job_without_data_skips_handler() {
        let p = create_and_label(FnStep::optional("label", "", |_| Ok(Job::new("label").with_fallback("none"))));
        let mut sent = Vec::new();
        let out = p.apply(|job: &Job| {
                       sent.push(job.id.clone());
                       Ok(json!({"sent": job.id}))
                   })
                   .unwrap();
        assert_eq!(sent, vec!["create".to_string()]);
        assert_eq!(out.get("create"), Some(&json!({"sent": "create"})));
        assert_eq!(out.get("label"), Some(&json!("none")));
        assert!(!out.is_partial());
    }

    #[test]
    fn job_id_mismatch_is_contract_violation() {
        let p = create_and_label(FnStep::optional("label", "", |_| Ok(Job::new("shipment_label").with_data(json!(1)))));
        let err = p.execute().unwrap_err();
        assert_eq!(err,
                   PipelineError::JobIdMismatch { step_id: "label".into(),
                                                  job_id: "shipment_label".into() });
    }

    #[test]
    fn soft_error_in_critical_step_is_fatal() {
        let p = Pipeline::builder().step(FnStep::critical("create", |_| Err(StepError::soft("nothing to ship"))))
                                   .build()
                                   .unwrap();
        let err = p.execute().unwrap_err();
        assert_eq!(err.step_error(), Some(&StepError::soft("nothing to ship")));
    }

    #[test]
    fn transport_error_in_optional_step_is_fatal() {
        let p = create_and_label(FnStep::optional("label", "", |_| Ok(Job::new("label").with_data(json!("GET")))));
        let err = p.apply(|job: &Job| {
                       if job.id == "label" {
                           Err(StepError::transport("timeout"))
                       } else {
                           Ok(job.materialize())
                       }
                   })
                   .unwrap_err();
        assert_eq!(err,
                   PipelineError::Step { step_id: "label".into(),
                                         source: StepError::transport("timeout") });
    }

    #[test]
    fn events_trace_a_partial_run() {
        let p = create_and_label(FnStep::optional("label", "", |_| Err(StepError::soft("no label link"))));
        let mut store = InMemoryEventStore::default();
        let out = p.apply_with_events(|job: &Job| Ok(job.materialize()), &mut store).unwrap();

        let events = store.list(out.run_id);
        let state = RunState::replay(&events);
        assert_eq!(state.status, RunStatus::Completed);
        assert_eq!(state.status_of("create"), StepStatus::Finished);
        assert_eq!(state.status_of("label"), StepStatus::FellBack);
        assert_eq!(state.fingerprint.as_deref(), Some(out.fingerprint.as_str()));
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn events_trace_a_failed_run() {
        let p = Pipeline::builder().step(FnStep::critical("create", |_| Err(StepError::transport("connection refused"))))
                                   .step(FnStep::critical("label", |_| Ok(Job::new("label"))))
                                   .build()
                                   .unwrap();
        let mut store = InMemoryEventStore::default();
        assert!(p.apply_with_events(|job: &Job| Ok(job.materialize()), &mut store).is_err());

        let run_id = store.run_ids()[0];
        let events = store.list(run_id);
        assert!(matches!(events.last().map(|e| &e.kind), Some(PipelineEventKind::RunFailed { step_id }) if step_id == "create"));
        assert!(!events.iter().any(|e| matches!(&e.kind, PipelineEventKind::StepStarted { step_id, .. } if step_id == "label")));
        assert_eq!(RunState::replay(&events).status, RunStatus::Failed { step_index: 0 });
    }
}
