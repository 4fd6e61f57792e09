use std::collections::HashSet;
use std::sync::Arc;

use super::Pipeline;
use crate::errors::PipelineError;
use crate::step::PipelineStep;

/// Acumula pasos en orden; `build` valida el plan antes de cualquier
/// ejecución.
#[derive(Default)]
pub struct PipelineBuilder {
    steps: Vec<Arc<dyn PipelineStep>>,
}

impl PipelineBuilder {
    pub fn step<S>(mut self, step: S) -> Self
        where S: PipelineStep + 'static
    {
        self.steps.push(Arc::new(step));
        self
    }

    pub fn shared_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let mut seen = HashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            let id = step.id();
            if id.is_empty() {
                return Err(PipelineError::EmptyStepId);
            }
            if !seen.insert(id.to_string()) {
                return Err(PipelineError::DuplicateStepId(id.to_string()));
            }
        }
        Ok(Pipeline { steps: self.steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Job;
    use crate::step::FnStep;

    fn noop(id: &'static str) -> FnStep {
        FnStep::critical(id, move |_| Ok(Job::new(id)))
    }

    #[test]
    fn keeps_insertion_order() {
        let p = Pipeline::builder().step(noop("c")).step(noop("a")).step(noop("b")).build().unwrap();
        assert_eq!(p.step_ids(), vec!["c", "a", "b"]);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Pipeline::builder().step(noop("create")).step(noop("create")).build().unwrap_err();
        assert_eq!(err, PipelineError::DuplicateStepId("create".into()));
    }

    #[test]
    fn rejects_empty_id() {
        let err = Pipeline::builder().step(noop("")).build().unwrap_err();
        assert_eq!(err, PipelineError::EmptyStepId);
    }

    #[test]
    fn serializes_as_plan() {
        let p = Pipeline::builder().step(noop("create"))
                                   .step(FnStep::optional("label", "", |_| Ok(Job::new("label"))))
                                   .build()
                                   .unwrap();
        let plan = serde_json::to_value(&p).unwrap();
        assert_eq!(plan,
                   serde_json::json!([{"id": "create", "critical": true}, {"id": "label", "critical": false}]));
    }
}
