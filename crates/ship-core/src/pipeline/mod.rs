//! Pipeline: secuencia ordenada de pasos dependientes.
//!
//! Se construye una vez por operación multi-llamada (p. ej. "crear envío y
//! luego obtener etiqueta") y se ejecuta una vez. Los pasos corren siempre en
//! orden de inserción, nunca en paralelo: cada uno depende de los datos que
//! produjeron los anteriores.

mod builder;
mod executor;
mod output;

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::step::PipelineStep;

pub use builder::PipelineBuilder;
pub use output::{PipelineOutput, StepWarning};

/// Plan validado: ids no vacíos y únicos.
#[derive(Clone)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }
}

#[derive(serde::Serialize)]
struct StepPlan<'a> {
    id: &'a str,
    critical: bool,
}

/// Un pipeline se serializa como su plan: `[{id, critical}, ...]`.
impl Serialize for Pipeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.steps.len()))?;
        for step in &self.steps {
            seq.serialize_element(&StepPlan { id: step.id(),
                                              critical: step.critical() })?;
        }
        seq.end()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("steps", &self.step_ids()).finish()
    }
}
