use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::StepContext;
use crate::errors::StepError;
use crate::job::Job;

/// Trait que define un paso. Debe ser puro respecto a los resultados previos
/// (más la llamada de red que realice).
pub trait PipelineStep: Send + Sync {
    /// Identificador único dentro del pipeline; clave del resultado.
    fn id(&self) -> &str;

    /// Un paso crítico aborta la ejecución ante cualquier error.
    fn critical(&self) -> bool {
        true
    }

    /// Valor almacenado si el paso falla de forma recuperable.
    fn fallback(&self) -> Value {
        Value::Null
    }

    fn run(&self, ctx: &StepContext<'_>) -> Result<Job, StepError>;
}

type StepFn = Arc<dyn Fn(&StepContext<'_>) -> Result<Job, StepError> + Send + Sync>;

/// Paso respaldado por un closure.
#[derive(Clone)]
pub struct FnStep {
    id: String,
    critical: bool,
    fallback: Value,
    run: StepFn,
}

impl FnStep {
    pub fn critical<F>(id: impl Into<String>, run: F) -> Self
        where F: Fn(&StepContext<'_>) -> Result<Job, StepError> + Send + Sync + 'static
    {
        Self { id: id.into(),
               critical: true,
               fallback: Value::Null,
               run: Arc::new(run) }
    }

    /// Paso no crítico: un `StepError::Soft` deja `fallback` como resultado.
    ///
    /// Sólo `Soft` se absorbe. `Transport` y `Malformed` abortan la ejecución
    /// aunque el paso sea opcional; una llamada de enriquecimiento (p. ej. la
    /// imagen de etiqueta) cuyo fallo deba tolerarse tiene que convertir ese
    /// error en `StepError::Soft` dentro del propio paso.
    pub fn optional<F>(id: impl Into<String>, fallback: impl Into<Value>, run: F) -> Self
        where F: Fn(&StepContext<'_>) -> Result<Job, StepError> + Send + Sync + 'static
    {
        Self { id: id.into(),
               critical: false,
               fallback: fallback.into(),
               run: Arc::new(run) }
    }
}

impl PipelineStep for FnStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn critical(&self) -> bool {
        self.critical
    }

    fn fallback(&self) -> Value {
        self.fallback.clone()
    }

    fn run(&self, ctx: &StepContext<'_>) -> Result<Job, StepError> {
        (self.run)(ctx)
    }
}

impl fmt::Debug for FnStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep")
         .field("id", &self.id)
         .field("critical", &self.critical)
         .field("fallback", &self.fallback)
         .finish_non_exhaustive()
    }
}
