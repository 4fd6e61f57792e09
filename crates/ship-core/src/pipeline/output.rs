use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Paso cuyo fallo recuperable se sustituyó por su fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepWarning {
    pub step_id: String,
    pub message: String,
}

/// Resultado de una ejecución completada: `{step_id: valor materializado}` en
/// orden de declaración.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub results: IndexMap<String, Value>,
    pub warnings: Vec<StepWarning>,
    /// Hash determinista de pasos + resultados (no incluye `run_id`).
    pub fingerprint: String,
}

impl PipelineOutput {
    pub fn get(&self, step_id: &str) -> Option<&Value> {
        self.results.get(step_id)
    }

    /// Algún paso quedó en su fallback por un fallo recuperable.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_results(self) -> IndexMap<String, Value> {
        self.results
    }
}
