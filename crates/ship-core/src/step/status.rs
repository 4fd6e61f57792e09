use serde::{Deserialize, Serialize};

/// Estado de un paso dentro de una ejecución.
///
/// Transiciones válidas:
/// - `Pending` -> `Running`
/// - `Running` -> `Finished` | `FellBack` | `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Pending,
    Running,
    /// Terminó con su propio valor (o el fallback de su `Job`).
    Finished,
    /// Falló de forma recuperable; quedó el fallback declarado del paso.
    FellBack,
    Failed,
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::FellBack | Self::Failed)
    }
}
