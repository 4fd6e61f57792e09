//! `Job`: salida materializable de un paso del pipeline.
//!
//! Es un contenedor de valores sin comportamiento propio. `data` es el payload
//! del paso (normalmente el request que el transporte enviará); si queda sin
//! definir, el executor usa `fallback` en su lugar.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Debe coincidir con el id del paso que lo produce.
    pub id: String,
    pub data: Option<Value>,
    pub fallback: Value,
}

impl Job {
    /// Job sin datos y con fallback `null`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(),
               data: None,
               fallback: Value::Null }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Acepta `Option` para que un paso pueda decidir "sin datos" en línea.
    pub fn with_optional_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<Value>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// `data` si está definido, si no `fallback`.
    pub fn materialize(&self) -> Value {
        self.data.clone().unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_data_materializes_fallback() {
        let job = Job::new("shipment_label").with_fallback("");
        assert!(!job.has_data());
        assert_eq!(job.materialize(), json!(""));
    }

    #[test]
    fn data_wins_over_fallback() {
        let job = Job::new("create").with_data(json!({"id": "SHP123"})).with_fallback("");
        assert_eq!(job.materialize(), json!({"id": "SHP123"}));
    }

    #[test]
    fn equality_is_by_value() {
        let a = Job::new("label").with_data(json!({"href": "http://x/label.pdf"}));
        let b = Job::new("label").with_data(json!({"href": "http://x/label.pdf"}));
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_fallback("other"));
    }

    #[test]
    fn optional_data_none_clears() {
        let job = Job::new("label").with_data(json!(1)).with_optional_data(None);
        assert_eq!(job.data, None);
    }
}
