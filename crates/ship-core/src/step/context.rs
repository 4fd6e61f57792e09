use indexmap::IndexMap;
use serde_json::Value;

/// Vista de sólo lectura sobre los resultados acumulados, en orden de
/// ejecución. Un paso nunca puede modificarlos.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    results: &'a IndexMap<String, Value>,
}

impl<'a> StepContext<'a> {
    pub fn new(results: &'a IndexMap<String, Value>) -> Self {
        Self { results }
    }

    /// Resultado materializado de un paso anterior.
    pub fn get(&self, step_id: &str) -> Option<&'a Value> {
        self.results.get(step_id)
    }

    /// Resultado del paso inmediatamente anterior.
    pub fn previous(&self) -> Option<&'a Value> {
        self.results.last().map(|(_, v)| v)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.results.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &'a IndexMap<String, Value> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn previous_is_last_inserted() {
        let mut results = IndexMap::new();
        results.insert("create".to_string(), json!({"id": "SHP123"}));
        results.insert("label".to_string(), json!(""));
        let ctx = StepContext::new(&results);
        assert_eq!(ctx.previous(), Some(&json!("")));
        assert_eq!(ctx.get("create"), Some(&json!({"id": "SHP123"})));
        assert!(ctx.contains("label"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn empty_context_has_no_previous() {
        let results = IndexMap::new();
        let ctx = StepContext::new(&results);
        assert!(ctx.is_empty());
        assert_eq!(ctx.previous(), None);
    }
}
