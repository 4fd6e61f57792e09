use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::shape::log_payload;
use crate::constants::DESERIALIZED_PREFIX;

type DeserializeFn<R, D> = Arc<dyn Fn(&R) -> D + Send + Sync>;

fn identity<R: Clone>(value: &R) -> R {
    value.clone()
}

/// Respuesta de cable a la espera de convertirse en tipo de dominio.
pub struct Deserializable<R, D = R> {
    value: R,
    deserializer: DeserializeFn<R, D>,
}

impl<R> Deserializable<R, R> where R: Clone + 'static
{
    pub fn new(value: R) -> Self {
        Self { value,
               deserializer: Arc::new(identity::<R>) }
    }
}

impl<R, D> Deserializable<R, D> {
    pub fn with_deserializer<F>(value: R, deserializer: F) -> Self
        where F: Fn(&R) -> D + Send + Sync + 'static
    {
        Self { value,
               deserializer: Arc::new(deserializer) }
    }

    pub fn value(&self) -> &R {
        &self.value
    }

    pub fn into_value(self) -> R {
        self.value
    }

    /// Registra la respuesta cruda y aplica el deserializer.
    pub fn deserialize(&self) -> D
        where R: Serialize
    {
        log_payload(DESERIALIZED_PREFIX, &self.value);
        (self.deserializer)(&self.value)
    }
}

impl<R: Clone, D> Clone for Deserializable<R, D> {
    fn clone(&self) -> Self {
        Self { value: self.value.clone(),
               deserializer: Arc::clone(&self.deserializer) }
    }
}

impl<R: fmt::Debug, D> fmt::Debug for Deserializable<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deserializable").field("value", &self.value).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn parses_raw_body_into_value() {
        let env = Deserializable::with_deserializer(r#"{"tracking-pin":"123"}"#.to_string(), |raw: &String| {
            serde_json::from_str::<Value>(raw).ok()
        });
        assert_eq!(env.deserialize(), Some(json!({"tracking-pin": "123"})));
        assert_eq!(env.deserialize(), env.deserialize());
    }

    #[test]
    fn identity_keeps_mapping() {
        let env = Deserializable::new(json!({"messages": []}));
        assert_eq!(env.deserialize(), json!({"messages": []}));
    }
}
