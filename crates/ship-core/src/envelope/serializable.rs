use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::shape::log_serialized;
use crate::constants::SERIALIZED_PREFIX;

type SerializeFn<T, W> = Arc<dyn Fn(&T) -> W + Send + Sync>;

fn identity<T: Clone>(value: &T) -> T {
    value.clone()
}

/// Valor de dominio a la espera de convertirse en request de cable.
///
/// Inmutable tras construirse: `serialize()` puede llamarse varias veces y,
/// si el serializer es puro, devuelve siempre lo mismo.
pub struct Serializable<T, W = T> {
    value: T,
    serializer: SerializeFn<T, W>,
}

impl<T> Serializable<T, T> where T: Clone + 'static
{
    /// Envelope con serializer identidad.
    pub fn new(value: T) -> Self {
        Self { value,
               serializer: Arc::new(identity::<T>) }
    }
}

impl<T, W> Serializable<T, W> {
    pub fn with_serializer<F>(value: T, serializer: F) -> Self
        where F: Fn(&T) -> W + Send + Sync + 'static
    {
        Self { value,
               serializer: Arc::new(serializer) }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Materializa el formato de cable y lo registra en el log.
    pub fn serialize(&self) -> W
        where T: Serialize,
              W: Serialize
    {
        let serialized = (self.serializer)(&self.value);
        log_serialized(SERIALIZED_PREFIX, &self.value, &serialized);
        serialized
    }
}

impl<T: Clone, W> Clone for Serializable<T, W> {
    fn clone(&self) -> Self {
        Self { value: self.value.clone(),
               serializer: Arc::clone(&self.serializer) }
    }
}

impl<T: fmt::Debug, W> fmt::Debug for Serializable<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializable").field("value", &self.value).finish_non_exhaustive()
    }
}
