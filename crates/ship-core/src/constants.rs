//! Constantes del núcleo.

/// Versión lógica del executor. Forma parte del fingerprint de cada ejecución:
/// un cambio de versión invalida fingerprints aunque pasos y respuestas sean
/// idénticos.
pub const ENGINE_VERSION: &str = "P1.0";

/// Prefijo de log para payloads salientes.
pub const SERIALIZED_PREFIX: &str = "serialized request::";

/// Prefijo de log para respuestas entrantes.
pub const DESERIALIZED_PREFIX: &str = "deserialized response::";
