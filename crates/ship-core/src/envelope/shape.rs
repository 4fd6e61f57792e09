//! Descripción del payload según su forma, para el log.
//!
//! - secuencia: todos los elementos en una sola entrada.
//! - mapa: pares `clave: contenido` en una sola entrada.
//! - cualquier otra cosa: el escalar tal cual.
//!
//! Registrar nunca debe propagar un fallo: ni un payload no representable ni
//! un logger que entra en pánico llegan al caller.

use std::panic::{self, AssertUnwindSafe};

use log::{info, log_enabled, Level};
use serde::Serialize;
use serde_json::Value;

/// Texto que se registra para `value`.
pub fn describe_payload(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {}", render(v))).collect();
            format!("{{{}}}", parts.join(", "))
        }
        scalar => render(scalar),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Emite una entrada `info` con la forma del payload. Nunca falla.
pub(crate) fn log_payload<T: Serialize + ?Sized>(prefix: &str, value: &T) {
    log_with(prefix, || shape_of(value));
}

/// Como `log_payload`, pero un payload escalar se registra ya serializado:
/// secuencias y mapas se muestran por contenido, el resto en su formato de
/// cable.
pub(crate) fn log_serialized<T, W>(prefix: &str, value: &T, serialized: &W)
    where T: Serialize + ?Sized,
          W: Serialize + ?Sized
{
    log_with(prefix, || match serde_json::to_value(value) {
        Ok(v @ (Value::Array(_) | Value::Object(_))) => describe_payload(&v),
        _ => shape_of(serialized),
    });
}

fn log_with<F: FnOnce() -> String>(prefix: &str, shown: F) {
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        if !log_enabled!(Level::Info) {
            return;
        }
        info!("{prefix} {}", shown());
    }));
}

fn shape_of<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(v) => describe_payload(&v),
        Err(e) => format!("<unrepresentable payload: {e}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sequence_lists_every_element() {
        assert_eq!(describe_payload(&json!(["a", "b"])), "[a, b]");
    }

    #[test]
    fn mapping_lists_key_and_content() {
        assert_eq!(describe_payload(&json!({"id": "SHP123", "pieces": 2})), "{id: SHP123, pieces: 2}");
    }

    #[test]
    fn scalar_is_shown_as_is() {
        assert_eq!(describe_payload(&json!("<xml/>")), "<xml/>");
        assert_eq!(describe_payload(&json!(42)), "42");
        assert_eq!(describe_payload(&Value::Null), "null");
    }

    #[test]
    fn nested_values_render_as_json() {
        assert_eq!(describe_payload(&json!([{"a": 1}])), r#"[{"a":1}]"#);
    }
}
