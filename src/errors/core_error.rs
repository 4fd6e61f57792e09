use ship_adapters::{AdapterError, GatewayError};
use thiserror::Error;

/// Error de nivel aplicación: agrupa los errores de cada crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de adaptador: {0}")]
    Adapter(#[from] AdapterError),
    #[error("Error de gateway: {0}")]
    Gateway(#[from] GatewayError),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ship_core::StepError;

    #[test]
    fn config_error_names_the_variable() {
        let err = CoreError::Config("SHIPFLOW_CARRIER: carrier desconocido 'fedex'".into());
        assert_eq!(err.to_string(),
                   "Error de configuración: SHIPFLOW_CARRIER: carrier desconocido 'fedex'");
    }

    #[test]
    fn unknown_carrier_converts_to_adapter_error() {
        let err: CoreError = "fedex".parse::<ship_adapters::Carrier>().unwrap_err().into();
        assert!(matches!(err, CoreError::Adapter(AdapterError::UnsupportedCarrier(_))));
        assert_eq!(err.to_string(), "Error de adaptador: unsupported carrier: fedex");
    }

    #[test]
    fn gateway_transport_failure_keeps_message() {
        let err: CoreError = GatewayError::from(StepError::transport("HTTP 503 from carrier")).into();
        assert_eq!(err.to_string(), "Error de gateway: transport error: HTTP 503 from carrier");
    }

    #[test]
    fn invalid_json_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Json(_)));
    }
}
