//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone `AppConfig`.
//!
//! Variables:
//! - `SHIPFLOW_LOG` (o `RUST_LOG`): filtro de logs, por defecto `info`.
//! - `SHIPFLOW_CARRIER`: carrier por defecto, por defecto `canadapost`.
//! - `SHIPFLOW_SETTINGS_PREFIX`: prefijo de `CarrierSettings::from_env`; si
//!   falta se usan credenciales de demostración.
use std::env;

use log::debug;
use ship_adapters::settings::init_dotenv;
use ship_adapters::Carrier;

use crate::errors::CoreError;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuración de la aplicación (inmutable una vez cargada).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directiva para `EnvFilter`.
    pub log_filter: String,
    pub default_carrier: Carrier,
    pub settings_prefix: Option<String>,
}

impl AppConfig {
    /// Lee el entorno del proceso (y `.env`).
    pub fn from_env() -> Result<Self, CoreError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de claves.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_filter = get("SHIPFLOW_LOG").or_else(|| get("RUST_LOG"))
                                            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let default_carrier = match get("SHIPFLOW_CARRIER") {
            Some(name) => name.parse()
                              .map_err(|_| CoreError::Config(format!("SHIPFLOW_CARRIER: carrier desconocido '{name}'")))?,
            None => Carrier::CanadaPost,
        };
        let config = AppConfig { log_filter,
                                 default_carrier,
                                 settings_prefix: get("SHIPFLOW_SETTINGS_PREFIX") };
        debug!("configuración cargada: {config:?}");
        Ok(config)
    }
}
