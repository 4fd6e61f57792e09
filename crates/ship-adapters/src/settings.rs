//! Configuración de conexión por carrier.
//! Se carga desde variables de entorno con un prefijo (`<PREFIJO>_CARRIER_ID`,
//! `<PREFIJO>_ACCOUNT_NUMBER`, ...), leyendo `.env` una sola vez.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierSettings {
    pub carrier_id: String,
    pub account_number: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub test_mode: bool,
}

impl CarrierSettings {
    /// Vacío cuenta como "sin contrato".
    pub fn has_contract(&self) -> bool {
        self.contract_id.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn from_env(prefix: &str) -> Result<Self, AdapterError> {
        init_dotenv();
        let var = |key: &str| env::var(format!("{prefix}_{key}")).ok().filter(|v| !v.is_empty());
        let required = |key: &str| var(key).ok_or_else(|| AdapterError::Config(format!("{prefix}_{key} not set")));

        Ok(Self { carrier_id: required("CARRIER_ID")?,
                  account_number: required("ACCOUNT_NUMBER")?,
                  username: var("USERNAME").unwrap_or_default(),
                  password: var("PASSWORD").unwrap_or_default(),
                  contract_id: var("CONTRACT_ID"),
                  test_mode: var("TEST_MODE").map(|v| parse_flag(&v)).unwrap_or(true) })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
