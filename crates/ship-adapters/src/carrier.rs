//! Contrato de adaptador y registro cerrado de carriers.
//!
//! Cada carrier soportado es una variante de `Carrier`; el registro asocia
//! cada variante con su implementación de `CarrierAdapter`. Un adaptador sólo
//! sabe construir requests de cable y parsear respuestas: la secuenciación y
//! el envío los hace el `Gateway`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ship_core::{Deserializable, Pipeline, Serializable};

use crate::carriers::{CanadaPost, EShipper};
use crate::errors::AdapterError;
use crate::models::{Message, RateDetails, RateRequest, ShipmentDetails, ShipmentRequest};
use crate::settings::CarrierSettings;
use crate::transport::WireRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "canadapost")]
    CanadaPost,
    #[serde(rename = "eshipper")]
    EShipper,
}

impl Carrier {
    pub const ALL: [Carrier; 2] = [Carrier::CanadaPost, Carrier::EShipper];

    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::CanadaPost => "canadapost",
            Carrier::EShipper => "eshipper",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Carrier::ALL.into_iter()
                    .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| AdapterError::UnsupportedCarrier(s.to_string()))
    }
}

/// Operaciones que un carrier no implementa devuelven
/// `AdapterError::UnsupportedOperation`.
pub trait CarrierAdapter: Send + Sync {
    fn carrier(&self) -> Carrier;

    /// Pipeline de creación de envío (una o varias llamadas dependientes).
    fn shipment_request(&self,
                        _payload: &ShipmentRequest,
                        _settings: &CarrierSettings)
                        -> Result<Serializable<Pipeline>, AdapterError> {
        Err(AdapterError::UnsupportedOperation { carrier: self.carrier(),
                                                 operation: "shipment" })
    }

    /// Recibe `{step_id: respuesta}` de la ejecución del pipeline.
    fn parse_shipment_response(&self,
                               _response: Deserializable<IndexMap<String, Value>>,
                               _settings: &CarrierSettings)
                               -> (Option<ShipmentDetails>, Vec<Message>) {
        (None, Vec::new())
    }

    fn rate_request(&self,
                    _payload: &RateRequest,
                    _settings: &CarrierSettings)
                    -> Result<Serializable<Value, WireRequest>, AdapterError> {
        Err(AdapterError::UnsupportedOperation { carrier: self.carrier(),
                                                 operation: "rating" })
    }

    fn parse_rate_response(&self,
                           _response: Deserializable<Value>,
                           _settings: &CarrierSettings)
                           -> (Vec<RateDetails>, Vec<Message>) {
        (Vec::new(), Vec::new())
    }
}

#[derive(Clone, Default)]
pub struct CarrierRegistry {
    adapters: HashMap<Carrier, Arc<dyn CarrierAdapter>>,
}

impl CarrierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registro con todos los carriers incluidos en este crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CanadaPost));
        registry.register(Arc::new(EShipper));
        registry
    }

    /// Devuelve el adaptador previo si la variante ya estaba registrada.
    pub fn register(&mut self, adapter: Arc<dyn CarrierAdapter>) -> Option<Arc<dyn CarrierAdapter>> {
        self.adapters.insert(adapter.carrier(), adapter)
    }

    pub fn get(&self, carrier: Carrier) -> Result<Arc<dyn CarrierAdapter>, AdapterError> {
        self.adapters
            .get(&carrier)
            .cloned()
            .ok_or_else(|| AdapterError::UnsupportedCarrier(carrier.to_string()))
    }

    /// Carriers registrados en el orden de `Carrier::ALL`.
    pub fn carriers(&self) -> Vec<Carrier> {
        Carrier::ALL.into_iter().filter(|c| self.adapters.contains_key(c)).collect()
    }
}

impl fmt::Debug for CarrierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierRegistry").field("carriers", &self.carriers()).finish()
    }
}
