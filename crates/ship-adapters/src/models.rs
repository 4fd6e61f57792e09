//! Modelo de datos unificado, independiente de cualquier carrier.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state_code: Option<String>,
    pub postal_code: String,
    pub country_code: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Bulto. Peso en KG, dimensiones en CM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub weight: f64,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl Parcel {
    pub fn has_dimensions(&self) -> bool {
        self.length.is_some() && self.width.is_some() && self.height.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub service: String,
    pub shipper: Address,
    pub recipient: Address,
    pub parcels: Vec<Parcel>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl ShipmentRequest {
    pub fn total_weight(&self) -> f64 {
        self.parcels.iter().map(|p| p.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDetails {
    pub carrier_id: String,
    pub carrier_name: String,
    pub tracking_number: String,
    pub shipment_identifier: String,
    /// Etiqueta codificada (base64). `None` si no se pudo obtener.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    pub shipper: Address,
    pub recipient: Address,
    pub parcels: Vec<Parcel>,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeDetails {
    pub name: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDetails {
    pub carrier_id: String,
    pub carrier_name: String,
    pub service: String,
    pub currency: String,
    pub total_charge: f64,
    pub transit_days: Option<u32>,
    pub extra_charges: Vec<ChargeDetails>,
}

/// Error o advertencia reportada al caller junto al resultado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub carrier_id: String,
    pub carrier_name: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
