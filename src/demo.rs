//! Datos de demostración para el binario `shipflow`.
//!
//! Arma requests, credenciales y un `ReplayTransport` con respuestas
//! pregrabadas de cada carrier, de modo que el flujo completo se puede
//! ejercitar sin red.

use serde_json::json;
use ship_adapters::carriers::canadapost::shipment_endpoint;
use ship_adapters::carriers::eshipper::quote_endpoint;
use ship_adapters::models::{Address, Parcel, RateRequest, ShipmentRequest};
use ship_adapters::{Carrier, CarrierSettings, ReplayTransport, WireResponse};
use ship_core::StepError;

/// Variante del flujo a reproducir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    #[default]
    Complete,
    /// La respuesta de creación no trae link de etiqueta (fallo recuperable).
    LabelMissing,
    /// La primera llamada falla en el transporte (fallo fatal).
    CreateFails,
}

pub fn settings(carrier: Carrier) -> CarrierSettings {
    match carrier {
        Carrier::CanadaPost => CarrierSettings { carrier_id: "canadapost".into(),
                                                 account_number: "2004381".into(),
                                                 username: "6e93d53968881714".into(),
                                                 password: "0bfa9fcb9853d1f51ee57a".into(),
                                                 contract_id: Some("42708517".into()),
                                                 test_mode: true },
        Carrier::EShipper => CarrierSettings { carrier_id: "eshipper".into(),
                                               account_number: "ES-1001".into(),
                                               username: "demo".into(),
                                               password: "demo".into(),
                                               contract_id: None,
                                               test_mode: true },
    }
}

fn shipper() -> Address {
    Address { person_name: Some("Bob".into()),
              company_name: Some("CGI".into()),
              address_line1: "502 MAIN ST N".into(),
              city: "MONTREAL".into(),
              state_code: Some("QC".into()),
              postal_code: "H2B1A0".into(),
              country_code: "CA".into(),
              phone_number: Some("1 (450) 823-8432".into()),
              ..Default::default() }
}

fn recipient() -> Address {
    Address { person_name: Some("Jain".into()),
              address_line1: "23 jardin private".into(),
              city: "Ottawa".into(),
              state_code: Some("ON".into()),
              postal_code: "K1K4T3".into(),
              country_code: "CA".into(),
              ..Default::default() }
}

fn parcel() -> Parcel {
    Parcel { weight: 20.0,
             length: Some(6.0),
             width: Some(12.0),
             height: Some(9.0) }
}

pub fn shipment_request() -> ShipmentRequest {
    ShipmentRequest { service: "DOM.EP".into(),
                      shipper: shipper(),
                      recipient: recipient(),
                      parcels: vec![parcel()],
                      reference: Some("DEMO-1".into()) }
}

pub fn rate_request() -> RateRequest {
    RateRequest { shipper: shipper(),
                  recipient: recipient(),
                  parcels: vec![parcel()],
                  services: vec![] }
}

/// Transporte con las respuestas de creación + etiqueta de Canada Post.
pub fn shipment_transport(settings: &CarrierSettings, scenario: Scenario) -> ReplayTransport {
    let endpoint = shipment_endpoint(settings);
    let label_href = format!("{endpoint}/347881315405043891/label");
    let mut links = vec![json!({"rel": "self", "href": format!("{endpoint}/347881315405043891")})];
    if scenario != Scenario::LabelMissing {
        links.push(json!({"rel": "label", "href": label_href}));
    }
    let created = json!({
        "shipment-id": "347881315405043891",
        "shipment-status": "created",
        "tracking-pin": "123456789012",
        "links": links,
    });

    match scenario {
        Scenario::CreateFails => ReplayTransport::new().fail(endpoint, StepError::transport("connection reset by peer")),
        _ => ReplayTransport::new().respond(endpoint, WireResponse::ok(created.to_string()))
                                   .respond(label_href, WireResponse::ok(json!({"label": "JVBERi0xLjQKJcfs"}).to_string())),
    }
}

/// Transporte con la respuesta de cotización de eShipper; `fail` simula un 503.
pub fn rate_transport(settings: &CarrierSettings, fail: bool) -> ReplayTransport {
    let endpoint = quote_endpoint(settings);
    if fail {
        return ReplayTransport::new().respond(endpoint, WireResponse::with_status(503, "Service Unavailable"));
    }
    let quotes = json!({
        "quotes": [
            {"serviceId": 4, "serviceName": "Purolator Express", "currency": "CAD",
             "totalCharge": "48.36", "transitDays": 1, "baseCharge": "40.00",
             "fuelSurcharge": "5.36", "surcharges": [{"name": "Residential", "amount": "3.00"}]},
            {"serviceId": 5, "serviceName": "Purolator Ground", "currency": "CAD",
             "totalCharge": 31.5, "transitDays": 3, "baseCharge": 28.0, "fuelSurcharge": 3.5},
        ],
    });
    ReplayTransport::new().respond(endpoint, WireResponse::ok(quotes.to_string()))
}
