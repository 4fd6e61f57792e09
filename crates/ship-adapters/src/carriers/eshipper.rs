//! eShipper: cotización en una sola llamada.

use serde_json::{json, Value};
use ship_core::{Deserializable, Serializable};

use crate::carrier::{Carrier, CarrierAdapter};
use crate::errors::AdapterError;
use crate::models::{Address, ChargeDetails, Message, RateDetails, RateRequest};
use crate::settings::CarrierSettings;
use crate::transport::WireRequest;

const SANDBOX_URL: &str = "https://test.eshipper.com";
const PRODUCTION_URL: &str = "https://web.eshipper.com";
const API_VERSION: &str = "3.0.0";
/// Servicio "todos": el carrier cotiza con cada servicio disponible.
const ALL_SERVICES: &str = "0";
const DEFAULT_CURRENCY: &str = "CAD";

#[derive(Debug, Clone, Copy, Default)]
pub struct EShipper;

pub fn quote_endpoint(settings: &CarrierSettings) -> String {
    let base = if settings.test_mode { SANDBOX_URL } else { PRODUCTION_URL };
    format!("{base}/rpc2/quote")
}

impl CarrierAdapter for EShipper {
    fn carrier(&self) -> Carrier {
        Carrier::EShipper
    }

    fn rate_request(&self,
                    payload: &RateRequest,
                    settings: &CarrierSettings)
                    -> Result<Serializable<Value, WireRequest>, AdapterError> {
        if payload.parcels.is_empty() {
            return Err(AdapterError::InvalidPayload("at least one parcel is required".into()));
        }
        if let Some(index) = payload.parcels.iter().position(|p| !p.has_dimensions()) {
            return Err(AdapterError::InvalidPayload(format!("parcel {index} is missing dimensions")));
        }

        let packages: Vec<Value> = payload.parcels
                                          .iter()
                                          .map(|p| {
                                              json!({
                                                  "weight": p.weight,
                                                  "length": p.length,
                                                  "width": p.width,
                                                  "height": p.height,
                                              })
                                          })
                                          .collect();
        let body = json!({
            "username": settings.username,
            "password": settings.password,
            "version": API_VERSION,
            "QuoteRequest": {
                "serviceId": payload.services.first().map(String::as_str).unwrap_or(ALL_SERVICES),
                "From": party(&payload.shipper),
                "To": party(&payload.recipient),
                "Packages": { "type": "Package", "Package": packages },
            },
        });

        let endpoint = quote_endpoint(settings);
        Ok(Serializable::with_serializer(body, move |b: &Value| WireRequest::post(endpoint.clone(), b.clone())))
    }

    fn parse_rate_response(&self,
                           response: Deserializable<Value>,
                           settings: &CarrierSettings)
                           -> (Vec<RateDetails>, Vec<Message>) {
        let response = response.deserialize();
        let rates = response.get("quotes")
                            .and_then(Value::as_array)
                            .map(|quotes| quotes.iter().map(|q| extract_rate(q, settings)).collect())
                            .unwrap_or_default();
        (rates, parse_errors(&response, settings))
    }
}

fn party(a: &Address) -> Value {
    json!({
        "company": a.company_name.as_deref().unwrap_or(" "),
        "attention": a.person_name,
        "phone": a.phone_number,
        "address1": a.address_line1,
        "address2": a.address_line2,
        "city": a.city,
        "state": a.state_code,
        "zip": a.postal_code,
        "country": a.country_code,
    })
}

fn extract_rate(quote: &Value, settings: &CarrierSettings) -> RateDetails {
    let currency = quote.get("currency")
                        .and_then(Value::as_str)
                        .unwrap_or(DEFAULT_CURRENCY)
                        .to_string();
    let surcharges = quote.get("surcharges")
                          .and_then(Value::as_array)
                          .into_iter()
                          .flatten()
                          .map(|s| (s.get("name").and_then(Value::as_str).unwrap_or("Surcharge"), s.get("amount")));
    let extra_charges = [("Base charge", quote.get("baseCharge")), ("Fuel surcharge", quote.get("fuelSurcharge"))]
        .into_iter()
        .chain(surcharges)
        .filter_map(|(name, amount)| {
            decimal(amount).filter(|a| *a != 0.0)
                           .map(|amount| ChargeDetails { name: name.to_string(),
                                                         amount,
                                                         currency: currency.clone() })
        })
        .collect();

    RateDetails { carrier_id: settings.carrier_id.clone(),
                  carrier_name: Carrier::EShipper.to_string(),
                  service: quote.get("serviceName")
                                .or_else(|| quote.get("serviceId"))
                                .map(text)
                                .unwrap_or_default(),
                  currency: currency.clone(),
                  total_charge: decimal(quote.get("totalCharge")).unwrap_or(0.0),
                  transit_days: quote.get("transitDays").and_then(days),
                  extra_charges }
}

fn parse_errors(response: &Value, settings: &CarrierSettings) -> Vec<Message> {
    response.get("errors")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|e| Message { carrier_id: settings.carrier_id.clone(),
                               carrier_name: Carrier::EShipper.to_string(),
                               code: e.get("code").map(text).unwrap_or_default(),
                               message: e.get("message").map(text).unwrap_or_default(),
                               details: None })
            .collect()
}

fn days(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Montos llegan como número o como texto; se redondean a centavos.
fn decimal(value: Option<&Value>) -> Option<f64> {
    let raw = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    Some((raw * 100.0).round() / 100.0)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
