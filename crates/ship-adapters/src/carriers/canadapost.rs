//! Canada Post: creación de envío en dos llamadas.
//!
//! 1. `contract_shipment` / `non_contract_shipment` (crítico): crea el envío.
//!    El id del paso depende de si la cuenta tiene contrato.
//! 2. `shipment_label` (opcional, fallback `""`): sigue el link `rel=label`
//!    de la respuesta anterior. Si la creación devolvió mensajes no se pide
//!    etiqueta; si no hay link, el paso falla de forma recuperable.

use indexmap::IndexMap;
use serde_json::{json, Value};
use ship_core::{Deserializable, FnStep, Job, Pipeline, Serializable, StepContext, StepError};

use crate::carrier::{Carrier, CarrierAdapter};
use crate::errors::AdapterError;
use crate::models::{Address, Message, ShipmentDetails, ShipmentRequest};
use crate::settings::CarrierSettings;
use crate::transport::WireRequest;

pub const CONTRACT_STEP: &str = "contract_shipment";
pub const NON_CONTRACT_STEP: &str = "non_contract_shipment";
pub const LABEL_STEP: &str = "shipment_label";

const SANDBOX_URL: &str = "https://ct.soa-gw.canadapost.ca";
const PRODUCTION_URL: &str = "https://soa-gw.canadapost.ca";

#[derive(Debug, Clone, Copy, Default)]
pub struct CanadaPost;

/// Endpoint de creación según el tipo de cuenta.
pub fn shipment_endpoint(settings: &CarrierSettings) -> String {
    let base = if settings.test_mode { SANDBOX_URL } else { PRODUCTION_URL };
    let customer = &settings.account_number;
    if settings.has_contract() {
        format!("{base}/rs/{customer}/{customer}/shipment")
    } else {
        format!("{base}/rs/{customer}/ncshipment")
    }
}

impl CarrierAdapter for CanadaPost {
    fn carrier(&self) -> Carrier {
        Carrier::CanadaPost
    }

    fn shipment_request(&self,
                        payload: &ShipmentRequest,
                        settings: &CarrierSettings)
                        -> Result<Serializable<Pipeline>, AdapterError> {
        if payload.parcels.is_empty() {
            return Err(AdapterError::InvalidPayload("at least one parcel is required".into()));
        }
        let step_id = if settings.has_contract() { CONTRACT_STEP } else { NON_CONTRACT_STEP };
        let create = WireRequest::post(shipment_endpoint(settings), shipment_body(payload, settings)).to_value();

        let pipeline = Pipeline::builder().step(FnStep::critical(step_id, move |_| {
                                                  Ok(Job::new(step_id).with_data(create.clone()))
                                              }))
                                          .step(FnStep::optional(LABEL_STEP, "", label_job))
                                          .build()?;
        Ok(Serializable::new(pipeline))
    }

    fn parse_shipment_response(&self,
                               response: Deserializable<IndexMap<String, Value>>,
                               settings: &CarrierSettings)
                               -> (Option<ShipmentDetails>, Vec<Message>) {
        let results = response.deserialize();
        let Some(shipment) = results.get(CONTRACT_STEP).or_else(|| results.get(NON_CONTRACT_STEP)) else {
            return (None, Vec::new());
        };
        let messages = parse_messages(shipment, settings);
        if !messages.is_empty() {
            return (None, messages);
        }
        (extract_details(shipment, results.get(LABEL_STEP), settings), messages)
    }
}

fn label_job(ctx: &StepContext<'_>) -> Result<Job, StepError> {
    let response = ctx.previous()
                      .ok_or_else(|| StepError::malformed("shipment response missing"))?;
    if has_messages(response) {
        return Ok(Job::new(LABEL_STEP).with_fallback(""));
    }
    let href = response.get("links")
                       .and_then(Value::as_array)
                       .and_then(|links| links.iter().find(|l| l["rel"] == "label"))
                       .and_then(|l| l["href"].as_str());
    match href {
        Some(href) => Ok(Job::new(LABEL_STEP).with_data(WireRequest::get(href).to_value())
                                             .with_fallback("")),
        None => Err(StepError::soft("shipment response has no label link")),
    }
}

fn has_messages(response: &Value) -> bool {
    response.get("messages")
            .and_then(Value::as_array)
            .is_some_and(|m| !m.is_empty())
}

fn parse_messages(response: &Value, settings: &CarrierSettings) -> Vec<Message> {
    response.get("messages")
            .and_then(Value::as_array)
            .map(|items| {
                items.iter()
                     .map(|m| Message { carrier_id: settings.carrier_id.clone(),
                                        carrier_name: Carrier::CanadaPost.to_string(),
                                        code: text(&m["code"]),
                                        message: text(&m["description"]),
                                        details: None })
                     .collect()
            })
            .unwrap_or_default()
}

fn extract_details(shipment: &Value, label: Option<&Value>, settings: &CarrierSettings) -> Option<ShipmentDetails> {
    let tracking_number = shipment.get("tracking-pin")?.as_str()?.to_string();
    let shipment_identifier = shipment.get("shipment-id")?.as_str()?.to_string();
    let label = label.and_then(|l| l.get("label"))
                     .and_then(Value::as_str)
                     .map(str::to_string);
    Some(ShipmentDetails { carrier_id: settings.carrier_id.clone(),
                           carrier_name: Carrier::CanadaPost.to_string(),
                           tracking_number,
                           shipment_identifier,
                           label })
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn shipment_body(payload: &ShipmentRequest, settings: &CarrierSettings) -> Value {
    let parcel = &payload.parcels[0];
    let mut spec = json!({
        "service-code": payload.service,
        "sender": {
            "company": payload.shipper.company_name,
            "contact-phone": payload.shipper.phone_number,
            "address-details": address(&payload.shipper),
        },
        "destination": {
            "name": payload.recipient.person_name,
            "company": payload.recipient.company_name,
            "address-details": address(&payload.recipient),
        },
        "parcel-characteristics": {
            "weight": (payload.total_weight() * 1000.0).round() / 1000.0,
            "dimensions": parcel.has_dimensions().then(|| json!({
                "length": parcel.length,
                "width": parcel.width,
                "height": parcel.height,
            })),
        },
        "references": { "customer-ref-1": payload.reference },
    });
    if settings.has_contract() {
        spec["settlement-info"] = json!({
            "contract-id": settings.contract_id,
            "intended-method-of-payment": "Account",
        });
    }
    json!({
        "requested-shipping-point": payload.shipper.postal_code.replace(' ', ""),
        "delivery-spec": spec,
    })
}

fn address(a: &Address) -> Value {
    json!({
        "address-line-1": a.address_line1,
        "address-line-2": a.address_line2,
        "city": a.city,
        "prov-state": a.state_code,
        "country-code": a.country_code,
        "postal-zip-code": a.postal_code.replace(' ', ""),
    })
}
