//! Gateway: une adaptador, envelope, pipeline y transporte.
//!
//! Flujo de una creación de envío:
//! `shipment_request` → `serialize()` → `Pipeline::apply(send)` →
//! `Deserializable::new(resultados)` → `parse_shipment_response`.
//! Los pasos que cayeron a su fallback se reportan como mensajes `PARTIAL`.

use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ship_core::{Deserializable, EventStore, Job, NullEventStore, PipelineOutput, StepError};

use crate::carrier::{Carrier, CarrierRegistry};
use crate::errors::GatewayError;
use crate::models::{Message, RateDetails, RateRequest, ShipmentDetails, ShipmentRequest};
use crate::settings::CarrierSettings;
use crate::transport::{Transport, WireRequest};

/// Código de los mensajes generados por pasos que usaron su fallback.
pub const PARTIAL_CODE: &str = "PARTIAL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentOutcome {
    pub shipment: Option<ShipmentDetails>,
    pub messages: Vec<Message>,
    /// Fingerprint de la ejecución del pipeline.
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOutcome {
    pub rates: Vec<RateDetails>,
    pub messages: Vec<Message>,
}

#[derive(Clone)]
pub struct Gateway {
    registry: CarrierRegistry,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    pub fn new(registry: CarrierRegistry, transport: Arc<dyn Transport>) -> Self {
        Self { registry,
               transport }
    }

    /// Gateway con todos los carriers incluidos.
    pub fn with_defaults(transport: Arc<dyn Transport>) -> Self {
        Self::new(CarrierRegistry::with_defaults(), transport)
    }

    pub fn registry(&self) -> &CarrierRegistry {
        &self.registry
    }

    pub fn create_shipment(&self,
                           carrier: Carrier,
                           settings: &CarrierSettings,
                           payload: &ShipmentRequest)
                           -> Result<ShipmentOutcome, GatewayError> {
        self.create_shipment_with_events(carrier, settings, payload, &mut NullEventStore)
    }

    /// Igual que `create_shipment`, registrando la traza del pipeline en `events`.
    pub fn create_shipment_with_events<E>(&self,
                                          carrier: Carrier,
                                          settings: &CarrierSettings,
                                          payload: &ShipmentRequest,
                                          events: &mut E)
                                          -> Result<ShipmentOutcome, GatewayError>
        where E: EventStore + ?Sized
    {
        let adapter = self.registry.get(carrier)?;
        let request = adapter.shipment_request(payload, settings)?;
        info!("{carrier}: creating shipment ({} steps)", request.value().len());

        let pipeline = request.serialize();
        let output = pipeline.apply_with_events(|job: &Job| self.send_job(job), events)?;
        let messages = partial_messages(&output, carrier, settings);
        let fingerprint = output.fingerprint.clone();

        let (shipment, mut parsed) = adapter.parse_shipment_response(Deserializable::new(output.into_results()), settings);
        parsed.extend(messages);
        debug!("{carrier}: shipment parsed (details: {}, messages: {})", shipment.is_some(), parsed.len());

        Ok(ShipmentOutcome { shipment,
                             messages: parsed,
                             fingerprint })
    }

    pub fn fetch_rates(&self,
                       carrier: Carrier,
                       settings: &CarrierSettings,
                       payload: &RateRequest)
                       -> Result<RateOutcome, GatewayError> {
        let adapter = self.registry.get(carrier)?;
        let request = adapter.rate_request(payload, settings)?;
        info!("{carrier}: fetching rates");

        let wire = request.serialize();
        let response = self.send(&wire)?;
        let (rates, messages) = adapter.parse_rate_response(Deserializable::new(response), settings);
        debug!("{carrier}: {} rates, {} messages", rates.len(), messages.len());

        Ok(RateOutcome { rates,
                         messages })
    }

    fn send_job(&self, job: &Job) -> Result<Value, StepError> {
        let data = job.data
                      .as_ref()
                      .ok_or_else(|| StepError::malformed(format!("job '{}' has no request", job.id)))?;
        self.send(&WireRequest::from_value(data)?)
    }

    fn send(&self, request: &WireRequest) -> Result<Value, StepError> {
        debug!("{} {}", request.method.as_str(), request.endpoint);
        self.transport.send(request)?.json()
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").field("registry", &self.registry).finish_non_exhaustive()
    }
}

fn partial_messages(output: &PipelineOutput, carrier: Carrier, settings: &CarrierSettings) -> Vec<Message> {
    output.warnings
          .iter()
          .map(|w| Message { carrier_id: settings.carrier_id.clone(),
                             carrier_name: carrier.to_string(),
                             code: PARTIAL_CODE.to_string(),
                             message: w.message.clone(),
                             details: Some(serde_json::json!({ "step": w.step_id })) })
          .collect()
}
