//! Frontera con el transporte de red.
//!
//! El transporte es un colaborador externo: recibe un `WireRequest` ya
//! construido por el adaptador y devuelve la respuesta cruda. Reintentos y
//! timeouts son responsabilidad suya; un timeout debe llegar como
//! `StepError::Transport`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ship_core::StepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    pub method: Method,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl WireRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self { method: Method::Get,
               endpoint: endpoint.into(),
               body: None }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post,
               endpoint: endpoint.into(),
               body: Some(body) }
    }

    /// Forma JSON usada como `data` de un `Job`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("method".into(), Value::String(self.method.as_str().into()));
        map.insert("endpoint".into(), Value::String(self.endpoint.clone()));
        if let Some(body) = &self.body {
            map.insert("body".into(), body.clone());
        }
        Value::Object(map)
    }

    pub fn from_value(value: &Value) -> Result<Self, StepError> {
        serde_json::from_value(value.clone()).map_err(|e| StepError::malformed(format!("job data is not a wire request: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200,
               body: body.into() }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self { status,
               body: body.into() }
    }

    /// Cuerpo JSON. Un 5xx es fallo de transporte; 4xx se devuelve tal cual
    /// porque los carriers reportan ahí sus mensajes de error.
    pub fn json(&self) -> Result<Value, StepError> {
        if self.status >= 500 {
            return Err(StepError::transport(format!("HTTP {} from carrier", self.status)));
        }
        serde_json::from_str(&self.body).map_err(|e| StepError::malformed(format!("invalid JSON body: {e}")))
    }
}

pub trait Transport: Send + Sync {
    fn send(&self, request: &WireRequest) -> Result<WireResponse, StepError>;
}

type Scripted = Result<WireResponse, StepError>;

/// Transporte con respuestas pregrabadas por endpoint (FIFO). Registra cada
/// request enviado.
#[derive(Debug, Default)]
pub struct ReplayTransport {
    script: Mutex<HashMap<String, VecDeque<Scripted>>>,
    sent: Mutex<Vec<WireRequest>>,
}

impl ReplayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: impl Into<String>, response: WireResponse) -> Self {
        self.push(endpoint, Ok(response));
        self
    }

    pub fn fail(self, endpoint: impl Into<String>, error: StepError) -> Self {
        self.push(endpoint, Err(error));
        self
    }

    pub fn push(&self, endpoint: impl Into<String>, outcome: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(endpoint.into())
            .or_default()
            .push_back(outcome);
    }

    pub fn sent(&self) -> Vec<WireRequest> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Transport for ReplayTransport {
    fn send(&self, request: &WireRequest) -> Result<WireResponse, StepError> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
        let next = self.script
                       .lock()
                       .unwrap_or_else(PoisonError::into_inner)
                       .get_mut(&request.endpoint)
                       .and_then(VecDeque::pop_front);
        next.unwrap_or_else(|| {
                Err(StepError::transport(format!("no response for {} {}",
                                                 request.method.as_str(),
                                                 request.endpoint)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_value_roundtrips_through_job_data() {
        let req = WireRequest::post("https://x/shipment", json!({"weight": 1.5}));
        assert_eq!(req.to_value(),
                   json!({"method": "POST", "endpoint": "https://x/shipment", "body": {"weight": 1.5}}));
        assert_eq!(WireRequest::from_value(&req.to_value()).unwrap(), req);
    }

    #[test]
    fn non_request_data_is_malformed() {
        let err = WireRequest::from_value(&json!("just a string")).unwrap_err();
        assert!(matches!(err, StepError::Malformed(_)));
    }

    #[test]
    fn server_errors_are_transport_failures() {
        let err = WireResponse::with_status(503, "busy").json().unwrap_err();
        assert_eq!(err, StepError::transport("HTTP 503 from carrier"));
        assert!(matches!(WireResponse::ok("<html>").json(), Err(StepError::Malformed(_))));
        assert_eq!(WireResponse::with_status(400, r#"{"messages":[]}"#).json().unwrap(), json!({"messages": []}));
    }

    #[test]
    fn replay_is_fifo_per_endpoint_and_records_requests() {
        let t = ReplayTransport::new().respond("/a", WireResponse::ok("1"))
                                      .respond("/a", WireResponse::ok("2"));
        assert_eq!(t.send(&WireRequest::get("/a")).unwrap().body, "1");
        assert_eq!(t.send(&WireRequest::get("/a")).unwrap().body, "2");
        assert!(matches!(t.send(&WireRequest::get("/a")), Err(StepError::Transport(_))));
        assert_eq!(t.sent().len(), 3);
    }
}
