//! Cada materialización de un envelope produce una sola entrada de log con la
//! forma del payload.

use std::sync::Mutex;

use indexmap::IndexMap;
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;
use ship_core::{Deserializable, Serializable};

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        LINES.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

fn init() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Info);
}

fn lines_with(marker: &str) -> Vec<String> {
    LINES.lock().unwrap().iter().filter(|l| l.contains(marker)).cloned().collect()
}

#[test]
fn list_payload_is_one_entry_with_every_element() {
    init();
    let env = Serializable::new(json!(["alpha-list-1", "alpha-list-2"]));
    assert_eq!(env.serialize(), json!(["alpha-list-1", "alpha-list-2"]));

    let lines = lines_with("alpha-list-1");
    assert_eq!(lines, vec!["serialized request:: [alpha-list-1, alpha-list-2]".to_string()]);
}

#[test]
fn mapping_payload_is_logged_key_by_key() {
    init();
    let env = Serializable::with_serializer(json!({"beta-key": "v1", "count": 2}), |v: &serde_json::Value| v.to_string());
    env.serialize();

    let lines = lines_with("beta-key");
    assert_eq!(lines, vec!["serialized request:: {beta-key: v1, count: 2}".to_string()]);
}

#[test]
fn scalar_response_is_logged_as_is() {
    init();
    let env = Deserializable::with_deserializer("<gamma-reply/>".to_string(), |raw: &String| raw.len());
    assert_eq!(env.deserialize(), 14);

    let lines = lines_with("gamma-reply");
    assert_eq!(lines, vec!["deserialized response:: <gamma-reply/>".to_string()]);
}

#[test]
fn every_call_logs_again() {
    init();
    let env = Serializable::new("delta-scalar".to_string());
    env.serialize();
    env.serialize();
    assert_eq!(lines_with("delta-scalar").len(), 2);
}

#[test]
fn scalar_request_is_logged_in_wire_format() {
    init();
    let env = Serializable::with_serializer("zeta-parcel".to_string(), |v: &String| format!("<soap:Body>{v}</soap:Body>"));
    assert_eq!(env.serialize(), "<soap:Body>zeta-parcel</soap:Body>");

    let lines = lines_with("zeta-parcel");
    assert_eq!(lines, vec!["serialized request:: <soap:Body>zeta-parcel</soap:Body>".to_string()]);
}

#[test]
fn ordered_results_are_logged_in_execution_order() {
    init();
    let mut results = IndexMap::new();
    results.insert("shipment_label".to_string(), json!("epsilon-label"));
    results.insert("contract_shipment".to_string(), json!({"id": "1"}));
    Deserializable::new(results).deserialize();

    let lines = lines_with("epsilon-label");
    assert_eq!(lines,
               vec![r#"deserialized response:: {shipment_label: epsilon-label, contract_shipment: {"id":"1"}}"#.to_string()]);
}
