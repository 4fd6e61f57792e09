//! Un logger que falla no debe afectar a la (de)serialización.

use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;
use ship_core::{Deserializable, Serializable};

struct Broken;

impl Log for Broken {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, _record: &Record) {
        panic!("log sink unavailable");
    }

    fn flush(&self) {}
}

static LOGGER: Broken = Broken;

fn init() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
}

#[test]
fn serialize_survives_broken_logger_for_every_shape() {
    init();
    assert_eq!(Serializable::new(json!(["a", "b"])).serialize(), json!(["a", "b"]));
    assert_eq!(Serializable::new(json!({"k": "v"})).serialize(), json!({"k": "v"}));
    assert_eq!(Serializable::new(json!(3.5)).serialize(), json!(3.5));
}

#[test]
fn deserialize_survives_broken_logger_for_every_shape() {
    init();
    assert_eq!(Deserializable::new(json!(["a"])).deserialize(), json!(["a"]));
    assert_eq!(Deserializable::new(json!({"k": 1})).deserialize(), json!({"k": 1}));
    assert_eq!(Deserializable::new("raw".to_string()).deserialize(), "raw");
}
