//! Envelopes de (de)serialización.
//!
//! Un envelope envuelve un valor junto con la función que lo convierte a (o
//! desde) el formato de cable de un carrier. La conversión ocurre sólo al
//! llamar `serialize()` / `deserialize()`, y cada materialización queda
//! registrada en el log con independencia de la forma del payload.

mod deserializable;
mod serializable;
mod shape;

pub use deserializable::Deserializable;
pub use serializable::Serializable;
pub use shape::describe_payload;
