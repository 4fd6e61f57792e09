//! ShipFlow Rust Library
//!
//! Capa de aplicación sobre `ship-core` y `ship-adapters`:
//! - `config`: configuración cargada del entorno (.env).
//! - `errors`: error de nivel superior que agrupa los de cada crate.
//! - `demo`: requests y transporte pregrabado usados por el binario.

pub mod config;
pub mod demo;
pub mod errors;

pub use config::AppConfig;
pub use errors::CoreError;
