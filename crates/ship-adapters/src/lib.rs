//! ship-adapters: capa de adaptación modelo unificado ↔ carriers.
//!
//! Este crate provee:
//! - El modelo de datos unificado (`models`) y la configuración por carrier
//!   (`settings`).
//! - El contrato `CarrierAdapter` y un registro cerrado de carriers
//!   (`carrier`), con implementaciones para Canada Post y eShipper.
//! - La frontera con el transporte (`transport`) y el `Gateway` que encadena
//!   envelope → pipeline → transporte → parser.
//!
//! Nota: el núcleo (`ship-core`) no conoce ningún formato de carrier; toda la
//! traducción de campos vive aquí.

pub mod carrier;
pub mod carriers;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod settings;
pub mod transport;

pub use carrier::{Carrier, CarrierAdapter, CarrierRegistry};
pub use errors::{AdapterError, GatewayError};
pub use gateway::{Gateway, RateOutcome, ShipmentOutcome};
pub use settings::CarrierSettings;
pub use transport::{Method, ReplayTransport, Transport, WireRequest, WireResponse};
