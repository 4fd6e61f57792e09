//! Implementaciones de `CarrierAdapter`.

pub mod canadapost;
pub mod eshipper;

pub use canadapost::CanadaPost;
pub use eshipper::EShipper;
