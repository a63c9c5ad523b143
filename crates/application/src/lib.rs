//! CoAP DNS Gateway Application Layer
pub mod ports;
pub mod use_cases;
