//! CoAP DNS Gateway Infrastructure Layer
pub mod coap;
pub mod dns;
