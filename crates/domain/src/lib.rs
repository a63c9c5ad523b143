//! CoAP DNS Gateway Domain Layer
pub mod coap_message;
pub mod config;
pub mod errors;
pub mod lookup;

pub use coap_message::{CoapMessage, ContentFormat, MessageCode, MessageKind};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use lookup::{LookupOutcome, LookupRequest, NXDOMAIN_SENTINEL};
