use super::DomainError;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Payload returned when resolution fails. Clients cannot tell a
/// genuine NXDOMAIN apart from an unreachable upstream; both collapse
/// to this string at the CoAP boundary.
pub const NXDOMAIN_SENTINEL: &str = "NXDOMAIN";

/// A hostname lookup extracted from an inbound CoAP payload.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub hostname: Arc<str>,
}

impl LookupRequest {
    pub fn new(hostname: impl Into<Arc<str>>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }
}

/// Classified result of one upstream query.
///
/// The client-visible payload conflates transport failures with
/// non-success response codes; keeping the kinds separate here makes
/// `into_payload` the only place where that collapse happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// At least one A record; carries the first address in upstream
    /// answer order.
    Resolved(Ipv4Addr),
    /// Success response with zero A records (CNAME-only answers land
    /// here — alias chains are never followed).
    NoRecords,
    /// The query never completed (send/recv failure or timeout).
    TransportError,
    /// The upstream answered with a non-success response code.
    NonSuccessStatus,
}

impl LookupOutcome {
    pub fn from_error(error: &DomainError) -> Self {
        if error.is_upstream_rcode() {
            LookupOutcome::NonSuccessStatus
        } else {
            LookupOutcome::TransportError
        }
    }

    /// Renders the CoAP response payload.
    pub fn into_payload(self) -> String {
        match self {
            LookupOutcome::Resolved(addr) => addr.to_string(),
            LookupOutcome::NoRecords => String::new(),
            LookupOutcome::TransportError | LookupOutcome::NonSuccessStatus => {
                NXDOMAIN_SENTINEL.to_string()
            }
        }
    }
}
