use crate::ports::DnsResolver;
use coap_gateway_domain::{
    CoapMessage, ContentFormat, LookupOutcome, LookupRequest, MessageCode,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// The request-to-resolution bridge.
///
/// Interprets an inbound CoAP request payload as a hostname, performs
/// one upstream query through the resolver port, and shapes the
/// response according to the request's delivery semantics: confirmable
/// requests get an acknowledgement carrying the result, non-confirmable
/// requests get nothing.
pub struct HandleLookupUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleLookupUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, request: &CoapMessage) -> Option<CoapMessage> {
        let lookup = LookupRequest::new(String::from_utf8_lossy(&request.payload).into_owned());

        // Resolution happens before the delivery-kind check: a
        // non-confirmable request still triggers the upstream query,
        // only the result is discarded.
        let outcome = match self.resolver.resolve_a(&lookup.hostname).await {
            Ok(addresses) => match addresses.first() {
                Some(addr) => LookupOutcome::Resolved(*addr),
                None => LookupOutcome::NoRecords,
            },
            Err(e) => {
                warn!(hostname = %lookup.hostname, error = %e, "Upstream lookup failed");
                LookupOutcome::from_error(&e)
            }
        };

        if !request.is_confirmable() {
            debug!(hostname = %lookup.hostname, "Non-confirmable request, suppressing response");
            return None;
        }

        let mut response = request.acknowledgement(MessageCode::Content);
        response.content_format = Some(ContentFormat::TextPlain);
        response.payload = outcome.into_payload().into_bytes();
        Some(response)
    }
}
