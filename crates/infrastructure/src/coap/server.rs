use super::codec;
use coap_gateway_application::use_cases::HandleLookupUseCase;
use coap_gateway_domain::MessageCode;
use std::sync::Arc;
use tracing::debug;

/// The resource path the lookup handler is bound to.
const LOOKUP_PATH: &str = "ip";

/// Datagram-level entry point: decodes an inbound CoAP datagram,
/// routes `/ip` requests to the lookup use case, and encodes any
/// response. Returns `None` when nothing should be sent back.
pub struct GatewayHandler {
    lookup: Arc<HandleLookupUseCase>,
}

impl GatewayHandler {
    pub fn new(lookup: Arc<HandleLookupUseCase>) -> Self {
        Self { lookup }
    }

    pub async fn handle_datagram(&self, buf: &[u8]) -> Option<Vec<u8>> {
        let request = match codec::decode(buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = buf.len(), "Dropping undecodable datagram");
                return None;
            }
        };

        if !request.code.is_request() {
            debug!(code = %request.code, "Ignoring non-request message");
            return None;
        }

        if request.uri_path != [LOOKUP_PATH] {
            debug!(path = ?request.uri_path, "No resource at path");
            // 4.04 stops the client's retransmit timer; NON requests
            // stay unanswered.
            if request.is_confirmable() {
                return Some(codec::encode(&request.acknowledgement(MessageCode::NotFound)));
            }
            return None;
        }

        let response = self.lookup.execute(&request).await?;
        Some(codec::encode(&response))
    }
}
