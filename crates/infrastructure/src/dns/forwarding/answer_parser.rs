use coap_gateway_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;

/// The parts of an upstream reply the gateway acts on.
#[derive(Debug, Clone)]
pub struct AnswerSection {
    /// A-record addresses in upstream answer order.
    pub addresses: Vec<Ipv4Addr>,
    pub rcode: ResponseCode,
}

impl AnswerSection {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct AnswerParser;

impl AnswerParser {
    /// Parse a raw upstream reply.
    ///
    /// Only `RData::A` answers are extracted; every other record kind
    /// (CNAME included) is skipped, never followed. Order is
    /// preserved so the first address reported upstream stays first.
    pub fn parse(response_bytes: &[u8]) -> Result<AnswerSection, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code;
        let mut addresses = Vec::new();

        for record in &message.answers {
            match &record.data {
                RData::A(a) => addresses.push(a.0),
                _ => {
                    debug!(record_type = %record.record_type(), "Skipping non-A answer record");
                }
            }
        }

        Ok(AnswerSection { addresses, rcode })
    }
}
