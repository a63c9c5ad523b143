use super::forwarding::{AnswerParser, DnsForwarder, QueryBuilder};
use async_trait::async_trait;
use coap_gateway_application::ports::DnsResolver;
use coap_gateway_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// `DnsResolver` port implementation backed by one plain-UDP exchange
/// per call. Holds only the upstream address and the round-trip
/// timeout, so concurrent lookups are independent.
pub struct UpstreamResolver {
    forwarder: DnsForwarder,
}

impl UpstreamResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            forwarder: DnsForwarder::new(server, timeout),
        }
    }
}

#[async_trait]
impl DnsResolver for UpstreamResolver {
    async fn resolve_a(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let query_bytes = QueryBuilder::build_a_query(hostname)?;
        let response_bytes = self.forwarder.exchange(&query_bytes).await?;
        let section = AnswerParser::parse(&response_bytes)?;

        if !section.is_success() {
            return Err(DomainError::UpstreamRcode {
                rcode: section.rcode.to_string(),
            });
        }

        Ok(section.addresses)
    }
}
