use async_trait::async_trait;
use coap_gateway_domain::DomainError;
use std::net::Ipv4Addr;

/// Upstream A-record resolution port.
///
/// Implementations issue one fresh synchronous query per call — no
/// caching, no retry — and must be safe to invoke concurrently for
/// distinct requests.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve the A records for `hostname`, preserving the order of
    /// the upstream answer section.
    ///
    /// A success response with zero A records is `Ok(vec![])`, not an
    /// error; `Err` means the query failed in transit or the upstream
    /// reported a non-success response code.
    async fn resolve_a(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError>;
}
