use coap_gateway_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size accepted from the upstream.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// One-shot DNS forwarder: a single UDP round trip to a fixed
/// upstream, no retry, no fallback.
pub struct DnsForwarder {
    server: SocketAddr,
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    /// Send `query_bytes` and block for exactly one reply.
    pub async fn exchange(&self, query_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await.map_err(|e| {
            DomainError::UpstreamTransport {
                server: self.server.to_string(),
                detail: format!("Failed to bind socket: {}", e),
            }
        })?;

        socket
            .connect(self.server)
            .await
            .map_err(|e| DomainError::UpstreamTransport {
                server: self.server.to_string(),
                detail: format!("Failed to connect: {}", e),
            })?;

        socket
            .send(query_bytes)
            .await
            .map_err(|e| DomainError::UpstreamTransport {
                server: self.server.to_string(),
                detail: format!("Failed to send query: {}", e),
            })?;

        debug!(server = %self.server, bytes_sent = query_bytes.len(), "DNS query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let len = tokio::time::timeout(self.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| DomainError::UpstreamTransport {
                server: self.server.to_string(),
                detail: format!("Failed to receive response: {}", e),
            })?;

        recv_buf.truncate(len);
        debug!(server = %self.server, bytes_received = len, "DNS response received");

        Ok(recv_buf)
    }
}
