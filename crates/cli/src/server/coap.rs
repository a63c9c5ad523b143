use coap_gateway_infrastructure::coap::GatewayHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{error, info};

/// Inbound datagram buffer, above the RFC 7252 1152-byte message
/// size guideline.
const RECV_BUF_SIZE: usize = 4096;

/// Bind the gateway socket and serve forever. A bind failure
/// propagates out and terminates the process; per-datagram errors are
/// logged and the loop keeps going.
pub async fn start_coap_server(bind_addr: String, handler: GatewayHandler) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(UdpSocket::bind(socket_addr).await?);
    let handler = Arc::new(handler);

    info!(bind_address = %socket_addr, "CoAP gateway listening");

    let mut recv_buf = [0u8; RECV_BUF_SIZE];
    loop {
        let (len, peer) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_datagram(&datagram).await {
                if let Err(e) = socket.send_to(&response, peer).await {
                    error!(error = %e, peer = %peer, "Failed to send response");
                }
            }
        });
    }
}
