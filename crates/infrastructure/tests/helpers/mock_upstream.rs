#![allow(dead_code)]
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock upstream does with every query it receives.
#[derive(Debug, Clone, Copy)]
pub enum UpstreamBehavior {
    /// NoError answer with the given A records, in order.
    Answer(&'static [[u8; 4]]),
    /// NoError answer containing a single CNAME and no A record.
    CnameOnly,
    /// Respond with the given rcode and an empty answer section.
    Rcode(u8),
    /// Swallow the query; the client will hit its timeout.
    Silent,
}

/// Minimal scripted DNS upstream bound to a loopback UDP port.
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start(behavior: UpstreamBehavior) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if matches!(behavior, UpstreamBehavior::Silent) {
                                continue;
                            }
                            let response = Self::build_response(&buf[..len], behavior);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_response(query: &[u8], behavior: UpstreamBehavior) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let (rcode, ancount) = match behavior {
            UpstreamBehavior::Answer(addrs) => (0, addrs.len() as u16),
            UpstreamBehavior::CnameOnly => (0, 1),
            UpstreamBehavior::Rcode(rcode) => (rcode, 0),
            UpstreamBehavior::Silent => unreachable!(),
        };

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]); // id
        response.push(0x81); // QR + RD
        response.push(0x80 | rcode); // RA + rcode
        response.extend_from_slice(&query[4..6]); // QDCOUNT
        response.extend_from_slice(&ancount.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // NS/AR counts

        // echo the question section
        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        match behavior {
            UpstreamBehavior::Answer(addrs) => {
                for addr in addrs {
                    response.extend_from_slice(&[
                        0xC0, 0x0C, // name pointer to the question
                        0x00, 0x01, // TYPE A
                        0x00, 0x01, // CLASS IN
                        0x00, 0x00, 0x00, 0x3C, // TTL 60
                        0x00, 0x04, // RDLENGTH
                    ]);
                    response.extend_from_slice(addr);
                }
            }
            UpstreamBehavior::CnameOnly => {
                response.extend_from_slice(&[
                    0xC0, 0x0C, // name pointer
                    0x00, 0x05, // TYPE CNAME
                    0x00, 0x01, // CLASS IN
                    0x00, 0x00, 0x00, 0x3C, // TTL 60
                    0x00, 0x0D, // RDLENGTH 13
                ]);
                response.extend_from_slice(b"\x07example\x03net\x00");
            }
            _ => {}
        }

        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
