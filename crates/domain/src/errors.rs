use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid CoAP message: {0}")]
    InvalidCoapMessage(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Upstream transport error ({server}): {detail}")]
    UpstreamTransport { server: String, detail: String },

    #[error("Upstream returned non-success response: {rcode}")]
    UpstreamRcode { rcode: String },
}

impl DomainError {
    /// True for failures where the upstream answered but signalled an
    /// error, as opposed to the query never completing.
    pub fn is_upstream_rcode(&self) -> bool {
        matches!(self, DomainError::UpstreamRcode { .. })
    }
}
