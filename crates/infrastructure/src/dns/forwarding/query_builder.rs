//! DNS query builder.
//!
//! Constructs the single A-record query the gateway sends upstream,
//! in wire format, using `hickory-proto`.

use coap_gateway_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct QueryBuilder;

impl QueryBuilder {
    /// Build a recursive A/IN query for `hostname` and serialize it to
    /// wire format.
    ///
    /// The name is forced fully-qualified so "example.com" and
    /// "example.com." produce the same question. RD is set; the
    /// message id is random for request/response matching.
    pub fn build_a_query(hostname: &str) -> Result<Vec<u8>, DomainError> {
        let mut name = Name::from_str(hostname).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid hostname '{}': {}", hostname, e))
        })?;
        name.set_fqdn(true);

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::A);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.metadata.recursion_desired = true;
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS query: {}", e))
        })?;

        Ok(buf)
    }
}
